//! # Error Types
//!
//! This module defines error types used throughout the scontrino library.
//!
//! Encoding errors are raised synchronously while a command or document is
//! being built or serialized. Transport errors come from the connection to
//! the device.

use thiserror::Error;

/// Main error type for scontrino operations
#[derive(Debug, Error)]
pub enum ScontrinoError {
    /// A value or multiply field does not hold a non-negative integer
    #[error("Invalid numeric field: {0:?} is not a non-negative integer")]
    InvalidNumericField(String),

    /// A decimal field has no decimal point
    #[error("Invalid decimal field: {0:?} must contain '.'")]
    InvalidDecimalField(String),

    /// A separator literal that no field kind maps to
    #[error("Unsupported separator: {0:?}")]
    UnsupportedSeparator(String),

    /// Payment commands need a terminator whose code ends in 'T'
    #[error("Invalid payment method: terminator {0:?} is not a payment code")]
    InvalidPaymentMethod(String),

    /// Custom payment codes are exactly 3 ASCII alphanumerics
    #[error("Invalid payment code: {0:?} must be 3 alphanumeric characters")]
    InvalidPaymentCode(String),

    /// Customer identifiers are 16 (tax code), 11 (VAT) or 8 (lottery) chars
    #[error("Invalid customer identifier length: {0} (expected 16, 11 or 8)")]
    InvalidIdentifierLength(usize),

    /// Barcodes are 13 (EAN13) or 8 (EAN8) chars
    #[error("Invalid barcode length: {0} (expected 13 or 8)")]
    InvalidBarcodeLength(usize),

    /// Invoices carry between 1 and 5 customer detail lines
    #[error("Invalid customer details count: {0} (expected 1 to 5)")]
    InvalidCustomerDetailsCount(usize),

    /// An invoice without products
    #[error("Invoice requires at least one product")]
    MissingProducts,

    /// An invoice without payments
    #[error("Invoice requires at least one payment")]
    MissingPayments,

    /// Transport-level errors (connection, device lookup)
    #[error("Transport error: {0}")]
    Transport(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON document or configuration parse error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, ScontrinoError>;
