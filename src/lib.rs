//! # Scontrino - Fiscal Printer Library
//!
//! Scontrino is a Rust library for driving Epson fiscal printers (Italian
//! "registratori telematici") through the Epson FP command language. It
//! provides:
//!
//! - **Protocol implementation**: fields, terminators and the command catalog
//! - **Documents**: commercial receipts, returns, cancellations, invoices
//! - **Transport**: TCP, serial and in-memory backends
//!
//! ## Quick Start
//!
//! ```no_run
//! use scontrino::{
//!     document::{Commercial, Document},
//!     protocol::commands::{Payment, Product},
//!     protocol::terminator::TerminatorKind,
//!     transport::{NetworkTransport, Transport},
//! };
//!
//! let receipt = Commercial::new(
//!     vec![Product::new(750).description("BREAD")],
//!     vec![Payment::new(TerminatorKind::PaymentCash)?],
//! );
//!
//! let mut transport = NetworkTransport::new("192.168.1.50", 9100);
//! transport.open()?;
//! transport.print_document(&Document::from(receipt))?;
//! transport.close()?;
//!
//! # Ok::<(), scontrino::ScontrinoError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | Epson FP fields, terminators and commands |
//! | [`document`] | Fiscal documents as ordered command lists |
//! | [`json_api`] | JSON descriptions of documents |
//! | [`transport`] | Communication backends |
//! | [`printer`] | Connection configuration |
//! | [`error`] | Error types |

pub mod document;
pub mod error;
pub mod json_api;
pub mod printer;
pub mod protocol;
pub mod transport;

// Re-exports for convenience
pub use document::Document;
pub use error::{Result, ScontrinoError};
pub use printer::PrinterConfig;
pub use protocol::commands::Command;
pub use transport::Transport;
