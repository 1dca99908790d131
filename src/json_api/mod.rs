//! # JSON API
//!
//! Deserialize JSON descriptions of fiscal documents into [`Document`]s.
//!
//! This lets tools outside Rust (a POS backend, a shell script) hand a
//! receipt to the CLI without linking the library.
//!
//! ## Example
//!
//! ```
//! use scontrino::json_api::JsonDocument;
//!
//! let json = r#"{
//!     "type": "commercial",
//!     "products": [{"unit_price": 750, "description": "BREAD"}],
//!     "payments": [{"method": "payment-cash"}],
//!     "trailer": "Thank you"
//! }"#;
//!
//! let doc = JsonDocument::parse(json).unwrap();
//! let blocks = doc.encode().unwrap();
//! assert_eq!(blocks.first().map(String::as_str), Some("\"BREAD\"750HR"));
//! ```
//!
//! [`Document`]: crate::document::Document

mod convert;
mod schema;

pub use schema::{
    JsonCommercial, JsonCommercialReversal, JsonCommercialWithInvoice, JsonDocument,
    JsonDocumentId, JsonInvoice, JsonManagement, JsonPayment, JsonPosReversal, JsonProduct,
};
