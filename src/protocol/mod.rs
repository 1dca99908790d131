//! # Epson FP Protocol Implementation
//!
//! This module provides the command builders for the Epson fiscal printer
//! (FP) command language used by Italian fiscal cash registers.
//!
//! ## Wire Grammar
//!
//! Every command is a single ASCII string:
//!
//! ```text
//! command    := field* terminator
//! field      := value separator            (numeric separators)
//!             | opener text closer          (description separators)
//! terminator := [value] code
//! ```
//!
//! | Separator | Literal | Field |
//! |-----------|---------|-------|
//! | Value | `H` | digits, e.g. `750H` |
//! | Decimal | `.` | decimal number, e.g. `5.00` |
//! | Multiply | `*` | quantity, e.g. `2*` |
//! | Description | `"` | quoted text, e.g. `"BREAD"` |
//! | DescriptionDoubleHeight | `~"` | double height text, e.g. `~"BREAD"` |
//!
//! ## Module Structure
//!
//! - [`field`]: Fields and their separators
//! - [`terminator`]: The terminator code table
//! - [`commands`]: The command catalog and [`commands::serialize`]
//!
//! ## Usage Example
//!
//! ```
//! use scontrino::protocol::commands::{Command, Payment, Product};
//! use scontrino::protocol::terminator::TerminatorKind;
//!
//! let sold = Command::from(Product::new(750).description("BREAD"));
//! assert_eq!(sold.encode().unwrap(), "\"BREAD\"750HR");
//!
//! let paid = Command::from(Payment::new(TerminatorKind::PaymentCash).unwrap());
//! assert_eq!(paid.encode().unwrap(), "1T");
//! ```

pub mod commands;
pub mod field;
pub mod terminator;
