//! # Printer Module
//!
//! This module describes how a printer is reached.
//!
//! ## Modules
//!
//! - [`config`]: Connection settings and transport construction

pub mod config;

pub use config::{Connection, PrinterConfig};
