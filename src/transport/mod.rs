//! # Printer Transport Layer
//!
//! This module provides communication backends for sending encoded commands
//! to a fiscal printer.
//!
//! ## Available Transports
//!
//! - [`network`]: TCP socket to `host:port`
//! - [`serial`]: serial tty by device path (unix)
//! - [`memory`]: in-memory capture for tests and dry runs
//!
//! ## Write Semantics
//!
//! [`Transport::print_document`] and [`Transport::print_commands`] encode
//! everything first. Only a fully encoded sequence reaches
//! [`Transport::write_blocks`], which writes the blocks in order and flushes
//! once at the end. Nothing is retried.

pub mod memory;
pub mod network;
#[cfg(unix)]
pub mod serial;

pub use memory::MemoryTransport;
pub use network::NetworkTransport;
#[cfg(unix)]
pub use serial::SerialTransport;

use std::io::Write;

use tracing::{debug, warn};

use crate::document::{Document, encode_commands};
use crate::error::{Result, ScontrinoError};
use crate::protocol::commands::Command;

/// A connection to a printer.
pub trait Transport {
    /// Connect to the device. Opening an open transport is a no-op.
    fn open(&mut self) -> Result<()>;

    fn is_open(&self) -> bool;

    /// Disconnect. Closing a closed transport is a no-op.
    fn close(&mut self) -> Result<()>;

    /// Write already-encoded blocks in order, then flush.
    fn write_blocks(&mut self, blocks: &[String]) -> Result<()>;

    /// Encode a whole document and send it.
    ///
    /// A commercial document with invoice is followed by its receipt, see
    /// [`Document::encode_all`].
    fn print_document(&mut self, document: &Document) -> Result<()> {
        let blocks = document.encode_all()?;
        debug!(
            kind = document.kind(),
            commands = blocks.len(),
            "Sending document"
        );
        self.write_blocks(&blocks)
    }

    /// Encode an ad-hoc command sequence and send it.
    fn print_commands(&mut self, commands: &[Command]) -> Result<()> {
        let blocks = encode_commands(commands)?;
        debug!(commands = blocks.len(), "Sending commands");
        self.write_blocks(&blocks)
    }
}

/// Shared write path of the stream-backed transports.
pub(crate) fn write_blocks_to<W: Write>(dst: Option<&mut W>, blocks: &[String]) -> Result<()> {
    let dst = dst.ok_or_else(|| ScontrinoError::Transport("Transport is not open".to_string()))?;

    for block in blocks {
        dst.write_all(block.as_bytes()).map_err(|e| {
            warn!(error = %e, "Write failed");
            ScontrinoError::Transport(format!("Write failed: {}", e))
        })?;
    }

    dst.flush()
        .map_err(|e| ScontrinoError::Transport(format!("Flush failed: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    /// Accepts `limit` bytes, then fails every write.
    struct FailingWriter {
        written: Vec<u8>,
        limit: usize,
    }

    impl Write for FailingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.written.len() + buf.len() > self.limit {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "device gone"));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_blocks_in_order() {
        let mut out = Vec::new();
        let blocks = vec!["j".to_string(), "\"x\"@".to_string(), "J".to_string()];
        write_blocks_to(Some(&mut out), &blocks).unwrap();
        assert_eq!(out, b"j\"x\"@J");
    }

    #[test]
    fn test_write_blocks_requires_open() {
        let err = write_blocks_to::<Vec<u8>>(None, &["R".to_string()]).unwrap_err();
        assert!(matches!(err, ScontrinoError::Transport(_)));
    }

    #[test]
    fn test_write_failure_is_reported() {
        let mut dst = FailingWriter {
            written: Vec::new(),
            limit: 3,
        };
        let blocks = vec!["750HR".to_string()];
        let err = write_blocks_to(Some(&mut dst), &blocks).unwrap_err();
        assert!(matches!(err, ScontrinoError::Transport(msg) if msg.contains("device gone")));
    }
}
