//! In-memory transport.
//!
//! Records every block instead of talking to a device. Used by tests.

use super::Transport;
use crate::error::{Result, ScontrinoError};

#[derive(Debug, Default)]
pub struct MemoryTransport {
    open: bool,
    blocks: Vec<String>,
    flushes: usize,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every block written so far, in order.
    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }

    /// The byte stream a device would have received.
    pub fn contents(&self) -> String {
        self.blocks.concat()
    }

    /// Number of completed write batches.
    pub fn flushes(&self) -> usize {
        self.flushes
    }
}

impl Transport for MemoryTransport {
    fn open(&mut self) -> Result<()> {
        self.open = true;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn close(&mut self) -> Result<()> {
        self.open = false;
        Ok(())
    }

    fn write_blocks(&mut self, blocks: &[String]) -> Result<()> {
        if !self.open {
            return Err(ScontrinoError::Transport("Transport is not open".to_string()));
        }
        self.blocks.extend_from_slice(blocks);
        self.flushes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, Management};
    use crate::protocol::commands::{Command, ControlOp, Product};

    #[test]
    fn test_captures_document() {
        let mut transport = MemoryTransport::new();
        transport.open().unwrap();
        transport
            .print_document(&Document::from(Management::new(&["hi"])))
            .unwrap();
        assert_eq!(transport.contents(), "j\"hi\"@J");
        assert_eq!(transport.flushes(), 1);
    }

    #[test]
    fn test_closed_transport_rejects_writes() {
        let mut transport = MemoryTransport::new();
        let err = transport
            .print_commands(&[Command::from(ControlOp::OpenDrawer)])
            .unwrap_err();
        assert!(matches!(err, ScontrinoError::Transport(_)));
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut transport = MemoryTransport::new();
        transport.open().unwrap();
        transport.close().unwrap();
        transport.close().unwrap();
        assert!(!transport.is_open());
    }

    #[test]
    fn test_print_commands() {
        let mut transport = MemoryTransport::new();
        transport.open().unwrap();
        transport
            .print_commands(&[
                Command::from(Product::new(100)),
                Command::from(ControlOp::Subtotal),
            ])
            .unwrap();
        assert_eq!(transport.blocks(), ["100HR", "="]);
    }
}
