//! # TCP Transport
//!
//! Network-attached fiscal printers listen on a raw TCP port. Commands are
//! written as plain ASCII through a buffered writer and flushed once per
//! document.

use std::io::{BufWriter, Write};
use std::net::TcpStream;

use tracing::info;

use super::{Transport, write_blocks_to};
use crate::error::{Result, ScontrinoError};

/// # Network Printer Transport
///
/// ## Example
///
/// ```no_run
/// use scontrino::document::{Document, Management};
/// use scontrino::transport::{NetworkTransport, Transport};
///
/// let mut transport = NetworkTransport::new("192.168.1.50", 9100);
/// transport.open()?;
/// transport.print_document(&Document::from(Management::new(&["hello"])))?;
/// transport.close()?;
///
/// # Ok::<(), scontrino::ScontrinoError>(())
/// ```
pub struct NetworkTransport {
    host: String,
    port: u16,
    stream: Option<BufWriter<TcpStream>>,
}

impl NetworkTransport {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: host.to_string(),
            port,
            stream: None,
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Transport for NetworkTransport {
    fn open(&mut self) -> Result<()> {
        if self.stream.is_some() {
            return Ok(());
        }

        let stream = TcpStream::connect((self.host.as_str(), self.port)).map_err(|e| {
            ScontrinoError::Transport(format!("Failed to connect to {}: {}", self.address(), e))
        })?;
        stream.set_nodelay(true)?;

        info!(address = %self.address(), "Connected to printer");
        self.stream = Some(BufWriter::new(stream));
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    fn close(&mut self) -> Result<()> {
        let Some(mut stream) = self.stream.take() else {
            return Ok(());
        };
        stream
            .flush()
            .map_err(|e| ScontrinoError::Transport(format!("Flush failed: {}", e)))?;
        info!(address = %self.address(), "Disconnected from printer");
        Ok(())
    }

    fn write_blocks(&mut self, blocks: &[String]) -> Result<()> {
        write_blocks_to(self.stream.as_mut(), blocks)
    }
}

impl Drop for NetworkTransport {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
