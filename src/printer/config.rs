//! # Printer Configuration
//!
//! How to reach a printer, loaded from JSON or built from CLI flags.
//!
//! ## File Format
//!
//! ```json
//! { "connection": { "type": "network", "host": "192.168.1.50", "port": 9100 } }
//! ```
//!
//! ```json
//! { "connection": { "type": "serial", "device": "/dev/ttyUSB0", "baud_rate": 19200 } }
//! ```
//!
//! `baud_rate` is optional and defaults to 9600.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScontrinoError};
use crate::transport::{NetworkTransport, Transport};

/// Baud rate used when none is configured
pub const DEFAULT_BAUD_RATE: u32 = 9600;

fn default_baud_rate() -> u32 {
    DEFAULT_BAUD_RATE
}

/// Where the printer is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Connection {
    Network {
        host: String,
        port: u16,
    },
    Serial {
        device: PathBuf,
        #[serde(default = "default_baud_rate")]
        baud_rate: u32,
    },
}

impl Connection {
    /// Parse a `host:port` address.
    ///
    /// ```
    /// use scontrino::printer::Connection;
    ///
    /// let conn = Connection::tcp("10.0.0.7:9100").unwrap();
    /// assert_eq!(conn, Connection::Network { host: "10.0.0.7".into(), port: 9100 });
    /// assert!(Connection::tcp("10.0.0.7").is_err());
    /// ```
    pub fn tcp(address: &str) -> Result<Self> {
        let (host, port) = address
            .rsplit_once(':')
            .filter(|(host, _)| !host.is_empty())
            .ok_or_else(|| {
                ScontrinoError::Transport(format!("Expected HOST:PORT, got {:?}", address))
            })?;
        let port = port
            .parse()
            .map_err(|_| ScontrinoError::Transport(format!("Invalid port {:?}", port)))?;
        Ok(Connection::Network {
            host: host.to_string(),
            port,
        })
    }

    pub fn serial<P: AsRef<Path>>(device: P, baud_rate: Option<u32>) -> Self {
        Connection::Serial {
            device: device.as_ref().to_path_buf(),
            baud_rate: baud_rate.unwrap_or(DEFAULT_BAUD_RATE),
        }
    }
}

/// # Printer Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrinterConfig {
    pub connection: Connection,
}

impl PrinterConfig {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }

    /// Read a JSON configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Build the transport for this connection and open it.
    pub fn open_transport(&self) -> Result<Box<dyn Transport>> {
        let mut transport: Box<dyn Transport> = match &self.connection {
            Connection::Network { host, port } => Box::new(NetworkTransport::new(host, *port)),
            #[cfg(unix)]
            Connection::Serial { device, baud_rate } => Box::new(
                crate::transport::SerialTransport::new(device).with_baud_rate(*baud_rate),
            ),
            #[cfg(not(unix))]
            Connection::Serial { .. } => {
                return Err(ScontrinoError::Transport(
                    "Serial printers are only supported on unix".to_string(),
                ));
            }
        };
        transport.open()?;
        Ok(transport)
    }
}
