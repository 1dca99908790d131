//! # Scontrino CLI
//!
//! Command-line interface for Epson fiscal printers.
//!
//! ## Usage
//!
//! ```bash
//! # Show the wire commands of a JSON document
//! scontrino render receipt.json
//!
//! # Print a document over TCP
//! scontrino print receipt.json --tcp 192.168.1.50:9100
//!
//! # Print a document over a serial port
//! scontrino print receipt.json --serial /dev/ttyUSB0 --baud 19200
//!
//! # Open the cash drawer using a saved configuration
//! scontrino control open-drawer --config printer.json
//!
//! # List control commands
//! scontrino control
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use scontrino::{
    Command, Document, PrinterConfig, ScontrinoError,
    json_api::JsonDocument,
    printer::Connection,
    protocol::commands::ControlOp,
};

/// Scontrino - Epson fiscal printer utility
#[derive(Parser, Debug)]
#[command(name = "scontrino")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the wire commands of a JSON document, one per line
    Render {
        /// JSON document file
        document: PathBuf,
    },

    /// Send a JSON document to the printer
    Print {
        /// JSON document file
        document: PathBuf,

        #[command(flatten)]
        connection: ConnectionArgs,
    },

    /// Send a single control command (omit the name to list them)
    Control {
        /// Control command name, e.g. open-drawer
        name: Option<String>,

        #[command(flatten)]
        connection: ConnectionArgs,
    },
}

#[derive(Args, Debug)]
struct ConnectionArgs {
    /// Printer address as HOST:PORT
    #[arg(long, value_name = "HOST:PORT", conflicts_with_all = ["serial", "config"])]
    tcp: Option<String>,

    /// Serial device path
    #[arg(long, value_name = "DEVICE", conflicts_with = "config")]
    serial: Option<PathBuf>,

    /// Serial baud rate
    #[arg(long, requires = "serial")]
    baud: Option<u32>,

    /// Printer configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl ConnectionArgs {
    fn printer_config(&self) -> Result<PrinterConfig, ScontrinoError> {
        if let Some(address) = &self.tcp {
            return Ok(PrinterConfig::new(Connection::tcp(address)?));
        }
        if let Some(device) = &self.serial {
            return Ok(PrinterConfig::new(Connection::serial(device, self.baud)));
        }
        if let Some(path) = &self.config {
            return PrinterConfig::load(path);
        }
        Err(ScontrinoError::Transport(
            "No printer given: use --tcp, --serial or --config".to_string(),
        ))
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), ScontrinoError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render { document } => {
            let document = load_document(&document)?;
            for block in document.encode_all()? {
                println!("{}", block);
            }
        }
        Commands::Print {
            document,
            connection,
        } => {
            let document = load_document(&document)?;
            // Encode before connecting so a bad document never opens the port
            let blocks = document.encode_all()?;

            let mut transport = connection.printer_config()?.open_transport()?;
            transport.write_blocks(&blocks)?;
            transport.close()?;
            info!(
                kind = document.kind(),
                commands = blocks.len(),
                "Printed successfully"
            );
        }
        Commands::Control { name, connection } => {
            let Some(name) = name else {
                println!("Available control commands:");
                for op in ControlOp::ALL {
                    println!("  {}", op.name());
                }
                return Ok(());
            };

            let op = ControlOp::from_name(&name).ok_or_else(|| {
                ScontrinoError::Transport(format!(
                    "Unknown control command '{}'. Run without a name to see available options.",
                    name
                ))
            })?;

            let mut transport = connection.printer_config()?.open_transport()?;
            transport.print_commands(&[Command::from(op)])?;
            transport.close()?;
            info!(command = op.name(), "Sent control command");
        }
    }

    Ok(())
}

fn load_document(path: &Path) -> Result<Document, ScontrinoError> {
    let json = fs::read_to_string(path)?;
    JsonDocument::parse(&json)
}
