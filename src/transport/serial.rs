//! # Serial Transport
//!
//! This module talks to printers on an RS-232/USB serial tty.
//!
//! ## TTY Configuration
//!
//! The device is opened in raw mode so commands are transmitted without
//! modification:
//!
//! - **No input processing**: Disable IGNBRK, BRKINT, PARMRK, ISTRIP, etc.
//! - **No output processing**: Disable OPOST (no CR/LF translation)
//! - **8-bit characters**: CS8 (8 data bits, no parity)
//! - **No echo**: Disable ECHO, ECHONL
//! - **Non-canonical mode**: Disable ICANON (no line buffering)
//!
//! IXON stays enabled: the printer pauses the host with XOFF until it is
//! told otherwise (terminator `E`).

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};

use tracing::info;

use super::{Transport, write_blocks_to};
use crate::error::{Result, ScontrinoError};
use crate::printer::config::DEFAULT_BAUD_RATE;

/// # Serial Printer Transport
///
/// ## Example
///
/// ```no_run
/// use scontrino::protocol::commands::{Command, ControlOp};
/// use scontrino::transport::{SerialTransport, Transport};
///
/// let mut transport = SerialTransport::new("/dev/ttyUSB0").with_baud_rate(19200);
/// transport.open()?;
/// transport.print_commands(&[Command::from(ControlOp::OpenDrawer)])?;
///
/// # Ok::<(), scontrino::ScontrinoError>(())
/// ```
pub struct SerialTransport {
    device: PathBuf,
    baud_rate: u32,
    port: Option<BufWriter<File>>,
}

impl SerialTransport {
    pub fn new<P: AsRef<Path>>(device: P) -> Self {
        Self {
            device: device.as_ref().to_path_buf(),
            baud_rate: DEFAULT_BAUD_RATE,
            port: None,
        }
    }

    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    pub fn baud_rate(&self) -> u32 {
        self.baud_rate
    }
}

impl Transport for SerialTransport {
    /// Open the tty and configure it.
    ///
    /// ## Errors
    ///
    /// Returns an error if:
    /// - The device doesn't exist
    /// - The baud rate is not a standard rate
    /// - Permission denied (may need root or dialout group)
    /// - TTY configuration fails
    fn open(&mut self) -> Result<()> {
        if self.port.is_some() {
            return Ok(());
        }

        let path = self.device.as_path();
        if !path.exists() {
            return Err(ScontrinoError::Transport(format!(
                "Serial port {} not found",
                path.display()
            )));
        }
        let speed = baud_to_speed(self.baud_rate)?;

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|e| {
                ScontrinoError::Transport(format!("Failed to open {}: {}", path.display(), e))
            })?;

        configure_tty_raw(file.as_raw_fd(), speed)?;

        info!(device = %path.display(), baud_rate = self.baud_rate, "Opened serial port");
        self.port = Some(BufWriter::new(file));
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.port.is_some()
    }

    fn close(&mut self) -> Result<()> {
        let Some(mut port) = self.port.take() else {
            return Ok(());
        };
        port.flush()
            .map_err(|e| ScontrinoError::Transport(format!("Flush failed: {}", e)))?;
        info!(device = %self.device.display(), "Closed serial port");
        Ok(())
    }

    fn write_blocks(&mut self, blocks: &[String]) -> Result<()> {
        write_blocks_to(self.port.as_mut(), blocks)
    }
}

impl Drop for SerialTransport {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

/// Map a numeric baud rate to its termios constant.
fn baud_to_speed(baud_rate: u32) -> Result<libc::speed_t> {
    let speed = match baud_rate {
        1200 => libc::B1200,
        2400 => libc::B2400,
        4800 => libc::B4800,
        9600 => libc::B9600,
        19200 => libc::B19200,
        38400 => libc::B38400,
        57600 => libc::B57600,
        115200 => libc::B115200,
        other => {
            return Err(ScontrinoError::Transport(format!(
                "Unsupported baud rate: {}",
                other
            )));
        }
    };
    Ok(speed)
}

/// Configure a file descriptor for raw TTY mode at the given speed.
fn configure_tty_raw(fd: i32, speed: libc::speed_t) -> Result<()> {
    use std::mem::MaybeUninit;

    // Get current terminal attributes
    let mut termios = MaybeUninit::uninit();
    let result = unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) };
    if result != 0 {
        return Err(ScontrinoError::Transport(format!(
            "tcgetattr failed: {}",
            io::Error::last_os_error()
        )));
    }
    let mut termios = unsafe { termios.assume_init() };

    // Input flags: disable all processing except XON/XOFF output control
    termios.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXOFF
        | libc::IXANY);
    termios.c_iflag |= libc::IXON;

    // Output flags: disable post-processing
    termios.c_oflag &= !libc::OPOST;

    // Local flags: disable echo, canonical mode, signals
    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);

    // Control flags: 8-bit characters, no parity, receiver on
    termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
    termios.c_cflag |= libc::CS8 | libc::CREAD | libc::CLOCAL;

    let result = unsafe {
        libc::cfsetispeed(&mut termios, speed) | libc::cfsetospeed(&mut termios, speed)
    };
    if result != 0 {
        return Err(ScontrinoError::Transport(format!(
            "cfsetspeed failed: {}",
            io::Error::last_os_error()
        )));
    }

    // Apply settings immediately
    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) };
    if result != 0 {
        return Err(ScontrinoError::Transport(format!(
            "tcsetattr failed: {}",
            io::Error::last_os_error()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_device() {
        let mut transport = SerialTransport::new("/dev/does-not-exist-scontrino");
        let err = transport.open().unwrap_err();
        assert!(matches!(err, ScontrinoError::Transport(msg) if msg.contains("not found")));
        assert!(!transport.is_open());
    }

    #[test]
    fn test_default_baud_rate() {
        assert_eq!(SerialTransport::new("/dev/ttyS0").baud_rate(), 9600);
        assert_eq!(
            SerialTransport::new("/dev/ttyS0").with_baud_rate(19200).baud_rate(),
            19200
        );
    }

    #[test]
    fn test_baud_to_speed() {
        assert_eq!(baud_to_speed(9600).unwrap(), libc::B9600);
        assert_eq!(baud_to_speed(115200).unwrap(), libc::B115200);
        assert!(baud_to_speed(9601).is_err());
    }

    #[test]
    fn test_close_unopened_is_noop() {
        let mut transport = SerialTransport::new("/dev/ttyS0");
        transport.close().unwrap();
        transport.close().unwrap();
    }
}
