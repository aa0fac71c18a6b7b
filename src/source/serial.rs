// src/source/serial.rs
//! Live serial line source

use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_serial::{SerialPortBuilderExt, SerialStream};

use super::LineSource;
use crate::error::{Result, TrackerError};

/// Reads newline-terminated sentences from a serial GNSS receiver.
pub struct SerialSource {
    reader: BufReader<SerialStream>,
    port: String,
    buf: Vec<u8>,
}

impl SerialSource {
    /// Open `port` at `baud`.
    ///
    /// Failure here (device absent, wrong address, permissions) is the
    /// session's to report; it ends the collection phase with zero fixes
    /// rather than crashing the process.
    pub fn open(port: &str, baud: u32) -> Result<Self> {
        let stream = tokio_serial::new(port, baud)
            .timeout(Duration::from_millis(1000))
            .open_native_async()
            .map_err(|e| {
                TrackerError::Connection(format!("failed to open serial port {}: {}", port, e))
            })?;

        Ok(Self {
            reader: BufReader::new(stream),
            port: port.to_string(),
            buf: Vec::with_capacity(128),
        })
    }
}

#[async_trait]
impl LineSource for SerialSource {
    async fn next_line(&mut self) -> Result<Option<String>> {
        self.buf.clear();
        let n = self.reader.read_until(b'\n', &mut self.buf).await?;
        if n == 0 {
            return Ok(None); // EOF
        }
        // receivers occasionally emit junk bytes between sentences;
        // drop anything outside ASCII instead of failing the read
        let line: String = self
            .buf
            .iter()
            .filter(|b| b.is_ascii())
            .map(|&b| b as char)
            .collect();
        Ok(Some(line.trim_end().to_string()))
    }

    async fn close(&mut self) -> Result<()> {
        // dropping the stream releases the port; nothing to flush
        Ok(())
    }

    fn describe(&self) -> String {
        format!("serial port {}", self.port)
    }
}

/// List serial ports visible on this machine.
pub fn list_ports() -> Result<()> {
    let ports = tokio_serial::available_ports()
        .map_err(|e| TrackerError::Other(format!("failed to list serial ports: {}", e)))?;

    if ports.is_empty() {
        println!("No serial ports found.");
    } else {
        println!("Available serial ports:");
        for port in ports {
            println!("  {} - {:?}", port.port_name, port.port_type);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_reports_missing_device() {
        let result = SerialSource::open("/dev/does-not-exist-gnss0", 9600);
        match result {
            Err(TrackerError::Connection(msg)) => {
                assert!(msg.contains("/dev/does-not-exist-gnss0"))
            }
            Err(other) => panic!("unexpected error variant: {}", other),
            Ok(_) => panic!("open of a nonexistent device must fail"),
        }
    }
}
