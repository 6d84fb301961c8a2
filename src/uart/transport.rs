//! # BL0942 Serial Transport
//!
//! This module provides the byte-level transport the poll driver talks
//! through: a `Transport` trait so tests can substitute a mock, and the
//! `SerialTransport` implementation over `tokio-serial`.
//!
//! Reads are bounded by a short timeout so a quiet line yields an empty
//! chunk instead of stalling the poll loop.

use crate::constants::DEFAULT_BAUDRATE;
use crate::error::Bl0942Error;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_serial::SerialPortBuilderExt;

/// Trait for the byte transport between driver and device.
#[async_trait::async_trait]
pub trait Transport: Send {
    /// Writes the given bytes to the device.
    async fn write(&mut self, bytes: &[u8]) -> Result<(), Bl0942Error>;

    /// Returns up to `max_bytes` of buffered input, possibly empty. Must
    /// return promptly; an idle line is an empty chunk, not an error.
    async fn read_available(&mut self, max_bytes: usize) -> Result<Vec<u8>, Bl0942Error>;
}

/// Configuration for the serial connection.
#[derive(Debug, Clone)]
pub struct SerialConfig {
    pub baudrate: u32,
    pub read_timeout: Duration,
}

impl Default for SerialConfig {
    fn default() -> Self {
        SerialConfig {
            baudrate: DEFAULT_BAUDRATE,
            read_timeout: Duration::from_millis(50),
        }
    }
}

/// Serial transport over a `tokio_serial::SerialStream`, set up for the
/// BL0942 line settings (8 data bits, no parity, 1 stop bit).
pub struct SerialTransport {
    port: tokio_serial::SerialStream,
    config: SerialConfig,
}

impl SerialTransport {
    /// Opens the named serial port with default settings.
    pub async fn connect(port_name: &str) -> Result<SerialTransport, Bl0942Error> {
        Self::connect_with_config(port_name, SerialConfig::default()).await
    }

    /// Opens the named serial port with custom config.
    pub async fn connect_with_config(
        port_name: &str,
        config: SerialConfig,
    ) -> Result<SerialTransport, Bl0942Error> {
        let port = tokio_serial::new(port_name, config.baudrate)
            .data_bits(tokio_serial::DataBits::Eight)
            .stop_bits(tokio_serial::StopBits::One)
            .parity(tokio_serial::Parity::None)
            .timeout(config.read_timeout)
            .open_native_async()
            .map_err(|e| Bl0942Error::SerialPortError(e.to_string()))?;

        Ok(SerialTransport { port, config })
    }
}

#[async_trait::async_trait]
impl Transport for SerialTransport {
    async fn write(&mut self, bytes: &[u8]) -> Result<(), Bl0942Error> {
        self.port
            .write_all(bytes)
            .await
            .map_err(|e| Bl0942Error::SerialPortError(e.to_string()))?;
        self.port
            .flush()
            .await
            .map_err(|e| Bl0942Error::SerialPortError(e.to_string()))
    }

    async fn read_available(&mut self, max_bytes: usize) -> Result<Vec<u8>, Bl0942Error> {
        let mut buf = vec![0u8; max_bytes];
        match tokio::time::timeout(self.config.read_timeout, self.port.read(&mut buf)).await {
            // A quiet line is not an error; the next tick retries.
            Err(_) => Ok(Vec::new()),
            Ok(Ok(0)) => Ok(Vec::new()),
            Ok(Ok(n)) => {
                buf.truncate(n);
                Ok(buf)
            }
            Ok(Err(e)) => Err(Bl0942Error::SerialPortError(e.to_string())),
        }
    }
}
