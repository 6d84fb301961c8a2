//! Mock transport implementation for testing
//!
//! This module provides a mock transport that can be used to test the
//! BL0942 driver without requiring actual hardware.

use crate::error::Bl0942Error;
use crate::uart::frame::{pack_frame, Frame};
use crate::uart::transport::Transport;
use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

/// Mock transport that simulates bidirectional communication
#[derive(Clone, Default)]
pub struct MockTransport {
    /// Data written to the device (outgoing)
    pub tx_buffer: Arc<Mutex<Vec<u8>>>,
    /// Data to be read from the device (incoming)
    pub rx_buffer: Arc<Mutex<VecDeque<u8>>>,
    /// Simulated errors
    pub next_error: Arc<Mutex<Option<io::Error>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        MockTransport::default()
    }

    /// Queue data to be read from the transport
    pub fn queue_rx_data(&self, data: &[u8]) {
        let mut rx = self.rx_buffer.lock().unwrap();
        rx.extend(data);
    }

    /// Queue a well-formed data packet carrying the given register values
    pub fn queue_frame(&self, voltage: u32, current: u32, power: u32, power_factor: u32) {
        let frame = Frame::from_registers(voltage, current, power, power_factor);
        self.queue_rx_data(&pack_frame(&frame));
    }

    /// Get data that was written to the transport
    pub fn get_tx_data(&self) -> Vec<u8> {
        self.tx_buffer.lock().unwrap().clone()
    }

    /// Clear all buffers
    pub fn clear(&self) {
        self.tx_buffer.lock().unwrap().clear();
        self.rx_buffer.lock().unwrap().clear();
    }

    /// Set an error to be returned on the next operation
    pub fn set_next_error(&self, error: io::Error) {
        *self.next_error.lock().unwrap() = Some(error);
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn write(&mut self, bytes: &[u8]) -> Result<(), Bl0942Error> {
        if let Some(error) = self.next_error.lock().unwrap().take() {
            return Err(Bl0942Error::SerialPortError(error.to_string()));
        }
        self.tx_buffer.lock().unwrap().extend_from_slice(bytes);
        Ok(())
    }

    async fn read_available(&mut self, max_bytes: usize) -> Result<Vec<u8>, Bl0942Error> {
        if let Some(error) = self.next_error.lock().unwrap().take() {
            return Err(Bl0942Error::SerialPortError(error.to_string()));
        }
        let mut rx = self.rx_buffer.lock().unwrap();
        let available = rx.len().min(max_bytes);
        Ok(rx.drain(..available).collect())
    }
}
