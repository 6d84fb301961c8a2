//! # BL0942 Poll Driver
//!
//! Orchestrates one read-decode-convert-publish cycle per tick. The driver
//! owns the transport and its receive buffer; an external scheduler invokes
//! `poll()` once per configured interval. No failure here is fatal: a bad
//! frame or a quiet line costs one cycle, the driver resynchronizes, and the
//! next tick retries.

use crate::constants::{
    FRAME_LENGTH, FULL_PACKET_ADDRESS, MAX_READ_CHUNK, READ_COMMAND, RX_BUFFER_LIMIT,
};
use crate::error::Bl0942Error;
use crate::logging::{log_debug, log_warn};
use crate::sensor::convert::convert;
use crate::sensor::registry::{QuantityKind, SensorRegistry, Sink};
use crate::uart::frame;
use crate::uart::transport::Transport;
use bytes::{Buf, BytesMut};

/// Represents the different states of a poll cycle. `Failed` is transient;
/// every cycle ends back in `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Idle,
    Reading,
    Validating,
    Failed,
}

/// Per-driver counters over poll outcomes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PollStats {
    pub polls: u64,
    pub frames_decoded: u64,
    pub checksum_errors: u64,
    pub header_errors: u64,
    pub incomplete_frames: u64,
    pub transport_errors: u64,
}

/// The BL0942 device driver.
pub struct Bl0942Driver<T: Transport> {
    transport: T,
    registry: SensorRegistry,
    rx_buffer: BytesMut,
    state: PollState,
    stats: PollStats,
}

impl<T: Transport> Bl0942Driver<T> {
    /// Creates a driver over the given transport with no sinks bound.
    pub fn new(transport: T) -> Self {
        Bl0942Driver {
            transport,
            registry: SensorRegistry::new(),
            rx_buffer: BytesMut::with_capacity(RX_BUFFER_LIMIT),
            state: PollState::Idle,
            stats: PollStats::default(),
        }
    }

    /// Binds an output sink for the given quantity. Configuration-time only.
    pub fn bind(&mut self, kind: QuantityKind, sink: Box<dyn Sink>) {
        self.registry.bind(kind, sink);
    }

    pub fn registry(&self) -> &SensorRegistry {
        &self.registry
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    pub fn stats(&self) -> PollStats {
        self.stats
    }

    /// Executes one poll cycle: request a packet, drain available bytes,
    /// decode, convert and publish to every bound sink.
    ///
    /// Errors are status values for the scheduler to log or count, never a
    /// reason to stop polling.
    pub async fn poll(&mut self) -> Result<(), Bl0942Error> {
        self.stats.polls += 1;
        self.state = PollState::Reading;

        let outcome = self.poll_cycle().await;
        match &outcome {
            Ok(()) => self.stats.frames_decoded += 1,
            Err(Bl0942Error::ChecksumMismatch { .. }) => {
                self.state = PollState::Failed;
                self.stats.checksum_errors += 1;
            }
            Err(Bl0942Error::MalformedHeader { .. }) => {
                self.state = PollState::Failed;
                self.stats.header_errors += 1;
            }
            Err(Bl0942Error::IncompleteFrame { .. }) => {
                self.state = PollState::Failed;
                self.stats.incomplete_frames += 1;
            }
            Err(_) => {
                self.state = PollState::Failed;
                self.stats.transport_errors += 1;
            }
        }

        self.state = PollState::Idle;
        outcome
    }

    async fn poll_cycle(&mut self) -> Result<(), Bl0942Error> {
        self.transport
            .write(&[READ_COMMAND, FULL_PACKET_ADDRESS])
            .await?;

        let chunk = self.transport.read_available(MAX_READ_CHUNK).await?;
        if chunk.is_empty() && self.rx_buffer.is_empty() {
            return Err(Bl0942Error::TransportUnavailable);
        }
        self.rx_buffer.extend_from_slice(&chunk);

        if self.rx_buffer.len() > RX_BUFFER_LIMIT {
            let excess = self.rx_buffer.len() - RX_BUFFER_LIMIT;
            log_warn(&format!("receive buffer over limit, dropping {excess} oldest bytes"));
            self.rx_buffer.advance(excess);
        }

        self.state = PollState::Validating;
        match frame::decode(&self.rx_buffer) {
            Ok(frame) => {
                self.rx_buffer.advance(FRAME_LENGTH);
                let reading = convert(&frame);
                log_debug(&format!("decoded reading: {reading:?}"));
                for kind in QuantityKind::ALL {
                    self.registry.publish(kind, reading.get(kind));
                }
                Ok(())
            }
            Err(err @ Bl0942Error::MalformedHeader { .. }) => {
                // Resynchronize one byte at a time; the next cycle retries.
                log_warn(&format!(
                    "{err}, dropping byte 0x{}",
                    hex::encode(&self.rx_buffer[..1])
                ));
                self.rx_buffer.advance(1);
                Err(err)
            }
            Err(err @ Bl0942Error::ChecksumMismatch { .. }) => {
                log_warn(&format!(
                    "{err}, discarding frame {}",
                    hex::encode(&self.rx_buffer[..FRAME_LENGTH])
                ));
                self.rx_buffer.advance(FRAME_LENGTH);
                Err(err)
            }
            // IncompleteFrame keeps the buffered bytes for the next tick.
            Err(err) => Err(err),
        }
    }
}
