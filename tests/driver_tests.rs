//! Integration tests for the `driver` module, exercising full poll cycles
//! against the mock transport: publish fan-out, error paths, and
//! resynchronization after stream corruption.

use bl0942_rs::constants::{FRAME_LENGTH, FULL_PACKET_ADDRESS, READ_COMMAND};
use bl0942_rs::{
    pack_frame, Bl0942Driver, Bl0942Error, Frame, MockTransport, PollState, QuantityKind, Sink,
};
use std::sync::{Arc, Mutex};

/// Sink that records every published value for later assertions.
#[derive(Clone, Default)]
struct RecordingSink {
    values: Arc<Mutex<Vec<f64>>>,
}

impl RecordingSink {
    fn new() -> Self {
        RecordingSink::default()
    }

    fn values(&self) -> Vec<f64> {
        self.values.lock().unwrap().clone()
    }
}

impl Sink for RecordingSink {
    fn publish(&mut self, value: f64) {
        self.values.lock().unwrap().push(value);
    }
}

fn driver_with_sinks(
    transport: MockTransport,
) -> (Bl0942Driver<MockTransport>, [RecordingSink; 4]) {
    let mut driver = Bl0942Driver::new(transport);
    let sinks = [
        RecordingSink::new(),
        RecordingSink::new(),
        RecordingSink::new(),
        RecordingSink::new(),
    ];
    for (kind, sink) in QuantityKind::ALL.iter().zip(sinks.iter()) {
        driver.bind(*kind, Box::new(sink.clone()));
    }
    (driver, sinks)
}

/// A successful cycle publishes all four converted quantities and sends the
/// read request.
#[tokio::test]
async fn test_poll_publishes_all_bound_sinks() {
    let mock = MockTransport::new();
    mock.queue_frame(2203100, 500, 12345, 987);

    let (mut driver, sinks) = driver_with_sinks(mock.clone());
    driver.poll().await.unwrap();

    assert_eq!(mock.get_tx_data(), vec![READ_COMMAND, FULL_PACKET_ADDRESS]);
    assert_eq!(sinks[0].values(), vec![220.31]);
    assert_eq!(sinks[1].values(), vec![0.5]);
    assert_eq!(sinks[2].values(), vec![123.45]);
    assert_eq!(sinks[3].values(), vec![0.987]);
    assert_eq!(driver.stats().frames_decoded, 1);
    assert_eq!(driver.state(), PollState::Idle);
}

/// Scenario: a flipped checksum byte yields a non-fatal error, no sink
/// receives a publish, and the next valid frame goes through.
#[tokio::test]
async fn test_poll_checksum_mismatch_skips_cycle() {
    let mock = MockTransport::new();
    let mut bytes = pack_frame(&Frame::from_registers(2203100, 500, 12345, 987));
    bytes[FRAME_LENGTH - 1] ^= 0xFF;
    mock.queue_rx_data(&bytes);

    let (mut driver, sinks) = driver_with_sinks(mock.clone());
    let result = driver.poll().await;
    assert!(matches!(result, Err(Bl0942Error::ChecksumMismatch { .. })));
    for sink in &sinks {
        assert!(sink.values().is_empty());
    }
    assert_eq!(driver.stats().checksum_errors, 1);
    assert_eq!(driver.state(), PollState::Idle);

    // Corrupt frame was discarded; a fresh one decodes on the next tick.
    mock.queue_frame(2203100, 500, 12345, 987);
    driver.poll().await.unwrap();
    assert_eq!(sinks[0].values(), vec![220.31]);
}

/// Scenario: the transport has nothing buffered; poll returns
/// TransportUnavailable without blocking and the driver stays Idle.
#[tokio::test]
async fn test_poll_empty_transport() {
    let mock = MockTransport::new();
    let (mut driver, sinks) = driver_with_sinks(mock);

    let result = driver.poll().await;
    assert!(matches!(result, Err(Bl0942Error::TransportUnavailable)));
    assert_eq!(driver.state(), PollState::Idle);
    assert_eq!(driver.stats().transport_errors, 1);
    for sink in &sinks {
        assert!(sink.values().is_empty());
    }
}

/// Scenario: with only the power sink bound, a valid poll publishes power
/// and nothing else.
#[tokio::test]
async fn test_poll_only_power_bound() {
    let mock = MockTransport::new();
    mock.queue_frame(2203100, 500, 12345, 987);

    let mut driver = Bl0942Driver::new(mock);
    let power_sink = RecordingSink::new();
    driver.bind(QuantityKind::Power, Box::new(power_sink.clone()));

    assert!(driver.registry().is_bound(QuantityKind::Power));
    assert!(!driver.registry().is_bound(QuantityKind::Voltage));

    driver.poll().await.unwrap();
    assert_eq!(power_sink.values(), vec![123.45]);
}

/// A partial frame costs one cycle and decodes once the rest arrives.
#[tokio::test]
async fn test_poll_incomplete_then_complete() {
    let mock = MockTransport::new();
    let bytes = pack_frame(&Frame::from_registers(2203100, 500, 12345, 987));
    mock.queue_rx_data(&bytes[..7]);

    let (mut driver, sinks) = driver_with_sinks(mock.clone());
    let result = driver.poll().await;
    assert!(matches!(result, Err(Bl0942Error::IncompleteFrame { .. })));
    assert_eq!(driver.stats().incomplete_frames, 1);

    mock.queue_rx_data(&bytes[7..]);
    driver.poll().await.unwrap();
    assert_eq!(sinks[0].values(), vec![220.31]);
}

/// A garbage byte ahead of a valid frame is dropped one byte at a time and
/// the frame decodes on the following cycle.
#[tokio::test]
async fn test_poll_resyncs_after_garbage_byte() {
    let mock = MockTransport::new();
    mock.queue_rx_data(&[0x00]);
    mock.queue_frame(2203100, 500, 12345, 987);

    let (mut driver, sinks) = driver_with_sinks(mock);
    let result = driver.poll().await;
    assert!(matches!(
        result,
        Err(Bl0942Error::MalformedHeader { found: 0x00 })
    ));
    assert_eq!(driver.stats().header_errors, 1);

    // Buffered bytes carry the cycle even though the line is now quiet.
    driver.poll().await.unwrap();
    assert_eq!(sinks[0].values(), vec![220.31]);
}

/// An injected I/O error surfaces as a serial port error and is counted.
#[tokio::test]
async fn test_poll_transport_error() {
    let mock = MockTransport::new();
    mock.set_next_error(std::io::Error::new(
        std::io::ErrorKind::BrokenPipe,
        "Test error",
    ));

    let (mut driver, _) = driver_with_sinks(mock);
    let result = driver.poll().await;
    assert!(matches!(result, Err(Bl0942Error::SerialPortError(_))));
    assert_eq!(driver.stats().transport_errors, 1);
    assert_eq!(driver.state(), PollState::Idle);
}

/// Two frames queued back to back decode over two cycles.
#[tokio::test]
async fn test_poll_consecutive_frames() {
    let mock = MockTransport::new();
    mock.queue_frame(2203100, 500, 12345, 987);
    mock.queue_frame(2300000, 1000, 23000, 1000);

    let (mut driver, sinks) = driver_with_sinks(mock);
    driver.poll().await.unwrap();
    driver.poll().await.unwrap();

    assert_eq!(sinks[0].values(), vec![220.31, 230.0]);
    assert_eq!(sinks[1].values(), vec![0.5, 1.0]);
    assert_eq!(driver.stats().polls, 2);
    assert_eq!(driver.stats().frames_decoded, 2);
}
