// Integration tests for the trace events (feature = "tracing")
// Tests cover: chunk allocation and reset events with their fields

#![cfg(feature = "tracing")]

use std::io::Write;
use std::sync::{Arc, Mutex};

use chunkbuf::ChunkedByteBuffer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;

/// Collects formatted log output for inspection.
#[derive(Clone, Default)]
struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    fn output(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().unwrap()).to_string()
    }

    fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync {
        tracing_subscriber::registry().with(
            tracing_subscriber::fmt::layer()
                .with_writer(self.clone())
                .with_ansi(false),
        )
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogCaptureWriter {
            buffer: Arc::clone(&self.buffer),
        }
    }
}

struct LogCaptureWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Write for LogCaptureWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_allocation_events_carry_index_and_capacity() {
    let capture = LogCapture::default();

    tracing::subscriber::with_default(capture.subscriber(), || {
        let mut buffer = ChunkedByteBuffer::new(4);
        buffer.append_slice(&[1, 2, 3]);
        buffer.append_slice(&[4, 5, 6, 7, 8, 9]);
    });

    let output = capture.output();
    assert_eq!(output.matches("chunk allocated").count(), 2, "{}", output);
    assert!(output.contains("index=0 capacity=4"), "{}", output);
    assert!(output.contains("index=1 capacity=5"), "{}", output);
}

#[test]
fn test_reset_event_reports_discarded_state() {
    let capture = LogCapture::default();

    tracing::subscriber::with_default(capture.subscriber(), || {
        let mut buffer = ChunkedByteBuffer::new(4);
        for _ in 0..6 {
            buffer.append_byte(0xAB);
        }
        buffer.reset();
    });

    let output = capture.output();
    assert!(output.contains("buffer reset"), "{}", output);
    assert!(output.contains("size=6 chunks=2"), "{}", output);
}

#[test]
fn test_no_events_without_allocation() {
    let capture = LogCapture::default();

    tracing::subscriber::with_default(capture.subscriber(), || {
        let mut buffer = ChunkedByteBuffer::new(4);
        buffer.append_slice(&[]);
        assert!(buffer.append_range(&[1, 2], 1, 5).is_err());
    });

    assert!(capture.output().is_empty());
}
