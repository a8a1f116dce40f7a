// strand/src/sink.rs

//! Observation sinks: append-only destinations for `"<label>: <value>"` lines.

use parking_lot::Mutex;
use std::io::Write;
use tracing::{event, Level};

/// Receives observation checkpoints from running pipelines.
///
/// Each call must land as one whole line. Callers do not serialize around the
/// sink, and the order of lines from different items is unspecified.
pub trait ObservationSink: Send + Sync {
  fn observe(&self, label: &str, value: i64);
}

/// Formats one observation line, without the trailing newline.
pub fn format_observation(label: &str, value: i64) -> String {
  format!("{}: {}", label, value)
}

/// Writes observations to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl ObservationSink for StdoutSink {
  fn observe(&self, label: &str, value: i64) {
    // Holding the lock for the whole line keeps lines from interleaving.
    let mut out = std::io::stdout().lock();
    if let Err(e) = writeln!(out, "{}", format_observation(label, value)) {
      event!(Level::WARN, error = %e, %label, value, "Failed to write observation to stdout.");
    }
  }
}

/// Keeps observations in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
  lines: Mutex<Vec<String>>,
}

impl MemorySink {
  pub fn new() -> Self {
    Self::default()
  }

  /// Snapshot of every line observed so far.
  pub fn lines(&self) -> Vec<String> {
    self.lines.lock().clone()
  }

  pub fn len(&self) -> usize {
    self.lines.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.lines.lock().is_empty()
  }
}

impl ObservationSink for MemorySink {
  fn observe(&self, label: &str, value: i64) {
    self.lines.lock().push(format_observation(label, value));
  }
}
