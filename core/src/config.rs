// strand/src/config.rs

//! Construction-time settings: the two storage roots and the delay source parameters.

use crate::error::{StrandError, StrandResult};
use std::path::PathBuf;
use std::time::Duration;

/// Identities processed when the caller does not supply its own list.
pub const DEFAULT_ITEMS: [&str; 4] = ["1.txt", "2.txt", "4.txt", "8.txt"];

pub const DEFAULT_DELAY_SEED: u64 = 27498;
pub const DEFAULT_DELAY_SLOTS: u32 = 10;
pub const DEFAULT_DELAY_UNIT: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrandConfig {
  /// Root that items are read from. Never modified.
  pub input_root: PathBuf,
  /// Root that items are written to. Cleared and recreated at the start of every run.
  pub output_root: PathBuf,
  /// Length of one delay slot; a draw of `n` waits `n * delay_unit`.
  pub delay_unit: Duration,
  pub delay_seed: u64,
  /// Draws are taken from `0..delay_slots`.
  pub delay_slots: u32,
}

impl Default for StrandConfig {
  fn default() -> Self {
    Self {
      input_root: PathBuf::from("input"),
      output_root: PathBuf::from("output"),
      delay_unit: DEFAULT_DELAY_UNIT,
      delay_seed: DEFAULT_DELAY_SEED,
      delay_slots: DEFAULT_DELAY_SLOTS,
    }
  }
}

impl StrandConfig {
  pub fn with_roots(input_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
    Self {
      input_root: input_root.into(),
      output_root: output_root.into(),
      ..Self::default()
    }
  }

  pub fn delay_unit(mut self, unit: Duration) -> Self {
    self.delay_unit = unit;
    self
  }

  pub fn delay_seed(mut self, seed: u64) -> Self {
    self.delay_seed = seed;
    self
  }

  pub fn validate(&self) -> StrandResult<()> {
    if self.delay_slots == 0 {
      return Err(StrandError::Configuration {
        message: "delay_slots must be at least 1".to_string(),
      });
    }
    if self.input_root.as_os_str().is_empty() || self.output_root.as_os_str().is_empty() {
      return Err(StrandError::Configuration {
        message: "input_root and output_root must be non-empty paths".to_string(),
      });
    }
    if self.input_root == self.output_root {
      return Err(StrandError::Configuration {
        message: format!(
          "output_root '{}' must differ from input_root, it is cleared on every run",
          self.output_root.display()
        ),
      });
    }
    Ok(())
  }
}
