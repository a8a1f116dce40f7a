// strand/src/delay.rs

//! The randomized delay source shared by all runs of a pipeline.

use crate::config::StrandConfig;
use crate::error::{StrandError, StrandResult};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tracing::{event, Level};

/// Seeded generator of artificial delays.
///
/// One instance is shared by every concurrent run; the generator sits behind a
/// mutex held only for a single draw. Re-running single-threaded with the same
/// seed yields the same sequence of delays.
#[derive(Debug)]
pub struct DelaySource {
  rng: Mutex<StdRng>,
  unit: Duration,
  slots: u32,
}

impl DelaySource {
  /// Draws are taken from `0..slots` and scaled by `unit`.
  pub fn new(seed: u64, unit: Duration, slots: u32) -> StrandResult<Self> {
    if slots == 0 {
      return Err(StrandError::Configuration {
        message: "delay slots must be at least 1".to_string(),
      });
    }
    Ok(Self {
      rng: Mutex::new(StdRng::seed_from_u64(seed)),
      unit,
      slots,
    })
  }

  pub fn from_config(config: &StrandConfig) -> StrandResult<Self> {
    Self::new(config.delay_seed, config.delay_unit, config.delay_slots)
  }

  pub fn unit(&self) -> Duration {
    self.unit
  }

  pub fn slots(&self) -> u32 {
    self.slots
  }

  /// Draws the next slot count.
  pub fn next_draw(&self) -> u32 {
    self.rng.lock().gen_range(0..self.slots)
  }

  pub fn next_delay(&self) -> Duration {
    self.unit * self.next_draw()
  }

  /// Draws a delay and sleeps for it. Returns the delay that was applied.
  pub async fn wait(&self) -> Duration {
    let delay = self.next_delay();
    event!(Level::DEBUG, delay_ms = delay.as_millis() as u64, "Applying artificial delay.");
    if !delay.is_zero() {
      tokio::time::sleep(delay).await;
    }
    delay
  }
}
