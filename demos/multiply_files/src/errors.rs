// demos/multiply_files/src/errors.rs

use strand::{RunError, StrandError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Pipeline setup failed: {source}")]
  Setup {
    #[from]
    source: StrandError,
  },

  #[error("Run failed: {source}")]
  Run {
    #[from]
    source: RunError,
  },
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
