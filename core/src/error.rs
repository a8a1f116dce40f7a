// strand/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Coarse classification of a [`StrandError`], used when reporting per-item failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
  InvalidArgument,
  NotFound,
  Format,
  Overflow,
  Io,
  Internal,
}

#[derive(Debug, Error)]
pub enum StrandError {
  #[error("Invalid argument '{argument}': {message}")]
  InvalidArgument { argument: &'static str, message: String },

  #[error("Item '{identity}' not found at {path}")]
  NotFound { identity: String, path: String },

  #[error("Payload of item '{identity}' is not a base-10 integer: {reason}")]
  FormatError { identity: String, reason: String },

  #[error("Item '{identity}': multiplying {value} by {factor} overflows")]
  Overflow { identity: String, value: i64, factor: i64 },

  #[error("I/O error on '{target}'. Source: {source}")]
  Io {
    target: String,
    #[source]
    source: std::io::Error,
  },

  #[error("Handler missing for step: {step_name}")]
  HandlerMissing { step_name: String },

  #[error("Run of item '{identity}' did not finish: {message}")]
  TaskFailed { identity: String, message: String },

  #[error("Error in user-provided handler or external operation. Source: {source}")]
  HandlerError {
    #[source]
    source: AnyhowError,
  },

  #[error("Configuration error: {message}")]
  Configuration { message: String },
}

impl StrandError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      StrandError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
      StrandError::NotFound { .. } => ErrorKind::NotFound,
      StrandError::FormatError { .. } => ErrorKind::Format,
      StrandError::Overflow { .. } => ErrorKind::Overflow,
      StrandError::Io { .. } => ErrorKind::Io,
      StrandError::HandlerMissing { .. }
      | StrandError::TaskFailed { .. }
      | StrandError::HandlerError { .. }
      | StrandError::Configuration { .. } => ErrorKind::Internal,
    }
  }

  pub(crate) fn blank_identity() -> Self {
    StrandError::InvalidArgument {
      argument: "identity",
      message: "must not be empty or blank".to_string(),
    }
  }
}

// Foreign errors raised inside handlers end up here.
impl From<AnyhowError> for StrandError {
  fn from(err: AnyhowError) -> Self {
    match err.downcast::<StrandError>() {
      Ok(strand_err) => strand_err,
      Err(err) => StrandError::HandlerError { source: err },
    }
  }
}

pub type StrandResult<T, E = StrandError> = std::result::Result<T, E>;
