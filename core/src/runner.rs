// strand/src/runner.rs

//! Defines `PipelineRunner`, which fans a list of identities out into concurrent
//! pipeline runs and joins on every one of them.

use crate::config::StrandConfig;
use crate::core::context::ItemContext;
use crate::delay::DelaySource;
use crate::error::{ErrorKind, StrandError};
use crate::pipeline::Pipeline;
use crate::sink::ObservationSink;
use crate::stages::{number_pipeline, StageDeps};
use crate::storage::{FsStorage, StorageGateway};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{event, instrument, Instrument, Level};

/// The failed run of one item.
#[derive(Debug)]
pub struct ItemFailure {
  pub identity: String,
  pub error: StrandError,
}

impl ItemFailure {
  pub fn kind(&self) -> ErrorKind {
    self.error.kind()
  }
}

impl fmt::Display for ItemFailure {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.identity, self.error)
  }
}

/// Outcome of a run in which every item succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
  /// Identities that were written, in input order.
  pub completed: Vec<String>,
}

#[derive(Debug, Error)]
pub enum RunError {
  /// The write area could not be prepared; no item was started.
  #[error("Failed to prepare the write area. Source: {0}")]
  Setup(#[source] StrandError),

  /// One or more items failed. Every failure is listed, in input order.
  #[error("{}", describe_failures(.failures, .completed))]
  Items {
    failures: Vec<ItemFailure>,
    completed: Vec<String>,
  },
}

impl RunError {
  pub fn failures(&self) -> &[ItemFailure] {
    match self {
      RunError::Setup(_) => &[],
      RunError::Items { failures, .. } => failures,
    }
  }

  pub fn completed(&self) -> &[String] {
    match self {
      RunError::Setup(_) => &[],
      RunError::Items { completed, .. } => completed,
    }
  }
}

fn describe_failures(failures: &[ItemFailure], completed: &[String]) -> String {
  let details = failures.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ");
  format!(
    "{} of {} item run(s) failed: {}",
    failures.len(),
    failures.len() + completed.len(),
    details
  )
}

/// Runs one pipeline per identity, all at once.
pub struct PipelineRunner {
  pipeline: Arc<Pipeline<ItemContext, StrandError>>,
  storage: Arc<dyn StorageGateway>,
}

impl PipelineRunner {
  /// Builds a runner over a hand-assembled pipeline.
  ///
  /// `storage` must be the same gateway the pipeline's write step captured. The
  /// runner only prepares the write area of `storage`, and that preparation is
  /// what orders the clearing of the write root before every write. Passing a
  /// different gateway leaves the pipeline writing into an unprepared area.
  /// Prefer [`PipelineRunner::from_config`], which wires both from one gateway.
  pub fn new(pipeline: Arc<Pipeline<ItemContext, StrandError>>, storage: Arc<dyn StorageGateway>) -> Self {
    Self { pipeline, storage }
  }

  /// Wires the number pipeline over a filesystem gateway described by `config`.
  pub fn from_config(config: &StrandConfig, sink: Arc<dyn ObservationSink>) -> Result<Self, StrandError> {
    config.validate()?;
    let storage: Arc<dyn StorageGateway> = Arc::new(FsStorage::new(&config.input_root, &config.output_root));
    let delay = Arc::new(DelaySource::from_config(config)?);
    let pipeline = number_pipeline(StageDeps {
      storage: storage.clone(),
      sink,
      delay,
    });
    Ok(Self::new(Arc::new(pipeline), storage))
  }

  pub fn pipeline(&self) -> &Pipeline<ItemContext, StrandError> {
    &self.pipeline
  }

  /// The gateway whose write area is prepared at the start of every run.
  pub fn storage(&self) -> &Arc<dyn StorageGateway> {
    &self.storage
  }

  /// Prepares the write area, starts a run for every identity, then waits for all of them.
  ///
  /// Every run is spawned before any is awaited. A failing item never cancels its
  /// siblings; the join waits for each run regardless. Succeeds only if every item
  /// succeeded, otherwise returns all failures.
  #[instrument(name = "PipelineRunner::run", skip_all, err(Display))]
  pub async fn run<I, S>(&self, identities: I) -> Result<RunReport, RunError>
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let identities: Vec<String> = identities.into_iter().map(Into::into).collect();
    event!(Level::INFO, items = identities.len(), "Starting pipeline runs.");

    // Must finish before the first write of any run.
    self.storage.prepare_write_area().await.map_err(RunError::Setup)?;

    let handles: Vec<(String, JoinHandle<Result<ItemContext, StrandError>>)> = identities
      .into_iter()
      .map(|identity| {
        let pipeline = Arc::clone(&self.pipeline);
        let item_span = tracing::info_span!("item_run", identity = %identity);
        let ctx = ItemContext::new(identity.clone());
        let handle = tokio::spawn(async move { pipeline.run(ctx).await }.instrument(item_span));
        (identity, handle)
      })
      .collect();

    let mut completed = Vec::new();
    let mut failures = Vec::new();
    for (identity, handle) in handles {
      match handle.await {
        Ok(Ok(_)) => {
          event!(Level::INFO, %identity, "Item run completed.");
          completed.push(identity);
        }
        Ok(Err(error)) => {
          event!(Level::ERROR, %identity, kind = ?error.kind(), error = %error, "Item run failed.");
          failures.push(ItemFailure { identity, error });
        }
        Err(join_error) => {
          event!(Level::ERROR, %identity, error = %join_error, "Item run aborted.");
          let error = StrandError::TaskFailed {
            identity: identity.clone(),
            message: join_error.to_string(),
          };
          failures.push(ItemFailure { identity, error });
        }
      }
    }

    if failures.is_empty() {
      event!(Level::INFO, completed = completed.len(), "All item runs completed.");
      Ok(RunReport { completed })
    } else {
      Err(RunError::Items { failures, completed })
    }
  }
}
