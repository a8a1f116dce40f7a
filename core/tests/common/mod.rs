// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use once_cell::sync::Lazy;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use strand::{
  number_pipeline, DelaySource, FsStorage, ItemContext, MemorySink, Pipeline, StageDeps, StorageGateway, StrandError,
};
use tempfile::TempDir;
use tracing::Level;

// --- Common Context Struct for generic pipeline tests ---
#[derive(Clone, Debug, Default)]
pub struct TestContext {
  pub counter: i32,
  pub message: String,
  pub steps_executed: Vec<String>,
}

// --- Common Error Type for Tests ---
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Strand framework error: {0}")]
  Strand(String), // Stored as String for Eq comparison

  #[error("Test handler failed: {0}")]
  Handler(String),
}

impl From<StrandError> for TestError {
  fn from(se: StrandError) -> Self {
    TestError::Strand(format!("{:?}", se))
  }
}

// --- Common Handler Creators ---
pub fn simple_step(
  step_name: &'static str,
  message_to_append: &'static str,
) -> impl Fn(TestContext) -> Result<TestContext, TestError> + Send + Sync + 'static {
  move |mut ctx: TestContext| {
    ctx.counter += 1;
    ctx.message.push_str(message_to_append);
    ctx.steps_executed.push(step_name.to_string());
    tracing::debug!(target: "test_handlers", step = %step_name, "executed, counter: {}, message: '{}'", ctx.counter, ctx.message);
    Ok(ctx)
  }
}

pub async fn yielding_step(step_name: &'static str, mut ctx: TestContext) -> Result<TestContext, TestError> {
  tokio::task::yield_now().await;
  ctx.counter += 1;
  ctx.steps_executed.push(step_name.to_string());
  Ok(ctx)
}

pub fn failing_step(
  step_name: &'static str,
  error_message: &'static str,
) -> impl Fn(TestContext) -> Result<TestContext, TestError> + Send + Sync + 'static {
  move |ctx: TestContext| {
    tracing::warn!(target: "test_handlers", step = %step_name, counter = ctx.counter, "failing with: '{}'", error_message);
    Err(TestError::Handler(error_message.to_string()))
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Filesystem fixtures for the number pipeline ---
pub struct Workspace {
  // Held so the directories live as long as the fixture.
  _dir: TempDir,
  pub input: PathBuf,
  pub output: PathBuf,
}

impl Workspace {
  pub fn new(items: &[(&str, &str)]) -> Self {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input");
    let output = dir.path().join("output");
    std::fs::create_dir_all(&input).unwrap();
    for (name, contents) in items {
      std::fs::write(input.join(name), contents).unwrap();
    }
    Self { _dir: dir, input, output }
  }

  pub fn storage(&self) -> Arc<dyn StorageGateway> {
    Arc::new(FsStorage::new(&self.input, &self.output))
  }

  pub fn output_of(&self, name: &str) -> Option<String> {
    read_to_string_opt(&self.output.join(name))
  }

  pub fn output_names(&self) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(&self.output)
      .unwrap()
      .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
      .collect();
    names.sort();
    names
  }
}

fn read_to_string_opt(path: &Path) -> Option<String> {
  std::fs::read_to_string(path).ok()
}

pub fn instant_delay() -> Arc<DelaySource> {
  Arc::new(DelaySource::new(27498, Duration::ZERO, 10).unwrap())
}

pub fn test_number_pipeline(
  storage: Arc<dyn StorageGateway>,
  sink: Arc<MemorySink>,
) -> Pipeline<ItemContext, StrandError> {
  number_pipeline(StageDeps {
    storage,
    sink,
    delay: instant_delay(),
  })
}
