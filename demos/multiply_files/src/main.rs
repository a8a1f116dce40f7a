// demos/multiply_files/src/main.rs

mod config;
mod errors;

use crate::config::AppConfig;
use crate::errors::Result as AppResult;

use std::process::ExitCode;
use std::sync::Arc;
use strand::{PipelineRunner, StdoutSink};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
  // Logs go to stderr so stdout carries only the observation lines.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")), // Allow RUST_LOG override
    )
    .with_span_events(FmtSpan::CLOSE)
    .with_writer(std::io::stderr)
    .init();

  println!("Started...");
  let outcome = run().await;
  println!("Ended...");

  match outcome {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      tracing::error!(error = %e, "multiply_files failed.");
      ExitCode::FAILURE
    }
  }
}

async fn run() -> AppResult<()> {
  let app_config = AppConfig::from_env()?;
  let runner = PipelineRunner::from_config(&app_config.strand, Arc::new(StdoutSink))?;
  let report = runner.run(app_config.items.iter().cloned()).await?;
  tracing::info!(completed = report.completed.len(), "All items written.");
  Ok(())
}
