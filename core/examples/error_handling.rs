// strand/examples/error_handling.rs

//! Runs the number pipeline over a scratch directory in which one item is
//! malformed and one is missing, then prints every reported failure.

use std::sync::Arc;
use std::time::Duration;
use strand::{PipelineRunner, RunError, StdoutSink, StrandConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  let scratch = std::env::temp_dir().join(format!("strand-error-handling-{}", std::process::id()));
  let input = scratch.join("input");
  std::fs::create_dir_all(&input)?;
  std::fs::write(input.join("1.txt"), "3")?;
  std::fs::write(input.join("2.txt"), "notanumber")?;

  let config = StrandConfig::with_roots(&input, scratch.join("output")).delay_unit(Duration::from_millis(10));
  let runner = PipelineRunner::from_config(&config, Arc::new(StdoutSink))?;

  match runner.run(["1.txt", "2.txt", "3.txt"]).await {
    Ok(report) => info!(completed = ?report.completed, "Every item succeeded."),
    Err(RunError::Setup(e)) => error!(error = %e, "Could not prepare the output directory."),
    Err(err) => {
      info!(completed = ?err.completed(), "Items that were written.");
      for failure in err.failures() {
        error!(identity = %failure.identity, kind = ?failure.kind(), error = %failure.error, "Item failed.");
      }
    }
  }

  std::fs::remove_dir_all(&scratch)?;
  Ok(())
}
