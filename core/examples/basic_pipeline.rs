// strand/examples/basic_pipeline.rs

use strand::{Pipeline, StrandError};
use tracing::info;

// 1. Define the context threaded through the pipeline
#[derive(Clone, Debug, Default)]
struct BasicContext {
  message_log: Vec<String>,
  counter: i32,
}

#[tokio::main]
async fn main() -> Result<(), StrandError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Basic Pipeline Example ---");

  // 2. Declare the steps in order
  let mut pipeline = Pipeline::<BasicContext, StrandError>::new(&["step_alpha", "step_beta", "step_gamma"]);

  // 3. Attach handlers. Sync steps run inline, suspending ones may await.
  pipeline.on_sync("step_alpha", |mut ctx: BasicContext| {
    ctx.counter += 1;
    let msg = format!("Alpha executed: counter = {}", ctx.counter);
    info!("{}", msg);
    ctx.message_log.push(msg);
    Ok::<_, StrandError>(ctx)
  });

  pipeline.on("step_beta", |mut ctx: BasicContext| async move {
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    ctx.counter *= 2;
    let msg = format!("Beta executed: counter = {}", ctx.counter);
    info!("{}", msg);
    ctx.message_log.push(msg);
    Ok::<_, StrandError>(ctx)
  });

  pipeline.on_sync("step_gamma", |mut ctx: BasicContext| {
    ctx.counter -= 1;
    let msg = format!("Gamma executed: counter = {}", ctx.counter);
    info!("{}", msg);
    ctx.message_log.push(msg);
    Ok::<_, StrandError>(ctx)
  });

  // 4. Run it; the context comes back out of the last step
  let initial = BasicContext {
    message_log: Vec::new(),
    counter: 5,
  };
  let finished = pipeline.run(initial).await?;

  info!("Final counter value: {}", finished.counter);
  for log_entry in &finished.message_log {
    info!("- {}", log_entry);
  }

  // Expected: (5+1)*2 - 1 = 11
  assert_eq!(finished.counter, 11);
  assert_eq!(finished.message_log.len(), 3);

  Ok(())
}
