// strand/src/stages.rs

//! The number pipeline: read an integer, report it, multiply it, report it again,
//! wait a random while, and write the result back under the same identity.
//!
//! Each step is a free function taking the `ItemContext` by value; `number_pipeline`
//! wires them into a `Pipeline` in their fixed order.

use crate::core::context::ItemContext;
use crate::delay::DelaySource;
use crate::error::{StrandError, StrandResult};
use crate::pipeline::Pipeline;
use crate::sink::ObservationSink;
use crate::storage::StorageGateway;
use std::sync::Arc;
use tracing::{event, instrument, Level};

pub const READ_STEP: &str = "read";
pub const DECODE_STEP: &str = "decode";
pub const OBSERVE_ORIGINAL_STEP: &str = "observe_original";
pub const MULTIPLY_STEP: &str = "multiply";
pub const OBSERVE_MULTIPLIED_STEP: &str = "observe_multiplied";
pub const DELAY_STEP: &str = "delay";
pub const ENCODE_STEP: &str = "encode";
pub const WRITE_STEP: &str = "write";

/// Step order of the number pipeline.
pub const NUMBER_STEPS: [&str; 8] = [
  READ_STEP,
  DECODE_STEP,
  OBSERVE_ORIGINAL_STEP,
  MULTIPLY_STEP,
  OBSERVE_MULTIPLIED_STEP,
  DELAY_STEP,
  ENCODE_STEP,
  WRITE_STEP,
];

pub const ORIGINAL_LABEL: &str = "Original number";
pub const MULTIPLIED_LABEL: &str = "After Multiply By 5";
pub const MULTIPLY_FACTOR: i64 = 5;

/// Collaborators shared by every run of the number pipeline.
#[derive(Clone)]
pub struct StageDeps {
  pub storage: Arc<dyn StorageGateway>,
  pub sink: Arc<dyn ObservationSink>,
  pub delay: Arc<DelaySource>,
}

#[instrument(name = "stage::read", skip_all, fields(identity = %ctx.identity), err(Display))]
pub async fn read_step(storage: Arc<dyn StorageGateway>, mut ctx: ItemContext) -> StrandResult<ItemContext> {
  ctx.payload = storage.read(&ctx.identity).await?;
  Ok(ctx)
}

/// Strict parse: UTF-8, optional sign, digits, nothing else (no surrounding whitespace).
pub fn decode_step(mut ctx: ItemContext) -> StrandResult<ItemContext> {
  let text = std::str::from_utf8(&ctx.payload).map_err(|e| StrandError::FormatError {
    identity: ctx.identity.clone(),
    reason: format!("payload is not valid UTF-8 ({})", e),
  })?;
  ctx.value = text.parse::<i64>().map_err(|e| StrandError::FormatError {
    identity: ctx.identity.clone(),
    reason: format!("{:?}: {}", text, e),
  })?;
  Ok(ctx)
}

pub fn observe_step(sink: &dyn ObservationSink, label: &str, ctx: ItemContext) -> StrandResult<ItemContext> {
  sink.observe(label, ctx.value);
  Ok(ctx)
}

pub fn multiply_step(factor: i64, mut ctx: ItemContext) -> StrandResult<ItemContext> {
  ctx.value = ctx.value.checked_mul(factor).ok_or_else(|| StrandError::Overflow {
    identity: ctx.identity.clone(),
    value: ctx.value,
    factor,
  })?;
  Ok(ctx)
}

/// Suspends for a random delay; the context passes through untouched.
pub async fn delay_step(delay: Arc<DelaySource>, ctx: ItemContext) -> StrandResult<ItemContext> {
  let applied = delay.wait().await;
  event!(Level::TRACE, identity = %ctx.identity, delay_ms = applied.as_millis() as u64, "Delay elapsed.");
  Ok(ctx)
}

pub fn encode_step(mut ctx: ItemContext) -> StrandResult<ItemContext> {
  ctx.payload = ctx.value.to_string().into_bytes();
  Ok(ctx)
}

#[instrument(name = "stage::write", skip_all, fields(identity = %ctx.identity), err(Display))]
pub async fn write_step(storage: Arc<dyn StorageGateway>, ctx: ItemContext) -> StrandResult<ItemContext> {
  storage.write(&ctx.identity, &ctx.payload).await?;
  Ok(ctx)
}

/// Builds the number pipeline over the given collaborators.
pub fn number_pipeline(deps: StageDeps) -> Pipeline<ItemContext, StrandError> {
  let mut pipeline = Pipeline::<ItemContext, StrandError>::new(&NUMBER_STEPS);

  let storage = deps.storage.clone();
  pipeline.on(READ_STEP, move |ctx| read_step(storage.clone(), ctx));

  pipeline.on_sync(DECODE_STEP, decode_step);

  let sink = deps.sink.clone();
  pipeline.on_sync(OBSERVE_ORIGINAL_STEP, move |ctx| observe_step(sink.as_ref(), ORIGINAL_LABEL, ctx));

  pipeline.on_sync(MULTIPLY_STEP, |ctx| multiply_step(MULTIPLY_FACTOR, ctx));

  let sink = deps.sink.clone();
  pipeline.on_sync(OBSERVE_MULTIPLIED_STEP, move |ctx| observe_step(sink.as_ref(), MULTIPLIED_LABEL, ctx));

  let delay = deps.delay.clone();
  pipeline.on(DELAY_STEP, move |ctx| delay_step(delay.clone(), ctx));

  pipeline.on_sync(ENCODE_STEP, encode_step);

  let storage = deps.storage;
  pipeline.on(WRITE_STEP, move |ctx| write_step(storage.clone(), ctx));

  pipeline
}
