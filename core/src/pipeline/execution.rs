// strand/src/pipeline/execution.rs

//! Contains the `Pipeline::run()` method, which threads one context through every
//! step in order.

use crate::core::step::StepHandler;
use crate::error::StrandError;
use crate::pipeline::definition::Pipeline;
use tracing::{event, instrument, span, Instrument, Level};

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send,
  Err: std::error::Error + From<StrandError> + Send + Sync + 'static,
{
  /// Executes the pipeline, moving `ctx` through each step and returning the
  /// context produced by the last one.
  ///
  /// Steps run strictly in sequence: a step starts only after the previous one
  /// has returned its context. The first error aborts the remaining steps and is
  /// returned as-is. A step without a handler fails the run with
  /// `StrandError::HandlerMissing`, converted into `Err`.
  #[instrument(
        name = "Pipeline::run",
        skip_all,
        fields(
            pipeline_context_type = %std::any::type_name::<TData>(),
            num_steps = self.steps.len(),
        ),
        err(Display)
    )]
  pub async fn run(&self, ctx: TData) -> Result<TData, Err> {
    event!(Level::DEBUG, "Pipeline execution starting.");
    let mut ctx = ctx;

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_name_str = step_def.name.as_str();

      let handler = match &step_def.handler {
        Some(handler) => handler,
        None => {
          event!(Level::ERROR, step_name = step_name_str, "Step has no handler.");
          return Err(Err::from(StrandError::HandlerMissing {
            step_name: step_def.name.clone(),
          }));
        }
      };

      let step_span = span!(
        Level::DEBUG,
        "pipeline_step_execution",
        step_name = step_name_str,
        step_index = step_idx,
        kind = %handler.kind()
      );

      let outcome = match handler {
        StepHandler::Sync(handler_fn) => {
          let _step_span_guard = step_span.enter();
          handler_fn(ctx)
        }
        StepHandler::Suspending(handler_fn) => handler_fn(ctx).instrument(step_span.clone()).await,
      };

      ctx = match outcome {
        Ok(next) => next,
        Err(e) => {
          event!(Level::ERROR, step_name = step_name_str, step_index = step_idx, error = %e, "Step failed.");
          return Err(e);
        }
      };
      event!(Level::TRACE, step_name = step_name_str, "Step finished.");
    }

    event!(Level::DEBUG, "Pipeline execution completed successfully.");
    Ok(ctx)
  }
}
