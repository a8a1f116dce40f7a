// strand/src/pipeline/hooks.rs

//! Contains the methods that attach handlers to pipeline steps. A step is either
//! synchronous (`on_sync`) or suspending (`on`); both consume the context and
//! return it.

use tracing::{event, Level};

use crate::core::step::{Handler, StepHandler, SyncHandler};
use crate::error::StrandError;
use crate::pipeline::definition::Pipeline;
use std::future::Future;

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send,
  Err: std::error::Error + From<StrandError> + Send + Sync + 'static,
{
  /// Registers a suspending handler for `step_name`, replacing any previous one.
  ///
  /// The `handler_fn` takes the context by value and returns a `Future` resolving
  /// to `Result<TData, UserProvidedErr>`, where `UserProvidedErr` must be
  /// convertible into the pipeline's `Err` type.
  pub fn on<F, UserProvidedErr>(&mut self, step_name: &str, handler_fn: impl Fn(TData) -> F + Send + Sync + 'static)
  where
    F: Future<Output = Result<TData, UserProvidedErr>> + Send + 'static,
    UserProvidedErr: Into<Err> + Send + Sync + 'static,
  {
    let final_handler: Handler<TData, Err> = Box::new(move |ctx| {
      let user_fut = handler_fn(ctx);
      Box::pin(async move { user_fut.await.map_err(Into::into) })
    });
    self.install(step_name, StepHandler::Suspending(final_handler));
  }

  /// Registers a synchronous handler for `step_name`, replacing any previous one.
  /// The handler runs inline and never yields.
  pub fn on_sync<UserProvidedErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(TData) -> Result<TData, UserProvidedErr> + Send + Sync + 'static,
  ) where
    UserProvidedErr: Into<Err> + Send + Sync + 'static,
  {
    let final_handler: SyncHandler<TData, Err> = Box::new(move |ctx| handler_fn(ctx).map_err(Into::into));
    self.install(step_name, StepHandler::Sync(final_handler));
  }

  fn install(&mut self, step_name: &str, handler: StepHandler<TData, Err>) {
    let kind = handler.kind();
    let step = self.step_mut(step_name);
    if step.handler.is_some() {
      event!(Level::DEBUG, %step_name, %kind, "Replacing existing handler.");
    }
    step.handler = Some(handler);
    event!(Level::DEBUG, %step_name, %kind, "Handler registered.");
  }
}
