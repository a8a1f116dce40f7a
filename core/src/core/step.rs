// strand/src/core/step.rs

//! Defines the structure for a single step within a pipeline and the handler types that run it.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// Whether a step may suspend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
  /// Runs inline on the caller's task, without yielding to the scheduler.
  Sync,
  /// Returns a future; the run suspends until it resolves.
  Suspending,
}

impl fmt::Display for StepKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      StepKind::Sync => f.write_str("sync"),
      StepKind::Suspending => f.write_str("suspending"),
    }
  }
}

/// Type alias for a suspending step handler.
///
/// The handler takes ownership of the context and returns a boxed future that
/// resolves to the (possibly mutated) context, or the error that aborts the run.
pub type Handler<TData, Err> =
  Box<dyn Fn(TData) -> Pin<Box<dyn Future<Output = Result<TData, Err>> + Send>> + Send + Sync>;

/// Type alias for a synchronous step handler.
pub type SyncHandler<TData, Err> = Box<dyn Fn(TData) -> Result<TData, Err> + Send + Sync>;

/// The handler registered for a step. Its variant decides the step's [`StepKind`].
pub enum StepHandler<TData, Err> {
  Sync(SyncHandler<TData, Err>),
  Suspending(Handler<TData, Err>),
}

impl<TData, Err> StepHandler<TData, Err> {
  pub fn kind(&self) -> StepKind {
    match self {
      StepHandler::Sync(_) => StepKind::Sync,
      StepHandler::Suspending(_) => StepKind::Suspending,
    }
  }
}

impl<TData, Err> fmt::Debug for StepHandler<TData, Err> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("StepHandler").field(&self.kind()).finish()
  }
}

/// Definition of a pipeline step: its name and, once registered, its handler.
pub struct StepDef<TData, Err> {
  pub name: String,
  pub(crate) handler: Option<StepHandler<TData, Err>>,
}

impl<TData, Err> StepDef<TData, Err> {
  pub(crate) fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      handler: None,
    }
  }

  /// `None` until a handler has been registered.
  pub fn kind(&self) -> Option<StepKind> {
    self.handler.as_ref().map(StepHandler::kind)
  }
}

// Handlers are boxed closures, so Debug only reports what is observable.
impl<TData, Err> fmt::Debug for StepDef<TData, Err> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("StepDef")
      .field("name", &self.name)
      .field("kind", &self.kind())
      .finish()
  }
}
