// strand/src/pipeline/definition.rs

//! Contains the `Pipeline<TData, Err>` struct definition and methods for its
//! construction and inspection.

use crate::core::step::StepDef;
use crate::error::StrandError;

/// An ordered chain of named steps, generic over the context type `TData` that is
/// threaded through it and the error type `Err` its handlers return.
///
/// The chain is fixed at construction: `Pipeline::new` declares the step names in
/// order, and `on` / `on_sync` attach exactly one handler to each of them.
///
/// `Err` must be `From<StrandError>` so that framework failures (a step without a
/// handler) can be reported through the same channel as handler failures.
pub struct Pipeline<TData, Err>
where
  TData: 'static + Send,
  Err: std::error::Error + From<StrandError> + Send + Sync + 'static,
{
  /// Ordered list of step definitions for this pipeline.
  pub(crate) steps: Vec<StepDef<TData, Err>>,
}

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send,
  Err: std::error::Error + From<StrandError> + Send + Sync + 'static,
{
  /// Creates a new `Pipeline` declaring `step_names` in execution order.
  ///
  /// Panics on duplicate names; that is a setup error, not a runtime condition.
  pub fn new(step_names: &[&str]) -> Self {
    let mut pipeline = Self { steps: Vec::with_capacity(step_names.len()) };
    for name in step_names {
      pipeline.ensure_step_not_exists(name);
      pipeline.steps.push(StepDef::new(*name));
    }
    pipeline
  }

  /// Step names in execution order.
  pub fn step_names(&self) -> Vec<&str> {
    self.steps.iter().map(|s| s.name.as_str()).collect()
  }

  pub fn steps(&self) -> &[StepDef<TData, Err>] {
    &self.steps
  }

  pub fn len(&self) -> usize {
    self.steps.len()
  }

  pub fn is_empty(&self) -> bool {
    self.steps.is_empty()
  }

  /// Returns the step with the given name. Panics if not found.
  /// Used when registering handlers, where a typo in a step name is a programming error.
  pub(crate) fn step_mut(&mut self, step_name: &str) -> &mut StepDef<TData, Err> {
    match self.steps.iter_mut().find(|s| s.name == step_name) {
      Some(step) => step,
      None => panic!("Strand setup error: Step '{}' not found in pipeline definition.", step_name),
    }
  }

  fn ensure_step_not_exists(&self, step_name: &str) {
    if self.steps.iter().any(|s| s.name == step_name) {
      panic!(
        "Strand setup error: Step '{}' already exists in pipeline definition.",
        step_name
      );
    }
  }
}

impl<TData, Err> std::fmt::Debug for Pipeline<TData, Err>
where
  TData: 'static + Send,
  Err: std::error::Error + From<StrandError> + Send + Sync + 'static,
{
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Pipeline").field("steps", &self.steps).finish()
  }
}
