pub mod context;
pub mod step;

// Re-export key types for easier access from other modules (and lib.rs)
pub use context::ItemContext;
pub use step::{Handler, StepDef, StepHandler, StepKind, SyncHandler};
