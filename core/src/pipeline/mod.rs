// strand/src/pipeline/mod.rs

//! Defines the `Pipeline<TData, Err>` stage chain: its construction, handler
//! registration and execution.

pub mod definition;
pub mod execution;
pub mod hooks;

pub use definition::Pipeline;
