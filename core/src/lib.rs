// src/lib.rs

//! Strand: a small asynchronous stage-chain runner.
//!
//! A pipeline is an ordered list of named steps. Each step takes a context by
//! value and hands it back, either inline (`on_sync`) or after suspending (`on`).
//! The runner starts one pipeline run per input item, all at once, and joins on
//! every run before reporting a single outcome.
//!
//! The bundled number pipeline reads an integer item, reports it, multiplies it
//! by five, reports it again, waits a random while and writes the result.

pub mod config;
pub mod core;
pub mod delay;
pub mod error;
pub mod pipeline;
pub mod runner;
pub mod sink;
pub mod stages;
pub mod storage;

// --- Re-exports for the Public API ---

pub use crate::core::context::ItemContext;
pub use crate::core::step::{Handler, StepDef, StepKind, SyncHandler};

pub use crate::pipeline::definition::Pipeline;

pub use crate::config::{StrandConfig, DEFAULT_ITEMS};
pub use crate::delay::DelaySource;
pub use crate::error::{ErrorKind, StrandError, StrandResult};
pub use crate::runner::{ItemFailure, PipelineRunner, RunError, RunReport};
pub use crate::sink::{MemorySink, ObservationSink, StdoutSink};
pub use crate::stages::{number_pipeline, StageDeps};
pub use crate::storage::{FsStorage, StorageGateway};

/*
    Core Workflow:
    1. Build a `StrandConfig` naming the input and output roots.
    2. Pick an `ObservationSink` (`StdoutSink` for a console, `MemorySink` in tests).
    3. `PipelineRunner::from_config(&config, sink)` wires the number pipeline over
       an `FsStorage` and a seeded `DelaySource`.
    4. `runner.run(["1.txt", "2.txt"]).await` clears the output root, runs every
       item concurrently and returns a `RunReport`, or a `RunError` listing each
       failed identity with its error.
    5. For a custom chain, declare steps with `Pipeline::new(&[...])`, attach
       handlers with `.on()` / `.on_sync()`, and hand an `Arc` of it to
       `PipelineRunner::new`.
*/
