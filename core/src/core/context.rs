// strand/src/core/context.rs

//! Defines `ItemContext`, the record threaded by value through one item's stage chain.

/// Per-item state for a single pipeline run.
///
/// A context is created when the run starts and is moved from step to step: every
/// step takes ownership, optionally mutates it, and hands it back. Concurrent runs
/// never share a context, so no locking is involved.
///
/// Between the decode and encode steps `value` is authoritative and `payload` is
/// stale. After encode, `payload` is the rendering of `value` that gets written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemContext {
  /// Key used for both the read and the write.
  pub identity: String,
  pub payload: Vec<u8>,
  pub value: i64,
}

impl ItemContext {
  pub fn new(identity: impl Into<String>) -> Self {
    Self {
      identity: identity.into(),
      payload: Vec::new(),
      value: 0,
    }
  }
}
