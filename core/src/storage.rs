// strand/src/storage.rs

//! The storage gateway: named byte items under a read root and a write root.

use crate::error::{StrandError, StrandResult};
use async_trait::async_trait;
use std::ffi::OsStr;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{event, instrument, Level};

/// Read/write access to named items.
///
/// Implementations are shared by every concurrent run. Distinct identities never
/// collide, so no per-call locking is expected; `prepare_write_area` must however
/// complete before any `write` is issued.
#[async_trait]
pub trait StorageGateway: Send + Sync {
  /// Reads the item stored under `identity` in the read root.
  ///
  /// Fails with `InvalidArgument` for a blank identity and `NotFound` when no such item exists.
  async fn read(&self, identity: &str) -> StrandResult<Vec<u8>>;

  /// Empties the write root, creating it if needed. Not safe to call while writes are in flight.
  async fn prepare_write_area(&self) -> StrandResult<()>;

  /// Stores `bytes` under `identity` in the write root, replacing any existing item.
  ///
  /// Fails with `InvalidArgument` for a blank identity or an empty payload.
  async fn write(&self, identity: &str, bytes: &[u8]) -> StrandResult<()>;
}

/// `StorageGateway` over two directories on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsStorage {
  read_root: PathBuf,
  write_root: PathBuf,
}

impl FsStorage {
  pub fn new(read_root: impl Into<PathBuf>, write_root: impl Into<PathBuf>) -> Self {
    Self {
      read_root: read_root.into(),
      write_root: write_root.into(),
    }
  }

  pub fn read_root(&self) -> &Path {
    &self.read_root
  }

  pub fn write_root(&self) -> &Path {
    &self.write_root
  }
}

// An identity names one entry directly under a root; anything that could
// resolve elsewhere (absolute, `..`, `.`, nested) is refused.
fn ensure_identity(identity: &str) -> StrandResult<()> {
  if identity.trim().is_empty() {
    return Err(StrandError::blank_identity());
  }
  let mut components = Path::new(identity).components();
  match (components.next(), components.next()) {
    (Some(Component::Normal(name)), None) if name == OsStr::new(identity) => Ok(()),
    _ => Err(StrandError::InvalidArgument {
      argument: "identity",
      message: format!("'{}' must be a single plain name inside the storage root", identity),
    }),
  }
}

fn io_error(target: &Path, source: io::Error) -> StrandError {
  StrandError::Io {
    target: target.display().to_string(),
    source,
  }
}

#[async_trait]
impl StorageGateway for FsStorage {
  #[instrument(name = "FsStorage::read", skip(self), err(Display))]
  async fn read(&self, identity: &str) -> StrandResult<Vec<u8>> {
    ensure_identity(identity)?;
    let full_path = self.read_root.join(identity);

    match tokio::fs::read(&full_path).await {
      Ok(bytes) => {
        event!(Level::TRACE, bytes = bytes.len(), "Item read.");
        Ok(bytes)
      }
      Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StrandError::NotFound {
        identity: identity.to_string(),
        path: full_path.display().to_string(),
      }),
      Err(e) => Err(io_error(&full_path, e)),
    }
  }

  #[instrument(name = "FsStorage::prepare_write_area", skip(self), fields(write_root = %self.write_root.display()), err(Display))]
  async fn prepare_write_area(&self) -> StrandResult<()> {
    match tokio::fs::remove_dir_all(&self.write_root).await {
      Ok(()) => event!(Level::DEBUG, "Removed previous write area."),
      Err(e) if e.kind() == io::ErrorKind::NotFound => {}
      Err(e) => return Err(io_error(&self.write_root, e)),
    }
    tokio::fs::create_dir_all(&self.write_root)
      .await
      .map_err(|e| io_error(&self.write_root, e))?;
    event!(Level::DEBUG, "Write area ready.");
    Ok(())
  }

  // Delete-then-write: a crash in between can leave the item missing or partial.
  #[instrument(name = "FsStorage::write", skip(self, bytes), fields(bytes = bytes.len()), err(Display))]
  async fn write(&self, identity: &str, bytes: &[u8]) -> StrandResult<()> {
    ensure_identity(identity)?;
    if bytes.is_empty() {
      return Err(StrandError::InvalidArgument {
        argument: "bytes",
        message: format!("refusing to write an empty payload for '{}'", identity),
      });
    }

    let full_path = self.write_root.join(identity);
    match tokio::fs::remove_file(&full_path).await {
      Ok(()) => event!(Level::TRACE, "Replacing existing item."),
      Err(e) if e.kind() == io::ErrorKind::NotFound => {}
      Err(e) => return Err(io_error(&full_path, e)),
    }
    tokio::fs::write(&full_path, bytes)
      .await
      .map_err(|e| io_error(&full_path, e))
  }
}
