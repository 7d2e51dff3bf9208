//! Durable session storage — one serialized [`Principal`] blob.
//!
//! The blob is written whole and read whole under a single well-known key;
//! absence means "no current principal". There is no schema version field,
//! so an unreadable blob is discarded rather than treated as fatal.

use std::{
  path::PathBuf,
  sync::{Arc, Mutex, PoisonError},
};

use gather_core::{Result, principal::Principal};

/// Key-value storage for the active principal.
pub trait SessionStorage: Send + Sync {
  /// Read the stored principal, if any.
  fn load(&self) -> Result<Option<Principal>>;

  /// Overwrite the stored principal.
  fn store(&self, principal: &Principal) -> Result<()>;

  /// Remove the stored principal. Removing an absent entry is fine.
  fn clear(&self) -> Result<()>;
}

// ─── File-backed ─────────────────────────────────────────────────────────────

/// Session storage backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct FileSession {
  path: PathBuf,
}

impl FileSession {
  pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }
}

impl SessionStorage for FileSession {
  fn load(&self) -> Result<Option<Principal>> {
    let raw = match std::fs::read_to_string(&self.path) {
      Ok(raw) => raw,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
      Err(e) => return Err(e.into()),
    };

    match serde_json::from_str(&raw) {
      Ok(principal) => Ok(Some(principal)),
      Err(e) => {
        // A blob we cannot parse is treated as no session at all.
        tracing::warn!("discarding unreadable session blob: {e}");
        self.clear()?;
        Ok(None)
      }
    }
  }

  fn store(&self, principal: &Principal) -> Result<()> {
    if let Some(parent) = self.path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    let raw = serde_json::to_string_pretty(principal)?;
    std::fs::write(&self.path, raw)?;
    Ok(())
  }

  fn clear(&self) -> Result<()> {
    match std::fs::remove_file(&self.path) {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
      Err(e) => Err(e.into()),
    }
  }
}

// ─── In-memory ───────────────────────────────────────────────────────────────

/// Session storage held in memory — useful for testing.
///
/// Cloning shares the underlying slot, so a test can keep a handle across
/// store restarts. The principal is kept in serialized form so the
/// round-trip through the blob format is exercised for real.
#[derive(Debug, Clone, Default)]
pub struct MemorySession {
  slot: Arc<Mutex<Option<String>>>,
}

impl MemorySession {
  pub fn new() -> Self { Self::default() }

  fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
    self.slot.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl SessionStorage for MemorySession {
  fn load(&self) -> Result<Option<Principal>> {
    self
      .lock()
      .as_deref()
      .map(serde_json::from_str)
      .transpose()
      .map_err(Into::into)
  }

  fn store(&self, principal: &Principal) -> Result<()> {
    let raw = serde_json::to_string(principal)?;
    *self.lock() = Some(raw);
    Ok(())
  }

  fn clear(&self) -> Result<()> {
    *self.lock() = None;
    Ok(())
  }
}
