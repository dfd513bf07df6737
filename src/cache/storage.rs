//! Filesystem storage for cache entries.

use color_eyre::{eyre::eyre, Result};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use super::key::CacheKey;

/// Directory tree of immutable JSON entries, one file per resource.
#[derive(Debug, Clone)]
pub struct FileStorage {
  root: PathBuf,
}

impl FileStorage {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  /// On-disk location of the entry for `key`.
  pub fn path_for(&self, key: &CacheKey) -> PathBuf {
    key.to_path(&self.root)
  }

  /// Whether an entry has been published at `path`.
  pub fn contains(&self, path: &Path) -> Result<bool> {
    path
      .try_exists()
      .map_err(|e| eyre!("Failed to check cache entry {}: {}", path.display(), e))
  }

  /// Create the parent directory of `path`.
  ///
  /// Losing a creation race to another process is fine; any other failure is not.
  pub fn ensure_parent(&self, path: &Path) -> Result<()> {
    let Some(parent) = path.parent() else {
      return Ok(());
    };

    match std::fs::create_dir_all(parent) {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == ErrorKind::AlreadyExists && parent.is_dir() => Ok(()),
      Err(e) => Err(eyre!(
        "Failed to create cache directory {}: {}",
        parent.display(),
        e
      )),
    }
  }

  /// Open a temporary file next to `path` to download into.
  pub fn stage(&self, path: &Path) -> Result<NamedTempFile> {
    let dir = path.parent().unwrap_or(self.root.as_path());
    NamedTempFile::new_in(dir)
      .map_err(|e| eyre!("Failed to create staging file in {}: {}", dir.display(), e))
  }

  /// Move a staged download into place without replacing an existing entry.
  ///
  /// Returns `false` when another writer published the entry first; the staged
  /// file is discarded and the existing entry stays authoritative.
  pub fn publish(&self, staged: NamedTempFile, path: &Path) -> Result<bool> {
    staged
      .as_file()
      .sync_all()
      .map_err(|e| eyre!("Failed to flush staged entry for {}: {}", path.display(), e))?;

    match staged.persist_noclobber(path) {
      Ok(_) => Ok(true),
      Err(e) if e.error.kind() == ErrorKind::AlreadyExists => Ok(false),
      Err(e) => Err(eyre!(
        "Failed to write cache entry {}: {}",
        path.display(),
        e.error
      )),
    }
  }

  /// Read and parse an entry, unwrapping a `Results` envelope.
  pub fn load(&self, path: &Path) -> Result<Value> {
    let bytes = std::fs::read(path)
      .map_err(|e| eyre!("Failed to read cache entry {}: {}", path.display(), e))?;

    let value: Value = serde_json::from_slice(&bytes)
      .map_err(|e| eyre!("Failed to parse cache entry {}: {}", path.display(), e))?;

    Ok(unwrap_results(value))
  }
}

/// `{"Results": x}` becomes `x`; anything else is returned unchanged.
pub fn unwrap_results(value: Value) -> Value {
  match value {
    Value::Object(mut map) if map.contains_key("Results") => {
      map.remove("Results").unwrap_or(Value::Null)
    }
    other => other,
  }
}
