//! Cache layer that orchestrates caching logic with network fetching.

use color_eyre::{eyre::eyre, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::io::Write;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

use super::key::CacheKey;
use super::storage::FileStorage;
use super::traits::{CacheResult, Transport};

/// Cache layer that serves entries from disk and downloads missing ones.
///
/// An entry that exists is never refetched. A missing entry is downloaded
/// into a staging file, published, and then read back from disk so the
/// first parse and every later parse see the same bytes.
pub struct CacheLayer<T: Transport> {
  storage: Arc<FileStorage>,
  transport: Arc<T>,
}

impl<T: Transport> CacheLayer<T> {
  /// Create a new cache layer with the given storage and transport.
  pub fn new(storage: FileStorage, transport: T) -> Self {
    Self {
      storage: Arc::new(storage),
      transport: Arc::new(transport),
    }
  }

  pub fn storage(&self) -> &FileStorage {
    &self.storage
  }

  #[cfg(test)]
  pub fn transport(&self) -> &T {
    &self.transport
  }

  /// Fetch the raw JSON body for `key`, downloading it from `url` on a miss.
  pub async fn fetch(&self, key: &CacheKey, url: &Url) -> Result<CacheResult<Value>> {
    let path = self.storage.path_for(key);

    if self.storage.contains(&path)? {
      debug!(%key, "cache hit");
      let data = self.storage.load(&path)?;
      return Ok(CacheResult::from_cache(data, path));
    }

    self.storage.ensure_parent(&path)?;

    info!(%url, "GET");
    let mut staged = self.storage.stage(&path)?;
    let bytes = self.transport.download(url, &mut staged).await?;
    staged
      .flush()
      .map_err(|e| eyre!("Failed to write {}: {}", path.display(), e))?;

    if self.storage.publish(staged, &path)? {
      debug!(%key, bytes, "cached");
    } else {
      debug!(%key, "entry was published concurrently, keeping it");
    }

    let data = self.storage.load(&path)?;
    Ok(CacheResult::from_network(data, path))
  }

  /// Fetch a single record.
  pub async fn fetch_one<D>(&self, key: &CacheKey, url: &Url) -> Result<CacheResult<D>>
  where
    D: DeserializeOwned,
  {
    decode(self.fetch(key, url).await?)
  }

  /// Fetch a list of records. A `Results` envelope has already been unwrapped.
  pub async fn fetch_list<D>(&self, key: &CacheKey, url: &Url) -> Result<CacheResult<Vec<D>>>
  where
    D: DeserializeOwned,
  {
    decode(self.fetch(key, url).await?)
  }
}

impl<T: Transport> Clone for CacheLayer<T> {
  fn clone(&self) -> Self {
    Self {
      storage: Arc::clone(&self.storage),
      transport: Arc::clone(&self.transport),
    }
  }
}

/// Typed decode of a cached body; errors name the cache entry.
fn decode<D: DeserializeOwned>(raw: CacheResult<Value>) -> Result<CacheResult<D>> {
  let CacheResult { data, source, path } = raw;
  let data = serde_json::from_value(data)
    .map_err(|e| eyre!("Failed to decode cache entry {}: {}", path.display(), e))?;
  Ok(CacheResult { data, source, path })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::cache::traits::CacheSource;
  use crate::testing::MockTransport;
  use serde_json::json;
  use std::time::Duration;
  use tempfile::tempdir;

  fn url() -> Url {
    Url::parse("https://api.example.test/api/v1/countries?count=1000").unwrap()
  }

  #[tokio::test]
  async fn test_second_fetch_served_from_cache() {
    let dir = tempdir().unwrap();
    let transport = MockTransport::new()
      .route("countries", "[1, 2, 3]")
      .route("countries", "[4, 5, 6]");
    let layer = CacheLayer::new(FileStorage::new(dir.path()), transport);
    let key = CacheKey::root("countries");

    let first = layer.fetch(&key, &url()).await.unwrap();
    let second = layer.fetch(&key, &url()).await.unwrap();

    assert_eq!(first.data, json!([1, 2, 3]));
    assert_eq!(second.data, json!([1, 2, 3]));
    assert_eq!(first.source, CacheSource::Network);
    assert_eq!(second.source, CacheSource::Cache);
    assert_eq!(layer.transport.request_count("countries"), 1);
  }

  #[tokio::test]
  async fn test_existing_entry_never_hits_network() {
    let dir = tempdir().unwrap();
    let key = CacheKey::root("countries");
    let path = key.to_path(dir.path());
    std::fs::write(&path, r#"{"Results": [1, 2, 3]}"#).unwrap();

    let layer = CacheLayer::new(FileStorage::new(dir.path()), MockTransport::new());
    let result = layer.fetch(&key, &url()).await.unwrap();

    assert_eq!(result.data, json!([1, 2, 3]));
    assert!(layer.transport.requests().is_empty());
  }

  #[tokio::test]
  async fn test_body_is_stored_verbatim() {
    let dir = tempdir().unwrap();
    let body = "{ \"Results\" : [ {\"IdCountry\": \"SCO\"} ] }\n";
    let layer = CacheLayer::new(
      FileStorage::new(dir.path()),
      MockTransport::new().route("countries", body),
    );
    let key = CacheKey::root("countries").child("SCO").child("competitions");

    let result = layer.fetch(&key, &url()).await.unwrap();

    assert_eq!(std::fs::read_to_string(&result.path).unwrap(), body);
    assert_eq!(result.path, dir.path().join("countries/SCO/competitions.json"));
    assert_eq!(result.data, json!([{"IdCountry": "SCO"}]));
  }

  #[tokio::test]
  async fn test_transport_error_leaves_no_entry() {
    let dir = tempdir().unwrap();
    let layer = CacheLayer::new(FileStorage::new(dir.path()), MockTransport::new());
    let key = CacheKey::root("countries");

    assert!(layer.fetch(&key, &url()).await.is_err());
    assert!(!key.to_path(dir.path()).exists());
  }

  #[tokio::test]
  async fn test_malformed_download_is_fatal_and_names_file() {
    let dir = tempdir().unwrap();
    let layer = CacheLayer::new(
      FileStorage::new(dir.path()),
      MockTransport::new().route("countries", "<html>oops</html>"),
    );

    let err = layer
      .fetch(&CacheKey::root("countries"), &url())
      .await
      .unwrap_err()
      .to_string();
    assert!(err.contains("countries.json"), "{}", err);
  }

  #[tokio::test]
  async fn test_decode_error_names_file() {
    #[derive(Debug, serde::Deserialize)]
    struct Named {
      #[allow(dead_code)]
      name: String,
    }

    let dir = tempdir().unwrap();
    let layer = CacheLayer::new(
      FileStorage::new(dir.path()),
      MockTransport::new().route("countries", r#"[{"other": 1}]"#),
    );

    let err = layer
      .fetch_list::<Named>(&CacheKey::root("countries"), &url())
      .await
      .unwrap_err()
      .to_string();
    assert!(err.contains("countries.json"), "{}", err);
  }

  #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
  async fn test_concurrent_first_fetch_single_winner() {
    let dir = tempdir().unwrap();
    let transport = MockTransport::new()
      .route("countries", "[\"first\"]")
      .route("countries", "[\"second\"]")
      .with_delay(Duration::from_millis(50));
    let layer = CacheLayer::new(FileStorage::new(dir.path()), transport);
    let key = CacheKey::root("countries").child("SCO").child("competitions");

    let a = tokio::spawn({
      let layer = layer.clone();
      let key = key.clone();
      async move { layer.fetch(&key, &url()).await }
    });
    let b = tokio::spawn({
      let layer = layer.clone();
      let key = key.clone();
      async move { layer.fetch(&key, &url()).await }
    });

    let a = a.await.unwrap().unwrap();
    let b = b.await.unwrap().unwrap();

    // Both callers see the one published entry
    assert_eq!(a.data, b.data);
    let on_disk: Value =
      serde_json::from_slice(&std::fs::read(key.to_path(dir.path())).unwrap()).unwrap();
    assert_eq!(on_disk, a.data);
    let entries = std::fs::read_dir(dir.path().join("countries/SCO")).unwrap().count();
    assert_eq!(entries, 1);
  }
}
