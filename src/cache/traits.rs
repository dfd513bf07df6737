//! Core traits and types for the caching system.

use color_eyre::Result;
use std::future::Future;
use std::io::Write;
use std::path::PathBuf;
use url::Url;

/// Network side of the cache: downloads a URL into a sink.
///
/// Implementations stream the body byte-for-byte and fail on any non-success
/// status, so whatever lands in the sink is exactly what the server sent.
pub trait Transport: Send + Sync {
  /// Download `url` into `sink`, returning the number of bytes written.
  fn download(
    &self,
    url: &Url,
    sink: &mut (dyn Write + Send),
  ) -> impl Future<Output = Result<u64>> + Send;
}

/// Result from a cache operation, including data and metadata about the source.
#[derive(Debug, Clone)]
pub struct CacheResult<T> {
  /// The actual data
  pub data: T,
  /// Where the data came from
  pub source: CacheSource,
  /// Cache entry the data was parsed from
  pub path: PathBuf,
}

impl<T> CacheResult<T> {
  /// Data that was just downloaded and written to `path`.
  pub fn from_network(data: T, path: PathBuf) -> Self {
    Self {
      data,
      source: CacheSource::Network,
      path,
    }
  }

  /// Data read from an entry that already existed.
  pub fn from_cache(data: T, path: PathBuf) -> Self {
    Self {
      data,
      source: CacheSource::Cache,
      path,
    }
  }
}

/// Indicates where cached data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheSource {
  /// Downloaded during this call
  Network,
  /// Served from an existing cache entry
  Cache,
}
