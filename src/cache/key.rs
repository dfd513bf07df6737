use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::fmt;
use std::path::{Path, PathBuf};

/// Bytes escaped in a path segment. `%` is escaped too, so the encoding is
/// reversible and distinct identifiers never share a file.
const SEGMENT: &AsciiSet = &CONTROLS
  .add(b'%')
  .add(b'/')
  .add(b'\\')
  .add(b':')
  .add(b' ')
  .add(b'*')
  .add(b'?')
  .add(b'"')
  .add(b'<')
  .add(b'>')
  .add(b'|');

/// Hierarchical identity of a cached resource, e.g. `countries/SCO/competitions`.
///
/// The same logical resource always yields the same key, and different
/// resources never do. Segments are percent-encoded so a key can never escape
/// the cache root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
  segments: Vec<String>,
}

impl CacheKey {
  /// Start a key at a top-level resource (`countries`, `players`, ...).
  pub fn root(segment: &str) -> Self {
    Self {
      segments: vec![sanitize_segment(segment)],
    }
  }

  /// Extend the key by one level.
  pub fn child(mut self, segment: &str) -> Self {
    self.segments.push(sanitize_segment(segment));
    self
  }

  /// Location of the entry below `root`: every segment is a directory except
  /// the last, which becomes `<segment>.json`.
  pub fn to_path(&self, root: &Path) -> PathBuf {
    let mut path = root.to_path_buf();
    if let Some((last, parents)) = self.segments.split_last() {
      path.extend(parents);
      path.push(format!("{}.json", last));
    }
    path
  }
}

impl fmt::Display for CacheKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.segments.join("/"))
  }
}

/// Percent-encode a segment. `.`, `..` and the empty segment get escaped
/// spellings that plain encoding can never produce.
fn sanitize_segment(segment: &str) -> String {
  match segment {
    "" => "%".to_string(),
    "." => "%2E".to_string(),
    ".." => "%2E%2E".to_string(),
    _ => utf8_percent_encode(segment, SEGMENT).to_string(),
  }
}
