use color_eyre::{eyre::eyre, Result};
use reqwest::header::ACCEPT;
use std::io::Write;
use url::Url;

use crate::cache::Transport;
use crate::config::ApiConfig;

/// HTTP transport for the FIFA API.
#[derive(Clone)]
pub struct FifaClient {
  http: reqwest::Client,
}

impl FifaClient {
  pub fn new() -> Result<Self> {
    let http = reqwest::Client::builder()
      .user_agent(concat!("pitchside/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    Ok(Self { http })
  }
}

impl Transport for FifaClient {
  async fn download(&self, url: &Url, sink: &mut (dyn Write + Send)) -> Result<u64> {
    let mut response = self
      .http
      .get(url.clone())
      .header(ACCEPT, "application/json")
      .send()
      .await
      .map_err(|e| eyre!("Failed to GET {}: {}", url, e))?;

    let status = response.status();
    if !status.is_success() {
      return Err(eyre!("GET {} failed with status {}", url, status));
    }

    let mut written = 0u64;
    while let Some(chunk) = response
      .chunk()
      .await
      .map_err(|e| eyre!("Failed to read response body from {}: {}", url, e))?
    {
      sink
        .write_all(&chunk)
        .map_err(|e| eyre!("Failed to write response body from {}: {}", url, e))?;
      written += chunk.len() as u64;
    }

    Ok(written)
  }
}

/// Builds endpoint URLs with the language and page size applied.
#[derive(Debug, Clone)]
pub struct Endpoints {
  base: Url,
  language: String,
  page_size: u32,
}

impl Endpoints {
  pub fn new(api: &ApiConfig) -> Result<Self> {
    let base = Url::parse(&api.base_url)
      .map_err(|e| eyre!("Invalid API base URL {}: {}", api.base_url, e))?;
    if base.cannot_be_a_base() {
      return Err(eyre!("Invalid API base URL {}", api.base_url));
    }

    Ok(Self {
      base,
      language: api.language.clone(),
      page_size: api.page_size,
    })
  }

  /// List endpoint: `params` followed by `count` and `language`.
  pub fn list(&self, segments: &[&str], params: &[(&str, &str)]) -> Result<Url> {
    let mut url = self.path(segments, false)?;
    url
      .query_pairs_mut()
      .extend_pairs(params)
      .append_pair("count", &self.page_size.to_string())
      .append_pair("language", &self.language);
    Ok(url)
  }

  /// Detail endpoint: only `language`.
  pub fn detail(&self, segments: &[&str], trailing_slash: bool) -> Result<Url> {
    let mut url = self.path(segments, trailing_slash)?;
    url.query_pairs_mut().append_pair("language", &self.language);
    Ok(url)
  }

  fn path(&self, segments: &[&str], trailing_slash: bool) -> Result<Url> {
    let mut url = self.base.clone();
    {
      let mut path = url
        .path_segments_mut()
        .map_err(|_| eyre!("Invalid API base URL {}", self.base))?;
      path.pop_if_empty().extend(segments);
      if trailing_slash {
        path.push("");
      }
    }
    Ok(url)
  }
}
