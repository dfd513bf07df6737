//! Test doubles shared by the unit tests.

use color_eyre::{eyre::eyre, Result};
use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;
use url::Url;

use crate::cache::Transport;

/// Transport that serves canned bodies and records every requested URL.
///
/// A request is answered by the first route whose needle occurs in the URL.
/// Repeated requests to the same route walk through its bodies in order and
/// then keep returning the last one. Unrouted URLs fail like a 404.
#[derive(Default)]
pub struct MockTransport {
  routes: Vec<(String, Vec<String>)>,
  requests: Mutex<Vec<String>>,
  delay: Option<Duration>,
}

impl MockTransport {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn route(mut self, needle: &str, body: impl Into<String>) -> Self {
    let body = body.into();
    match self.routes.iter_mut().find(|(n, _)| n == needle) {
      Some((_, bodies)) => bodies.push(body),
      None => self.routes.push((needle.to_string(), vec![body])),
    }
    self
  }

  pub fn with_delay(mut self, delay: Duration) -> Self {
    self.delay = Some(delay);
    self
  }

  pub fn requests(&self) -> Vec<String> {
    self.requests.lock().unwrap().clone()
  }

  pub fn request_count(&self, needle: &str) -> usize {
    self
      .requests
      .lock()
      .unwrap()
      .iter()
      .filter(|u| u.contains(needle))
      .count()
  }
}

impl Transport for MockTransport {
  async fn download(&self, url: &Url, sink: &mut (dyn Write + Send)) -> Result<u64> {
    let url = url.to_string();
    let body = {
      let mut requests = self.requests.lock().unwrap();
      let route = self.routes.iter().find(|(needle, _)| url.contains(needle.as_str()));
      let body = route.map(|(needle, bodies)| {
        let attempt = requests.iter().filter(|u| u.contains(needle.as_str())).count();
        bodies[attempt.min(bodies.len() - 1)].clone()
      });
      requests.push(url.clone());
      body
    };

    if let Some(delay) = self.delay {
      tokio::time::sleep(delay).await;
    }

    let body = body.ok_or_else(|| eyre!("GET {} failed with status 404 Not Found", url))?;
    sink.write_all(body.as_bytes())?;
    Ok(body.len() as u64)
  }
}
