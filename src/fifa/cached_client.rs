//! FIFA API client backed by the permanent response cache.

use color_eyre::Result;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::cache::{CacheLayer, FileStorage, Transport};
use crate::config::Config;

use super::api_types::{ApiTimeline, ApiTimelineEvent};
use super::cache::FifaResource;
use super::client::{Endpoints, FifaClient};
use super::types::{
  Competition, Confederation, Country, Match, Player, Season, Stage, Team,
};

/// FIFA client where every call goes through the cache.
pub struct CachedFifaClient<T: Transport = FifaClient> {
  endpoints: Endpoints,
  cache: CacheLayer<T>,
}

impl CachedFifaClient {
  /// Create a client talking to the configured API.
  pub fn new(config: &Config) -> Result<Self> {
    let transport = FifaClient::new()?;
    Self::with_transport(config, transport)
  }
}

impl<T: Transport> CachedFifaClient<T> {
  pub fn with_transport(config: &Config, transport: T) -> Result<Self> {
    let endpoints = Endpoints::new(&config.api)?;
    let cache = CacheLayer::new(FileStorage::new(config.cache_dir.clone()), transport);
    Ok(Self { endpoints, cache })
  }

  pub fn cache(&self) -> &CacheLayer<T> {
    &self.cache
  }

  async fn fetch_one<D: DeserializeOwned>(&self, resource: FifaResource<'_>) -> Result<D> {
    let url = resource.url(&self.endpoints)?;
    let result = self.cache.fetch_one(&resource.cache_key(), &url).await?;
    debug!(%resource, source = ?result.source, "fetched");
    Ok(result.data)
  }

  async fn fetch_list<D: DeserializeOwned>(&self, resource: FifaResource<'_>) -> Result<Vec<D>> {
    let url = resource.url(&self.endpoints)?;
    let result = self.cache.fetch_list(&resource.cache_key(), &url).await?;
    debug!(%resource, source = ?result.source, count = result.data.len(), "fetched");
    Ok(result.data)
  }

  pub async fn list_confederations(&self) -> Result<Vec<Confederation>> {
    self.fetch_list(FifaResource::Confederations).await
  }

  pub async fn list_countries(&self) -> Result<Vec<Country>> {
    self.fetch_list(FifaResource::Countries).await
  }

  pub async fn get_country(&self, country: &str) -> Result<Country> {
    self.fetch_one(FifaResource::Country { country }).await
  }

  pub async fn list_competitions(&self, country: &str) -> Result<Vec<Competition>> {
    self.fetch_list(FifaResource::Competitions { country }).await
  }

  pub async fn list_seasons(&self, country: &str, competition: &str) -> Result<Vec<Season>> {
    self
      .fetch_list(FifaResource::Seasons {
        country,
        competition,
      })
      .await
  }

  pub async fn list_stages(
    &self,
    country: &str,
    competition: &str,
    season: &str,
  ) -> Result<Vec<Stage>> {
    self
      .fetch_list(FifaResource::Stages {
        country,
        competition,
        season,
      })
      .await
  }

  /// All matches of a season.
  pub async fn list_matches(
    &self,
    country: &str,
    competition: &str,
    season: &str,
  ) -> Result<Vec<Match>> {
    self
      .fetch_list(FifaResource::Matches {
        country,
        competition,
        season,
      })
      .await
  }

  /// Matches of a single stage.
  pub async fn list_stage_matches(
    &self,
    country: &str,
    competition: &str,
    season: &str,
    stage: &str,
  ) -> Result<Vec<Match>> {
    self
      .fetch_list(FifaResource::StageMatches {
        country,
        competition,
        season,
        stage,
      })
      .await
  }

  /// Raw timeline events of a match; codes are resolved by the caller.
  pub async fn get_timeline(
    &self,
    country: &str,
    competition: &str,
    season: &str,
    stage: &str,
    match_id: &str,
  ) -> Result<Vec<ApiTimelineEvent>> {
    let timeline: ApiTimeline = self
      .fetch_one(FifaResource::Timeline {
        country,
        competition,
        season,
        stage,
        match_id,
      })
      .await?;
    Ok(timeline.events)
  }

  pub async fn get_player(&self, player: &str) -> Result<Player> {
    self.fetch_one(FifaResource::Player { player }).await
  }

  pub async fn get_team(&self, team: &str) -> Result<Team> {
    self.fetch_one(FifaResource::Team { team }).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::MockTransport;
  use tempfile::tempdir;

  fn config(dir: &std::path::Path) -> Config {
    Config {
      cache_dir: dir.to_path_buf(),
      ..Config::default()
    }
  }

  #[tokio::test]
  async fn test_player_lookup_is_cached() {
    let dir = tempdir().unwrap();
    let transport = MockTransport::new().route(
      "players/7",
      r#"{"IdPlayer": "7", "Name": [{"Locale": "en-GB", "Description": "Sam Cosgrove"}]}"#,
    );
    let client = CachedFifaClient::with_transport(&config(dir.path()), transport).unwrap();

    assert_eq!(client.get_player("7").await.unwrap().name, "Sam Cosgrove");
    assert_eq!(client.get_player("7").await.unwrap().name, "Sam Cosgrove");
    assert!(dir.path().join("players/7.json").exists());
  }

  #[tokio::test]
  async fn test_stage_matches_use_stage_key() {
    let dir = tempdir().unwrap();
    let transport = MockTransport::new().route("idStage=ST", r#"{"Results": []}"#);
    let client = CachedFifaClient::with_transport(&config(dir.path()), transport).unwrap();

    let matches = client.list_stage_matches("SCO", "C", "S", "ST").await.unwrap();
    assert!(matches.is_empty());
    assert!(dir
      .path()
      .join("countries/SCO/competitions/C/seasons/S/stages/ST/matches.json")
      .exists());
  }

  #[tokio::test]
  async fn test_confederations_and_country() {
    let dir = tempdir().unwrap();
    let transport = MockTransport::new()
      .route(
        "confederations",
        r#"{"Results": [{"IdConfederation": "UEFA", "Name": [{"Description": "UEFA"}]}]}"#,
      )
      .route(
        "countries/SCO",
        r#"{"IdCountry": "SCO", "Name": "Scotland"}"#,
      );
    let client = CachedFifaClient::with_transport(&config(dir.path()), transport).unwrap();

    let confederations = client.list_confederations().await.unwrap();
    assert_eq!(confederations[0].id, "UEFA");
    assert_eq!(client.get_country("SCO").await.unwrap().name, "Scotland");
  }
}
