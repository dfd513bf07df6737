//! Cache keys and endpoint URLs for every FIFA resource.

use color_eyre::Result;
use std::fmt;
use url::Url;

use crate::cache::CacheKey;

use super::client::Endpoints;

/// A FIFA API resource, identified by its ancestors in the hierarchy.
#[derive(Clone, Copy, Debug)]
pub enum FifaResource<'a> {
  Confederations,
  Countries,
  Country {
    country: &'a str,
  },
  Competitions {
    country: &'a str,
  },
  Seasons {
    country: &'a str,
    competition: &'a str,
  },
  Stages {
    country: &'a str,
    competition: &'a str,
    season: &'a str,
  },
  Matches {
    country: &'a str,
    competition: &'a str,
    season: &'a str,
  },
  StageMatches {
    country: &'a str,
    competition: &'a str,
    season: &'a str,
    stage: &'a str,
  },
  Timeline {
    country: &'a str,
    competition: &'a str,
    season: &'a str,
    stage: &'a str,
    match_id: &'a str,
  },
  Player {
    player: &'a str,
  },
  Team {
    team: &'a str,
  },
}

impl FifaResource<'_> {
  /// Cache location, derived from the ancestor chain only.
  pub fn cache_key(&self) -> CacheKey {
    match *self {
      Self::Confederations => CacheKey::root("confederations"),
      Self::Countries => CacheKey::root("countries"),
      Self::Country { country } => CacheKey::root("countries").child(country),
      Self::Competitions { country } => country_key(country).child("competitions"),
      // The seasons list lives next to the competition's directory
      Self::Seasons {
        country,
        competition,
      } => country_key(country)
        .child("competitions")
        .child(competition),
      Self::Stages {
        country,
        competition,
        season,
      } => season_key(country, competition, season).child("stages"),
      Self::Matches {
        country,
        competition,
        season,
      } => season_key(country, competition, season).child("matches"),
      Self::StageMatches {
        country,
        competition,
        season,
        stage,
      } => season_key(country, competition, season)
        .child("stages")
        .child(stage)
        .child("matches"),
      Self::Timeline {
        country,
        competition,
        season,
        match_id,
        ..
      } => season_key(country, competition, season)
        .child("matches")
        .child(match_id),
      Self::Player { player } => CacheKey::root("players").child(player),
      Self::Team { team } => CacheKey::root("teams").child(team),
    }
  }

  /// Remote URL of the resource.
  pub fn url(&self, endpoints: &Endpoints) -> Result<Url> {
    match *self {
      Self::Confederations => endpoints.detail(&["api", "v1", "confederations"], false),
      Self::Countries => endpoints.list(&["api", "v1", "countries"], &[]),
      Self::Country { country } => endpoints.detail(&["api", "v1", "countries", country], false),
      Self::Competitions { country } => {
        endpoints.list(&["api", "v1", "competitions"], &[("countryId", country)])
      }
      Self::Seasons { competition, .. } => {
        endpoints.list(&["api", "v1", "seasons"], &[("idCompetition", competition)])
      }
      Self::Stages {
        competition,
        season,
        ..
      } => endpoints.list(
        &["api", "v1", "stages"],
        &[("idCompetition", competition), ("idSeason", season)],
      ),
      Self::Matches {
        competition,
        season,
        ..
      } => endpoints.list(
        &["api", "v1", "calendar", "matches"],
        &[("idSeason", season), ("idCompetition", competition)],
      ),
      Self::StageMatches {
        competition,
        season,
        stage,
        ..
      } => endpoints.list(
        &["api", "v1", "calendar", "matches"],
        &[
          ("idSeason", season),
          ("idCompetition", competition),
          ("idStage", stage),
        ],
      ),
      Self::Timeline {
        competition,
        season,
        stage,
        match_id,
        ..
      } => endpoints.detail(
        &["api", "v1", "timelines", competition, season, stage, match_id],
        true,
      ),
      Self::Player { player } => endpoints.detail(&["api", "v1", "players", player], false),
      Self::Team { team } => endpoints.detail(&["api", "v1", "teams", team], false),
    }
  }
}

impl fmt::Display for FifaResource<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Confederations => write!(f, "confederations"),
      Self::Countries => write!(f, "countries"),
      Self::Country { country } => write!(f, "country {}", country),
      Self::Competitions { country } => write!(f, "competitions of {}", country),
      Self::Seasons { competition, .. } => write!(f, "seasons of competition {}", competition),
      Self::Stages { season, .. } => write!(f, "stages of season {}", season),
      Self::Matches { season, .. } => write!(f, "matches of season {}", season),
      Self::StageMatches { stage, .. } => write!(f, "matches of stage {}", stage),
      Self::Timeline { match_id, .. } => write!(f, "timeline of match {}", match_id),
      Self::Player { player } => write!(f, "player {}", player),
      Self::Team { team } => write!(f, "team {}", team),
    }
  }
}

fn country_key(country: &str) -> CacheKey {
  CacheKey::root("countries").child(country)
}

fn season_key(country: &str, competition: &str, season: &str) -> CacheKey {
  country_key(country)
    .child("competitions")
    .child(competition)
    .child("seasons")
    .child(season)
}
