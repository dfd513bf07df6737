//! Typed records decoded from FIFA API responses.
//!
//! Localized names arrive as `[{"Locale": .., "Description": ..}, ..]`; only
//! the first description is kept. Decoding fails on an empty list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Deserialize)]
pub struct Confederation {
  #[serde(rename = "IdConfederation")]
  pub id: String,
  #[serde(rename = "Name", deserialize_with = "localized_name")]
  pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Country {
  #[serde(rename = "IdCountry")]
  pub id: String,
  #[serde(rename = "Name", deserialize_with = "localized_name")]
  pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Competition {
  #[serde(rename = "IdCompetition")]
  pub id: String,
  #[serde(rename = "Name", deserialize_with = "localized_name")]
  pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Season {
  #[serde(rename = "IdSeason")]
  pub id: String,
  #[serde(rename = "Name", deserialize_with = "localized_name")]
  pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Stage {
  #[serde(rename = "IdStage")]
  pub id: String,
  #[serde(rename = "Name", deserialize_with = "localized_name")]
  pub name: String,
}

/// One side of a match as listed in the calendar.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchSide {
  #[serde(rename = "IdTeam")]
  pub team_id: String,
  #[serde(rename = "TeamName", deserialize_with = "localized_name")]
  pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Match {
  #[serde(rename = "IdMatch")]
  pub id: String,
  #[serde(rename = "IdStage")]
  pub stage_id: String,
  #[serde(rename = "Date")]
  pub date: DateTime<Utc>,
  #[serde(rename = "Home")]
  pub home: Option<MatchSide>,
  #[serde(rename = "Away")]
  pub away: Option<MatchSide>,
  /// `None` until the match has been played
  #[serde(rename = "HomeTeamScore")]
  pub home_score: Option<u32>,
  #[serde(rename = "AwayTeamScore")]
  pub away_score: Option<u32>,
  #[serde(rename = "PlaceHolderA", default)]
  pub placeholder_home: Option<String>,
  #[serde(rename = "PlaceHolderB", default)]
  pub placeholder_away: Option<String>,
}

impl Match {
  /// Only played matches have a timeline.
  pub fn is_played(&self) -> bool {
    self.home_score.is_some()
  }

  /// Whether either side is one of `teams`.
  pub fn involves_any(&self, teams: &BTreeSet<String>) -> bool {
    [&self.home, &self.away]
      .into_iter()
      .flatten()
      .any(|side| teams.contains(&side.team_id))
  }

  pub fn home_label(&self) -> &str {
    side_label(self.placeholder_home.as_deref(), self.home.as_ref())
  }

  pub fn away_label(&self) -> &str {
    side_label(self.placeholder_away.as_deref(), self.away.as_ref())
  }
}

/// Placeholders ("Winner Group A") win over team names when present.
fn side_label<'a>(placeholder: Option<&'a str>, side: Option<&'a MatchSide>) -> &'a str {
  placeholder
    .filter(|p| !p.trim().is_empty())
    .or_else(|| side.map(|s| s.name.as_str()))
    .unwrap_or("?")
}

#[derive(Debug, Clone, Deserialize)]
pub struct Player {
  #[serde(rename = "IdPlayer")]
  pub id: String,
  #[serde(rename = "Name", deserialize_with = "localized_name")]
  pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Team {
  #[serde(rename = "IdTeam")]
  pub id: String,
  #[serde(rename = "Name", deserialize_with = "localized_name")]
  pub name: String,
}

#[derive(Deserialize)]
struct LocalizedDescription {
  #[serde(rename = "Description")]
  description: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NameField {
  Plain(String),
  Localized(Vec<LocalizedDescription>),
}

/// Accept either a plain string or a localized list and keep the first entry.
fn localized_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  match NameField::deserialize(deserializer)? {
    NameField::Plain(name) => Ok(name),
    NameField::Localized(names) => names
      .into_iter()
      .next()
      .map(|n| n.description)
      .ok_or_else(|| serde::de::Error::custom("localized name list is empty")),
  }
}
