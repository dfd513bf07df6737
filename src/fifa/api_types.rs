//! Raw timeline payloads and their decoding into typed events.
//!
//! Timeline events carry numeric codes that have to go through the taxonomy
//! tables, so they are kept raw until the reporter decodes each one.

use serde::Deserialize;

use super::taxonomy::{EventPeriod, EventType, TaxonomyError};

#[derive(Debug, Clone, Deserialize)]
pub struct ApiTimeline {
  #[serde(rename = "Event", default)]
  pub events: Vec<ApiTimelineEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiTimelineEvent {
  #[serde(rename = "Type")]
  pub kind: u32,
  #[serde(rename = "Period")]
  pub period: u32,
  #[serde(rename = "MatchMinute")]
  pub minute: Option<String>,
  #[serde(rename = "IdPlayer")]
  pub player_id: Option<String>,
  #[serde(rename = "IdTeam")]
  pub team_id: Option<String>,
  #[serde(rename = "IdSubPlayer")]
  pub sub_player_id: Option<String>,
}

/// A timeline event with its codes resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEvent {
  pub kind: EventType,
  pub period: EventPeriod,
  pub minute: String,
  pub player_id: Option<String>,
  pub team_id: Option<String>,
  /// Player leaving the pitch; substitutions only
  pub sub_player_id: Option<String>,
}

impl ApiTimelineEvent {
  /// Resolve type and period codes. Unmapped codes reject the event.
  ///
  /// `Ok(None)` for the `Unknown` event type, which carries nothing to report
  /// and is dropped whatever its period says.
  pub fn decode(self) -> Result<Option<TimelineEvent>, TaxonomyError> {
    let kind = EventType::from_code(self.kind)?;
    if kind == EventType::Unknown {
      return Ok(None);
    }

    Ok(Some(TimelineEvent {
      kind,
      period: EventPeriod::from_code(self.period)?,
      minute: self.minute.unwrap_or_default(),
      player_id: non_empty(self.player_id),
      team_id: non_empty(self.team_id),
      sub_player_id: non_empty(self.sub_player_id),
    }))
  }
}

fn non_empty(id: Option<String>) -> Option<String> {
  id.filter(|s| !s.trim().is_empty())
}
