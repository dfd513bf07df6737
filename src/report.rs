//! Text rendering of the crawl: headers, match lines and timeline events.

use chrono::SecondsFormat;
use color_eyre::{eyre::eyre, Result};
use std::io::Write;
use tracing::{debug, warn};

use crate::cache::Transport;
use crate::fifa::api_types::{ApiTimelineEvent, TimelineEvent};
use crate::fifa::taxonomy::EventType;
use crate::fifa::types::Match;
use crate::fifa::CachedFifaClient;

pub const BALL: &str = "\u{26BD}";

/// Symbol for events that name a player and team; `None` for everything else.
fn action_symbol(kind: EventType) -> Option<&'static str> {
  match kind {
    EventType::Goal => Some(BALL),
    EventType::GoalFromPenalty => Some("\u{1F945}\u{26BD}"),
    EventType::OwnGoal => Some("\u{1F926}"),
    EventType::YellowCard => Some("\u{1F4D2}"),
    EventType::RedCard => Some("\u{1F534}"),
    EventType::Red2Yellow => Some("\u{1F4D2}\u{1F4D2}\u{1F534}"),
    _ => None,
  }
}

/// Line-oriented report writer.
pub struct Reporter<W: Write> {
  out: W,
  unknown_player: String,
}

impl<W: Write> Reporter<W> {
  pub fn new(out: W, unknown_player: impl Into<String>) -> Self {
    Self {
      out,
      unknown_player: unknown_player.into(),
    }
  }

  #[cfg(test)]
  pub fn into_inner(self) -> W {
    self.out
  }

  /// Separator printed around a whole report.
  pub fn marker(&mut self) -> Result<()> {
    writeln!(self.out, "{}", BALL)?;
    Ok(())
  }

  /// `⚽\t<id>\t<name>` for a country, competition or season.
  pub fn header(&mut self, id: &str, name: &str) -> Result<()> {
    writeln!(self.out, "{}\t{}\t{}", BALL, id, name)?;
    Ok(())
  }

  /// `<id>\t<date>\t<home> <score> - <score> <away>`
  pub fn match_line(&mut self, m: &Match) -> Result<()> {
    writeln!(
      self.out,
      "{}\t{}\t{} {} - {} {}",
      m.id,
      m.date.to_rfc3339_opts(SecondsFormat::Secs, true),
      m.home_label(),
      score(m.home_score),
      score(m.away_score),
      m.away_label(),
    )?;
    Ok(())
  }

  /// Render every event of a match timeline.
  ///
  /// Events with unmapped codes are rejected and logged; the rest of the
  /// timeline is still rendered. Returns the number of rejected events.
  pub async fn timeline<T: Transport>(
    &mut self,
    client: &CachedFifaClient<T>,
    match_id: &str,
    events: Vec<ApiTimelineEvent>,
  ) -> Result<usize> {
    let mut rejected = 0;
    for raw in events {
      let (kind, period) = (raw.kind, raw.period);
      match raw.decode() {
        Ok(Some(event)) => self.event(client, match_id, &event).await?,
        Ok(None) => {}
        Err(e) => {
          warn!(match_id, kind, period, error = %e, "rejecting timeline event");
          rejected += 1;
        }
      }
    }
    self.out.flush()?;
    Ok(rejected)
  }

  async fn event<T: Transport>(
    &mut self,
    client: &CachedFifaClient<T>,
    match_id: &str,
    event: &TimelineEvent,
  ) -> Result<()> {
    debug!(
      match_id,
      kind = %event.kind,
      period = %event.period,
      minute = %event.minute,
      "event"
    );

    match event.kind {
      // Dropped during decoding already
      EventType::Unknown => {}
      EventType::Substitution => {
        let player_id = required(&event.player_id, "IdPlayer", event, match_id)?;
        let team_id = required(&event.team_id, "IdTeam", event, match_id)?;
        let player = client.get_player(player_id).await?;
        let team = client.get_team(team_id).await?;
        debug!(player = %player.id, team = %team.id, "substitution");
        let sub_player = match &event.sub_player_id {
          Some(id) => client.get_player(id).await?.name,
          None => self.unknown_player.clone(),
        };
        writeln!(
          self.out,
          "{}: Sub - IN {} <-> OUT {} [{}]",
          event.minute, player.name, sub_player, team.name
        )?;
      }
      kind => match action_symbol(kind) {
        Some(symbol) => {
          let player_id = required(&event.player_id, "IdPlayer", event, match_id)?;
          let team_id = required(&event.team_id, "IdTeam", event, match_id)?;
          let player = client.get_player(player_id).await?;
          let team = client.get_team(team_id).await?;
          debug!(player = %player.id, team = %team.id, "action");
          writeln!(
            self.out,
            "{}: {} {} [{}]",
            event.minute, symbol, player.name, team.name
          )?;
        }
        None => writeln!(self.out, "{} - {}", event.minute, kind)?,
      },
    }
    Ok(())
  }
}

fn score(score: Option<u32>) -> String {
  score.map_or_else(|| "-".to_string(), |s| s.to_string())
}

fn required<'a>(
  id: &'a Option<String>,
  field: &str,
  event: &TimelineEvent,
  match_id: &str,
) -> Result<&'a str> {
  id.as_deref().ok_or_else(|| {
    eyre!(
      "{} event at {} in match {} has no {}",
      event.kind,
      event.minute,
      match_id,
      field
    )
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::Config;
  use crate::testing::MockTransport;
  use serde_json::json;
  use tempfile::{tempdir, TempDir};

  fn client(transport: MockTransport) -> (TempDir, CachedFifaClient<MockTransport>) {
    let dir = tempdir().unwrap();
    let config = Config {
      cache_dir: dir.path().to_path_buf(),
      ..Config::default()
    };
    let client = CachedFifaClient::with_transport(&config, transport).unwrap();
    (dir, client)
  }

  fn people() -> MockTransport {
    MockTransport::new()
      .route(
        "players/10",
        r#"{"IdPlayer": "10", "Name": [{"Description": "Sam Cosgrove"}]}"#,
      )
      .route(
        "players/11",
        r#"{"IdPlayer": "11", "Name": [{"Description": "Niall McGinn"}]}"#,
      )
      .route(
        "teams/31068",
        r#"{"IdTeam": "31068", "Name": [{"Description": "Aberdeen"}]}"#,
      )
  }

  fn event(kind: u32, player: Option<&str>, sub: Option<&str>) -> ApiTimelineEvent {
    serde_json::from_value(json!({
      "Type": kind,
      "Period": 3,
      "MatchMinute": "12'",
      "IdPlayer": player,
      "IdTeam": "31068",
      "IdSubPlayer": sub
    }))
    .unwrap()
  }

  async fn render(events: Vec<ApiTimelineEvent>) -> (String, usize, Vec<String>) {
    let (_dir, client) = client(people());
    let mut reporter = Reporter::new(Vec::new(), "???");
    let rejected = reporter.timeline(&client, "300", events).await.unwrap();
    let out = String::from_utf8(reporter.into_inner()).unwrap();
    (out, rejected, client.cache().transport().requests())
  }

  #[tokio::test]
  async fn test_goal_line() {
    let (out, rejected, _) = render(vec![event(0, Some("10"), None)]).await;
    assert_eq!(out, "12': \u{26BD} Sam Cosgrove [Aberdeen]\n");
    assert_eq!(rejected, 0);
  }

  #[tokio::test]
  async fn test_card_and_penalty_symbols() {
    let (out, _, _) = render(vec![
      event(41, Some("10"), None),
      event(34, Some("10"), None),
      event(2, Some("10"), None),
      event(3, Some("10"), None),
      event(4, Some("10"), None),
    ])
    .await;
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "12': \u{1F945}\u{26BD} Sam Cosgrove [Aberdeen]");
    assert_eq!(lines[1], "12': \u{1F926} Sam Cosgrove [Aberdeen]");
    assert_eq!(lines[2], "12': \u{1F4D2} Sam Cosgrove [Aberdeen]");
    assert_eq!(lines[3], "12': \u{1F534} Sam Cosgrove [Aberdeen]");
    assert_eq!(lines[4], "12': \u{1F4D2}\u{1F4D2}\u{1F534} Sam Cosgrove [Aberdeen]");
  }

  #[tokio::test]
  async fn test_substitution_with_both_players() {
    let (out, _, _) = render(vec![event(5, Some("10"), Some("11"))]).await;
    assert_eq!(out, "12': Sub - IN Sam Cosgrove <-> OUT Niall McGinn [Aberdeen]\n");
  }

  #[tokio::test]
  async fn test_substitution_without_sub_player_uses_placeholder() {
    let (out, _, requests) = render(vec![event(5, Some("10"), None)]).await;
    assert_eq!(out, "12': Sub - IN Sam Cosgrove <-> OUT ??? [Aberdeen]\n");
    assert!(!requests.iter().any(|u| u.contains("players/11")));
  }

  #[tokio::test]
  async fn test_generic_event_needs_no_lookup() {
    let (out, _, requests) = render(vec![event(16, None, None)]).await;
    assert_eq!(out, "12' - Corner\n");
    assert!(requests.is_empty());
  }

  #[tokio::test]
  async fn test_unknown_type_is_suppressed() {
    let (out, rejected, _) = render(vec![event(9999, None, None)]).await;
    assert_eq!(out, "");
    assert_eq!(rejected, 0);
  }

  #[tokio::test]
  async fn test_unknown_type_with_unmapped_period_is_not_rejected() {
    let mut raw = event(9999, None, None);
    raw.period = 42;
    let (out, rejected, requests) = render(vec![raw]).await;
    assert_eq!(out, "");
    assert_eq!(rejected, 0);
    assert!(requests.is_empty());
  }

  #[tokio::test]
  async fn test_unmapped_code_rejects_only_that_event() {
    let events = vec![event(404, Some("10"), None), event(16, None, None)];
    let (out, rejected, _) = render(events).await;
    assert_eq!(out, "12' - Corner\n");
    assert_eq!(rejected, 1);
  }

  #[tokio::test]
  async fn test_goal_without_player_is_an_error() {
    let (_dir, client) = client(people());
    let mut reporter = Reporter::new(Vec::new(), "???");
    let err = reporter
      .timeline(&client, "300", vec![event(0, None, None)])
      .await
      .unwrap_err();
    assert!(err.to_string().contains("has no IdPlayer"), "{}", err);
  }

  #[test]
  fn test_match_line() {
    let m: Match = serde_json::from_value(json!({
      "IdMatch": "300",
      "IdStage": "200",
      "Date": "2019-08-03T11:30:00Z",
      "Home": {"IdTeam": "31068", "TeamName": [{"Description": "Aberdeen"}]},
      "Away": {"IdTeam": "31070", "TeamName": [{"Description": "Celtic"}]},
      "HomeTeamScore": 2,
      "AwayTeamScore": null
    }))
    .unwrap();

    let mut reporter = Reporter::new(Vec::new(), "???");
    reporter.match_line(&m).unwrap();
    reporter.header("SCO", "Scotland").unwrap();
    let out = String::from_utf8(reporter.into_inner()).unwrap();
    assert_eq!(
      out,
      "300\t2019-08-03T11:30:00Z\tAberdeen 2 - - Celtic\n\u{26BD}\tSCO\tScotland\n"
    );
  }
}
