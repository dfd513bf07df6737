//! Subcommands of the `pitchside` binary.

use clap::Subcommand;
use color_eyre::Result;
use std::io::Write;
use tracing::info;

use crate::cache::Transport;
use crate::config::Config;
use crate::crawl::{Crawler, Interests};
use crate::fifa::CachedFifaClient;
use crate::report::Reporter;

#[derive(Debug, Clone, Default, Subcommand)]
pub enum Command {
  /// Crawl the countries of interest and report matches of the teams of interest
  #[default]
  Report,
  /// List confederations
  Confederations,
  /// List all countries
  Countries,
  /// List the competitions of a country
  Competitions { country: String },
  /// List the seasons of a competition
  Seasons { country: String, competition: String },
  /// List the matches of a season, played or not
  Matches {
    country: String,
    competition: String,
    season: String,
    /// Only matches of this stage
    #[arg(long)]
    stage: Option<String>,
  },
  /// Print the timeline of one match
  Timeline {
    country: String,
    competition: String,
    season: String,
    stage: String,
    match_id: String,
  },
}

/// Run `command`, writing its output through `reporter`.
pub async fn execute<T: Transport, W: Write>(
  command: &Command,
  client: &CachedFifaClient<T>,
  config: &Config,
  reporter: &mut Reporter<W>,
) -> Result<()> {
  match command {
    Command::Report => {
      let interests = Interests::from_config(config);
      let summary = Crawler::new(client, &interests, reporter).run().await?;
      info!(
        countries = summary.countries,
        seasons = summary.seasons,
        matches = summary.matches,
        rejected_events = summary.rejected_events,
        "crawl finished"
      );
    }
    Command::Confederations => {
      for confederation in client.list_confederations().await? {
        reporter.header(&confederation.id, &confederation.name)?;
      }
    }
    Command::Countries => {
      for country in client.list_countries().await? {
        reporter.header(&country.id, &country.name)?;
      }
    }
    Command::Competitions { country } => {
      let country = client.get_country(&country.to_uppercase()).await?;
      reporter.header(&country.id, &country.name)?;
      for competition in client.list_competitions(&country.id).await? {
        reporter.header(&competition.id, &competition.name)?;
      }
    }
    Command::Seasons {
      country,
      competition,
    } => {
      for season in client.list_seasons(&country.to_uppercase(), competition).await? {
        reporter.header(&season.id, &season.name)?;
      }
    }
    Command::Matches {
      country,
      competition,
      season,
      stage,
    } => {
      let country = country.to_uppercase();
      let matches = match stage {
        Some(stage) => {
          client
            .list_stage_matches(&country, competition, season, stage)
            .await?
        }
        None => client.list_matches(&country, competition, season).await?,
      };
      for m in &matches {
        reporter.match_line(m)?;
      }
    }
    Command::Timeline {
      country,
      competition,
      season,
      stage,
      match_id,
    } => {
      let events = client
        .get_timeline(&country.to_uppercase(), competition, season, stage, match_id)
        .await?;
      let rejected = reporter.timeline(client, match_id, events).await?;
      info!(match_id = %match_id, rejected_events = rejected, "timeline finished");
    }
  }
  Ok(())
}
