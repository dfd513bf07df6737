//! Walks countries → competitions → seasons → matches and reports the
//! timelines of played matches involving a team of interest.

use color_eyre::Result;
use std::collections::BTreeSet;
use std::io::Write;
use tracing::debug;

use crate::cache::Transport;
use crate::config::Config;
use crate::fifa::types::{Competition, Country, Match, Season};
use crate::fifa::CachedFifaClient;
use crate::report::Reporter;

/// Allow-lists pruning the traversal.
#[derive(Debug, Clone, Default)]
pub struct Interests {
  pub countries: BTreeSet<String>,
  pub teams: BTreeSet<String>,
}

impl Interests {
  pub fn from_config(config: &Config) -> Self {
    Self {
      countries: config.countries.clone(),
      teams: config.teams.clone(),
    }
  }

  pub fn wants_country(&self, country: &Country) -> bool {
    self.countries.contains(&country.id)
  }

  /// Played, and one of the sides is a team of interest.
  pub fn wants_match(&self, m: &Match) -> bool {
    m.is_played() && m.involves_any(&self.teams)
  }
}

/// Counters reported once the crawl is done.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlSummary {
  pub countries: usize,
  pub seasons: usize,
  pub matches: usize,
  pub rejected_events: usize,
}

pub struct Crawler<'a, T: Transport, W: Write> {
  client: &'a CachedFifaClient<T>,
  interests: &'a Interests,
  reporter: &'a mut Reporter<W>,
}

impl<'a, T: Transport, W: Write> Crawler<'a, T, W> {
  pub fn new(
    client: &'a CachedFifaClient<T>,
    interests: &'a Interests,
    reporter: &'a mut Reporter<W>,
  ) -> Self {
    Self {
      client,
      interests,
      reporter,
    }
  }

  /// Crawl everything reachable from the countries of interest.
  ///
  /// Siblings are visited in the order the API lists them.
  pub async fn run(&mut self) -> Result<CrawlSummary> {
    let mut summary = CrawlSummary::default();

    for country in self.client.list_countries().await? {
      if !self.interests.wants_country(&country) {
        continue;
      }
      summary.countries += 1;
      self.reporter.header(&country.id, &country.name)?;
      self.crawl_country(&country, &mut summary).await?;
    }

    Ok(summary)
  }

  async fn crawl_country(&mut self, country: &Country, summary: &mut CrawlSummary) -> Result<()> {
    for competition in self.client.list_competitions(&country.id).await? {
      self.reporter.header(&competition.id, &competition.name)?;
      self.crawl_competition(country, &competition, summary).await?;
    }
    Ok(())
  }

  async fn crawl_competition(
    &mut self,
    country: &Country,
    competition: &Competition,
    summary: &mut CrawlSummary,
  ) -> Result<()> {
    for season in self.client.list_seasons(&country.id, &competition.id).await? {
      summary.seasons += 1;
      self.reporter.header(&season.id, &season.name)?;
      self.crawl_season(country, competition, &season, summary).await?;
    }
    Ok(())
  }

  async fn crawl_season(
    &mut self,
    country: &Country,
    competition: &Competition,
    season: &Season,
    summary: &mut CrawlSummary,
  ) -> Result<()> {
    // Stages are cached alongside the season but matches carry their own stage id
    let stages = self
      .client
      .list_stages(&country.id, &competition.id, &season.id)
      .await?;
    for stage in &stages {
      debug!(season = %season.id, stage = %stage.id, name = %stage.name, "stage");
    }

    let matches = self
      .client
      .list_matches(&country.id, &competition.id, &season.id)
      .await?;

    let interests = self.interests;
    for m in matches.iter().filter(|m| interests.wants_match(m)) {
      summary.matches += 1;
      self.reporter.match_line(m)?;

      let events = self
        .client
        .get_timeline(&country.id, &competition.id, &season.id, &m.stage_id, &m.id)
        .await?;
      summary.rejected_events += self.reporter.timeline(self.client, &m.id, events).await?;
    }
    Ok(())
  }
}
