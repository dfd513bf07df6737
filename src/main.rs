mod cache;
mod commands;
mod config;
mod crawl;
mod fifa;
mod logging;
mod report;
#[cfg(test)]
mod testing;

use clap::Parser;
use color_eyre::Result;
use std::path::PathBuf;
use tracing::{info, info_span, Instrument};

use commands::Command;
use fifa::CachedFifaClient;
use report::Reporter;

#[derive(Parser, Debug)]
#[command(name = "pitchside")]
#[command(about = "Crawls football competitions from the FIFA API and prints match reports")]
#[command(version)]
struct Args {
  /// Path to config file (default: ./pitchside.yaml or $XDG_CONFIG_HOME/pitchside/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Directory holding cached API responses
  #[arg(long)]
  cache_dir: Option<PathBuf>,

  /// Country code of interest (repeatable, replaces the configured list)
  #[arg(long = "country")]
  countries: Vec<String>,

  /// Team id of interest (repeatable, replaces the configured list)
  #[arg(long = "team")]
  teams: Vec<String>,

  /// Write logs to this file instead of stderr
  #[arg(long)]
  log_file: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Command>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();
  let _log_guard = logging::init(args.log_file.as_deref())?;

  // Load configuration, then apply command-line overrides
  let config = config::Config::load(args.config.as_deref())?.with_overrides(
    args.cache_dir,
    args.countries,
    args.teams,
  );

  let client = CachedFifaClient::new(&config)?;
  info!(cache = %client.cache().storage().root().display(), "using cache");

  let command = args.command.unwrap_or_default();
  let mut reporter = Reporter::new(std::io::stdout(), &config.unknown_player);

  reporter.marker()?;
  commands::execute(&command, &client, &config, &mut reporter)
    .instrument(info_span!("command", ?command))
    .await?;
  reporter.marker()?;

  Ok(())
}
