use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Runtime configuration. Every field has a default, so a config file only
/// needs the values it changes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
  pub api: ApiConfig,
  /// Root of the response cache
  pub cache_dir: PathBuf,
  /// Country codes to crawl (case-insensitive)
  #[serde(deserialize_with = "deserialize_uppercase_set")]
  pub countries: BTreeSet<String>,
  /// Team ids whose matches are reported
  #[serde(deserialize_with = "deserialize_trimmed_set")]
  pub teams: BTreeSet<String>,
  /// Name shown for a substituted player the API does not identify
  pub unknown_player: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
  pub base_url: String,
  pub language: String,
  /// `count` sent with every list request
  pub page_size: u32,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      api: ApiConfig::default(),
      cache_dir: PathBuf::from("data"),
      countries: ["SCO", "USA"].into_iter().map(String::from).collect(),
      // Aberdeen, Seattle Sounders
      teams: ["31068", "2000000975"].into_iter().map(String::from).collect(),
      unknown_player: "???".to_string(),
    }
  }
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      base_url: "https://api.fifa.com/".to_string(),
      language: "en-US".to_string(),
      page_size: 1000,
    }
  }
}

fn deserialize_uppercase_set<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
  D: serde::Deserializer<'de>,
{
  let v: Vec<String> = Vec::deserialize(deserializer)?;
  Ok(v.into_iter().map(|s| s.trim().to_uppercase()).collect())
}

fn deserialize_trimmed_set<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
  D: serde::Deserializer<'de>,
{
  let v: Vec<String> = Vec::deserialize(deserializer)?;
  Ok(v.into_iter().map(|s| s.trim().to_string()).collect())
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./pitchside.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/pitchside/config.yaml
  ///
  /// Without a config file the built-in defaults are used.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    match path {
      Some(p) => Self::load_from_path(&p),
      None => Ok(Self::default()),
    }
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("pitchside.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("pitchside").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::from_yaml(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  fn from_yaml(contents: &str) -> Result<Self, serde_yaml::Error> {
    serde_yaml::from_str(contents)
  }

  /// Apply command-line overrides. Empty lists leave the configured ones alone.
  pub fn with_overrides(
    self,
    cache_dir: Option<PathBuf>,
    countries: Vec<String>,
    teams: Vec<String>,
  ) -> Self {
    Config {
      cache_dir: cache_dir.unwrap_or(self.cache_dir),
      countries: if countries.is_empty() {
        self.countries
      } else {
        countries.iter().map(|c| c.trim().to_uppercase()).collect()
      },
      teams: if teams.is_empty() {
        self.teams
      } else {
        teams.iter().map(|t| t.trim().to_string()).collect()
      },
      ..self
    }
  }
}
