use std::io::Write;
use std::path::{Path, PathBuf};
use std::fs::File;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use config::{Config, FileFormat};
use anyhow::{bail, Context, Result};
use colored::Colorize;

use crate::github::client::{DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECS};

// Constants
const DEFAULT_IGNORE: &str = "";
const ENV_PREFIX: &str = "PRDIFF";

#[derive(Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
pub struct App {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub github_token: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub api_base:     Option<String>,
  /// Comma-separated ignore patterns
  #[serde(skip_serializing_if = "Option::is_none")]
  pub ignore:       Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub timeout:      Option<u64>
}

#[derive(Debug, Clone)]
pub struct ConfigPaths {
  pub dir:  PathBuf,
  pub file: PathBuf
}

impl ConfigPaths {
  /// `~/.config/pr-diff/config.ini`
  pub fn new() -> Result<Self> {
    let dir = home::home_dir()
      .context("Failed to determine home directory")?
      .join(".config/pr-diff");
    let file = dir.join("config.ini");
    Ok(Self { dir, file })
  }

  pub fn ensure_exists(&self) -> Result<()> {
    if !self.dir.exists() {
      std::fs::create_dir_all(&self.dir).with_context(|| format!("Failed to create config directory at {:?}", self.dir))?;
    }
    if !self.file.exists() {
      File::create(&self.file).with_context(|| format!("Failed to create config file at {:?}", self.file))?;
    }
    Ok(())
  }
}

impl App {
  /// Loads `.env`, the user's config file and `PRDIFF_*` variables, in
  /// increasing order of precedence.
  pub fn load(paths: &ConfigPaths) -> Result<Self> {
    dotenv::dotenv().ok();
    paths.ensure_exists()?;
    Self::from_file(&paths.file)
  }

  pub fn from_file(path: &Path) -> Result<Self> {
    let config = Config::builder()
      .add_source(config::File::new(path.to_string_lossy().as_ref(), FileFormat::Ini).required(false))
      .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
      .set_default("api_base", DEFAULT_API_BASE)?
      .set_default("timeout", DEFAULT_TIMEOUT_SECS as i64)?
      .set_default("ignore", DEFAULT_IGNORE)?
      .build()?;

    config
      .try_deserialize()
      .context("Failed to deserialize existing config. Please run `pr-diff config reset` and try again")
  }

  /// Ignore patterns in configuration order, blanks removed
  pub fn ignore_patterns(&self) -> Vec<String> {
    self
      .ignore
      .as_deref()
      .unwrap_or_default()
      .split(',')
      .map(str::trim)
      .filter(|pattern| !pattern.is_empty())
      .map(String::from)
      .collect()
  }

  pub fn api_base(&self) -> &str {
    self.api_base.as_deref().unwrap_or(DEFAULT_API_BASE)
  }

  pub fn timeout(&self) -> Duration {
    Duration::from_secs(self.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS))
  }

  pub fn save(&self, path: &Path) -> Result<()> {
    let contents = serde_ini::to_string(&self).context(format!("Failed to serialize config: {:?}", self))?;
    let mut file = File::create(path).with_context(|| format!("Failed to create config file at {:?}", path))?;
    file
      .write_all(contents.as_bytes())
      .context("Failed to write config file")
  }

  /// Sets one option by its CLI name and writes the file back
  pub fn update(&mut self, key: &str, value: String, path: &Path) -> Result<()> {
    match key {
      "github-token" => self.github_token = Some(value),
      "api-base" => self.api_base = Some(value),
      "ignore" => self.ignore = Some(value),
      "timeout" => {
        let seconds = value
          .parse()
          .with_context(|| format!("Invalid timeout {value:?}, expected a number of seconds"))?;
        self.timeout = Some(seconds);
      }
      _ => bail!("Unknown configuration option {key:?} (expected github-token, api-base, ignore or timeout)")
    }

    self.save_with_message(key, path)
  }

  pub fn reset(path: &Path) -> Result<()> {
    Self::default().save(path)?;
    println!("{} Configuration reset", "✨".green());
    Ok(())
  }

  fn save_with_message(&self, option: &str, path: &Path) -> Result<()> {
    self.save(path)?;
    println!("{} Configuration option {} updated!", "✨".green(), option.bold());
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_ignore_patterns_split_on_commas() {
    let app = App { ignore: Some(r"\.mod$, \.sum$,,vendor/ ".to_string()), ..Default::default() };
    assert_eq!(app.ignore_patterns(), vec![r"\.mod$", r"\.sum$", "vendor/"]);
  }

  #[test]
  fn test_defaults_without_values() {
    let app = App::default();
    assert!(app.ignore_patterns().is_empty());
    assert_eq!(app.api_base(), DEFAULT_API_BASE);
    assert_eq!(app.timeout(), crate::github::client::DEFAULT_TIMEOUT);
  }
}
