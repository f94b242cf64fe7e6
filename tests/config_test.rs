use std::time::Duration;

use anyhow::Result;
use prdiff::config::{App, ConfigPaths};
use tempfile::TempDir;

fn paths(dir: &TempDir) -> ConfigPaths {
  let dir = dir.path().join("pr-diff");
  ConfigPaths { file: dir.join("config.ini"), dir }
}

#[test]
fn test_load_creates_config_file() -> Result<()> {
  let tmp = TempDir::new()?;
  let paths = paths(&tmp);

  paths.ensure_exists()?;
  assert!(paths.file.exists());

  let app = App::from_file(&paths.file)?;
  assert_eq!(app.timeout(), Duration::from_secs(30));
  assert!(app.ignore_patterns().is_empty());
  Ok(())
}

#[test]
fn test_reads_values_from_ini() -> Result<()> {
  let tmp = TempDir::new()?;
  let paths = paths(&tmp);
  paths.ensure_exists()?;
  std::fs::write(&paths.file, "api_base = https://ghe.example.com/api/v3\nignore = [.]mod$,[.]sum$\ntimeout = 5\n")?;

  let app = App::from_file(&paths.file)?;
  assert_eq!(app.api_base(), "https://ghe.example.com/api/v3");
  assert_eq!(app.ignore_patterns(), vec!["[.]mod$", "[.]sum$"]);
  assert_eq!(app.timeout(), Duration::from_secs(5));
  Ok(())
}

#[test]
fn test_update_writes_back() -> Result<()> {
  let tmp = TempDir::new()?;
  let paths = paths(&tmp);
  paths.ensure_exists()?;

  let mut app = App::from_file(&paths.file)?;
  app.update("ignore", "[.]lock$".to_string(), &paths.file)?;
  app.update("timeout", "12".to_string(), &paths.file)?;

  let reloaded = App::from_file(&paths.file)?;
  assert_eq!(reloaded.ignore_patterns(), vec!["[.]lock$"]);
  assert_eq!(reloaded.timeout(), Duration::from_secs(12));
  Ok(())
}

#[test]
fn test_update_rejects_unknown_keys_and_bad_values() -> Result<()> {
  let tmp = TempDir::new()?;
  let paths = paths(&tmp);
  paths.ensure_exists()?;

  let mut app = App::default();
  assert!(app.update("colour", "blue".to_string(), &paths.file).is_err());
  assert!(app.update("timeout", "soon".to_string(), &paths.file).is_err());
  assert_eq!(app, App::default());
  Ok(())
}

#[test]
fn test_reset_clears_values() -> Result<()> {
  let tmp = TempDir::new()?;
  let paths = paths(&tmp);
  paths.ensure_exists()?;
  std::fs::write(&paths.file, "ignore = vendor/\n")?;

  App::reset(&paths.file)?;

  let app = App::from_file(&paths.file)?;
  assert!(app.ignore_patterns().is_empty());
  Ok(())
}
