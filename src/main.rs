use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use log::{debug, LevelFilter};
use prdiff::config::{App, ConfigPaths};
use prdiff::diff::{self, DiffReport, FileDiff, IgnoreSet};
use prdiff::error::is_github_auth_error;
use prdiff::github::{self, GitHubClient, PullRequestUrl};

#[derive(Parser, Debug)]
#[command(author, version, about = "Split pull request diffs into per-file records")]
struct Cli {
  #[arg(short, long, global = true, help = "Enables verbose logging")]
  verbose: bool,

  #[command(subcommand)]
  command: Command
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Fetch a GitHub pull request and print its files
  Fetch {
    /// e.g. https://github.com/owner/repo/pull/42
    url: String,

    #[command(flatten)]
    output: Output
  },

  /// Parse a diff from a file, or from stdin when no file is given
  Parse {
    file: Option<PathBuf>,

    #[command(flatten)]
    output: Output
  },

  /// Change the stored configuration
  Config {
    #[command(subcommand)]
    action: ConfigAction
  }
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
  /// Set github-token, api-base, ignore or timeout
  Set { key: String, value: String },
  /// Restore the defaults
  Reset
}

#[derive(Args, Debug)]
struct Output {
  #[arg(short, long = "ignore", value_name = "REGEX", help = "Skip files whose new path matches (repeatable)")]
  ignore: Vec<String>,

  #[arg(long, help = "Print JSON instead of text")]
  json: bool,

  #[arg(long, help = "Also list skipped segments and ignored files")]
  report: bool
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.verbose {
    env_logger::builder()
      .filter_level(LevelFilter::Debug)
      .format_target(false)
      .format_timestamp(None)
      .init();
    debug!("Verbose logging enabled");
  } else {
    env_logger::init();
  }

  let paths = ConfigPaths::new()?;

  match cli.command {
    Command::Fetch { url, output } => {
      let app = App::load(&paths)?;
      let pr = PullRequestUrl::parse(&url).with_context(|| format!("Not a pull request URL: {url}"))?;
      let client = GitHubClient::with_options(app.api_base(), app.github_token.clone(), app.timeout())?;

      let diff = match github::fetch_diff(&client, &pr).await.context("Failed to fetch pull request") {
        Ok(diff) => diff,
        Err(err) => {
          if is_github_auth_error(&err) {
            eprintln!(
              "{} GitHub refused the request; set a token with `pr-diff config set github-token <TOKEN>`",
              "hint:".yellow().bold()
            );
          }
          return Err(err);
        }
      };

      print_diff(&diff, &app, &output)?;
    },
    Command::Parse { file, output } => {
      let app = App::load(&paths)?;
      let bytes = match &file {
        Some(path) => std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
          let mut buf = Vec::new();
          std::io::stdin().read_to_end(&mut buf).context("Failed to read stdin")?;
          buf
        }
      };

      print_diff(&String::from_utf8_lossy(&bytes), &app, &output)?;
    },
    Command::Config { action: ConfigAction::Set { key, value } } => {
      let mut app = App::load(&paths)?;
      app.update(&key, value, &paths.file)?;
    },
    Command::Config { action: ConfigAction::Reset } => {
      paths.ensure_exists()?;
      App::reset(&paths.file)?;
    }
  }

  Ok(())
}

fn print_diff(diff: &str, app: &App, output: &Output) -> Result<()> {
  let mut patterns = app.ignore_patterns();
  patterns.extend(output.ignore.iter().cloned());
  debug!("Ignore patterns: {patterns:?}");

  let ignore = IgnoreSet::new(&patterns);
  let report = diff::parse_git_diff_with(diff, &ignore);

  if output.json {
    let json = if output.report {
      serde_json::to_string_pretty(&report)?
    } else {
      serde_json::to_string_pretty(&report.files)?
    };
    println!("{json}");
    return Ok(());
  }

  for file in &report.files {
    print_file(file);
  }

  if output.report {
    print_report(&report, &ignore);
  }

  Ok(())
}

fn print_file(file: &FileDiff) {
  println!(
    "{} {} {} {}",
    file.old_path().red(),
    "→".dimmed(),
    file.new_path().green(),
    format!("(index: {})", file.index()).dimmed()
  );

  for line in file.body().lines() {
    let line = match line.chars().next() {
      Some('+') if !line.starts_with("+++") => line.green(),
      Some('-') if !line.starts_with("---") => line.red(),
      Some('@') => line.cyan(),
      _ => line.normal()
    };
    println!("  {line}");
  }

  println!();
}

fn print_report(report: &DiffReport, ignore: &IgnoreSet) {
  eprintln!("{} {} files", "parsed:".bold(), report.files.len());

  if !ignore.is_empty() {
    eprintln!("{} {} ignore patterns", "patterns:".bold(), ignore.len());
  }
  for err in ignore.errors() {
    eprintln!("{} {}", "invalid pattern:".red().bold(), err);
  }

  for skipped in &report.skipped {
    eprintln!("{} segment #{}: {}", "skipped:".yellow().bold(), skipped.position, skipped.error);
  }

  for path in &report.ignored {
    eprintln!("{} {}", "ignored:".blue().bold(), path);
  }
}
