//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing with one subcommand per engine
//! operation.

mod run;

use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{Parser, Subcommand};
use headersync::report::Operation;
pub use run::{SyncArgs, run};

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

const LONG_VERSION: &str = concat!(
  env!("CARGO_PKG_VERSION"),
  " (",
  env!("GIT_HASH"),
  " ",
  env!("GIT_DATE"),
  ")"
);

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  long_version = LONG_VERSION,
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Insert NEW_HEADER.txt into every *.py file, replacing OLD_HEADER.txt
  headersync synchronize --licenses NEW_HEADER.txt OLD_HEADER.txt --directories src tests

  # Preview the changes without writing anything
  headersync synchronize --dry-run --show-diff -l NEW_HEADER.txt -d src

  # Strip both headers from every *.py file
  headersync remove --licenses NEW_HEADER.txt OLD_HEADER.txt --directories src

  # Work on Rust sources instead, skipping build scripts
  headersync synchronize --pattern \"*.rs\" --exclude build.rs -l HEADER.txt -d src
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
  /// Insert the first license header into every file that lacks it,
  /// replacing any of the other listed headers
  #[command(visible_alias = "sync")]
  Synchronize(SyncArgs),

  /// Strip every listed license header from every file
  Remove(SyncArgs),
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

impl Command {
  /// Split into the engine operation and its arguments.
  pub fn into_parts(self) -> (Operation, SyncArgs) {
    match self {
      Command::Synchronize(args) => (Operation::Synchronize, args),
      Command::Remove(args) => (Operation::Remove, args),
    }
  }
}
