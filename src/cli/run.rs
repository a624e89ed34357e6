//! # Run Command
//!
//! This module implements the `synchronize` and `remove` subcommands. Both
//! take the same arguments and differ only in the engine operation they run.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Args;
use headersync::config::{CliOverrides, load_config};
use headersync::diff::DiffManager;
use headersync::headers::HeaderSet;
use headersync::info_log;
use headersync::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use headersync::output::{
  print_all_files_ok, print_blank_line, print_changed_files, print_failed_files, print_start_message, print_summary,
};
use headersync::processor::{Processor, ProcessorConfig};
use headersync::report::Operation;
use tracing::debug;

/// Arguments shared by the synchronize and remove commands
#[derive(Args, Debug)]
pub struct SyncArgs {
  /// License header files. The first is the canonical header; the rest are
  /// legacy headers to replace (synchronize) or strip (remove)
  #[arg(long, short = 'l', required = true, num_args = 1.., value_name = "PATH")]
  pub licenses: Vec<PathBuf>,

  /// Directories to process recursively
  #[arg(long, short = 'd', required = true, num_args = 1.., value_name = "DIR")]
  pub directories: Vec<PathBuf>,

  /// Only process files whose name matches this glob [default: *.py]
  #[arg(long, short = 'p', value_name = "GLOB")]
  pub pattern: Option<String>,

  /// File names to skip (repeatable) [default: __init__.py]
  #[arg(long, short = 'e', value_name = "NAME")]
  pub exclude: Vec<String>,

  /// Path to config file (default: .headersync.toml in the current directory)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long, conflicts_with = "config")]
  pub no_config: bool,

  /// Report what would change without writing any file
  #[arg(long)]
  pub dry_run: bool,

  /// Show a diff of every change on stderr
  #[arg(long)]
  pub show_diff: bool,

  /// Save a diff of every change to a file
  #[arg(long, short = 'o', value_name = "FILE")]
  pub save_diff: Option<PathBuf>,

  /// Skip files that cannot be read or written instead of stopping at the
  /// first failure; the exit code is still non-zero
  #[arg(long)]
  pub keep_going: bool,

  /// Write a JSON report of the run to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

/// Run one engine operation with the given arguments
pub fn run(operation: Operation, args: SyncArgs) -> Result<()> {
  // Initialize tracing subscriber for structured logging
  init_tracing(args.quiet, args.verbose);

  // Set verbose mode for output formatting and info_log! macro
  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let current_dir = std::env::current_dir().context("Failed to get current directory")?;

  let mut config = load_config(args.config.as_deref(), &current_dir, args.no_config)?;
  config
    .merge_cli_overrides(CliOverrides {
      pattern: args.pattern,
      exclude: args.exclude,
    })
    .context("Invalid selection options")?;
  let criteria = config.selection_criteria();
  debug!(
    "Selecting files matching {} excluding {:?}",
    criteria.pattern, criteria.excluded_names
  );

  // Headers are loaded before any target file is looked at
  let headers = HeaderSet::load(&args.licenses).context("Failed to load license headers")?;

  let diff_manager = DiffManager::new(args.show_diff, args.save_diff);
  diff_manager.init()?;

  let processor = Processor::new(ProcessorConfig {
    criteria,
    dry_run: args.dry_run,
    keep_going: args.keep_going,
    diff_manager: Some(diff_manager),
    ..ProcessorConfig::new(headers)
  })?;

  let report = match operation {
    Operation::Synchronize => processor.synchronize(&args.directories),
    Operation::Remove => processor.remove(&args.directories),
  }
  .with_context(|| format!("Failed to {} license headers", operation))?;

  let summary = &report.summary;
  print_start_message(summary.files_scanned, summary.dry_run);
  print_blank_line();
  print_changed_files(&report, Some(&current_dir));
  print_failed_files(&report, Some(&current_dir));
  print_all_files_ok(summary);
  print_blank_line();
  print_summary(summary);

  if let Some(ref output_path) = args.report_json {
    report.write_json(output_path)?;
    info_log!("Generated JSON report at {}", output_path.display());
  }

  if summary.has_failures() {
    process::exit(1);
  }

  Ok(())
}
