//! # headersync
//!
//! Keeps a canonical license header in sync across source trees.

mod cli;

use anyhow::Result;

use crate::cli::{Cli, run};

fn main() -> Result<()> {
  let cli = Cli::parse_args();
  let (operation, args) = cli.command.into_parts();
  run(operation, args)
}
