//! Restore command implementation

use std::path::PathBuf;

use colored::Colorize;

use super::print_report;
use crate::context::Context;
use crate::error::Result;

/// Run the restore command
pub fn run_restore(context: &Context, paths: &[PathBuf]) -> Result<()> {
    let mut workspace = context.workspace()?;
    println!("{} Restoring {} path(s)...", "=>".blue().bold(), paths.len());

    let report = workspace.restore(paths)?;
    print_report(&report)
}
