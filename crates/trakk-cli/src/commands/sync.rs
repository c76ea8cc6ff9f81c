//! Sync command implementation
//!
//! Computes every status, prints them, then repairs them one by one.

use colored::Colorize;
use trakk_core::render::render_status;
use trakk_core::sync::sort_by_kind;
use trakk_core::SyncOptions;

use super::print_report;
use crate::context::Context;
use crate::error::Result;
use crate::interactive::TerminalPrompter;

/// Run the sync command
pub fn run_sync(context: &Context, dry_run: bool) -> Result<()> {
    let mut workspace = context.workspace()?;
    let statuses = workspace.compute_all_statuses()?;

    if statuses.is_empty() {
        println!("{} All refs are consistent. Nothing to do.", "OK".green().bold());
        return Ok(());
    }

    let mut sorted = statuses.clone();
    sort_by_kind(&mut sorted);
    print!("{}", render_status(&sorted));
    println!();

    let heading = if dry_run {
        "Planning repairs (dry run)..."
    } else {
        "Repairing..."
    };
    println!("{} {}", "=>".blue().bold(), heading);

    let mut prompter = TerminalPrompter::detect();
    let report = workspace.sync(statuses, &mut prompter, SyncOptions { dry_run })?;
    print_report(&report)?;

    if report.is_noop() {
        println!("{} Nothing was changed.", "OK".green().bold());
    } else {
        println!("{} Sync complete.", "OK".green().bold());
    }
    Ok(())
}
