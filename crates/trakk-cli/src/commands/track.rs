//! Add, remove and list command implementations

use std::path::PathBuf;

use colored::Colorize;

use super::print_report;
use crate::context::Context;
use crate::error::Result;

/// Run the add command
pub fn run_add(context: &Context, paths: &[PathBuf]) -> Result<()> {
    let mut workspace = context.workspace()?;
    println!("{} Adding {} path(s)...", "=>".blue().bold(), paths.len());

    let report = workspace.add(paths)?;
    print_report(&report)?;
    if report.actions.is_empty() {
        println!("{} Nothing new to track.", "OK".green().bold());
    }
    Ok(())
}

/// Run the remove command
pub fn run_remove(context: &Context, paths: &[PathBuf]) -> Result<()> {
    let mut workspace = context.workspace()?;
    println!("{} Removing {} path(s)...", "=>".blue().bold(), paths.len());

    let report = workspace.remove(paths)?;
    print_report(&report)
}

/// Run the list command
pub fn run_list(context: &Context) -> Result<()> {
    let workspace = context.workspace()?;
    let refs = workspace.list();

    if refs.is_empty() {
        println!("{}", "None".dimmed());
    } else {
        for reference in refs {
            println!("{reference}");
        }
    }
    Ok(())
}
