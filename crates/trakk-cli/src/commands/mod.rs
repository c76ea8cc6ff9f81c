//! Command implementations for trakk-cli

pub mod init;
pub mod restore;
pub mod show;
pub mod status;
pub mod sync;
pub mod track;

pub use init::run_init;
pub use restore::run_restore;
pub use show::run_show;
pub use status::run_status;
pub use sync::run_sync;
pub use track::{run_add, run_list, run_remove};

use colored::Colorize;
use trakk_core::SyncReport;

use crate::error::{CliError, Result};

/// Print the outcome of a mutating command.
///
/// Fails when any per-ref action failed, after everything has been printed.
pub fn print_report(report: &SyncReport) -> Result<()> {
    for action in &report.actions {
        println!("   {} {}", "+".green(), action);
    }
    for skipped in &report.skipped {
        println!("   {} {}", "-".dimmed(), skipped);
    }
    for deferred in &report.deferred {
        println!("   {} {}", "~".yellow(), deferred);
    }
    for error in &report.errors {
        println!("   {} {}", "!".red(), error);
    }

    if report.success {
        Ok(())
    } else {
        Err(CliError::user(format!(
            "{} ref(s) could not be processed",
            report.errors.len()
        )))
    }
}
