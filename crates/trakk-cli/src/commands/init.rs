//! Init command implementation

use std::path::Path;

use colored::Colorize;
use trakk_core::{InitOutcome, Workspace};

use crate::context::Context;
use crate::error::Result;

/// Run the init command
pub fn run_init(context: &Context, path: &Path) -> Result<()> {
    let env = context.environment()?;
    println!("{} Initializing trakk...", "=>".blue().bold());

    match Workspace::init(&env, path)? {
        InitOutcome::Existing { repository } => {
            println!(
                "{} Already initialized with repository {}",
                "OK".green().bold(),
                repository.display().to_string().cyan()
            );
        }
        InitOutcome::Created { repository } => {
            println!(
                "{} Created repository {}",
                "OK".green().bold(),
                repository.display().to_string().cyan()
            );
            println!("   Index: {}", env.index_path().display());
            println!();
            println!("Run {} to start tracking files.", "trakk add <path>".cyan());
        }
    }
    Ok(())
}
