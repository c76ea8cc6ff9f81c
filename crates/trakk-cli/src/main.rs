//! trakk CLI
//!
//! Tracks files under the home directory by hard-linking them into a git
//! repository, and reconciles the two when they drift apart.

mod cli;
mod commands;
mod context;
mod error;
mod interactive;

use std::io;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use context::Context;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let context = Context::new(cli.home, cli.config);
    match cli.command {
        Some(cmd) => execute_command(&context, cmd),
        None => {
            println!("{} dotfile tracker", "trakk".green().bold());
            println!();
            println!("Run {} for available commands.", "trakk --help".cyan());
            Ok(())
        }
    }
}

/// Log to stderr: DEBUG with `--verbose`, otherwise `RUST_LOG` (default warn).
fn init_tracing(verbose: bool) {
    let builder = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(verbose);

    let result = if verbose {
        builder.with_max_level(Level::DEBUG).try_init()
    } else {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        builder.with_env_filter(filter).try_init()
    };

    match result {
        Ok(()) => tracing::debug!("Verbose mode enabled"),
        Err(e) => eprintln!("{}: could not set up logging: {e}", "warning".yellow()),
    }
}

fn execute_command(context: &Context, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Init { path } => commands::run_init(context, &path),
        Commands::Add { paths } => commands::run_add(context, &paths),
        Commands::Remove { paths } => commands::run_remove(context, &paths),
        Commands::List => commands::run_list(context),
        Commands::Status { json } => commands::run_status(context, json),
        Commands::Sync { dry_run } => commands::run_sync(context, dry_run),
        Commands::Show { path } => commands::run_show(context, &path),
        Commands::Restore { paths } => commands::run_restore(context, &paths),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "trakk", &mut io::stdout());
            Ok(())
        }
    }
}
