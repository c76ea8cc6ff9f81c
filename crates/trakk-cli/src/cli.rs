//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// trakk - keep dotfiles hard-linked into a git repository
#[derive(Parser, Debug)]
#[command(name = "trakk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Home directory that refs are relative to
    #[arg(long, global = true, env = "TRAKK_HOME", value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Index file location (default: ~/.trakk.toml)
    #[arg(long, global = true, env = "TRAKK_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create the index and a git repository to mirror files into
    ///
    /// Examples:
    ///   trakk init ~/dotfiles
    Init {
        /// Repository directory; must be under home and empty
        path: PathBuf,
    },

    /// Start tracking files or directories
    ///
    /// Each file is recorded in the index and hard-linked into the
    /// repository. Directories are tracked recursively.
    ///
    /// Examples:
    ///   trakk add ~/.bashrc ~/.vimrc
    ///   trakk add ~/.config/nvim
    Add {
        /// Files or directories under home
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Stop tracking files or directories
    ///
    /// The repository copy is unlinked; the file in home is kept.
    #[command(alias = "rm")]
    Remove {
        /// System or repository paths of tracked refs
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// List tracked refs
    #[command(alias = "ls")]
    List,

    /// Report every ref that is not in a consistent state
    Status {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Repair inconsistent refs, asking where a choice is needed
    Sync {
        /// Report what would be done without changing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Explain the state of a single ref
    Show {
        /// System or repository path of the ref
        path: PathBuf,
    },

    /// Put the repository's version of refs back in place
    Restore {
        /// System or repository paths of tracked refs
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Generate shell completions
    ///
    /// Examples:
    ///   trakk completions bash > ~/.local/share/bash-completion/completions/trakk
    ///   trakk completions zsh > ~/.zfunc/_trakk
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
