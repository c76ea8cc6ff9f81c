//! Interactive prompts for CLI commands
//!
//! Uses dialoguer when stdin is a terminal and plain line reading otherwise,
//! so answers can be piped in.

use std::io::{self, ErrorKind, IsTerminal, StdinLock, Stdout};

use colored::Colorize;
use dialoguer::Input;
use trakk_core::{LinePrompter, Prompter};

/// Prompter over the process's standard streams.
pub enum TerminalPrompter {
    Interactive,
    Piped(LinePrompter<StdinLock<'static>, Stdout>),
}

impl TerminalPrompter {
    pub fn detect() -> Self {
        if io::stdin().is_terminal() {
            Self::Interactive
        } else {
            Self::Piped(LinePrompter::new(io::stdin().lock(), io::stdout()))
        }
    }
}

impl Prompter for TerminalPrompter {
    fn read_answer(&mut self, prompt: &str) -> trakk_core::Result<Option<String>> {
        match self {
            Self::Interactive => {
                let answer = Input::<String>::new()
                    .with_prompt(prompt.trim_end().trim_end_matches(':'))
                    .allow_empty(true)
                    .interact_text();
                match answer {
                    Ok(answer) => Ok(Some(answer)),
                    Err(dialoguer::Error::IO(e)) if e.kind() == ErrorKind::UnexpectedEof => {
                        Ok(None)
                    }
                    Err(dialoguer::Error::IO(e)) => Err(e.into()),
                }
            }
            Self::Piped(prompter) => prompter.read_answer(prompt),
        }
    }

    fn reject(&mut self, answer: &str) -> trakk_core::Result<()> {
        match self {
            Self::Interactive => {
                println!("{}", "What?".yellow());
                Ok(())
            }
            Self::Piped(prompter) => prompter.reject(answer),
        }
    }
}
