//! Interactive confirmation for repairs

use std::io::{BufRead, Write};

use crate::Result;

/// Invalid answers tolerated before a prompt gives up and skips.
pub const MAX_PROMPT_ATTEMPTS: usize = 5;

/// An answer to a repair prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Yes,
    No,
    Mine,
    Theirs,
    Skip,
}

impl Choice {
    /// The key that selects this choice.
    pub fn key(self) -> char {
        match self {
            Choice::Yes => 'y',
            Choice::No => 'n',
            Choice::Mine => 'm',
            Choice::Theirs => 't',
            Choice::Skip => 's',
        }
    }

    /// Label with the key in parentheses, e.g. `(Y)es`.
    pub fn label(self) -> &'static str {
        match self {
            Choice::Yes => "(Y)es",
            Choice::No => "(N)o",
            Choice::Mine => "(M)ine",
            Choice::Theirs => "(T)heirs",
            Choice::Skip => "(S)kip",
        }
    }
}

/// Source of answers for interactive repairs.
pub trait Prompter {
    /// Show `prompt` and read one answer line.
    ///
    /// Returns `None` at end of input.
    fn read_answer(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Tell the user their answer was not understood.
    fn reject(&mut self, answer: &str) -> Result<()>;
}

/// Ask `question` until one of `choices` is picked.
///
/// Answers are matched case-insensitively after trimming. End of input and
/// [`MAX_PROMPT_ATTEMPTS`] unrecognized answers both mean [`Choice::Skip`].
pub fn choose<P: Prompter + ?Sized>(
    prompter: &mut P,
    question: &str,
    choices: &[Choice],
) -> Result<Choice> {
    let labels: Vec<&str> = choices.iter().map(|c| c.label()).collect();
    let prompt = format!("{question} {}: ", labels.join("/"));

    for _ in 0..MAX_PROMPT_ATTEMPTS {
        let Some(answer) = prompter.read_answer(&prompt)? else {
            tracing::debug!("End of input, skipping");
            return Ok(Choice::Skip);
        };
        let normalized = answer.trim().to_lowercase();
        let mut keys = normalized.chars();
        if let (Some(key), None) = (keys.next(), keys.next())
            && let Some(choice) = choices.iter().find(|c| c.key() == key)
        {
            return Ok(*choice);
        }
        prompter.reject(&answer)?;
    }

    tracing::warn!(
        attempts = MAX_PROMPT_ATTEMPTS,
        "Too many unrecognized answers, skipping"
    );
    Ok(Choice::Skip)
}

/// Prompter over any line reader and writer.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the prompter, returning the writer.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn read_answer(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn reject(&mut self, _answer: &str) -> Result<()> {
        writeln!(self.output, "What?")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ask(input: &str, choices: &[Choice]) -> (Choice, String) {
        let mut prompter = LinePrompter::new(Cursor::new(input.to_string()), Vec::new());
        let choice = choose(&mut prompter, "Remove it?", choices).unwrap();
        (choice, String::from_utf8(prompter.into_output()).unwrap())
    }

    #[test]
    fn answers_are_case_insensitive_and_trimmed() {
        let (choice, _) = ask("  Y \n", &[Choice::Yes, Choice::Skip]);
        assert_eq!(choice, Choice::Yes);
    }

    #[test]
    fn invalid_answer_reprompts() {
        let (choice, output) = ask("maybe\nt\n", &[Choice::Mine, Choice::Theirs, Choice::Skip]);
        assert_eq!(choice, Choice::Theirs);
        assert_eq!(
            output,
            "Remove it? (M)ine/(T)heirs/(S)kip: What?\nRemove it? (M)ine/(T)heirs/(S)kip: "
        );
    }

    #[test]
    fn keys_not_offered_are_rejected() {
        let (choice, output) = ask("n\n", &[Choice::Yes, Choice::Skip]);
        assert_eq!(choice, Choice::Skip);
        assert!(output.contains("What?"));
    }

    #[test]
    fn end_of_input_skips() {
        let (choice, _) = ask("", &[Choice::Yes, Choice::Skip]);
        assert_eq!(choice, Choice::Skip);
    }

    #[test]
    fn repeated_garbage_gives_up() {
        let garbage = "x\n".repeat(MAX_PROMPT_ATTEMPTS + 3);
        let (choice, output) = ask(&garbage, &[Choice::Yes, Choice::Skip]);
        assert_eq!(choice, Choice::Skip);
        assert_eq!(output.matches("What?").count(), MAX_PROMPT_ATTEMPTS);
    }
}
