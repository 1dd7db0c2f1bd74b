//! Line-oriented user interaction.
//!
//! The edit workflow asks questions and reports problems while it runs, but
//! it never touches the terminal itself. It goes through [`Console`], which
//! the CLI implements on top of stdin/stderr and tests implement with a
//! scripted list of answers.

use crate::commands::CmdMessage;
use crate::error::Result;

pub trait Console {
    /// Shows `prompt` and reads one line, without its line terminator.
    /// Returns `None` once input is exhausted.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;

    fn notify(&mut self, message: CmdMessage);
}

/// Empty input and `y` (any case) mean yes; anything else means no.
pub fn is_yes(answer: &str) -> bool {
    answer.is_empty() || answer.to_lowercase() == "y"
}

/// Asks a `[y]/n` question. End of input counts as no.
pub fn ask_yes_no<C: Console + ?Sized>(console: &mut C, prompt: &str) -> Result<bool> {
    Ok(console
        .read_line(prompt)?
        .map(|answer| is_yes(&answer))
        .unwrap_or(false))
}
