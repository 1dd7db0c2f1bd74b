use super::print::styled_message;
use console::Term;
use flagsh::api::CmdMessage;
use flagsh::error::Result;
use flagsh::prompt::Console;
use std::io::BufRead;

/// Prompts and in-flight notices go to stderr; answers come from stdin.
pub(super) struct TerminalConsole {
    term: Term,
}

impl TerminalConsole {
    pub(super) fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }
}

impl Console for TerminalConsole {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        self.term.write_str(prompt)?;
        self.term.flush()?;

        let mut line = String::new();
        if std::io::stdin().lock().read_line(&mut line)? == 0 {
            // Keep the next message off the prompt line.
            self.term.write_line("")?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    fn notify(&mut self, message: CmdMessage) {
        // Nowhere left to report a failed write to stderr.
        self.term
            .write_line(&styled_message(&message).to_string())
            .ok();
    }
}
