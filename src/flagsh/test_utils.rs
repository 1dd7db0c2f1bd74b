use crate::commands::CmdMessage;
use crate::editor::ProcessRunner;
use crate::error::{FlagshError, Result};
use crate::prompt::Console;
use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Answers prompts from a fixed script and records everything it was shown.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    pub prompts: Vec<String>,
    pub notices: Vec<CmdMessage>,
}

impl ScriptedConsole {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn notice_texts(&self) -> Vec<&str> {
        self.notices.iter().map(|m| m.content.as_str()).collect()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.answers.pop_front())
    }

    fn notify(&mut self, message: CmdMessage) {
        self.notices.push(message);
    }
}

/// What the fake editor does to the file on one invocation.
#[derive(Debug, Clone)]
pub enum EditorAction {
    /// Replace the file contents.
    Write(Vec<u8>),
    /// Exit without touching the file.
    Keep,
    /// Delete the file, so reading it back fails.
    Delete,
    FailSpawn,
    FailWait,
}

impl EditorAction {
    pub fn write(content: impl AsRef<[u8]>) -> Self {
        EditorAction::Write(content.as_ref().to_vec())
    }
}

/// A [`ProcessRunner`] that plays back scripted edits instead of launching
/// a program. Once the script runs out it behaves like [`EditorAction::Keep`].
#[derive(Debug, Default)]
pub struct ScriptedEditor {
    actions: VecDeque<EditorAction>,
    /// File contents as seen when each invocation started.
    pub seeds: Vec<Vec<u8>>,
    pub files: Vec<PathBuf>,
}

impl ScriptedEditor {
    pub fn new<I: IntoIterator<Item = EditorAction>>(actions: I) -> Self {
        Self {
            actions: actions.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn invocations(&self) -> usize {
        self.files.len()
    }
}

impl ProcessRunner for ScriptedEditor {
    fn run_to_completion(&mut self, program: &Path, file: &Path) -> Result<()> {
        self.seeds.push(fs::read(file)?);
        self.files.push(file.to_path_buf());

        match self.actions.pop_front().unwrap_or(EditorAction::Keep) {
            EditorAction::Write(content) => fs::write(file, content)?,
            EditorAction::Keep => {}
            EditorAction::Delete => fs::remove_file(file)?,
            EditorAction::FailSpawn => {
                return Err(FlagshError::Spawn {
                    program: program.to_path_buf(),
                    source: io::Error::new(io::ErrorKind::PermissionDenied, "scripted failure"),
                })
            }
            EditorAction::FailWait => {
                return Err(FlagshError::Wait {
                    program: program.to_path_buf(),
                    source: io::Error::new(io::ErrorKind::Interrupted, "scripted failure"),
                })
            }
        }
        Ok(())
    }
}
