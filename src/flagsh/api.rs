//! # API Facade
//!
//! A thin facade over the command layer. Every UI goes through
//! [`FlagshApi`]; it dispatches to `commands/*.rs` and hands back
//! `Result<CmdResult>` without printing anything.
//!
//! The facade owns the two capabilities the edit workflow needs from the
//! outside world: a [`ProcessRunner`] to launch the editor and a [`Console`]
//! to ask questions. Production wires in [`TerminalRunner`] and a terminal
//! console; tests wire in scripted fakes.
//!
//! [`TerminalRunner`]: crate::editor::TerminalRunner

use crate::commands;
use crate::config::FlagshConfig;
use crate::editor::ProcessRunner;
use crate::error::Result;
use crate::prompt::Console;
use std::path::{Path, PathBuf};

pub struct FlagshApi<R: ProcessRunner, C: Console> {
    runner: R,
    console: C,
    config_dir: PathBuf,
    scratch_dir: Option<PathBuf>,
}

impl<R: ProcessRunner, C: Console> FlagshApi<R, C> {
    pub fn new(runner: R, console: C, config_dir: PathBuf) -> Self {
        Self {
            runner,
            console,
            config_dir,
            scratch_dir: None,
        }
    }

    /// Keeps scratch files in `dir` instead of the system temp directory.
    pub fn with_scratch_dir(mut self, dir: PathBuf) -> Self {
        self.scratch_dir = Some(dir);
        self
    }

    pub fn edit_document(&mut self, original: &[u8], editor: &str) -> Result<CmdResult> {
        commands::edit::run(
            original,
            editor,
            &mut self.runner,
            &mut self.console,
            self.scratch_dir.as_deref(),
        )
    }

    pub fn diff_documents(&self, original: &[u8], candidate: &[u8]) -> Result<CmdResult> {
        commands::diff::run(original, candidate)
    }

    pub fn apply_patch(&self, document: &[u8], patch: &[u8]) -> Result<CmdResult> {
        commands::apply::run(document, patch)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.config_dir, action)
    }

    pub fn load_config(&self) -> Result<FlagshConfig> {
        FlagshConfig::load(&self.config_dir)
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn console(&mut self) -> &mut C {
        &mut self.console
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel};
