//! # Edit Session
//!
//! Drives one round of "edit a JSON document in an external editor and turn
//! the result into a patch".
//!
//! ## State machine
//!
//! ```text
//!            ┌──────────────── yes ────────────────┐
//!            ▼                                      │
//!        Editing ──► Validating ──► PromptRetry ────┘
//!            │            │              │
//!            │            ▼              ▼ no
//!            │         Success        Aborted
//!            └── read failure ──► PromptRetry
//! ```
//!
//! - `Editing` writes `current` to a fresh scratch file, runs the editor on
//!   it and reads it back.
//! - `Validating` diffs the candidate against the **original** document.
//! - `PromptRetry` asks whether to keep editing. Yes re-seeds the editor with
//!   the bytes the user just produced, so nothing they typed is lost.
//!
//! There is no retry limit. The loop ends when the user produces valid JSON
//! or declines to continue.
//!
//! Spawn and wait failures are fatal and skip the prompt entirely. Scratch
//! files are removed on every path; a failed removal is only a warning.

use crate::commands::CmdMessage;
use crate::diff::{diff, Diff};
use crate::editor::ProcessRunner;
use crate::error::{FlagshError, Result};
use crate::model::PatchComment;
use crate::prompt::{ask_yes_no, Console};
use crate::workspace::ScratchFile;
use std::path::{Path, PathBuf};

const COMMENT_PROMPT: &str = "Enter comment: ";

/// How an edit ended, when it did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    Patched(PatchComment),
    /// The edited document is semantically identical to the original.
    NoChange,
}

#[derive(Debug)]
enum State {
    Editing,
    Validating(Vec<u8>),
    PromptRetry {
        retry: Retry,
        reason: FlagshError,
    },
    Success(Diff),
    Aborted,
}

/// Why the editor is being offered again.
#[derive(Debug)]
enum Retry {
    /// The scratch file could not be read back.
    Unreadable,
    /// The bytes the user saved, which did not parse.
    Unparseable(Vec<u8>),
}

#[derive(Debug)]
pub struct EditSession {
    original: Vec<u8>,
    current: Vec<u8>,
    attempts: usize,
    scratch_dir: Option<PathBuf>,
}

impl EditSession {
    pub fn new(original: impl Into<Vec<u8>>) -> Self {
        let original = original.into();
        Self {
            current: original.clone(),
            original,
            attempts: 0,
            scratch_dir: None,
        }
    }

    /// Creates scratch files in `dir` instead of the system temp directory.
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    pub fn original(&self) -> &[u8] {
        &self.original
    }

    pub fn current(&self) -> &[u8] {
        &self.current
    }

    /// Number of times the editor has been launched.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Runs the edit loop, then collects a comment if anything changed.
    pub fn run<R, C>(
        &mut self,
        editor: &Path,
        runner: &mut R,
        console: &mut C,
    ) -> Result<EditOutcome>
    where
        R: ProcessRunner + ?Sized,
        C: Console + ?Sized,
    {
        match self.edit_until_settled(editor, runner, console)? {
            Diff::NoChange => Ok(EditOutcome::NoChange),
            Diff::Changed(patch) => {
                let comment = console.read_line(COMMENT_PROMPT)?.unwrap_or_default();
                Ok(EditOutcome::Patched(PatchComment::assemble(patch, comment)))
            }
        }
    }

    fn edit_until_settled<R, C>(
        &mut self,
        editor: &Path,
        runner: &mut R,
        console: &mut C,
    ) -> Result<Diff>
    where
        R: ProcessRunner + ?Sized,
        C: Console + ?Sized,
    {
        let mut state = State::Editing;
        loop {
            state = match state {
                State::Success(diff) => return Ok(diff),
                State::Aborted => return Err(FlagshError::Aborted),
                State::Editing => self.edit(editor, runner, console)?,
                State::Validating(candidate) => self.validate(candidate)?,
                State::PromptRetry { retry, reason } => {
                    self.prompt_retry(retry, reason, console)?
                }
            };
        }
    }

    fn edit<R, C>(&mut self, editor: &Path, runner: &mut R, console: &mut C) -> Result<State>
    where
        R: ProcessRunner + ?Sized,
        C: Console + ?Sized,
    {
        self.attempts += 1;
        let scratch = match &self.scratch_dir {
            Some(dir) => ScratchFile::create_in(dir, &self.current)?,
            None => ScratchFile::create(&self.current)?,
        };

        runner.run_to_completion(editor, scratch.path())?;

        let loaded = scratch.load();
        if let Err(e) = scratch.release() {
            console.notify(CmdMessage::warning(e.to_string()));
        }

        Ok(match loaded {
            Ok(candidate) => State::Validating(candidate),
            Err(reason) => State::PromptRetry {
                retry: Retry::Unreadable,
                reason,
            },
        })
    }

    fn validate(&self, candidate: Vec<u8>) -> Result<State> {
        match diff(&self.original, &candidate) {
            Ok(diff) => Ok(State::Success(diff)),
            Err(reason @ FlagshError::InvalidDocument(_)) => Ok(State::PromptRetry {
                retry: Retry::Unparseable(candidate),
                reason,
            }),
            Err(e) => Err(e),
        }
    }

    fn prompt_retry<C>(
        &mut self,
        retry: Retry,
        reason: FlagshError,
        console: &mut C,
    ) -> Result<State>
    where
        C: Console + ?Sized,
    {
        console.notify(CmdMessage::warning(reason.to_string()));
        let question = match retry {
            Retry::Unreadable => "Try again? [y]/n ",
            Retry::Unparseable(_) => "Unable to parse json. Make changes? [y]/n ",
        };

        if !ask_yes_no(console, question)? {
            return Ok(State::Aborted);
        }

        if let Retry::Unparseable(candidate) = retry {
            self.current = candidate;
        }
        Ok(State::Editing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::model::PatchOperation;
    use crate::test_utils::{EditorAction, ScriptedConsole, ScriptedEditor};
    use serde_json::json;
    use tempfile::TempDir;

    const ORIGINAL: &[u8] = br#"{"name":"a","key":"k"}"#;
    const EDITED: &[u8] = br#"{"name":"b","key":"k"}"#;
    const BROKEN: &[u8] = br#"{"name":"b","key":"#;

    fn editor_path() -> PathBuf {
        PathBuf::from("/usr/bin/fake-editor")
    }

    fn run(
        dir: &TempDir,
        editor: &mut ScriptedEditor,
        console: &mut ScriptedConsole,
    ) -> (EditSession, Result<EditOutcome>) {
        let mut session = EditSession::new(ORIGINAL).with_scratch_dir(dir.path());
        let outcome = session.run(&editor_path(), editor, console);
        (session, outcome)
    }

    fn assert_no_scratch_left(dir: &TempDir) {
        let left: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert!(left.is_empty(), "scratch files left behind: {:?}", left);
    }

    #[test]
    fn unchanged_document_is_no_change_without_comment_prompt() {
        let dir = TempDir::new().unwrap();
        let mut editor = ScriptedEditor::new([EditorAction::write(
            "{\n  \"key\": \"k\",\n  \"name\": \"a\"\n}\n",
        )]);
        let mut console = ScriptedConsole::new(["should not be read"]);

        let (_, outcome) = run(&dir, &mut editor, &mut console);

        assert_eq!(outcome.unwrap(), EditOutcome::NoChange);
        assert!(console.prompts.is_empty());
        assert_no_scratch_left(&dir);
    }

    #[test]
    fn editor_sees_the_original_document() {
        let dir = TempDir::new().unwrap();
        let mut editor = ScriptedEditor::new([EditorAction::Keep]);
        let mut console = ScriptedConsole::default();

        run(&dir, &mut editor, &mut console).1.unwrap();
        assert_eq!(editor.seeds, vec![ORIGINAL.to_vec()]);
    }

    #[test]
    fn valid_edit_produces_patch_with_comment() {
        let dir = TempDir::new().unwrap();
        let mut editor = ScriptedEditor::new([EditorAction::write(EDITED)]);
        let mut console = ScriptedConsole::new(["fixed typo"]);

        let (session, outcome) = run(&dir, &mut editor, &mut console);

        let EditOutcome::Patched(pc) = outcome.unwrap() else {
            panic!("expected a patch");
        };
        assert_eq!(pc.comment, "fixed typo");
        assert_eq!(
            pc.patch.operations(),
            &[PatchOperation::replace("/name", json!("b"))]
        );
        assert_eq!(console.prompts, vec![COMMENT_PROMPT]);
        assert_eq!(session.attempts(), 1);
        assert_no_scratch_left(&dir);
    }

    #[test]
    fn empty_comment_is_accepted() {
        let dir = TempDir::new().unwrap();
        let mut editor = ScriptedEditor::new([EditorAction::write(EDITED)]);
        let mut console = ScriptedConsole::new([""]);

        let (_, outcome) = run(&dir, &mut editor, &mut console);
        let EditOutcome::Patched(pc) = outcome.unwrap() else {
            panic!("expected a patch");
        };
        assert_eq!(pc.comment, "");
    }

    #[test]
    fn invalid_json_prompts_instead_of_failing() {
        let dir = TempDir::new().unwrap();
        let mut editor = ScriptedEditor::new([EditorAction::write(BROKEN)]);
        let mut console = ScriptedConsole::new(["n"]);

        let (_, outcome) = run(&dir, &mut editor, &mut console);

        assert!(matches!(outcome, Err(FlagshError::Aborted)));
        assert_eq!(
            console.prompts,
            vec!["Unable to parse json. Make changes? [y]/n "]
        );
        assert_eq!(console.notices[0].level, MessageLevel::Warning);
        assert!(console.notices[0].content.starts_with("Invalid JSON document"));
        assert_no_scratch_left(&dir);
    }

    #[test]
    fn any_other_non_empty_answer_aborts() {
        let dir = TempDir::new().unwrap();
        let mut editor = ScriptedEditor::new([EditorAction::write(BROKEN)]);
        let mut console = ScriptedConsole::new(["sure"]);

        let (_, outcome) = run(&dir, &mut editor, &mut console);
        assert!(matches!(outcome, Err(FlagshError::Aborted)));
        assert_eq!(editor.invocations(), 1);
    }

    #[test]
    fn end_of_input_at_retry_prompt_aborts() {
        let dir = TempDir::new().unwrap();
        let mut editor = ScriptedEditor::new([EditorAction::write(BROKEN)]);
        let mut console = ScriptedConsole::default();

        let (_, outcome) = run(&dir, &mut editor, &mut console);
        assert!(matches!(outcome, Err(FlagshError::Aborted)));
    }

    #[test]
    fn retry_reseeds_editor_with_invalid_bytes() {
        let dir = TempDir::new().unwrap();
        let mut editor = ScriptedEditor::new([
            EditorAction::write(BROKEN),
            EditorAction::write(EDITED),
        ]);
        let mut console = ScriptedConsole::new(["", "msg"]);

        let (session, outcome) = run(&dir, &mut editor, &mut console);

        assert!(matches!(outcome.unwrap(), EditOutcome::Patched(_)));
        assert_eq!(editor.seeds, vec![ORIGINAL.to_vec(), BROKEN.to_vec()]);
        assert_eq!(session.current(), BROKEN);
        assert_eq!(session.original(), ORIGINAL);
        assert_eq!(session.attempts(), 2);
    }

    #[test]
    fn uppercase_y_continues() {
        let dir = TempDir::new().unwrap();
        let mut editor = ScriptedEditor::new([
            EditorAction::write(BROKEN),
            EditorAction::write(ORIGINAL),
        ]);
        let mut console = ScriptedConsole::new(["Y"]);

        let (_, outcome) = run(&dir, &mut editor, &mut console);
        assert_eq!(outcome.unwrap(), EditOutcome::NoChange);
    }

    #[test]
    fn retries_converge_to_the_same_patch() {
        let first_try = {
            let dir = TempDir::new().unwrap();
            let mut editor = ScriptedEditor::new([EditorAction::write(EDITED)]);
            let mut console = ScriptedConsole::new(["why"]);
            run(&dir, &mut editor, &mut console).1.unwrap()
        };

        let dir = TempDir::new().unwrap();
        let mut actions: Vec<EditorAction> = (0..5)
            .map(|i| EditorAction::write(format!("{{\"name\": {}", i)))
            .collect();
        actions.push(EditorAction::write(EDITED));
        let mut editor = ScriptedEditor::new(actions);
        let mut console = ScriptedConsole::new(["", "y", "", "", "", "why"]);

        let (session, outcome) = run(&dir, &mut editor, &mut console);

        assert_eq!(outcome.unwrap(), first_try);
        assert_eq!(session.attempts(), 6);
        assert_no_scratch_left(&dir);
    }

    #[test]
    fn unreadable_file_prompts_to_try_again() {
        let dir = TempDir::new().unwrap();
        let mut editor = ScriptedEditor::new([EditorAction::Delete, EditorAction::write(EDITED)]);
        let mut console = ScriptedConsole::new(["", "after a hiccup"]);

        let (_, outcome) = run(&dir, &mut editor, &mut console);

        let EditOutcome::Patched(pc) = outcome.unwrap() else {
            panic!("expected a patch");
        };
        assert_eq!(pc.comment, "after a hiccup");
        assert_eq!(console.prompts[0], "Try again? [y]/n ");
        // Nothing was read back, so the second attempt starts from the last good seed.
        assert_eq!(editor.seeds[1], ORIGINAL.to_vec());
        assert!(console
            .notice_texts()
            .iter()
            .any(|n| n.starts_with("Unable to delete temporary file")));
        assert_no_scratch_left(&dir);
    }

    #[test]
    fn spawn_failure_is_fatal_and_skips_the_prompt() {
        let dir = TempDir::new().unwrap();
        let mut editor = ScriptedEditor::new([EditorAction::FailSpawn]);
        let mut console = ScriptedConsole::new(["y"]);

        let (_, outcome) = run(&dir, &mut editor, &mut console);

        assert!(matches!(outcome, Err(FlagshError::Spawn { .. })));
        assert!(console.prompts.is_empty());
        assert_no_scratch_left(&dir);
    }

    #[test]
    fn wait_failure_is_fatal() {
        let dir = TempDir::new().unwrap();
        let mut editor = ScriptedEditor::new([EditorAction::write(BROKEN), EditorAction::FailWait]);
        let mut console = ScriptedConsole::new([""]);

        let (_, outcome) = run(&dir, &mut editor, &mut console);

        assert!(matches!(outcome, Err(FlagshError::Wait { .. })));
        assert_eq!(console.prompts.len(), 1);
        assert_no_scratch_left(&dir);
    }
}
