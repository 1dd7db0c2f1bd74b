use crate::commands::{operations_label, CmdMessage, CmdResult};
use crate::diff::parse_document;
use crate::editor::{resolve_editor, ProcessRunner};
use crate::error::Result;
use crate::prompt::Console;
use crate::session::{EditOutcome, EditSession};
use std::path::Path;

/// Edits `original` with the editor named `editor` and returns the resulting
/// patch request, if any.
///
/// The editor is resolved and the original checked before any scratch file
/// exists, so neither failure leaves anything behind.
pub fn run<R, C>(
    original: &[u8],
    editor: &str,
    runner: &mut R,
    console: &mut C,
    scratch_dir: Option<&Path>,
) -> Result<CmdResult>
where
    R: ProcessRunner + ?Sized,
    C: Console + ?Sized,
{
    let program = resolve_editor(editor)?;
    parse_document(original)?;

    let mut session = EditSession::new(original);
    if let Some(dir) = scratch_dir {
        session = session.with_scratch_dir(dir);
    }

    let mut result = CmdResult::default();
    match session.run(&program, runner, console)? {
        EditOutcome::NoChange => {
            result.add_message(CmdMessage::info("No changes made."));
        }
        EditOutcome::Patched(patch) => {
            result.add_message(CmdMessage::success(format!(
                "Patch ready: {}",
                operations_label(patch.patch.len())
            )));
            result = result.with_patch(patch);
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::error::FlagshError;
    use crate::test_utils::{EditorAction, ScriptedConsole, ScriptedEditor};
    use tempfile::TempDir;

    const ORIGINAL: &[u8] = br#"{"name":"a","key":"k"}"#;

    /// Puts an executable file in `dir` so editor resolution succeeds.
    #[cfg(unix)]
    fn installed_editor(dir: &Path) -> String {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("fake-editor");
        std::fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn missing_editor_fails_before_any_scratch_file() {
        let scratch = TempDir::new().unwrap();
        let mut editor = ScriptedEditor::default();
        let mut console = ScriptedConsole::default();

        let err = run(
            ORIGINAL,
            "flagsh-no-such-editor-4ae1",
            &mut editor,
            &mut console,
            Some(scratch.path()),
        )
        .unwrap_err();

        assert!(matches!(err, FlagshError::EditorNotFound(_)));
        assert_eq!(editor.invocations(), 0);
        assert_eq!(std::fs::read_dir(scratch.path()).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn patched_edit_returns_patch_request() {
        let bin = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        let program = installed_editor(bin.path());
        let mut editor =
            ScriptedEditor::new([EditorAction::write(r#"{"name":"b","key":"k","tags":["x"]}"#)]);
        let mut console = ScriptedConsole::new(["rename"]);

        let result = run(
            ORIGINAL,
            &program,
            &mut editor,
            &mut console,
            Some(scratch.path()),
        )
        .unwrap();

        let patch = result.patch.expect("patch");
        assert_eq!(patch.comment, "rename");
        assert_eq!(patch.patch.len(), 2);
        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert_eq!(result.messages[0].content, "Patch ready: 2 operations");
        assert_eq!(std::fs::read_dir(scratch.path()).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn untouched_document_reports_no_changes() {
        let bin = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        let program = installed_editor(bin.path());
        let mut editor = ScriptedEditor::new([EditorAction::Keep]);
        let mut console = ScriptedConsole::default();

        let result = run(
            ORIGINAL,
            &program,
            &mut editor,
            &mut console,
            Some(scratch.path()),
        )
        .unwrap();

        assert!(result.patch.is_none());
        assert_eq!(result.messages[0].content, "No changes made.");
    }

    #[cfg(unix)]
    #[test]
    fn invalid_original_fails_before_launching_editor() {
        let bin = TempDir::new().unwrap();
        let program = installed_editor(bin.path());
        let mut editor = ScriptedEditor::default();
        let mut console = ScriptedConsole::default();

        let err = run(b"{oops", &program, &mut editor, &mut console, None).unwrap_err();

        assert!(matches!(err, FlagshError::InvalidDocument(_)));
        assert_eq!(editor.invocations(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn abort_surfaces_as_error() {
        let bin = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        let program = installed_editor(bin.path());
        let mut editor = ScriptedEditor::new([EditorAction::write("{")]);
        let mut console = ScriptedConsole::new(["n"]);

        let err = run(
            ORIGINAL,
            &program,
            &mut editor,
            &mut console,
            Some(scratch.path()),
        )
        .unwrap_err();

        assert!(matches!(err, FlagshError::Aborted));
        assert_eq!(std::fs::read_dir(scratch.path()).unwrap().count(), 0);
    }
}
