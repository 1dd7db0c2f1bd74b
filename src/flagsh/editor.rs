use crate::error::{FlagshError, Result};
use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Runs an external program on a file and blocks until it exits.
///
/// The edit workflow only talks to editors through this trait, so tests can
/// swap in a fake editor that rewrites the file instead of launching anything.
pub trait ProcessRunner {
    fn run_to_completion(&mut self, program: &Path, file: &Path) -> Result<()>;
}

/// Launches the program attached to the current terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalRunner;

impl ProcessRunner for TerminalRunner {
    fn run_to_completion(&mut self, program: &Path, file: &Path) -> Result<()> {
        let mut child = Command::new(program)
            .arg(file)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| FlagshError::Spawn {
                program: program.to_path_buf(),
                source,
            })?;

        // The exit status is deliberately ignored: whatever is in the file
        // gets validated either way.
        child.wait().map_err(|source| FlagshError::Wait {
            program: program.to_path_buf(),
            source,
        })?;
        Ok(())
    }
}

/// Looks `name` up on PATH, like `command -v` does.
pub fn resolve_editor(name: &str) -> Result<PathBuf> {
    let name = name.trim();
    if name.is_empty() {
        return Err(FlagshError::EditorNotFound(String::new()));
    }
    which::which(name).map_err(|_| FlagshError::EditorNotFound(name.to_string()))
}

/// Editors tried, in order, when neither $EDITOR nor $VISUAL is set.
const FALLBACK_EDITORS: [&str; 3] = ["vim", "vi", "nano"];

/// Picks an editor when none is configured.
/// Checks $EDITOR, then $VISUAL, then falls back to common editors.
pub fn default_editor() -> Result<String> {
    pick_editor(|var| env::var(var).ok(), |name| which::which(name).is_ok())
}

fn pick_editor<E, P>(env_var: E, on_path: P) -> Result<String>
where
    E: Fn(&str) -> Option<String>,
    P: Fn(&str) -> bool,
{
    for var in ["EDITOR", "VISUAL"] {
        if let Some(editor) = env_var(var) {
            if !editor.trim().is_empty() {
                return Ok(editor.trim().to_string());
            }
        }
    }

    FALLBACK_EDITORS
        .into_iter()
        .find(|name| on_path(name))
        .map(str::to_string)
        .ok_or_else(|| FlagshError::EditorNotFound(FALLBACK_EDITORS.join("/")))
}
