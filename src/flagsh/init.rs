use crate::api::FlagshApi;
use crate::config::FlagshConfig;
use crate::editor::TerminalRunner;
use crate::error::{FlagshError, Result};
use crate::prompt::Console;
use directories::ProjectDirs;
use std::env;
use std::path::PathBuf;

/// Overrides the config directory, mostly for tests and scripted use.
pub const HOME_ENV: &str = "FLAGSH_HOME";

pub struct FlagshContext<C: Console> {
    pub api: FlagshApi<TerminalRunner, C>,
    pub config: FlagshConfig,
}

/// `$FLAGSH_HOME` if set, else the platform config directory.
pub fn config_dir() -> Result<PathBuf> {
    if let Some(home) = env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "flagsh", "flagsh")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| FlagshError::Config("Could not determine config dir".to_string()))
}

pub fn initialize<C: Console>(console: C) -> Result<FlagshContext<C>> {
    let dir = config_dir()?;
    let config = FlagshConfig::load(&dir)?;
    let api = FlagshApi::new(TerminalRunner, console, dir);
    Ok(FlagshContext { api, config })
}
