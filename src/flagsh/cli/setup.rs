use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "flagsh", bin_name = "flagsh", version = get_version())]
#[command(
    about = "Edit feature-flag resources as JSON and turn the edits into patches",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print results as JSON (overrides the `json` config value)
    #[arg(long, global = true)]
    pub json: bool,

    /// Editor to use for this invocation (overrides the `editor` config value)
    #[arg(long, global = true, value_name = "NAME")]
    pub editor: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Edit a JSON snapshot in your editor and produce a patch request
    #[command(alias = "e")]
    Edit {
        /// JSON document to edit
        file: PathBuf,

        /// Write the patch request to this file instead of printing it
        #[arg(short, long, value_name = "PATH")]
        out: Option<PathBuf>,
    },

    /// Show the patch that turns one JSON document into another
    Diff {
        original: PathBuf,
        candidate: PathBuf,
    },

    /// Apply a patch request (or a bare list of operations) to a document
    Apply {
        document: PathBuf,
        patch: PathBuf,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (editor, json)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
