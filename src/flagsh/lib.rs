//! # flagsh
//!
//! flagsh is the core of an interactive shell for administering feature-flag
//! resources. Fetching, listing and deleting resources is plain REST glue;
//! the part that lives here is the **edit-diff-patch workflow**: hand a JSON
//! snapshot of a resource to the user's editor, turn their edits into a
//! minimal JSON patch, and keep them editing until the result parses or they
//! give up.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints results, reads the terminal     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, returns CmdResult             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - edit, diff, apply, config                                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Workflow (session.rs) over diff.rs, workspace.rs,          │
//! │  editor.rs and prompt.rs                                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing below the CLI writes to stdout or stderr. The two places the
//! workflow has to reach outside the process, launching the editor and asking
//! the user a question, go through the [`editor::ProcessRunner`] and
//! [`prompt::Console`] traits so the whole loop can be tested with scripted
//! fakes.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: One module per command
//! - [`session`]: The edit/validate/retry state machine
//! - [`diff`]: JSON diff and patch application
//! - [`workspace`]: Scratch files for the editor round trip
//! - [`editor`]: Editor lookup and launching
//! - [`prompt`]: Console abstraction and yes/no handling
//! - [`model`]: Patch request types
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod diff;
pub mod editor;
pub mod error;
pub mod init;
pub mod model;
pub mod prompt;
pub mod session;
pub mod workspace;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
