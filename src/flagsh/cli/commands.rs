//! # CLI Layer
//!
//! This module stands in for the hosting shell. It is the only place that:
//! - Parses arguments
//! - Reads input files and writes output files
//! - Prints to stdout/stderr
//!
//! Remote resources are represented by JSON snapshot files: `edit` reads the
//! snapshot instead of fetching it, and prints (or writes) the patch request
//! instead of sending it.
//!
//! Output mode is resolved once from `--json` and the `json` config value and
//! passed to each handler; nothing else consults it.

use super::print::{
    eprint_messages, print_config, print_json, print_messages, print_operations,
    print_patch_request,
};
use super::setup::{Cli, Commands};
use super::terminal::TerminalConsole;
use clap::Parser;
use flagsh::api::{CmdMessage, CmdResult, ConfigAction, FlagshApi};
use flagsh::config::FlagshConfig;
use flagsh::editor::TerminalRunner;
use flagsh::error::{FlagshError, Result};
use flagsh::init::initialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Text,
    Json,
}

struct AppContext {
    api: FlagshApi<TerminalRunner, TerminalConsole>,
    config: FlagshConfig,
    output: OutputMode,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let ctx = initialize(TerminalConsole::new())?;

    let output = if cli.json || ctx.config.json {
        OutputMode::Json
    } else {
        OutputMode::Text
    };
    let mut app = AppContext {
        api: ctx.api,
        config: ctx.config,
        output,
    };

    match cli.command {
        Commands::Edit { file, out } => handle_edit(&mut app, &file, out.as_deref(), cli.editor),
        Commands::Diff {
            original,
            candidate,
        } => handle_diff(&app, &original, &candidate),
        Commands::Apply { document, patch } => handle_apply(&app, &document, &patch),
        Commands::Config { key, value } => handle_config(&app, key, value),
    }
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| {
        FlagshError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })
}

fn emit_messages(app: &AppContext, result: &CmdResult) {
    match app.output {
        OutputMode::Text => print_messages(&result.messages),
        OutputMode::Json => eprint_messages(&result.messages),
    }
}

fn handle_edit(
    app: &mut AppContext,
    file: &Path,
    out: Option<&Path>,
    editor: Option<String>,
) -> Result<()> {
    let original = read_input(file)?;
    let editor = match editor {
        Some(editor) => editor,
        None => app.config.editor_name()?,
    };

    let mut result = app.api.edit_document(&original, &editor)?;

    let Some(request) = result.patch.take() else {
        emit_messages(app, &result);
        return Ok(());
    };

    if let Some(out) = out {
        fs::write(out, serde_json::to_string_pretty(&request)?)?;
        result.add_message(CmdMessage::success(format!(
            "Patch request written to {}",
            out.display()
        )));
        emit_messages(app, &result);
        return Ok(());
    }

    match app.output {
        OutputMode::Json => {
            eprint_messages(&result.messages);
            print_json(&request)
        }
        OutputMode::Text => {
            print_messages(&result.messages);
            print_patch_request(&request);
            Ok(())
        }
    }
}

fn handle_diff(app: &AppContext, original: &Path, candidate: &Path) -> Result<()> {
    let original = read_input(original)?;
    let candidate = read_input(candidate)?;
    let result = app.api.diff_documents(&original, &candidate)?;

    match app.output {
        OutputMode::Json => print_json(&result.operations),
        OutputMode::Text => {
            print_messages(&result.messages);
            print_operations(&result.operations);
            Ok(())
        }
    }
}

fn handle_apply(app: &AppContext, document: &Path, patch: &Path) -> Result<()> {
    let document = read_input(document)?;
    let patch = read_input(patch)?;
    let result = app.api.apply_patch(&document, &patch)?;

    if let Some(doc) = &result.document {
        print_json(doc)?;
    }
    eprint_messages(&result.messages);
    Ok(())
}

fn handle_config(app: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = app.api.config(action)?;
    print_messages(&result.messages);

    if show_all {
        if let Some(config) = &result.config {
            match app.output {
                OutputMode::Json => print_json(config)?,
                OutputMode::Text => print_config(config),
            }
        }
    }
    Ok(())
}
