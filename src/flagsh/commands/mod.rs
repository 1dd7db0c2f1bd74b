use crate::config::FlagshConfig;
use crate::model::{PatchComment, PatchOperation};
use serde_json::Value;

pub mod apply;
pub mod config;
pub mod diff;
pub mod edit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Set by `edit` when the user produced a change.
    pub patch: Option<PatchComment>,
    /// Set by `diff`.
    pub operations: Vec<PatchOperation>,
    /// Set by `apply`.
    pub document: Option<Value>,
    pub config: Option<FlagshConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_patch(mut self, patch: PatchComment) -> Self {
        self.patch = Some(patch);
        self
    }

    pub fn with_operations(mut self, operations: Vec<PatchOperation>) -> Self {
        self.operations = operations;
        self
    }

    pub fn with_document(mut self, document: Value) -> Self {
        self.document = Some(document);
        self
    }

    pub fn with_config(mut self, config: FlagshConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Pluralizes "operation" for user messages.
pub(crate) fn operations_label(count: usize) -> String {
    if count == 1 {
        "1 operation".to_string()
    } else {
        format!("{} operations", count)
    }
}
