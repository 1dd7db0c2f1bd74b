//! Patch request types.
//!
//! These map one-to-one onto the wire shape the remote service accepts:
//!
//! ```text
//! { "comment": "...", "patch": [ { "op": "replace", "path": "/name", "value": "b" } ] }
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Add,
    Remove,
    Replace,
}

impl fmt::Display for PatchOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PatchOp::Add => "add",
            PatchOp::Remove => "remove",
            PatchOp::Replace => "replace",
        };
        f.write_str(name)
    }
}

/// A single add/remove/replace instruction addressed by a JSON Pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchOperation {
    pub op: PatchOp,
    pub path: String,
    /// Absent for `remove`. An explicit `null` is kept as `Some(Value::Null)`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_value"
    )]
    pub value: Option<Value>,
}

fn present_value<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl PatchOperation {
    pub fn add(path: impl Into<String>, value: Value) -> Self {
        Self {
            op: PatchOp::Add,
            path: path.into(),
            value: Some(value),
        }
    }

    pub fn remove(path: impl Into<String>) -> Self {
        Self {
            op: PatchOp::Remove,
            path: path.into(),
            value: None,
        }
    }

    pub fn replace(path: impl Into<String>, value: Value) -> Self {
        Self {
            op: PatchOp::Replace,
            path: path.into(),
            value: Some(value),
        }
    }
}

/// An ordered, never-empty list of operations.
///
/// Only the diff engine builds one from scratch; an empty diff is
/// [`crate::diff::Diff::NoChange`] instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PatchOperation>", into = "Vec<PatchOperation>")]
pub struct Patch(Vec<PatchOperation>);

impl Patch {
    /// Returns `None` when `ops` is empty.
    pub fn from_ops(ops: Vec<PatchOperation>) -> Option<Self> {
        if ops.is_empty() {
            None
        } else {
            Some(Self(ops))
        }
    }

    pub fn operations(&self) -> &[PatchOperation] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a patch built through [`Patch::from_ops`].
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_operations(self) -> Vec<PatchOperation> {
        self.0
    }
}

impl TryFrom<Vec<PatchOperation>> for Patch {
    type Error = String;

    fn try_from(ops: Vec<PatchOperation>) -> std::result::Result<Self, Self::Error> {
        Patch::from_ops(ops).ok_or_else(|| "patch must contain at least one operation".to_string())
    }
}

impl From<Patch> for Vec<PatchOperation> {
    fn from(patch: Patch) -> Self {
        patch.0
    }
}

/// The request handed to the remote client: the operations plus a
/// free-text justification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchComment {
    pub comment: String,
    pub patch: Patch,
}

impl PatchComment {
    pub fn assemble(patch: Patch, comment: impl Into<String>) -> Self {
        Self {
            comment: comment.into(),
            patch,
        }
    }
}
