//! # Diff Engine
//!
//! Computes the operations that turn one JSON document into another, and
//! applies such operations back onto a document.
//!
//! ## Operation order
//!
//! The output is deterministic for a given pair of documents:
//!
//! - Objects: removed keys first (sorted), then the candidate's keys in sorted
//!   order, recursing into keys both sides share and adding the new ones.
//! - Arrays: equal leading and trailing elements are skipped. What remains
//!   in the middle is compared element by element; surplus original elements
//!   are removed from the highest index down and surplus candidate elements
//!   are added in ascending index order, so the operations stay valid when
//!   applied one after the other. Inserting or deleting a single element is
//!   therefore one operation.
//! - Anything else that differs (type change, scalar change) is a single
//!   `replace` at that path.
//!
//! Paths are JSON Pointers (RFC 6901). The document root is the empty path.

use crate::error::{FlagshError, Result};
use crate::model::{Patch, PatchOp, PatchOperation};
use serde_json::{Map, Value};

/// Result of comparing two documents.
#[derive(Debug, Clone, PartialEq)]
pub enum Diff {
    /// The documents are semantically identical.
    NoChange,
    Changed(Patch),
}

pub fn parse_document(bytes: &[u8]) -> Result<Value> {
    serde_json::from_slice(bytes).map_err(|e| FlagshError::InvalidDocument(e.to_string()))
}

/// Diffs two serialized documents. Fails with `InvalidDocument` if either
/// side does not parse.
pub fn diff(original: &[u8], candidate: &[u8]) -> Result<Diff> {
    let original = parse_document(original)?;
    let candidate = parse_document(candidate)?;
    Ok(diff_values(&original, &candidate))
}

pub fn diff_values(original: &Value, candidate: &Value) -> Diff {
    let mut ops = Vec::new();
    compare("", original, candidate, &mut ops);
    match Patch::from_ops(ops) {
        Some(patch) => Diff::Changed(patch),
        None => Diff::NoChange,
    }
}

fn compare(path: &str, original: &Value, candidate: &Value, ops: &mut Vec<PatchOperation>) {
    if original == candidate {
        return;
    }
    match (original, candidate) {
        (Value::Object(a), Value::Object(b)) => compare_objects(path, a, b, ops),
        (Value::Array(a), Value::Array(b)) => compare_arrays(path, a, b, ops),
        _ => ops.push(PatchOperation::replace(path, candidate.clone())),
    }
}

fn compare_objects(
    path: &str,
    original: &Map<String, Value>,
    candidate: &Map<String, Value>,
    ops: &mut Vec<PatchOperation>,
) {
    let mut removed: Vec<&String> = original
        .keys()
        .filter(|k| !candidate.contains_key(k.as_str()))
        .collect();
    removed.sort();
    for key in removed {
        ops.push(PatchOperation::remove(child_path(path, key)));
    }

    let mut keys: Vec<&String> = candidate.keys().collect();
    keys.sort();
    for key in keys {
        let child = child_path(path, key);
        match original.get(key.as_str()) {
            Some(before) => compare(&child, before, &candidate[key.as_str()], ops),
            None => ops.push(PatchOperation::add(child, candidate[key.as_str()].clone())),
        }
    }
}

fn compare_arrays(
    path: &str,
    original: &[Value],
    candidate: &[Value],
    ops: &mut Vec<PatchOperation>,
) {
    let prefix = original
        .iter()
        .zip(candidate)
        .take_while(|(a, b)| a == b)
        .count();
    let suffix = original[prefix..]
        .iter()
        .rev()
        .zip(candidate[prefix..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();

    let original_mid = &original[prefix..original.len() - suffix];
    let candidate_mid = &candidate[prefix..candidate.len() - suffix];
    let shared = original_mid.len().min(candidate_mid.len());

    for i in 0..shared {
        let index = (prefix + i).to_string();
        compare(&child_path(path, &index), &original_mid[i], &candidate_mid[i], ops);
    }
    for i in (shared..original_mid.len()).rev() {
        ops.push(PatchOperation::remove(child_path(path, &(prefix + i).to_string())));
    }
    for (i, value) in candidate_mid.iter().enumerate().skip(shared) {
        ops.push(PatchOperation::add(
            child_path(path, &(prefix + i).to_string()),
            value.clone(),
        ));
    }
}

fn child_path(parent: &str, token: &str) -> String {
    format!("{}/{}", parent, escape_token(token))
}

pub fn escape_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

pub fn unescape_token(token: &str) -> String {
    token.replace("~1", "/").replace("~0", "~")
}

fn split_pointer(path: &str) -> Result<Vec<String>> {
    if path.is_empty() {
        return Ok(Vec::new());
    }
    let rest = path
        .strip_prefix('/')
        .ok_or_else(|| FlagshError::Patch(format!("invalid pointer '{}'", path)))?;
    Ok(rest.split('/').map(unescape_token).collect())
}

fn parse_index(token: &str, len: usize, allow_end: bool) -> Result<usize> {
    let invalid = || FlagshError::Patch(format!("invalid array index '{}'", token));
    // RFC 6901: digits only, no leading zeros.
    if !token.bytes().all(|b| b.is_ascii_digit()) || (token.len() > 1 && token.starts_with('0'))
    {
        return Err(invalid());
    }
    let index: usize = token.parse().map_err(|_| invalid())?;
    let in_bounds = if allow_end { index <= len } else { index < len };
    if in_bounds {
        Ok(index)
    } else {
        Err(FlagshError::Patch(format!(
            "array index {} out of bounds (len {})",
            index, len
        )))
    }
}

fn resolve_mut<'a>(document: &'a mut Value, tokens: &[String]) -> Result<&'a mut Value> {
    let mut current = document;
    for token in tokens {
        current = match current {
            Value::Object(map) => map
                .get_mut(token.as_str())
                .ok_or_else(|| FlagshError::Patch(format!("no member '{}'", token)))?,
            Value::Array(items) => {
                let index = parse_index(token, items.len(), false)?;
                &mut items[index]
            }
            _ => {
                return Err(FlagshError::Patch(format!(
                    "cannot descend into scalar at '{}'",
                    token
                )))
            }
        };
    }
    Ok(current)
}

/// Applies `ops` to a copy of `document`, in order.
pub fn apply(document: &Value, ops: &[PatchOperation]) -> Result<Value> {
    let mut result = document.clone();
    for op in ops {
        apply_one(&mut result, op)?;
    }
    Ok(result)
}

fn operation_value(op: &PatchOperation) -> Result<Value> {
    op.value
        .clone()
        .ok_or_else(|| FlagshError::Patch(format!("{} at '{}' has no value", op.op, op.path)))
}

fn apply_one(document: &mut Value, op: &PatchOperation) -> Result<()> {
    let tokens = split_pointer(&op.path)?;
    let Some((last, parents)) = tokens.split_last() else {
        return match op.op {
            PatchOp::Add | PatchOp::Replace => {
                *document = operation_value(op)?;
                Ok(())
            }
            PatchOp::Remove => Err(FlagshError::Patch("cannot remove the document root".into())),
        };
    };

    match resolve_mut(document, parents)? {
        Value::Object(map) => match op.op {
            PatchOp::Add => {
                map.insert(last.clone(), operation_value(op)?);
            }
            PatchOp::Replace => {
                let slot = map
                    .get_mut(last.as_str())
                    .ok_or_else(|| FlagshError::Patch(format!("no member '{}'", last)))?;
                *slot = operation_value(op)?;
            }
            PatchOp::Remove => {
                map.shift_remove(last.as_str())
                    .ok_or_else(|| FlagshError::Patch(format!("no member '{}'", last)))?;
            }
        },
        Value::Array(items) => match op.op {
            PatchOp::Add => {
                let value = operation_value(op)?;
                if last == "-" {
                    items.push(value);
                } else {
                    let index = parse_index(last, items.len(), true)?;
                    items.insert(index, value);
                }
            }
            PatchOp::Replace => {
                let index = parse_index(last, items.len(), false)?;
                items[index] = operation_value(op)?;
            }
            PatchOp::Remove => {
                let index = parse_index(last, items.len(), false)?;
                items.remove(index);
            }
        },
        _ => {
            return Err(FlagshError::Patch(format!(
                "'{}' does not address a container",
                op.path
            )))
        }
    }
    Ok(())
}
