use crate::commands::{operations_label, CmdMessage, CmdResult};
use crate::diff::{apply, parse_document};
use crate::error::{FlagshError, Result};
use crate::model::{PatchComment, PatchOperation};
use serde::Deserialize;

/// A patch file holds either a full patch request or a bare operation list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PatchInput {
    Request(PatchComment),
    Operations(Vec<PatchOperation>),
}

impl PatchInput {
    fn into_operations(self) -> Vec<PatchOperation> {
        match self {
            PatchInput::Request(request) => request.patch.into_operations(),
            PatchInput::Operations(ops) => ops,
        }
    }
}

pub fn run(document: &[u8], patch: &[u8]) -> Result<CmdResult> {
    let document = parse_document(document)?;
    let input: PatchInput = serde_json::from_slice(patch).map_err(|e| {
        FlagshError::Patch(format!(
            "expected a patch request or a list of operations: {}",
            e
        ))
    })?;
    let ops = input.into_operations();

    let patched = apply(&document, &ops)?;

    let mut result = CmdResult::default().with_document(patched);
    result.add_message(CmdMessage::success(format!(
        "Applied {}",
        operations_label(ops.len())
    )));
    Ok(result)
}
