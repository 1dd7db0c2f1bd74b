use crate::commands::{operations_label, CmdMessage, CmdResult};
use crate::diff::{diff, Diff};
use crate::error::Result;

pub fn run(original: &[u8], candidate: &[u8]) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match diff(original, candidate)? {
        Diff::NoChange => result.add_message(CmdMessage::info("No changes.")),
        Diff::Changed(patch) => {
            result.add_message(CmdMessage::info(operations_label(patch.len())));
            result = result.with_operations(patch.into_operations());
        }
    }
    Ok(result)
}
