use colored::{ColoredString, Colorize};
use flagsh::api::{CmdMessage, MessageLevel};
use flagsh::config::{FlagshConfig, CONFIG_KEYS};
use flagsh::error::Result;
use flagsh::model::{PatchComment, PatchOp, PatchOperation};
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const OP_WIDTH: usize = 8;
const PATH_WIDTH: usize = 40;

pub(super) fn styled_message(message: &CmdMessage) -> ColoredString {
    match message.level {
        MessageLevel::Info => message.content.dimmed(),
        MessageLevel::Success => message.content.green(),
        MessageLevel::Warning => message.content.yellow(),
        MessageLevel::Error => message.content.red(),
    }
}

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        println!("{}", styled_message(message));
    }
}

/// Messages go to stderr in JSON mode so stdout stays parseable.
pub(super) fn eprint_messages(messages: &[CmdMessage]) {
    for message in messages {
        eprintln!("{}", styled_message(message));
    }
}

pub(super) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(super) fn print_operations(ops: &[PatchOperation]) {
    for op in ops {
        println!("{}", format_operation(op));
    }
}

pub(super) fn print_patch_request(request: &PatchComment) {
    print_operations(request.patch.operations());
    println!();
    let comment = if request.comment.is_empty() {
        "(no comment)".dimmed()
    } else {
        request.comment.normal()
    };
    println!("{} {}", "Comment:".bold(), comment);
}

pub(super) fn print_config(config: &FlagshConfig) {
    for key in CONFIG_KEYS {
        let value = config.get(key).unwrap_or_default();
        let value = if value.is_empty() {
            "(unset)".dimmed()
        } else {
            value.normal()
        };
        println!("{:<8} {}", key, value);
    }
}

fn format_operation(op: &PatchOperation) -> String {
    let name = format!("{:<width$}", op.op.to_string(), width = OP_WIDTH);
    let name = match op.op {
        PatchOp::Add => name.green(),
        PatchOp::Remove => name.red(),
        PatchOp::Replace => name.yellow(),
    };

    let path = if op.path.is_empty() { "/" } else { op.path.as_str() };
    let path = truncate_to_width(path, PATH_WIDTH);
    let padding = PATH_WIDTH.saturating_sub(path.width());

    let value = match &op.value {
        Some(value) => {
            let available = LINE_WIDTH.saturating_sub(OP_WIDTH + PATH_WIDTH + 1);
            truncate_to_width(&value.to_string(), available)
        }
        None => String::new(),
    };

    format!("{}{}{} {}", name, path, " ".repeat(padding), value.dimmed())
        .trim_end()
        .to_string()
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut width = 0;
    let limit = max_width.saturating_sub(1);
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > limit {
            break;
        }
        result.push(c);
        width += w;
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truncates_long_values_with_ellipsis() {
        let out = truncate_to_width("abcdefghij", 5);
        assert_eq!(out, "abcd…");
        assert_eq!(out.width(), 5);
    }

    #[test]
    fn short_values_are_untouched() {
        assert_eq!(truncate_to_width("abc", 5), "abc");
    }

    #[test]
    fn truncation_respects_wide_chars() {
        let out = truncate_to_width("日本語のテキスト", 7);
        assert!(out.width() <= 7);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn operation_line_has_op_path_and_value() {
        colored::control::set_override(false);
        let line = format_operation(&PatchOperation::replace("/name", json!("b")));
        assert!(line.starts_with("replace /name"));
        assert!(line.ends_with("\"b\""));

        let line = format_operation(&PatchOperation::remove("/tags/0"));
        assert_eq!(line, "remove  /tags/0");
    }
}
