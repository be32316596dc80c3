// crates/task_line/src/lib.rs

//! The on-disk shape of a single task: `<id>. <description> - <due date>`.
//!
//! * `leading_id_token` – the digits a line starts with, exactly as written.
//! * `leading_id`       – the same token read as a number.
//! * `format_task_line` – renders a record exactly as it is written to disk.
//! * `parse_task_line`  – a borrowed, structured view of a well-formed line.
//!
//! Id extraction works on raw bytes so files that are not valid UTF-8 can
//! still be scanned.

use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use regex::bytes::Regex as BytesRegex;
use regex::Regex;

// ASCII only: `\d` would also accept other scripts' digits, which `u64` cannot parse.
static LEADING_ID_RE: Lazy<BytesRegex> = Lazy::new(|| BytesRegex::new(r"^[0-9]+").unwrap());

// The description is greedy, so the last " - " separates it from the due date.
static TASK_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)\. (.*) - (.*)$").unwrap());

/// A structured view over one well-formed task line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskLine<'a> {
    pub id: u64,
    pub description: &'a str,
    pub due_date: &'a str,
}

/// Returns the run of ASCII digits at the very start of `line`, untouched,
/// or `None` when the line does not begin with a digit.
///
/// Removal matches on this text, so `02` and `2` are different ids.
pub fn leading_id_token(line: &[u8]) -> Option<&[u8]> {
    LEADING_ID_RE.find(line).map(|m| m.as_bytes())
}

/// Returns the integer at the very start of `line`, or `None` when the line
/// does not begin with a digit.
///
/// # Errors
///
/// Returns an error if the leading digits do not fit in a `u64`.
pub fn leading_id(line: &[u8]) -> Result<Option<u64>> {
    match leading_id_token(line) {
        Some(token) => {
            // The regex only admits ASCII digits.
            let digits = String::from_utf8_lossy(token);
            let id = digits
                .parse::<u64>()
                .with_context(|| format!("Invalid task id '{}'", digits))?;
            Ok(Some(id))
        }
        None => Ok(None),
    }
}

/// Renders a task record without the trailing newline.
pub fn format_task_line(id: u64, description: &str, due_date: &str) -> String {
    format!("{}. {} - {}", id, description, due_date)
}

/// Splits a line into id, description and due date. Lines that are not in
/// the task shape (or whose id overflows) yield `None`.
pub fn parse_task_line(line: &str) -> Option<TaskLine<'_>> {
    let caps = TASK_LINE_RE.captures(line)?;
    let id = caps.get(1)?.as_str().parse::<u64>().ok()?;
    Some(TaskLine {
        id,
        description: caps.get(2)?.as_str(),
        due_date: caps.get(3)?.as_str(),
    })
}

/// Rejects field values that would break the one-record-per-line layout.
pub fn validate_field(name: &str, value: &str) -> Result<()> {
    if value.contains('\n') || value.contains('\r') {
        bail!("The {} must not contain line breaks", name);
    }
    Ok(())
}
