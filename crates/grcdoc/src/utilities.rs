//! Utility functions for line and table handling.

use once_cell::sync::Lazy;
use regex::Regex;

/// A table line: optional bullet marker, then a leading pipe
static TABLE_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:[*-]\s*)?\|").unwrap());

/// Bullet marker glued in front of a table line
static TABLE_BULLET_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[*-]\s*").unwrap());

/// Normalize `\r\n` and lone `\r` line endings to `\n`
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Check if a trimmed line belongs to a pipe table
pub fn is_table_line(line: &str) -> bool {
    TABLE_LINE.is_match(line)
}

/// Strip the bullet marker some generators put in front of table rows
pub fn strip_table_bullet(line: &str) -> &str {
    match TABLE_BULLET_PREFIX.find(line) {
        Some(m) if line[m.end()..].starts_with('|') => &line[m.end()..],
        _ => line,
    }
}

/// Check if a table line is a markdown alignment row such as `|---|:--:|`.
/// Rows made only of pipes, colons and whitespace count too.
pub fn is_separator_row(line: &str) -> bool {
    line.chars()
        .all(|c| matches!(c, '|' | '-' | ':') || c.is_whitespace())
}

/// Split a table line into trimmed cells.
///
/// The empty cell produced by a leading or trailing pipe is dropped, so
/// `| a | b |` yields `["a", "b"]`.
pub fn split_cells(line: &str) -> Vec<String> {
    let line = line.trim();
    let mut cells: Vec<String> = line.split('|').map(|c| c.trim().to_string()).collect();

    if line.ends_with('|') && cells.len() > 1 {
        cells.pop();
    }
    if line.starts_with('|') && !cells.is_empty() {
        cells.remove(0);
    }

    cells
}

/// Right-pad every row with empty cells to the widest row's length.
/// Padding an already rectangular grid changes nothing.
pub fn pad_rows(rows: &mut [Vec<String>]) {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    for row in rows.iter_mut() {
        row.resize(width, String::new());
    }
}

/// Remove every `*` character
pub fn strip_asterisks(text: &str) -> String {
    text.chars().filter(|&c| c != '*').collect()
}
