//! Lexical line classification.
//!
//! Turns raw text into a flat list of [`Node`]s. Pipe-table lines are
//! buffered until the first non-table line (or the end of input) and then
//! flushed as a single normalized [`Node::TableBlock`]. Every other line goes
//! through the ordered [`Rules`] chain.

use grcdoc_core::Node;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::rules::Rules;
use crate::utilities::{
    is_separator_row, is_table_line, normalize_line_endings, pad_rows, split_cells,
    strip_table_bullet,
};

/// A heading marker glued to the end of the previous line, as in
/// `Some text### Heading`. A run of 7+ hashes never matches.
static STUCK_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"([^\s#])(#{1,6}[ \t])").unwrap());

/// Classifier state between lines
enum State {
    Scanning,
    BufferingTable(Vec<String>),
}

/// Classify text into nodes.
///
/// `repair` enables the stuck-marker fixes for headers and bullets that
/// were generated without the newline in front of them.
pub fn classify(text: &str, rules: &Rules, repair: bool) -> Vec<Node> {
    let mut text = normalize_line_endings(text);
    if repair {
        text = repair_stuck_markers(&text);
    }

    let mut nodes = Vec::new();
    let mut state = State::Scanning;

    for line in text.split('\n').map(str::trim) {
        if is_table_line(line) {
            let row = strip_table_bullet(line).to_string();
            state = match state {
                State::Scanning => State::BufferingTable(vec![row]),
                State::BufferingTable(mut rows) => {
                    rows.push(row);
                    State::BufferingTable(rows)
                }
            };
            continue;
        }

        if let State::BufferingTable(rows) = std::mem::replace(&mut state, State::Scanning) {
            nodes.extend(flush_table(rows));
        }

        if let Some(node) = rules.classify_line(line) {
            nodes.push(node);
        }
    }

    if let State::BufferingTable(rows) = state {
        nodes.extend(flush_table(rows));
    }

    nodes
}

/// Normalize buffered table lines into a rectangular table block
fn flush_table(lines: Vec<String>) -> Option<Node> {
    let mut rows: Vec<Vec<String>> = lines
        .iter()
        .filter(|line| !is_separator_row(line))
        .map(|line| split_cells(line))
        .filter(|row| !row.is_empty())
        .collect();

    if rows.is_empty() {
        log::debug!("dropped table buffer without data rows");
        return None;
    }

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    if rows.iter().any(|row| row.len() != width) {
        log::warn!("padding ragged table rows to {width} columns");
    }
    pad_rows(&mut rows);

    let node = Node::TableBlock { rows };
    log::debug!("flushed table block: {} columns", node.column_count());
    Some(node)
}

/// Put headers and bullets that were glued onto the previous line back on
/// their own line.
pub(crate) fn repair_stuck_markers(text: &str) -> String {
    let text = STUCK_HEADER.replace_all(text, "${1}\n${2}");

    let mut out = String::with_capacity(text.len() + 16);
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        repair_stuck_bullets(line, &mut out);
    }
    out
}

/// Split a line before every `* ` (including `* **`) that directly follows a
/// non-whitespace character. A `* ` closing an `*italic*` span is left
/// alone.
fn repair_stuck_bullets(line: &str, out: &mut String) {
    let bytes = line.as_bytes();
    let indent = line.len() - line.trim_start().len();

    let mut segment_start = 0;
    // The line's own bullet marker does not open an italic span
    let mut i = if line[indent..].starts_with("* ") {
        indent + 2
    } else {
        0
    };

    while i < bytes.len() {
        if bytes[i] != b'*' {
            i += 1;
            continue;
        }

        if bytes.get(i + 1) == Some(&b'*') {
            // bold delimiter
            i += 2;
            continue;
        }

        if bytes.get(i + 1) == Some(&b' ') && i > segment_start {
            let prev = bytes[i - 1];
            if !prev.is_ascii_whitespace() && prev != b'*' {
                log::trace!("split stuck bullet at byte {i}");
                out.push_str(&line[segment_start..i]);
                out.push('\n');
                segment_start = i;
                i += 2;
                continue;
            }
        }

        i = match italic_closer(bytes, i) {
            Some(closer) => closer + 1,
            None => i + 1,
        };
    }

    out.push_str(&line[segment_start..]);
}

/// Position of the `*` closing an italic span opened at `open`, if the `*`
/// there opens one at all.
///
/// An opener starts a word: it follows whitespace or punctuation (or the
/// start of the line) and is followed by a non-space. The closer is the next
/// `*` and must follow a non-space. A stray `*` inside a word, as in `5*3`,
/// opens nothing.
fn italic_closer(bytes: &[u8], open: usize) -> Option<usize> {
    let starts_word = open == 0 || {
        let prev = bytes[open - 1];
        prev.is_ascii_whitespace() || prev.is_ascii_punctuation()
    };
    let next = *bytes.get(open + 1)?;
    if !starts_word || next.is_ascii_whitespace() {
        return None;
    }

    let close = open + 1 + bytes[open + 1..].iter().position(|&b| b == b'*')?;
    (!bytes[close - 1].is_ascii_whitespace()).then_some(close)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Vec<Node> {
        classify(text, &Rules::new(), true)
    }

    fn table(rows: &[&[&str]]) -> Node {
        Node::TableBlock {
            rows: rows
                .iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n  \n").is_empty());
    }

    #[test]
    fn test_plain_paragraph() {
        assert_eq!(
            parse("Backups run nightly."),
            vec![Node::paragraph("Backups run nightly.")]
        );
    }

    #[test]
    fn test_line_endings() {
        assert_eq!(
            parse("one\r\ntwo\rthree"),
            vec![
                Node::paragraph("one"),
                Node::paragraph("two"),
                Node::paragraph("three"),
            ]
        );
    }

    #[test]
    fn test_header_levels() {
        assert_eq!(parse("# One"), vec![Node::header(1, "One")]);
        assert_eq!(parse("###### Six"), vec![Node::header(6, "Six")]);
        assert_eq!(
            parse("####### Seven"),
            vec![Node::paragraph("####### Seven")]
        );
    }

    #[test]
    fn test_bullets_and_lone_markers() {
        assert_eq!(
            parse("* one\n-\n- two\n*\n3. three"),
            vec![
                Node::bullet("one"),
                Node::bullet("two"),
                Node::bullet("three"),
            ]
        );
    }

    #[test]
    fn test_table_separator_stripped() {
        assert_eq!(
            parse("| A | B |\n|---|---|\n| 1 | 2 |"),
            vec![table(&[&["A", "B"], &["1", "2"]])]
        );
    }

    #[test]
    fn test_table_rows_padded() {
        assert_eq!(
            parse("| A | B | C |\n| 1 |"),
            vec![table(&[&["A", "B", "C"], &["1", "", ""]])]
        );
    }

    #[test]
    fn test_table_flushed_on_non_table_line() {
        assert_eq!(
            parse("Intro\n| A |\n| 1 |\nAfter"),
            vec![
                Node::paragraph("Intro"),
                table(&[&["A"], &["1"]]),
                Node::paragraph("After"),
            ]
        );
    }

    #[test]
    fn test_blank_line_splits_tables() {
        let nodes = parse("| A |\n\n| B |");
        assert_eq!(nodes, vec![table(&[&["A"]]), table(&[&["B"]])]);
    }

    #[test]
    fn test_bulleted_table_rows() {
        assert_eq!(
            parse("* | Asset | Owner |\n* |---|---|\n* | CRM | Sales |"),
            vec![table(&[&["Asset", "Owner"], &["CRM", "Sales"]])]
        );
    }

    #[test]
    fn test_separator_only_table_emits_nothing() {
        assert!(parse("|---|---|").is_empty());
    }

    #[test]
    fn test_stuck_header_repair() {
        assert_eq!(
            parse("Some text### Heading"),
            vec![Node::paragraph("Some text"), Node::header(3, "Heading")]
        );
    }

    #[test]
    fn test_stuck_bold_bullet_repair() {
        assert_eq!(
            parse("Roles are assigned.* **Owner:** IT lead"),
            vec![
                Node::paragraph("Roles are assigned."),
                Node::bullet("**Owner:** IT lead"),
            ]
        );
    }

    #[test]
    fn test_stuck_plain_bullet_repair() {
        assert_eq!(
            parse("Steps:* Notify* Contain"),
            vec![
                Node::paragraph("Steps:"),
                Node::bullet("Notify"),
                Node::bullet("Contain"),
            ]
        );
    }

    #[test]
    fn test_italic_and_bold_closers_are_not_split() {
        assert_eq!(
            parse("An *important* step and **bold** text"),
            vec![Node::paragraph("An *important* step and **bold** text")]
        );
        assert_eq!(
            parse("* *Optional* review"),
            vec![Node::bullet("*Optional* review")]
        );
    }

    #[test]
    fn test_stray_asterisk_does_not_block_split() {
        assert_eq!(
            parse("Costs rose 5*3 percent.* Next item"),
            vec![
                Node::paragraph("Costs rose 5*3 percent."),
                Node::bullet("Next item"),
            ]
        );
    }

    #[test]
    fn test_italic_span_then_stuck_bullet() {
        assert_eq!(
            parse("Run the *quarterly* test.* Report results"),
            vec![
                Node::paragraph("Run the *quarterly* test."),
                Node::bullet("Report results"),
            ]
        );
    }

    #[test]
    fn test_multibyte_before_stuck_bullet() {
        assert_eq!(
            parse("Schritt ä* Nächster"),
            vec![Node::paragraph("Schritt ä"), Node::bullet("Nächster")]
        );
    }

    #[test]
    fn test_long_hash_run_is_not_split() {
        assert_eq!(
            parse("text####### x"),
            vec![Node::paragraph("text####### x")]
        );
    }

    #[test]
    fn test_colon_and_blank_separator_rows() {
        assert_eq!(
            parse("| A | B |\n| : | : |\n| 1 | 2 |"),
            vec![table(&[&["A", "B"], &["1", "2"]])]
        );
        assert_eq!(
            parse("| A | B |\n|   |   |\n| 1 | 2 |"),
            vec![table(&[&["A", "B"], &["1", "2"]])]
        );
    }

    #[test]
    fn test_bare_pipe_emits_no_table() {
        assert!(parse("|").is_empty());
        assert_eq!(
            parse("Intro\n|\nAfter"),
            vec![Node::paragraph("Intro"), Node::paragraph("After")]
        );
    }

    #[test]
    fn test_repair_can_be_disabled() {
        assert_eq!(
            classify("Some text### Heading", &Rules::new(), false),
            vec![Node::paragraph("Some text### Heading")]
        );
    }
}
