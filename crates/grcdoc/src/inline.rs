//! Inline bold/italic tokenization.
//!
//! Generated text often opens a bold span with `**` and closes it with a
//! single `*`. Both `**text**` and `**text*` are treated as bold.

use grcdoc_core::Run;
use once_cell::sync::Lazy;
use regex::Regex;

/// `**text**`, or the mismatched `**text*`. The first alternative wins.
static BOLD_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*[^*]+\*\*|\*\*[^*]+\*").unwrap());

static ITALIC_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*[^*]+\*").unwrap());

/// Split text into styled runs.
///
/// With `force_bold` every run is bold, italic runs included. Unpaired `*`
/// and `**` are kept as literal text.
pub fn tokenize(text: &str, force_bold: bool) -> Vec<Run> {
    let mut runs = Vec::new();

    for (segment, is_bold) in split_keeping_matches(&BOLD_SPAN, text) {
        if is_bold && segment.len() > 3 {
            runs.push(Run::bold(strip_bold_markers(segment)));
            continue;
        }

        for (part, is_italic) in split_keeping_matches(&ITALIC_SPAN, segment) {
            if is_italic && part.len() > 2 {
                runs.push(Run {
                    text: part[1..part.len() - 1].to_string(),
                    bold: force_bold,
                    italics: true,
                });
            } else {
                runs.push(Run {
                    text: part.to_string(),
                    bold: force_bold,
                    italics: false,
                });
            }
        }
    }

    runs
}

/// Text with every recognised marker removed
pub fn plain_text(text: &str) -> String {
    tokenize(text, false).into_iter().map(|run| run.text).collect()
}

/// Split `text` around the matches of `re`, flagging which pieces matched.
/// Empty pieces are dropped.
fn split_keeping_matches<'t>(re: &Regex, text: &'t str) -> Vec<(&'t str, bool)> {
    let mut pieces = Vec::new();
    let mut last = 0;

    for m in re.find_iter(text) {
        if m.start() > last {
            pieces.push((&text[last..m.start()], false));
        }
        pieces.push((m.as_str(), true));
        last = m.end();
    }
    if last < text.len() {
        pieces.push((&text[last..], false));
    }

    pieces
}

fn strip_bold_markers(segment: &str) -> String {
    let inner = segment.strip_prefix("**").unwrap_or(segment);
    inner
        .strip_suffix("**")
        .or_else(|| inner.strip_suffix('*'))
        .unwrap_or(inner)
        .to_string()
}
