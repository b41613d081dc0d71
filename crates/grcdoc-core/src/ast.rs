//! Document model
//!
//! Two layers live here. [`Node`] is the line-level classification of
//! markdown-ish input, before any styling is applied. [`Primitive`] and its
//! parts are the styled, backend-agnostic output of the renderer, grouped
//! into [`Section`]s of a [`Document`].

use serde::Serialize;

/// A line-level classification of parsed input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// Markdown-style heading, level 1-6
    Header { level: u8, content: String },

    /// Plain text line; `bold` is set on labels promoted from bullets
    Paragraph { content: String, bold: bool },

    /// List item with its marker stripped
    Bullet { content: String },

    /// Rectangular grid of cell text
    TableBlock { rows: Vec<Vec<String>> },
}

impl Node {
    pub fn header(level: u8, content: impl Into<String>) -> Self {
        Node::Header {
            level,
            content: content.into(),
        }
    }

    pub fn paragraph(content: impl Into<String>) -> Self {
        Node::Paragraph {
            content: content.into(),
            bold: false,
        }
    }

    pub fn bold_paragraph(content: impl Into<String>) -> Self {
        Node::Paragraph {
            content: content.into(),
            bold: true,
        }
    }

    pub fn bullet(content: impl Into<String>) -> Self {
        Node::Bullet {
            content: content.into(),
        }
    }

    /// Number of columns of a table block, zero for any other node
    pub fn column_count(&self) -> usize {
        match self {
            Node::TableBlock { rows } => rows.iter().map(Vec::len).max().unwrap_or(0),
            _ => 0,
        }
    }
}

/// The smallest unit of formatted text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub italics: bool,
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
            italics: false,
        }
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italics: true,
        }
    }
}

/// Paragraph-level content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Run(Run),

    /// Manual line break within the same paragraph
    Break,
}

impl Inline {
    pub fn as_run(&self) -> Option<&Run> {
        match self {
            Inline::Run(run) => Some(run),
            Inline::Break => None,
        }
    }
}

/// Displayed heading tier. Source levels 3-6 share the third tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    pub fn from_level(level: u8) -> Self {
        match level {
            0 | 1 => HeadingLevel::H1,
            2 => HeadingLevel::H2,
            _ => HeadingLevel::H3,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Paragraph spacing in twentieths of a point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Spacing {
    pub before: u32,
    pub after: u32,
}

impl Spacing {
    pub const fn new(before: u32, after: u32) -> Self {
        Self { before, after }
    }
}

/// A paragraph of styled inlines
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyledParagraph {
    pub children: Vec<Inline>,
    pub heading: Option<HeadingLevel>,
    /// Bullet nesting level, `None` for non-list paragraphs
    pub bullet: Option<u8>,
    /// Named paragraph style from the theme
    pub style: Option<String>,
    pub alignment: Alignment,
    pub spacing: Spacing,
}

impl StyledParagraph {
    pub fn from_runs(runs: Vec<Run>) -> Self {
        Self {
            children: runs.into_iter().map(Inline::Run).collect(),
            ..Default::default()
        }
    }

    /// An empty paragraph used for vertical spacing
    pub fn spacer(after: u32) -> Self {
        Self {
            spacing: Spacing::new(0, after),
            ..Default::default()
        }
    }

    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.children.iter().filter_map(Inline::as_run)
    }

    /// Concatenated run text, with breaks as newlines
    pub fn text(&self) -> String {
        let mut text = String::new();
        for child in &self.children {
            match child {
                Inline::Run(run) => text.push_str(&run.text),
                Inline::Break => text.push('\n'),
            }
        }
        text
    }
}

/// Cell border applied to all four sides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Border {
    /// Width in eighths of a point
    pub size: u8,
    /// Hex colour without the leading `#`
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyledCell {
    pub children: Vec<Inline>,
    /// Background fill, hex without `#`
    pub shading: Option<String>,
    /// Text colour override, hex without `#`
    pub text_color: Option<String>,
    pub alignment: Alignment,
    pub border: Option<Border>,
    /// Share of the table width in percent
    pub width_pct: f32,
    pub style: Option<String>,
}

impl StyledCell {
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(Inline::as_run)
            .map(|run| run.text.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyledRow {
    pub cells: Vec<StyledCell>,
    /// Repeated as the header row on each page
    pub header: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyledTable {
    pub rows: Vec<StyledRow>,
}

impl StyledTable {
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }
}

/// A backend-agnostic document building block
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Paragraph(StyledParagraph),
    Table(StyledTable),
    /// Placeholder for a table-of-contents field, filled by the word processor
    TableOfContents { title: String },
}

impl Primitive {
    pub fn as_paragraph(&self) -> Option<&StyledParagraph> {
        match self {
            Primitive::Paragraph(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&StyledTable> {
        match self {
            Primitive::Table(t) => Some(t),
            _ => None,
        }
    }
}

/// A run of primitives that starts on a new page
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Section {
    pub content: Vec<Primitive>,
}

impl Section {
    pub fn new(content: Vec<Primitive>) -> Self {
        Self { content }
    }
}

/// An assembled document ready for serialization
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub title: String,
    pub subject: Option<String>,
    pub author: Option<String>,
    pub sections: Vec<Section>,
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// All primitives in order, across sections
    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> {
        self.sections.iter().flat_map(|s| s.content.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level_clamps_to_three_tiers() {
        assert_eq!(HeadingLevel::from_level(1), HeadingLevel::H1);
        assert_eq!(HeadingLevel::from_level(2), HeadingLevel::H2);
        assert_eq!(HeadingLevel::from_level(3), HeadingLevel::H3);
        assert_eq!(HeadingLevel::from_level(6), HeadingLevel::H3);
    }

    #[test]
    fn test_paragraph_text_joins_breaks() {
        let paragraph = StyledParagraph {
            children: vec![
                Inline::Run(Run::plain("one")),
                Inline::Break,
                Inline::Run(Run::bold("two")),
            ],
            ..Default::default()
        };
        assert_eq!(paragraph.text(), "one\ntwo");
        assert_eq!(paragraph.runs().count(), 2);
    }

    #[test]
    fn test_column_count() {
        let node = Node::TableBlock {
            rows: vec![vec!["a".into(), "b".into()], vec!["c".into(), "d".into()]],
        };
        assert_eq!(node.column_count(), 2);
        assert_eq!(Node::paragraph("x").column_count(), 0);
    }
}
