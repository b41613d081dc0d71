//! Rendering of nodes into styled document primitives.

use grcdoc_core::{
    Alignment, HeadingLevel, Inline, Node, Primitive, Spacing, StyledCell, StyledParagraph,
    StyledRow, StyledTable, Theme,
};

use crate::inline::tokenize;

/// Space after the spacer paragraph that follows every table
const TABLE_SPACER_AFTER: u32 = 200;

/// Render nodes in order. Each node yields one primitive, except tables,
/// which are followed by a spacer paragraph.
pub fn render(nodes: &[Node], theme: &Theme) -> Vec<Primitive> {
    let mut primitives = Vec::with_capacity(nodes.len());

    for node in nodes {
        match node {
            Node::Header { level, content } => {
                primitives.push(Primitive::Paragraph(heading(*level, content)));
            }

            Node::TableBlock { rows } => {
                if let Some(table) = table(rows, theme) {
                    primitives.push(Primitive::Table(table));
                    primitives.push(Primitive::Paragraph(StyledParagraph::spacer(
                        TABLE_SPACER_AFTER,
                    )));
                }
            }

            Node::Bullet { content } => {
                primitives.push(Primitive::Paragraph(bullet(content)));
            }

            Node::Paragraph { content, bold } => {
                primitives.push(Primitive::Paragraph(paragraph(content, *bold)));
            }
        }
    }

    primitives
}

/// Before/after spacing for a heading tier
pub(crate) fn heading_spacing(level: HeadingLevel) -> Spacing {
    match level {
        HeadingLevel::H1 => Spacing::new(400, 200),
        HeadingLevel::H2 => Spacing::new(300, 150),
        HeadingLevel::H3 => Spacing::new(240, 120),
    }
}

pub(crate) fn heading(level: u8, content: &str) -> StyledParagraph {
    let level = HeadingLevel::from_level(level);
    StyledParagraph {
        heading: Some(level),
        spacing: heading_spacing(level),
        ..StyledParagraph::from_runs(tokenize(content, false))
    }
}

fn paragraph(content: &str, bold: bool) -> StyledParagraph {
    StyledParagraph {
        spacing: Spacing::new(0, 120),
        ..StyledParagraph::from_runs(tokenize(content, bold))
    }
}

fn bullet(content: &str) -> StyledParagraph {
    let mut children = Vec::new();
    for (i, line) in content.split('\n').enumerate() {
        if i > 0 {
            children.push(Inline::Break);
        }
        children.extend(tokenize(line, false).into_iter().map(Inline::Run));
    }

    StyledParagraph {
        children,
        bullet: Some(0),
        spacing: Spacing::new(0, 60),
        ..Default::default()
    }
}

/// Build a styled table: header row first, zebra striping on even data rows
pub(crate) fn table(rows: &[Vec<String>], theme: &Theme) -> Option<StyledTable> {
    let col_count = rows.iter().map(Vec::len).max().unwrap_or(0);
    if col_count == 0 {
        return None;
    }

    let width_pct = 100.0 / col_count as f32;
    let border = theme.cell_border();

    let rows = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let header = i == 0;
            let cells = row
                .iter()
                .map(|text| {
                    if header {
                        StyledCell {
                            children: runs(text, true),
                            shading: Some(theme.colors.table_header_fill.clone()),
                            text_color: Some(theme.colors.table_header_text.clone()),
                            alignment: Alignment::Center,
                            border: Some(border.clone()),
                            width_pct,
                            style: Some(theme.styles.table_header.clone()),
                        }
                    } else {
                        StyledCell {
                            children: runs(text, false),
                            shading: (i % 2 == 0).then(|| theme.colors.table_stripe_fill.clone()),
                            text_color: None,
                            alignment: Alignment::Left,
                            border: Some(border.clone()),
                            width_pct,
                            style: Some(theme.styles.table_cell.clone()),
                        }
                    }
                })
                .collect();
            StyledRow { cells, header }
        })
        .collect();

    Some(StyledTable { rows })
}

fn runs(text: &str, force_bold: bool) -> Vec<Inline> {
    tokenize(text, force_bold)
        .into_iter()
        .map(Inline::Run)
        .collect()
}
