//! WordprocessingML serialization
//!
//! Converts an assembled [`Document`] into the XML parts of a `.docx`
//! package. Packaging the parts into a zip container is left to the caller.

use crate::ast::{
    Alignment, Border, Document, Inline, Primitive, Run, Section, StyledCell, StyledParagraph,
    StyledTable,
};
use crate::theme::Theme;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Letter page, one-inch margins
const PAGE_WIDTH: u32 = 12240;
const PAGE_HEIGHT: u32 = 15840;
const PAGE_MARGIN: u32 = 1440;
const TEXT_WIDTH: u32 = PAGE_WIDTH - 2 * PAGE_MARGIN;

/// Numbering instance used by bullet paragraphs
const BULLET_NUM_ID: u32 = 1;

/// Serialize a document to the `word/document.xml` part
pub fn document_xml(document: &Document, theme: &Theme) -> String {
    // Estimate capacity: markup dominates the text
    let mut out = String::with_capacity(8192);

    out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    out.push('\n');
    out.push_str(&format!(r#"<w:document xmlns:w="{W_NS}" xmlns:r="{R_NS}">"#));
    out.push_str("<w:body>");

    let last = document.sections.len().saturating_sub(1);
    for (i, section) in document.sections.iter().enumerate() {
        serialize_section(section, theme, &mut out);
        if i < last {
            // Section properties on the final paragraph end the section
            out.push_str("<w:p><w:pPr>");
            section_properties(&mut out);
            out.push_str("</w:pPr></w:p>");
        }
    }

    section_properties(&mut out);
    out.push_str("</w:body></w:document>");
    out
}

fn section_properties(out: &mut String) {
    out.push_str(r#"<w:sectPr><w:type w:val="nextPage"/>"#);
    out.push_str(&format!(
        r#"<w:pgSz w:w="{PAGE_WIDTH}" w:h="{PAGE_HEIGHT}"/>"#
    ));
    out.push_str(&format!(
        r#"<w:pgMar w:top="{m}" w:right="{m}" w:bottom="{m}" w:left="{m}" w:header="708" w:footer="708" w:gutter="0"/>"#,
        m = PAGE_MARGIN
    ));
    out.push_str("</w:sectPr>");
}

fn serialize_section(section: &Section, theme: &Theme, out: &mut String) {
    for primitive in &section.content {
        serialize_primitive(primitive, theme, out);
    }
}

fn serialize_primitive(primitive: &Primitive, theme: &Theme, out: &mut String) {
    match primitive {
        Primitive::Paragraph(paragraph) => serialize_paragraph(paragraph, out),

        Primitive::Table(table) => serialize_table(table, theme, out),

        Primitive::TableOfContents { title } => {
            out.push_str(r#"<w:p><w:pPr><w:pStyle w:val="TOCHeading"/></w:pPr>"#);
            serialize_run(&Run::plain(title.as_str()), None, out);
            out.push_str("</w:p>");

            out.push_str("<w:p>");
            out.push_str(r#"<w:r><w:fldChar w:fldCharType="begin" w:dirty="true"/></w:r>"#);
            out.push_str(
                r#"<w:r><w:instrText xml:space="preserve"> TOC \o "1-3" \h \z \u </w:instrText></w:r>"#,
            );
            out.push_str(r#"<w:r><w:fldChar w:fldCharType="separate"/></w:r>"#);
            serialize_run(
                &Run::italic("Update this field to build the table of contents."),
                Some(&theme.colors.muted),
                out,
            );
            out.push_str(r#"<w:r><w:fldChar w:fldCharType="end"/></w:r>"#);
            out.push_str("</w:p>");
        }
    }
}

fn serialize_paragraph(paragraph: &StyledParagraph, out: &mut String) {
    out.push_str("<w:p>");

    let style = match (&paragraph.style, paragraph.heading) {
        (Some(style), _) => Some(style.clone()),
        (None, Some(level)) => Some(format!("Heading{}", level.number())),
        (None, None) => None,
    };

    out.push_str("<w:pPr>");
    if let Some(style) = style {
        out.push_str(&format!(r#"<w:pStyle w:val="{}"/>"#, escape_xml(&style)));
    }
    if let Some(level) = paragraph.bullet {
        out.push_str(&format!(
            r#"<w:numPr><w:ilvl w:val="{level}"/><w:numId w:val="{BULLET_NUM_ID}"/></w:numPr>"#
        ));
    }
    out.push_str(&format!(
        r#"<w:spacing w:before="{}" w:after="{}"/>"#,
        paragraph.spacing.before, paragraph.spacing.after
    ));
    push_alignment(paragraph.alignment, out);
    out.push_str("</w:pPr>");

    serialize_inlines(&paragraph.children, None, out);
    out.push_str("</w:p>");
}

fn serialize_table(table: &StyledTable, theme: &Theme, out: &mut String) {
    let col_count = table.column_count();
    if col_count == 0 {
        return;
    }

    out.push_str("<w:tbl><w:tblPr>");
    out.push_str(r#"<w:tblW w:w="5000" w:type="pct"/>"#);
    out.push_str(r#"<w:tblLayout w:type="fixed"/>"#);
    out.push_str("</w:tblPr>");

    out.push_str("<w:tblGrid>");
    let col_width = TEXT_WIDTH / col_count as u32;
    for _ in 0..col_count {
        out.push_str(&format!(r#"<w:gridCol w:w="{col_width}"/>"#));
    }
    out.push_str("</w:tblGrid>");

    for row in &table.rows {
        out.push_str("<w:tr>");
        if row.header {
            out.push_str("<w:trPr><w:tblHeader/></w:trPr>");
        }
        for cell in &row.cells {
            serialize_cell(cell, theme, out);
        }
        out.push_str("</w:tr>");
    }

    out.push_str("</w:tbl>");
}

fn serialize_cell(cell: &StyledCell, theme: &Theme, out: &mut String) {
    out.push_str("<w:tc><w:tcPr>");
    // Percent widths are expressed in fiftieths of a percent
    let width = (cell.width_pct * 50.0).round() as u32;
    out.push_str(&format!(r#"<w:tcW w:w="{width}" w:type="pct"/>"#));

    if let Some(border) = &cell.border {
        push_cell_borders(border, out);
    }
    if let Some(fill) = &cell.shading {
        out.push_str(&format!(
            r#"<w:shd w:val="clear" w:color="auto" w:fill="{}"/>"#,
            escape_xml(fill)
        ));
    }
    out.push_str("</w:tcPr>");

    // A cell must contain at least one paragraph, even when empty
    out.push_str("<w:p><w:pPr>");
    let style = cell
        .style
        .as_deref()
        .unwrap_or(theme.styles.table_cell.as_str());
    out.push_str(&format!(r#"<w:pStyle w:val="{}"/>"#, escape_xml(style)));
    push_alignment(cell.alignment, out);
    out.push_str("</w:pPr>");
    serialize_inlines(&cell.children, cell.text_color.as_deref(), out);
    out.push_str("</w:p></w:tc>");
}

fn push_cell_borders(border: &Border, out: &mut String) {
    out.push_str("<w:tcBorders>");
    for side in ["top", "left", "bottom", "right"] {
        out.push_str(&format!(
            r#"<w:{side} w:val="single" w:sz="{}" w:space="0" w:color="{}"/>"#,
            border.size,
            escape_xml(&border.color)
        ));
    }
    out.push_str("</w:tcBorders>");
}

fn push_alignment(alignment: Alignment, out: &mut String) {
    let value = match alignment {
        Alignment::Left => return,
        Alignment::Center => "center",
        Alignment::Right => "right",
    };
    out.push_str(&format!(r#"<w:jc w:val="{value}"/>"#));
}

fn serialize_inlines(inlines: &[Inline], color: Option<&str>, out: &mut String) {
    for inline in inlines {
        match inline {
            Inline::Run(run) => serialize_run(run, color, out),
            Inline::Break => out.push_str("<w:r><w:br/></w:r>"),
        }
    }
}

fn serialize_run(run: &Run, color: Option<&str>, out: &mut String) {
    if run.text.is_empty() {
        return;
    }

    out.push_str("<w:r>");
    if run.bold || run.italics || color.is_some() {
        out.push_str("<w:rPr>");
        if run.bold {
            out.push_str("<w:b/><w:bCs/>");
        }
        if run.italics {
            out.push_str("<w:i/><w:iCs/>");
        }
        if let Some(color) = color {
            out.push_str(&format!(r#"<w:color w:val="{}"/>"#, escape_xml(color)));
        }
        out.push_str("</w:rPr>");
    }
    out.push_str(r#"<w:t xml:space="preserve">"#);
    out.push_str(&escape_xml(&run.text));
    out.push_str("</w:t></w:r>");
}

/// Serialize the `word/styles.xml` part for a theme
pub fn styles_xml(theme: &Theme) -> String {
    let mut out = String::with_capacity(4096);
    let colors = &theme.colors;
    let fonts = &theme.fonts;
    let sizes = &theme.sizes;
    let names = &theme.styles;

    out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    out.push('\n');
    out.push_str(&format!(r#"<w:styles xmlns:w="{W_NS}">"#));

    out.push_str("<w:docDefaults><w:rPrDefault><w:rPr>");
    push_fonts(&fonts.body, &mut out);
    out.push_str(&format!(
        r#"<w:color w:val="{}"/><w:sz w:val="{}"/><w:szCs w:val="{}"/>"#,
        escape_xml(&colors.text),
        sizes.body,
        sizes.body
    ));
    out.push_str("</w:rPr></w:rPrDefault>");
    out.push_str(r#"<w:pPrDefault><w:pPr><w:spacing w:after="120" w:line="264" w:lineRule="auto"/></w:pPr></w:pPrDefault>"#);
    out.push_str("</w:docDefaults>");

    out.push_str(r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>"#);

    for level in 1..=3u8 {
        let color = if level == 1 {
            &colors.primary
        } else {
            &colors.secondary
        };
        out.push_str(&format!(
            r#"<w:style w:type="paragraph" w:styleId="Heading{level}"><w:name w:val="heading {level}"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:keepLines/><w:outlineLvl w:val="{}"/></w:pPr><w:rPr>"#,
            level - 1
        ));
        push_fonts(&fonts.heading, &mut out);
        push_run_props(true, false, color, sizes.heading(level), &mut out);
        out.push_str("</w:rPr></w:style>");
    }

    out.push_str(r#"<w:style w:type="paragraph" w:styleId="TOCHeading"><w:name w:val="TOC Heading"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:pPr><w:spacing w:before="240" w:after="240"/></w:pPr><w:rPr>"#);
    push_fonts(&fonts.heading, &mut out);
    push_run_props(true, false, &colors.primary, sizes.heading1, &mut out);
    out.push_str("</w:rPr></w:style>");

    push_paragraph_style(
        &names.table_header,
        "Table Header",
        r#"<w:spacing w:before="40" w:after="40"/><w:jc w:val="center"/>"#,
        (true, false, &colors.table_header_text, sizes.table),
        &mut out,
    );
    push_paragraph_style(
        &names.table_cell,
        "Table Cell",
        r#"<w:spacing w:before="40" w:after="40"/>"#,
        (false, false, &colors.text, sizes.table),
        &mut out,
    );
    push_paragraph_style(
        &names.cover_title,
        "Cover Title",
        r#"<w:spacing w:before="2400" w:after="240"/><w:jc w:val="center"/>"#,
        (true, false, &colors.primary, sizes.cover_title),
        &mut out,
    );
    push_paragraph_style(
        &names.cover_subtitle,
        "Cover Subtitle",
        r#"<w:spacing w:after="480"/><w:jc w:val="center"/>"#,
        (false, false, &colors.secondary, sizes.cover_subtitle),
        &mut out,
    );
    push_paragraph_style(
        &names.muted,
        "Muted",
        "",
        (false, true, &colors.muted, sizes.body),
        &mut out,
    );

    out.push_str("</w:styles>");
    out
}

fn push_paragraph_style(
    id: &str,
    name: &str,
    paragraph_props: &str,
    (bold, italics, color, size): (bool, bool, &String, u32),
    out: &mut String,
) {
    let id = escape_xml(id);
    out.push_str(&format!(
        r#"<w:style w:type="paragraph" w:customStyle="1" w:styleId="{id}"><w:name w:val="{name}"/><w:basedOn w:val="Normal"/><w:qFormat/>"#
    ));
    if !paragraph_props.is_empty() {
        out.push_str("<w:pPr>");
        out.push_str(paragraph_props);
        out.push_str("</w:pPr>");
    }
    out.push_str("<w:rPr>");
    push_run_props(bold, italics, color, size, out);
    out.push_str("</w:rPr></w:style>");
}

fn push_fonts(font: &str, out: &mut String) {
    let font = escape_xml(font);
    out.push_str(&format!(
        r#"<w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:cs="{font}"/>"#
    ));
}

fn push_run_props(bold: bool, italics: bool, color: &str, size: u32, out: &mut String) {
    if bold {
        out.push_str("<w:b/><w:bCs/>");
    }
    if italics {
        out.push_str("<w:i/><w:iCs/>");
    }
    out.push_str(&format!(
        r#"<w:color w:val="{}"/><w:sz w:val="{size}"/><w:szCs w:val="{size}"/>"#,
        escape_xml(color)
    ));
}

/// The `word/numbering.xml` part: one bullet definition with three levels
pub fn numbering_xml() -> String {
    let mut out = String::with_capacity(2048);
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    out.push('\n');
    out.push_str(&format!(r#"<w:numbering xmlns:w="{W_NS}">"#));
    out.push_str(r#"<w:abstractNum w:abstractNumId="0"><w:multiLevelType w:val="hybridMultilevel"/>"#);
    for (level, glyph) in ["\u{2022}", "\u{25E6}", "\u{25AA}"].iter().enumerate() {
        let left = 720 * (level + 1);
        out.push_str(&format!(
            r#"<w:lvl w:ilvl="{level}"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="{glyph}"/><w:lvlJc w:val="left"/><w:pPr><w:ind w:left="{left}" w:hanging="360"/></w:pPr></w:lvl>"#
        ));
    }
    out.push_str("</w:abstractNum>");
    out.push_str(&format!(
        r#"<w:num w:numId="{BULLET_NUM_ID}"><w:abstractNumId w:val="0"/></w:num>"#
    ));
    out.push_str("</w:numbering>");
    out
}

/// The `word/settings.xml` part. Asks the word processor to refresh fields
/// (the table of contents) when the file is opened.
pub fn settings_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:settings xmlns:w="{W_NS}"><w:updateFields w:val="true"/><w:defaultTabStop w:val="720"/></w:settings>"#
    )
}

/// The `docProps/core.xml` part
pub fn core_properties_xml(document: &Document) -> String {
    let mut out = String::with_capacity(1024);
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    out.push('\n');
    out.push_str(r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#);
    out.push_str(&format!("<dc:title>{}</dc:title>", escape_xml(&document.title)));
    if let Some(subject) = &document.subject {
        out.push_str(&format!("<dc:subject>{}</dc:subject>", escape_xml(subject)));
    }
    if let Some(author) = &document.author {
        out.push_str(&format!("<dc:creator>{}</dc:creator>", escape_xml(author)));
    }
    out.push_str("</cp:coreProperties>");
    out
}

/// Escape text for use in XML content and attribute values. Control
/// characters other than tab, newline and carriage return are dropped.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(ch),
            // Not allowed anywhere in an XML 1.0 document
            '\u{0}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}' => {}
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{HeadingLevel, Spacing, StyledRow};

    fn single_section(content: Vec<Primitive>) -> Document {
        let mut document = Document::new("Test");
        document.sections.push(Section::new(content));
        document
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape_xml(r#""q" 'a'"#), "&quot;q&quot; &apos;a&apos;");
        assert_eq!(escape_xml("plain"), "plain");
    }

    #[test]
    fn test_escape_xml_drops_invalid_chars() {
        assert_eq!(
            escape_xml("Page one\u{c}Page two\u{1}\u{fffe}"),
            "Page onePage two"
        );
        assert_eq!(escape_xml("a\tb\nc\rd"), "a\tb\nc\rd");
    }

    #[test]
    fn test_paragraph_runs() {
        let document = single_section(vec![Primitive::Paragraph(StyledParagraph::from_runs(
            vec![Run::bold("Owner"), Run::plain(" & deputy")],
        ))]);
        let xml = document_xml(&document, &Theme::default());
        assert!(xml.contains(r#"<w:r><w:rPr><w:b/><w:bCs/></w:rPr><w:t xml:space="preserve">Owner</w:t></w:r>"#));
        assert!(xml.contains(r#"<w:t xml:space="preserve"> &amp; deputy</w:t>"#));
    }

    #[test]
    fn test_heading_uses_heading_style() {
        let paragraph = StyledParagraph {
            heading: Some(HeadingLevel::H2),
            spacing: Spacing::new(300, 150),
            ..StyledParagraph::from_runs(vec![Run::plain("Scope")])
        };
        let xml = document_xml(&single_section(vec![Primitive::Paragraph(paragraph)]), &Theme::default());
        assert!(xml.contains(r#"<w:pStyle w:val="Heading2"/>"#));
        assert!(xml.contains(r#"<w:spacing w:before="300" w:after="150"/>"#));
    }

    #[test]
    fn test_bullet_numbering_and_break() {
        let paragraph = StyledParagraph {
            bullet: Some(0),
            children: vec![
                Inline::Run(Run::plain("first")),
                Inline::Break,
                Inline::Run(Run::plain("second")),
            ],
            ..Default::default()
        };
        let xml = document_xml(&single_section(vec![Primitive::Paragraph(paragraph)]), &Theme::default());
        assert!(xml.contains(r#"<w:numPr><w:ilvl w:val="0"/><w:numId w:val="1"/></w:numPr>"#));
        assert!(xml.contains("<w:r><w:br/></w:r>"));
    }

    #[test]
    fn test_table_cells() {
        let theme = Theme::default();
        let table = StyledTable {
            rows: vec![StyledRow {
                header: true,
                cells: vec![StyledCell {
                    children: vec![Inline::Run(Run::bold("A"))],
                    shading: Some("1F4E79".to_string()),
                    text_color: Some("FFFFFF".to_string()),
                    alignment: Alignment::Center,
                    border: Some(theme.cell_border()),
                    width_pct: 50.0,
                    style: None,
                }],
            }],
        };
        let xml = document_xml(&single_section(vec![Primitive::Table(table)]), &theme);
        assert!(xml.contains("<w:trPr><w:tblHeader/></w:trPr>"));
        assert!(xml.contains(r#"<w:tcW w:w="2500" w:type="pct"/>"#));
        assert!(xml.contains(r#"w:fill="1F4E79""#));
        assert!(xml.contains(r#"<w:color w:val="FFFFFF"/>"#));
        assert_eq!(xml.matches(r#"w:val="single""#).count(), 4);
    }

    #[test]
    fn test_empty_table_is_skipped() {
        let xml = document_xml(
            &single_section(vec![Primitive::Table(StyledTable::default())]),
            &Theme::default(),
        );
        assert!(!xml.contains("<w:tbl>"));
    }

    #[test]
    fn test_sections_are_separated() {
        let mut document = Document::new("Plan");
        document.sections.push(Section::new(vec![Primitive::Paragraph(
            StyledParagraph::from_runs(vec![Run::plain("Cover")]),
        )]));
        document.sections.push(Section::new(vec![Primitive::TableOfContents {
            title: "Contents".to_string(),
        }]));
        let xml = document_xml(&document, &Theme::default());
        assert_eq!(xml.matches("<w:sectPr>").count(), 2);
        assert!(xml.contains(r#"TOC \o "1-3""#));
    }

    #[test]
    fn test_styles_follow_theme() {
        let mut theme = Theme::default();
        theme.colors.primary = "112233".to_string();
        let xml = styles_xml(&theme);
        assert!(xml.contains(r#"w:styleId="Heading1""#));
        assert!(xml.contains(r#"w:styleId="TableHeader""#));
        assert!(xml.contains(r#"<w:color w:val="112233"/>"#));
    }

    #[test]
    fn test_core_properties() {
        let mut document = Document::new("Risk <Report>");
        document.author = Some("Acme".to_string());
        let xml = core_properties_xml(&document);
        assert!(xml.contains("<dc:title>Risk &lt;Report&gt;</dc:title>"));
        assert!(xml.contains("<dc:creator>Acme</dc:creator>"));
        assert!(!xml.contains("dc:subject"));
    }
}
