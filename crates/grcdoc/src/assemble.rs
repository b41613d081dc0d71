//! Document assembly.
//!
//! [`DocumentBuilder`] wraps rendered primitives into a [`Document`]: cover
//! page, table of contents, narrative sections and fixed-layout record
//! tables. Each section starts on a new page.

use grcdoc_core::{Alignment, Document, Primitive, Run, Section, Spacing, StyledParagraph};

use crate::render::{heading, table};
use crate::service::DocumentService;

const NO_CONTENT: &str = "No content provided.";
const NO_RECORDS: &str = "No records.";

/// Cover page contents
#[derive(Debug, Clone, Default)]
pub struct CoverPage {
    pub title: String,
    pub subtitle: Option<String>,
    pub organization: Option<String>,
    /// Label/value lines such as `("Version", "2.1")`
    pub details: Vec<(String, String)>,
}

impl CoverPage {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    /// Add a detail line. Blank values are skipped.
    pub fn detail(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.trim().is_empty() {
            self.details.push((label.into(), value));
        }
        self
    }
}

/// Builds a [`Document`] section by section
pub struct DocumentBuilder<'a> {
    service: &'a DocumentService,
    document: Document,
    current: Vec<Primitive>,
}

impl<'a> DocumentBuilder<'a> {
    pub fn new(service: &'a DocumentService, title: impl Into<String>) -> Self {
        Self {
            service,
            document: Document::new(title),
            current: Vec::new(),
        }
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.document.subject = Some(subject.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.document.author = Some(author.into());
        self
    }

    /// Start a new section. Does nothing if the current one is empty.
    pub fn new_section(mut self) -> Self {
        if !self.current.is_empty() {
            let content = std::mem::take(&mut self.current);
            self.document.sections.push(Section::new(content));
        }
        self
    }

    /// Add a cover page as its own section
    pub fn cover_page(self, cover: CoverPage) -> Self {
        let styles = &self.service.theme().styles;
        let mut content = vec![Primitive::Paragraph(StyledParagraph {
            style: Some(styles.cover_title.clone()),
            alignment: Alignment::Center,
            ..StyledParagraph::from_runs(vec![Run::plain(cover.title)])
        })];

        if let Some(subtitle) = cover.subtitle {
            content.push(Primitive::Paragraph(StyledParagraph {
                style: Some(styles.cover_subtitle.clone()),
                alignment: Alignment::Center,
                ..StyledParagraph::from_runs(vec![Run::plain(subtitle)])
            }));
        }

        if let Some(organization) = cover.organization {
            content.push(Primitive::Paragraph(StyledParagraph {
                alignment: Alignment::Center,
                spacing: Spacing::new(240, 480),
                ..StyledParagraph::from_runs(vec![Run::bold(organization)])
            }));
        }

        for (label, value) in cover.details {
            content.push(Primitive::Paragraph(StyledParagraph {
                alignment: Alignment::Center,
                spacing: Spacing::new(0, 60),
                ..StyledParagraph::from_runs(vec![
                    Run::bold(format!("{label}: ")),
                    Run::plain(value),
                ])
            }));
        }

        let mut builder = self.new_section();
        builder.current = content;
        builder.new_section()
    }

    /// Add a table-of-contents placeholder as its own section
    pub fn table_of_contents(self, title: impl Into<String>) -> Self {
        let mut builder = self.new_section();
        builder.current.push(Primitive::TableOfContents {
            title: title.into(),
        });
        builder.new_section()
    }

    /// Append a heading to the current section
    pub fn heading(mut self, level: u8, text: &str) -> Self {
        self.current.push(Primitive::Paragraph(heading(level, text)));
        self
    }

    /// Append converted text to the current section. Missing or blank text
    /// yields a placeholder line.
    pub fn text(mut self, text: Option<&str>) -> Self {
        let primitives = self.service.convert(text);
        if primitives.is_empty() {
            let placeholder = self.muted(NO_CONTENT);
            self.current.push(placeholder);
        } else {
            self.current.extend(primitives);
        }
        self
    }

    /// Append a table with a header row to the current section. Without
    /// rows, a placeholder line is added instead.
    pub fn table(mut self, headers: &[&str], rows: Vec<Vec<String>>) -> Self {
        if rows.is_empty() {
            let placeholder = self.muted(NO_RECORDS);
            self.current.push(placeholder);
            return self;
        }

        let mut grid = Vec::with_capacity(rows.len() + 1);
        grid.push(headers.iter().map(|h| h.to_string()).collect::<Vec<_>>());
        grid.extend(rows);
        crate::utilities::pad_rows(&mut grid);

        if let Some(styled) = table(&grid, self.service.theme()) {
            self.current.push(Primitive::Table(styled));
            self.current
                .push(Primitive::Paragraph(StyledParagraph::spacer(200)));
        }
        self
    }

    /// Add a new section with a title and converted text
    pub fn section(self, title: &str, text: Option<&str>) -> Self {
        self.new_section().heading(1, title).text(text)
    }

    /// Add a new section with a title and a record table
    pub fn record_table(self, title: &str, headers: &[&str], rows: Vec<Vec<String>>) -> Self {
        self.new_section().heading(1, title).table(headers, rows)
    }

    /// Finish the document
    pub fn build(self) -> Document {
        let builder = self.new_section();
        log::debug!(
            "assembled document {:?} with {} sections",
            builder.document.title,
            builder.document.sections.len()
        );
        builder.document
    }

    fn muted(&self, text: &str) -> Primitive {
        Primitive::Paragraph(StyledParagraph {
            style: Some(self.service.theme().styles.muted.clone()),
            ..StyledParagraph::from_runs(vec![Run::italic(text)])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grcdoc_core::HeadingLevel;

    #[test]
    fn test_cover_and_toc_get_own_sections() {
        let service = DocumentService::new();
        let document = DocumentBuilder::new(&service, "Plan")
            .cover_page(
                CoverPage::new("Business Continuity Plan")
                    .subtitle("Acme Corp")
                    .detail("Version", "2.0")
                    .detail("Owner", " "),
            )
            .table_of_contents("Contents")
            .section("Purpose", Some("Keep the lights on."))
            .build();

        assert_eq!(document.sections.len(), 3);
        let cover = &document.sections[0].content;
        assert_eq!(cover.len(), 3);
        assert_eq!(
            cover[0].as_paragraph().unwrap().style.as_deref(),
            Some("CoverTitle")
        );
        assert_eq!(cover[2].as_paragraph().unwrap().text(), "Version: 2.0");
        assert!(matches!(
            document.sections[1].content[0],
            Primitive::TableOfContents { .. }
        ));
    }

    #[test]
    fn test_section_heading_and_text() {
        let service = DocumentService::new();
        let document = DocumentBuilder::new(&service, "Plan")
            .section("Scope", Some("## Systems\n* CRM"))
            .build();

        let content = &document.sections[0].content;
        let headings: Vec<_> = content
            .iter()
            .filter_map(Primitive::as_paragraph)
            .filter_map(|p| p.heading)
            .collect();
        assert_eq!(headings, vec![HeadingLevel::H1, HeadingLevel::H2]);
        assert_eq!(content.len(), 3);
    }

    #[test]
    fn test_missing_text_placeholder() {
        let service = DocumentService::new();
        let document = DocumentBuilder::new(&service, "Plan")
            .section("Scope", None)
            .section("Roles", Some("   "))
            .build();

        assert_eq!(document.sections.len(), 2);
        for section in &document.sections {
            assert_eq!(section.content[1].as_paragraph().unwrap().text(), NO_CONTENT);
        }
    }

    #[test]
    fn test_record_table() {
        let service = DocumentService::new();
        let document = DocumentBuilder::new(&service, "Plan")
            .record_table(
                "Recovery Objectives",
                &["Process", "RTO", "RPO"],
                vec![vec!["Payroll".to_string(), "24h".to_string()]],
            )
            .record_table("Exercises", &["Date"], Vec::new())
            .build();

        let table = document.sections[0].content[1].as_table().unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].cells[0].text(), "Process");
        assert_eq!(table.rows[1].cells.len(), 3);
        assert_eq!(table.rows[1].cells[2].text(), "");

        let empty = document.sections[1].content[1].as_paragraph().unwrap();
        assert_eq!(empty.text(), NO_RECORDS);
    }

    #[test]
    fn test_empty_builder_has_no_sections() {
        let service = DocumentService::new();
        let document = DocumentBuilder::new(&service, "Empty")
            .new_section()
            .build();
        assert!(document.sections.is_empty());
        assert_eq!(document.title, "Empty");
    }
}
