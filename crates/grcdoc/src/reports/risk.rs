//! Risk assessment reports.

use std::fmt;

use grcdoc_core::Document;
use serde::Deserialize;

use crate::assemble::{CoverPage, DocumentBuilder};
use crate::package::to_docx;
use crate::service::DocumentService;
use crate::Result;

/// Rating band for a risk score on the 5x5 likelihood/impact grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskRating {
    Critical,
    High,
    Medium,
    Low,
}

impl RiskRating {
    pub const ALL: [RiskRating; 4] = [
        RiskRating::Critical,
        RiskRating::High,
        RiskRating::Medium,
        RiskRating::Low,
    ];

    pub fn from_score(score: u32) -> Self {
        match score {
            20.. => RiskRating::Critical,
            12..=19 => RiskRating::High,
            6..=11 => RiskRating::Medium,
            _ => RiskRating::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskRating::Critical => "Critical",
            RiskRating::High => "High",
            RiskRating::Medium => "Medium",
            RiskRating::Low => "Low",
        }
    }
}

impl fmt::Display for RiskRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RiskEntry {
    pub id: String,
    pub title: String,
    pub category: String,
    pub likelihood: u32,
    pub impact: u32,
    /// Explicit score. When absent, likelihood times impact.
    pub score: Option<u32>,
    pub owner: String,
    /// Treatment plan, markdown
    pub treatment: Option<String>,
    pub status: String,
}

impl RiskEntry {
    pub fn score(&self) -> u32 {
        self.score
            .unwrap_or_else(|| self.likelihood.saturating_mul(self.impact))
    }

    pub fn rating(&self) -> RiskRating {
        RiskRating::from_score(self.score())
    }

    fn label(&self) -> String {
        match (self.id.trim(), self.title.trim()) {
            ("", title) => title.to_string(),
            (id, "") => id.to_string(),
            (id, title) => format!("{id}: {title}"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RiskReport {
    pub title: String,
    pub organization: String,
    pub prepared_by: String,
    pub date: String,
    /// Executive summary, markdown
    pub summary: Option<String>,
    pub risks: Vec<RiskEntry>,
}

impl RiskReport {
    /// Parse a report from its JSON export
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn title(&self) -> &str {
        match self.title.trim() {
            "" => "Risk Assessment Report",
            title => title,
        }
    }

    /// Risks ordered by descending score. Equal scores keep input order.
    pub fn ranked(&self) -> Vec<&RiskEntry> {
        let mut risks: Vec<&RiskEntry> = self.risks.iter().collect();
        risks.sort_by(|a, b| b.score().cmp(&a.score()));
        risks
    }

    /// Number of risks per rating band, every band listed
    pub fn band_counts(&self) -> Vec<(RiskRating, usize)> {
        RiskRating::ALL
            .iter()
            .map(|&band| {
                let count = self.risks.iter().filter(|r| r.rating() == band).count();
                (band, count)
            })
            .collect()
    }

    /// Lay the report out as a document
    pub fn to_document(&self, service: &DocumentService) -> Document {
        let ranked = self.ranked();
        log::debug!(
            "generating risk report {:?} with {} risks",
            self.title(),
            ranked.len()
        );

        let mut cover = CoverPage::new(self.title())
            .subtitle("Risk Assessment Report")
            .detail("Prepared By", self.prepared_by.as_str())
            .detail("Date", self.date.as_str());
        if !self.organization.trim().is_empty() {
            cover = cover.organization(self.organization.as_str());
        }

        let mut builder = DocumentBuilder::new(service, self.title())
            .subject("Risk Assessment Report")
            .cover_page(cover)
            .table_of_contents("Table of Contents")
            .section("Executive Summary", self.summary.as_deref());
        if !self.organization.trim().is_empty() {
            builder = builder.author(self.organization.as_str());
        }

        let summary_rows = if self.risks.is_empty() {
            Vec::new()
        } else {
            self.band_counts()
                .into_iter()
                .map(|(band, count)| vec![band.to_string(), count.to_string()])
                .collect()
        };

        let register_rows = ranked
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.title.clone(),
                    r.category.clone(),
                    r.likelihood.to_string(),
                    r.impact.to_string(),
                    r.score().to_string(),
                    r.rating().to_string(),
                    r.owner.clone(),
                    r.status.clone(),
                ]
            })
            .collect();

        builder = builder
            .record_table("Risk Summary", &["Rating", "Count"], summary_rows)
            .record_table(
                "Risk Register",
                &[
                    "ID",
                    "Risk",
                    "Category",
                    "Likelihood",
                    "Impact",
                    "Score",
                    "Rating",
                    "Owner",
                    "Status",
                ],
                register_rows,
            );

        let treated: Vec<&&RiskEntry> = ranked
            .iter()
            .filter(|r| r.treatment.as_deref().is_some_and(|t| !t.trim().is_empty()))
            .collect();
        if !treated.is_empty() {
            builder = builder.new_section().heading(1, "Treatment Plans");
            for risk in treated {
                builder = builder
                    .heading(2, &risk.label())
                    .text(risk.treatment.as_deref());
            }
        }

        builder.build()
    }

    /// Generate the `.docx` bytes for the report
    pub fn to_docx(&self, service: &DocumentService) -> Result<Vec<u8>> {
        to_docx(&self.to_document(service), service.theme())
    }
}
