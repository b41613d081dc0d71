//! Business-continuity plan documents.

use grcdoc_core::Document;
use serde::Deserialize;

use super::join_list;
use crate::assemble::{CoverPage, DocumentBuilder};
use crate::package::to_docx;
use crate::service::DocumentService;
use crate::Result;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlanMetadata {
    pub name: String,
    pub organization: String,
    pub version: String,
    pub owner: String,
    pub effective_date: String,
    pub last_reviewed: String,
}

/// Narrative plan section, usually AI-drafted markdown
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlanSection {
    pub title: String,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RecoveryObjective {
    pub process: String,
    /// Recovery time objective, e.g. `4 hours`
    pub rto: String,
    /// Recovery point objective
    pub rpo: String,
    pub priority: String,
    pub dependencies: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RecoveryStrategy {
    pub name: String,
    pub description: String,
    pub owner: String,
}

/// A disruption scenario and the planned response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub name: String,
    pub likelihood: String,
    pub impact: String,
    pub response: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Exercise {
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub participants: Vec<String>,
    pub outcome: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BusinessContinuityPlan {
    pub metadata: PlanMetadata,
    pub sections: Vec<PlanSection>,
    pub recovery_objectives: Vec<RecoveryObjective>,
    pub strategies: Vec<RecoveryStrategy>,
    pub scenarios: Vec<Scenario>,
    pub exercises: Vec<Exercise>,
}

impl BusinessContinuityPlan {
    /// Parse a plan from its JSON export
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn title(&self) -> &str {
        match self.metadata.name.trim() {
            "" => "Business Continuity Plan",
            name => name,
        }
    }

    /// Lay the plan out as a document
    pub fn to_document(&self, service: &DocumentService) -> Document {
        let meta = &self.metadata;
        log::debug!(
            "generating continuity plan {:?}: {} sections, {} objectives",
            self.title(),
            self.sections.len(),
            self.recovery_objectives.len()
        );

        let mut cover = CoverPage::new(self.title())
            .subtitle("Business Continuity Plan")
            .detail("Version", meta.version.as_str())
            .detail("Plan Owner", meta.owner.as_str())
            .detail("Effective Date", meta.effective_date.as_str())
            .detail("Last Reviewed", meta.last_reviewed.as_str());
        if !meta.organization.trim().is_empty() {
            cover = cover.organization(meta.organization.as_str());
        }

        let mut builder = DocumentBuilder::new(service, self.title())
            .subject("Business Continuity Plan")
            .cover_page(cover)
            .table_of_contents("Table of Contents");
        if !meta.organization.trim().is_empty() {
            builder = builder.author(meta.organization.as_str());
        }

        for section in &self.sections {
            builder = builder.section(&section.title, section.content.as_deref());
        }

        builder
            .record_table(
                "Recovery Objectives",
                &["Process", "RTO", "RPO", "Priority", "Dependencies"],
                self.recovery_objectives
                    .iter()
                    .map(|o| {
                        vec![
                            o.process.clone(),
                            o.rto.clone(),
                            o.rpo.clone(),
                            o.priority.clone(),
                            join_list(&o.dependencies),
                        ]
                    })
                    .collect(),
            )
            .record_table(
                "Recovery Strategies",
                &["Strategy", "Description", "Owner"],
                self.strategies
                    .iter()
                    .map(|s| vec![s.name.clone(), s.description.clone(), s.owner.clone()])
                    .collect(),
            )
            .record_table(
                "Disruption Scenarios",
                &["Scenario", "Likelihood", "Impact", "Response"],
                self.scenarios
                    .iter()
                    .map(|s| {
                        vec![
                            s.name.clone(),
                            s.likelihood.clone(),
                            s.impact.clone(),
                            s.response.clone(),
                        ]
                    })
                    .collect(),
            )
            .record_table(
                "Exercise History",
                &["Date", "Type", "Participants", "Outcome"],
                self.exercises
                    .iter()
                    .map(|e| {
                        vec![
                            e.date.clone(),
                            e.kind.clone(),
                            join_list(&e.participants),
                            e.outcome.clone(),
                        ]
                    })
                    .collect(),
            )
            .build()
    }

    /// Generate the `.docx` bytes for the plan
    pub fn to_docx(&self, service: &DocumentService) -> Result<Vec<u8>> {
        to_docx(&self.to_document(service), service.theme())
    }
}
