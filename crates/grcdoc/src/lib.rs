//! # grcdoc
//!
//! Turn freeform, often AI-generated, markdown-ish text into structured
//! Word documents.
//!
//! ## Design
//!
//! Input text goes through three stages:
//!
//! - **Classification**: lines become [`Node`]s (headers, paragraphs,
//!   bullets, table blocks), after repairing headers and bullets that were
//!   glued onto the previous line.
//! - **Post-processing**: short colon-terminated bullets are promoted to bold
//!   label paragraphs, see [`LabelPolicy`].
//! - **Rendering**: nodes become styled [`Primitive`]s, with `**bold**` and
//!   `*italic*` spans split into runs.
//!
//! None of these stages can fail. Malformed input degrades into plain
//! paragraphs. Errors only exist at the edges: loading a theme or records,
//! and writing the `.docx` package.
//!
//! ## Example
//!
//! ```rust
//! use grcdoc::{DocumentService, Node};
//!
//! let service = DocumentService::new();
//! let nodes = service.parse("## Scope\n* **Owner:**\n* Review logs weekly");
//!
//! assert_eq!(nodes[0], Node::header(2, "Scope"));
//! assert_eq!(nodes[1], Node::bold_paragraph("Owner:"));
//! assert_eq!(nodes[2], Node::bullet("Review logs weekly"));
//! ```
//!
//! ## Example (document)
//!
//! ```rust
//! use grcdoc::{package, DocumentBuilder, DocumentService};
//!
//! let service = DocumentService::new();
//! let document = DocumentBuilder::new(&service, "Incident Response Plan")
//!     .section("Purpose", Some("Restore **critical** services."))
//!     .build();
//!
//! let bytes = package::to_docx(&document, service.theme()).unwrap();
//! assert!(!bytes.is_empty());
//! ```

pub mod assemble;
mod classify;
pub mod config;
pub mod inline;
pub mod package;
mod postprocess;
mod render;
pub mod reports;
mod rules;
mod service;
mod utilities;

pub use assemble::{CoverPage, DocumentBuilder};
pub use classify::classify;
pub use grcdoc_core::{
    Alignment, Document, HeadingLevel, Inline, Node, Primitive, Run, Section, StyledCell,
    StyledParagraph, StyledRow, StyledTable, Theme,
};
pub use postprocess::{post_process, LabelPolicy};
pub use render::render;
pub use rules::{Filter, ReplacementFn, Rule, Rules};
pub use service::{DocumentOptions, DocumentService};
pub use utilities::*;

/// Error type for grcdoc operations
#[derive(Debug, thiserror::Error)]
pub enum DocError {
    #[error("Invalid rule pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Invalid theme: {0}")]
    Theme(#[from] toml::de::Error),

    #[error("Invalid theme color {name}: expected six hex digits, got {value:?}")]
    InvalidColor { name: String, value: String },

    #[error("Invalid record data: {0}")]
    Record(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing the `.docx` container failed
    #[error("Document generation failed: {0}")]
    Package(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, DocError>;
