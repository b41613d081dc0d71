//! grcdoc-core - Document model and WordprocessingML serialization
//!
//! This crate provides the data structures shared by the grcdoc pipeline:
//! the line-level intermediate nodes produced by the parser, the styled
//! document primitives produced by the renderer, and the assembled
//! [`Document`] container. It also holds the styling [`Theme`] and the
//! serializer that turns a document into WordprocessingML parts.
//!
//! # Architecture
//!
//! ```text
//! markdown-ish text ──classify──▶ ┌──────────┐
//!                                 │   Node   │ ──render──▶ Primitive ──▶ Document
//!                    post-process │   list   │                              │
//!                                 └──────────┘                    serialize ▼
//!                                                               WordprocessingML
//! ```
//!
//! # Example
//!
//! ```rust
//! use grcdoc_core::{Document, Primitive, Run, Section, StyledParagraph, Theme};
//! use grcdoc_core::serialize::document_xml;
//!
//! let mut document = Document::new("Business Continuity Plan");
//! document.sections.push(Section::new(vec![Primitive::Paragraph(
//!     StyledParagraph::from_runs(vec![Run::plain("Hello World")]),
//! )]));
//!
//! let xml = document_xml(&document, &Theme::default());
//! assert!(xml.contains("Hello World"));
//! ```

mod ast;
pub mod serialize;
mod theme;

pub use ast::{
    Alignment, Border, Document, HeadingLevel, Inline, Node, Primitive, Run, Section, Spacing,
    StyledCell, StyledParagraph, StyledRow, StyledTable,
};
pub use theme::{Colors, Fonts, Sizes, StyleNames, Theme};
