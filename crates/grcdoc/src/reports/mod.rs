//! Report generators.
//!
//! Each report takes structured records (deserialized from the JSON the
//! application exports) and lays them out as a [`Document`]: narrative text
//! goes through the parsing pipeline, records become fixed-layout tables.
//!
//! [`Document`]: grcdoc_core::Document

pub mod bcp;
pub mod risk;

pub use bcp::BusinessContinuityPlan;
pub use risk::{RiskEntry, RiskRating, RiskReport};

/// Join list values for a single table cell
fn join_list(values: &[String]) -> String {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
