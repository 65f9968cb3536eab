//! Shared types for the project work-item filter dashboard
//!
//! Value types for normalized filter domains plus the transport DTOs
//! exchanged with the record source and the analytics endpoint.

use serde::{Deserialize, Serialize};

mod payload;
mod records;

pub use payload::{
    AnalyticsItem, AnalyticsResponse, CompletionStatus, DateRangePayload, RangePayload,
    SubmissionPayload,
};
pub use records::{DivisionLookup, RawRecord, RecordEnvelope, RecordPage};

/// One selectable entry of a categorical filter dimension.
///
/// Identity is `value`; `label` is what the user sees. Divisions are
/// deduplicated by `label` (two identifiers resolving to the same display
/// name collapse into one option), WBS categories by `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryOption {
    pub value: String,
    pub label: String,
}

impl CategoryOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Closed numeric interval, `min <= max` always.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `[other_min, other_max]` lies entirely outside this range.
    pub fn excludes(&self, other_min: f64, other_max: f64) -> bool {
        other_max < self.min || other_min > self.max
    }
}

/// Calendar-date bounds of the data set.
///
/// Either both endpoints are present (with `min <= max`) or both are absent;
/// records without a parseable date contribute nothing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DateBounds {
    pub min: Option<chrono::NaiveDate>,
    pub max: Option<chrono::NaiveDate>,
}

/// Numeric and date domains derived from the raw records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterRanges {
    pub phase: NumericRange,
    pub duration: NumericRange,
    pub dates: DateBounds,
}

/// Categorical option universes derived from the raw records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub divisions: Vec<CategoryOption>,
    pub wbs_categories: Vec<CategoryOption>,
}
