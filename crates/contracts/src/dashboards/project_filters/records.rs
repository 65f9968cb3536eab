use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Raw work-item record as delivered by the record source: field name →
/// scalar value. Values are heterogeneous (numbers, numeric strings, dates
/// as text), so they stay as JSON until normalization.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// Division identifier → display name, built from the lookup table.
pub type DivisionLookup = HashMap<String, String>;

/// One record of a record-source list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordEnvelope {
    pub id: String,
    #[serde(default)]
    pub fields: RawRecord,
}

/// One page of a record-source list response. `offset` is present while
/// more pages remain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordPage {
    pub records: Vec<RecordEnvelope>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<String>,
}
