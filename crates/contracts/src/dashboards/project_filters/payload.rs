use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::CategoryOption;

/// Flattened filter selection sent to the analytics endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub phase: RangePayload,
    pub divisions: Vec<CategoryOption>,
    #[serde(rename = "wbsCategory")]
    pub wbs_category: Vec<CategoryOption>,
    pub duration: RangePayload,
    #[serde(rename = "completionStatus")]
    pub completion_status: CompletionStatus,
    #[serde(rename = "dateRange")]
    pub date_range: DateRangePayload,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangePayload {
    pub min: f64,
    pub max: f64,
}

/// Completion flags are independent: both may be set or both cleared.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompletionStatus {
    pub completed: bool,
    pub incompleted: bool,
}

/// Selected date endpoints, verbatim. No ordering is guaranteed between
/// the two and either may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateRangePayload {
    #[serde(rename = "startDate")]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "endDate")]
    pub end_date: Option<NaiveDate>,
}

/// Analytics endpoint response. The per-item sections (document references,
/// AI insight texts) are opaque to the dashboard; it only distinguishes
/// "succeeded with items" from "succeeded empty".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsResponse {
    pub items: Vec<AnalyticsItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsItem {
    #[serde(default)]
    pub item_data: serde_json::Value,
    #[serde(default)]
    pub document_references: serde_json::Value,
    #[serde(default)]
    pub ai_insights: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payload() -> SubmissionPayload {
        SubmissionPayload {
            phase: RangePayload { min: 1.0, max: 2.0 },
            divisions: vec![CategoryOption::new("03", "Concrete")],
            wbs_category: vec![CategoryOption::new("Structural", "Structural")],
            duration: RangePayload { min: 5.0, max: 10.0 },
            completion_status: CompletionStatus {
                completed: true,
                incompleted: false,
            },
            date_range: DateRangePayload {
                start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
                end_date: NaiveDate::from_ymd_opt(2024, 2, 5),
            },
        }
    }

    #[test]
    fn payload_uses_wire_field_names() {
        let json = serde_json::to_value(sample_payload()).unwrap();
        assert!(json.get("wbsCategory").is_some());
        assert!(json.get("completionStatus").is_some());
        assert_eq!(
            json["dateRange"]["startDate"],
            serde_json::json!("2024-01-01")
        );
        assert_eq!(json["dateRange"]["endDate"], serde_json::json!("2024-02-05"));
        assert_eq!(json["phase"]["min"], serde_json::json!(1.0));
    }

    #[test]
    fn payload_round_trips_null_dates() {
        let mut payload = sample_payload();
        payload.date_range = DateRangePayload {
            start_date: None,
            end_date: None,
        };
        let json = serde_json::to_string(&payload).unwrap();
        let back: SubmissionPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payload);
    }

    #[test]
    fn analytics_items_tolerate_missing_sections() {
        let response: AnalyticsResponse =
            serde_json::from_str(r#"{"items":[{"ai_insights":{"safety_considerations":"..."}}]}"#)
                .unwrap();
        assert_eq!(response.items.len(), 1);
        assert!(response.items[0].item_data.is_null());
    }
}
