//! Normalization of raw work-item records into bounded filter domains
//!
//! Pure and deterministic: the same records always yield the same ranges
//! and the same option ordering. Malformed individual fields are absorbed
//! here (coerced or excluded) and never surface as session errors.

use std::collections::HashSet;

use chrono::NaiveDate;
use contracts::dashboards::project_filters::{
    CategoryOption, DateBounds, DivisionLookup, FilterOptions, FilterRanges, NumericRange,
    RawRecord, RecordEnvelope,
};

use super::DashboardError;

pub const FIELD_PHASE: &str = "Phase";
pub const FIELD_DIVISION: &str = "Division";
pub const FIELD_DURATION: &str = "Duration";
pub const FIELD_WBS_CATEGORY: &str = "WBS Category Level 1";
pub const FIELD_START_DATE: &str = "Start Date";
pub const FIELD_END_DATE: &str = "End Date";

/// Display-name field of the division lookup table.
pub const FIELD_DIVISION_NAME: &str = "CSI Name";

/// Filter domains derived from one snapshot of the record source.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedData {
    pub ranges: FilterRanges,
    pub options: FilterOptions,
}

/// Build the division identifier → display name mapping from the lookup
/// table. Records without a display name are skipped; the consumer falls
/// back to a synthesized label for identifiers missing here.
pub fn division_lookup(records: &[RecordEnvelope]) -> DivisionLookup {
    records
        .iter()
        .filter_map(|record| {
            let name = record
                .fields
                .get(FIELD_DIVISION_NAME)
                .and_then(|v| v.as_str())?;
            Some((record.id.clone(), name.to_string()))
        })
        .collect()
}

/// Derive numeric ranges, categorical option lists and date bounds from the
/// raw items. An empty item set means the record source produced nothing and
/// yields `DataUnavailable`; callers keep their prior defaults.
pub fn normalize(
    items: &[RawRecord],
    divisions: &DivisionLookup,
) -> Result<NormalizedData, DashboardError> {
    if items.is_empty() {
        return Err(DashboardError::DataUnavailable(
            "record source returned no items".to_string(),
        ));
    }

    Ok(NormalizedData {
        ranges: FilterRanges {
            phase: numeric_range(items, FIELD_PHASE),
            duration: numeric_range(items, FIELD_DURATION),
            dates: date_bounds(items),
        },
        options: FilterOptions {
            divisions: division_options(items, divisions),
            wbs_categories: wbs_options(items),
        },
    })
}

/// Strict date parse: `YYYY-MM-DD`, with any timestamp suffix cut at `T`.
/// Anything else is excluded from bound computation, not coerced.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.split('T').next().unwrap_or(raw);
    NaiveDate::parse_from_str(date_part.trim(), "%Y-%m-%d").ok()
}

/// Numeric projection of a field: numbers pass through, numeric strings are
/// parsed, everything else (including a missing field) coerces to 0.
fn numeric_value(record: &RawRecord, field: &str) -> f64 {
    match record.get(field) {
        Some(serde_json::Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Trimmed string projection of a field; empty and non-scalar values drop out.
fn string_value(record: &RawRecord, field: &str) -> Option<String> {
    match record.get(field) {
        Some(serde_json::Value::String(s)) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn numeric_range(items: &[RawRecord], field: &str) -> NumericRange {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for record in items {
        let value = numeric_value(record, field);
        min = min.min(value);
        max = max.max(value);
    }
    NumericRange::new(min, max)
}

/// Numeric portion of a division identifier, used as the sort key.
/// "03" → 3, "09A" → 9, identifiers without digits sort as 0.
fn division_sort_key(identifier: &str) -> u64 {
    let digits: String = identifier.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

fn division_options(items: &[RawRecord], lookup: &DivisionLookup) -> Vec<CategoryOption> {
    let mut seen_values = HashSet::new();
    let mut seen_labels = HashSet::new();
    let mut options: Vec<(u64, CategoryOption)> = Vec::new();

    for record in items {
        let Some(identifier) = string_value(record, FIELD_DIVISION) else {
            continue;
        };
        if !seen_values.insert(identifier.clone()) {
            continue;
        }
        let label = lookup
            .get(&identifier)
            .cloned()
            .unwrap_or_else(|| format!("Division {}", identifier));
        // Two identifiers resolving to the same display name collapse into
        // one option; the first occurrence wins.
        if !seen_labels.insert(label.clone()) {
            continue;
        }
        options.push((
            division_sort_key(&identifier),
            CategoryOption::new(identifier, label),
        ));
    }

    // Stable sort keeps first-seen order among equal keys.
    options.sort_by_key(|(key, _)| *key);
    options.into_iter().map(|(_, option)| option).collect()
}

fn wbs_options(items: &[RawRecord]) -> Vec<CategoryOption> {
    let mut values: Vec<String> = Vec::new();
    let mut seen = HashSet::new();
    for record in items {
        if let Some(value) = string_value(record, FIELD_WBS_CATEGORY) {
            if seen.insert(value.clone()) {
                values.push(value);
            }
        }
    }
    values.sort();
    values
        .into_iter()
        .map(|value| CategoryOption::new(value.clone(), value))
        .collect()
}

/// Min/max over the union of all valid start and end dates, so the bounds
/// are either both present (ordered) or both absent.
fn date_bounds(items: &[RawRecord]) -> DateBounds {
    let mut bounds = DateBounds::default();
    for record in items {
        for field in [FIELD_START_DATE, FIELD_END_DATE] {
            let parsed = record
                .get(field)
                .and_then(|v| v.as_str())
                .and_then(parse_date);
            if let Some(date) = parsed {
                bounds.min = Some(bounds.min.map_or(date, |min| min.min(date)));
                bounds.max = Some(bounds.max.map_or(date, |max| max.max(date)));
            }
        }
    }
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(fields: serde_json::Value) -> RawRecord {
        match fields {
            serde_json::Value::Object(map) => map,
            _ => unreachable!("test records are JSON objects"),
        }
    }

    fn sample_items() -> Vec<RawRecord> {
        vec![
            record(json!({
                "Phase": "1",
                "Division": "03",
                "Duration": "5",
                "WBS Category Level 1": "Structural",
                "Start Date": "2024-01-01",
                "End Date": "2024-01-10",
            })),
            record(json!({
                "Phase": "2",
                "Division": "03",
                "Duration": "10",
                "WBS Category Level 1": "Finishes",
                "Start Date": "2024-02-01",
                "End Date": "2024-02-05",
            })),
        ]
    }

    fn concrete_lookup() -> DivisionLookup {
        DivisionLookup::from([("03".to_string(), "Concrete".to_string())])
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn normalizes_sample_items() {
        let data = normalize(&sample_items(), &concrete_lookup()).unwrap();

        assert_eq!(data.ranges.phase, NumericRange::new(1.0, 2.0));
        assert_eq!(data.ranges.duration, NumericRange::new(5.0, 10.0));
        assert_eq!(data.ranges.dates.min, Some(date(2024, 1, 1)));
        assert_eq!(data.ranges.dates.max, Some(date(2024, 2, 5)));
        // Two items with the same division collapse into a single option.
        assert_eq!(
            data.options.divisions,
            vec![CategoryOption::new("03", "Concrete")]
        );
        assert_eq!(
            data.options.wbs_categories,
            vec![
                CategoryOption::new("Finishes", "Finishes"),
                CategoryOption::new("Structural", "Structural"),
            ]
        );
    }

    #[test]
    fn empty_input_is_data_unavailable() {
        let err = normalize(&[], &DivisionLookup::new()).unwrap_err();
        assert!(matches!(err, DashboardError::DataUnavailable(_)));
    }

    #[test]
    fn normalization_is_deterministic() {
        let items = sample_items();
        let lookup = concrete_lookup();
        let first = normalize(&items, &lookup).unwrap();
        let second = normalize(&items, &lookup).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn ranges_are_ordered() {
        let data = normalize(&sample_items(), &concrete_lookup()).unwrap();
        assert!(data.ranges.phase.min <= data.ranges.phase.max);
        assert!(data.ranges.duration.min <= data.ranges.duration.max);
        let dates = data.ranges.dates;
        assert!(dates.min.unwrap() <= dates.max.unwrap());
    }

    #[test]
    fn non_numeric_fields_coerce_to_zero() {
        let items = vec![
            record(json!({"Phase": "abc", "Duration": json!(7.5)})),
            record(json!({"Phase": 4})),
        ];
        let data = normalize(&items, &DivisionLookup::new()).unwrap();
        assert_eq!(data.ranges.phase, NumericRange::new(0.0, 4.0));
        assert_eq!(data.ranges.duration, NumericRange::new(0.0, 7.5));
    }

    #[test]
    fn invalid_dates_are_excluded_not_coerced() {
        let items = vec![
            record(json!({"Start Date": "not-a-date", "End Date": "2024-03-20"})),
            record(json!({"Start Date": "2024-03-05"})),
        ];
        let data = normalize(&items, &DivisionLookup::new()).unwrap();
        assert_eq!(data.ranges.dates.min, Some(date(2024, 3, 5)));
        assert_eq!(data.ranges.dates.max, Some(date(2024, 3, 20)));
    }

    #[test]
    fn no_valid_dates_yields_open_bounds() {
        let items = vec![record(json!({"Start Date": "soon", "Phase": 1}))];
        let data = normalize(&items, &DivisionLookup::new()).unwrap();
        assert_eq!(data.ranges.dates, DateBounds::default());
    }

    #[test]
    fn timestamp_suffix_is_cut_before_parsing() {
        assert_eq!(parse_date("2024-03-15T14:02:26Z"), Some(date(2024, 3, 15)));
        assert_eq!(parse_date("2024-03-15"), Some(date(2024, 3, 15)));
        assert_eq!(parse_date("15.03.2024"), None);
    }

    #[test]
    fn missing_lookup_entry_gets_synthesized_label() {
        let items = vec![record(json!({"Division": "26"}))];
        let data = normalize(&items, &DivisionLookup::new()).unwrap();
        assert_eq!(
            data.options.divisions,
            vec![CategoryOption::new("26", "Division 26")]
        );
    }

    #[test]
    fn divisions_sort_by_numeric_portion() {
        let items = vec![
            record(json!({"Division": "26"})),
            record(json!({"Division": "MISC"})),
            record(json!({"Division": "09A"})),
            record(json!({"Division": "3"})),
        ];
        let data = normalize(&items, &DivisionLookup::new()).unwrap();
        let values: Vec<&str> = data
            .options
            .divisions
            .iter()
            .map(|o| o.value.as_str())
            .collect();
        // No digits sorts as 0, ahead of everything else.
        assert_eq!(values, vec!["MISC", "3", "09A", "26"]);
    }

    #[test]
    fn divisions_sharing_a_label_collapse_to_first_seen() {
        let items = vec![
            record(json!({"Division": "03"})),
            record(json!({"Division": "03B"})),
        ];
        let lookup = DivisionLookup::from([
            ("03".to_string(), "Concrete".to_string()),
            ("03B".to_string(), "Concrete".to_string()),
        ]);
        let data = normalize(&items, &lookup).unwrap();
        assert_eq!(
            data.options.divisions,
            vec![CategoryOption::new("03", "Concrete")]
        );
    }

    #[test]
    fn empty_and_blank_divisions_drop_out() {
        let items = vec![
            record(json!({"Division": "  "})),
            record(json!({"Division": ""})),
            record(json!({"Phase": 1})),
            record(json!({"Division": " 09 "})),
        ];
        let data = normalize(&items, &DivisionLookup::new()).unwrap();
        assert_eq!(
            data.options.divisions,
            vec![CategoryOption::new("09", "Division 09")]
        );
    }

    #[test]
    fn division_lookup_reads_display_names() {
        let records = vec![
            RecordEnvelope {
                id: "rec1".to_string(),
                fields: record(json!({"CSI Name": "Concrete"})),
            },
            RecordEnvelope {
                id: "rec2".to_string(),
                fields: record(json!({"Other": 1})),
            },
        ];
        let lookup = division_lookup(&records);
        assert_eq!(lookup.get("rec1"), Some(&"Concrete".to_string()));
        assert!(!lookup.contains_key("rec2"));
    }
}
