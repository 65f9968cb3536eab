//! External collaborators: the record source and the analytics endpoint
//!
//! The dashboard core never interprets transport failures beyond the
//! session taxonomy: anything that goes wrong while loading records becomes
//! `DataUnavailable`, anything that goes wrong while submitting becomes
//! `SubmissionFailed`.

use contracts::dashboards::project_filters::{
    AnalyticsResponse, RawRecord, RecordEnvelope, RecordPage, SubmissionPayload,
};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use super::normalize::{self, NormalizedData};
use super::DashboardError;

use crate::shared::api_utils::analytics_url;

const RECORD_SOURCE_BASE: &str = "https://api.airtable.com/v0";

/// Work-item table of the record source.
pub const ITEMS_TABLE: &str = "tbl60mtZmcPavvtQH";
/// Division lookup table (identifier → display name).
pub const DIVISIONS_TABLE: &str = "tblhgavnKoFlFD8SC";

/// Record source client. The credential is an opaque string baked in at
/// build time; without it the dashboard runs on placeholder domains.
pub struct RecordSource {
    base_id: String,
    api_key: String,
}

impl RecordSource {
    pub fn from_env() -> Option<Self> {
        let api_key = option_env!("AIRTABLE_API_KEY")?;
        let base_id = option_env!("AIRTABLE_BASE_ID").unwrap_or("appuojNVDfs9U7ccy");
        Some(Self {
            base_id: base_id.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Fetch every record of one table, following pagination offsets until
    /// the source reports no more pages.
    pub async fn fetch_records(&self, table_id: &str) -> Result<Vec<RecordEnvelope>, String> {
        let mut records = Vec::new();
        let mut offset: Option<String> = None;
        loop {
            let mut url = format!("{}/{}/{}", RECORD_SOURCE_BASE, self.base_id, table_id);
            if let Some(cursor) = &offset {
                url.push_str(&format!("?offset={}", cursor));
            }
            let page: RecordPage = fetch_json(&url, "GET", None, Some(&self.api_key)).await?;
            records.extend(page.records);
            match page.offset {
                Some(cursor) => offset = Some(cursor),
                None => break,
            }
        }
        Ok(records)
    }
}

/// Load both tables and normalize them into filter domains. Every failure
/// along the way is `DataUnavailable`; the caller keeps its placeholder
/// defaults and stays interactive.
pub async fn load_domain() -> Result<NormalizedData, DashboardError> {
    let source = RecordSource::from_env().ok_or_else(|| {
        DashboardError::DataUnavailable("record source credential is not configured".to_string())
    })?;

    let items = source
        .fetch_records(ITEMS_TABLE)
        .await
        .map_err(DashboardError::DataUnavailable)?;
    let lookup_records = source
        .fetch_records(DIVISIONS_TABLE)
        .await
        .map_err(DashboardError::DataUnavailable)?;

    let lookup = normalize::division_lookup(&lookup_records);
    let items: Vec<RawRecord> = items.into_iter().map(|record| record.fields).collect();
    normalize::normalize(&items, &lookup)
}

/// Hand the flattened selection to the analytics endpoint. The response
/// items are passed back opaquely; an empty item list is reported as
/// `EmptyResult`, distinct from a failed submission.
pub async fn submit_filters(payload: &SubmissionPayload) -> Result<AnalyticsResponse, DashboardError> {
    let body = serde_json::to_string(payload)
        .map_err(|e| DashboardError::SubmissionFailed(e.to_string()))?;
    let response: AnalyticsResponse =
        fetch_json(&analytics_url("/api/analytics"), "POST", Some(&body), None)
            .await
            .map_err(DashboardError::SubmissionFailed)?;
    if response.items.is_empty() {
        return Err(DashboardError::EmptyResult);
    }
    Ok(response)
}

async fn fetch_json<T: DeserializeOwned>(
    url: &str,
    method: &str,
    body: Option<&str>,
    bearer: Option<&str>,
) -> Result<T, String> {
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    if let Some(body) = body {
        opts.set_body(&wasm_bindgen::JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(url, &opts).map_err(|e| format!("{e:?}"))?;
    let headers = request.headers();
    headers
        .set("Accept", "application/json")
        .map_err(|e| format!("{e:?}"))?;
    if body.is_some() {
        headers
            .set("Content-Type", "application/json")
            .map_err(|e| format!("{e:?}"))?;
    }
    if let Some(key) = bearer {
        headers
            .set("Authorization", &format!("Bearer {}", key))
            .map_err(|e| format!("{e:?}"))?;
    }

    let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("{e:?}"))?;
    let resp: Response = resp_value.dyn_into().map_err(|e| format!("{e:?}"))?;
    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }
    let text = JsFuture::from(resp.text().map_err(|e| format!("{e:?}"))?)
        .await
        .map_err(|e| format!("{e:?}"))?;
    let text: String = text.as_string().ok_or_else(|| "bad text".to_string())?;
    serde_json::from_str(&text).map_err(|e| format!("{e}"))
}
