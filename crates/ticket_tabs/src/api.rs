//! Remote read of a category's form type.

use contracts::domain::category::dto::{CategoryReadRequest, CategoryReadResponse};
use gloo_net::http::Request;

const API_BASE: &str = "/api/helpdesk/categories";

/// Read the `form_type` code of one category record.
///
/// `Ok(None)` means the record exists but has no sub-form configured; the
/// caller falls back to the displayed value in that case as well as on `Err`.
pub async fn read_category_form_type(id: i64) -> Result<Option<String>, String> {
    let url = format!("{}/read", API_BASE);

    let response = Request::post(&url)
        .json(&CategoryReadRequest::form_type_of(id))
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    let data: CategoryReadResponse = response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;

    Ok(data.records.into_iter().next().and_then(|r| r.form_type))
}
