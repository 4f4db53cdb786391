use serde::{Deserialize, Serialize};

/// Read request for category records: which ids, which fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryReadRequest {
    pub ids: Vec<i64>,
    pub fields: Vec<String>,
}

impl CategoryReadRequest {
    pub fn form_type_of(id: i64) -> Self {
        Self {
            ids: vec![id],
            fields: vec!["form_type".to_string()],
        }
    }
}

/// One category record as returned by the read call.
///
/// `form_type` is the raw selection code; it may be absent when the category
/// has no sub-form configured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: i64,
    #[serde(default)]
    pub form_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryReadResponse {
    pub records: Vec<CategoryRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_with_missing_form_type() {
        let resp: CategoryReadResponse =
            serde_json::from_str(r#"{"records":[{"id":42},{"id":7,"form_type":"security"}]}"#)
                .unwrap();
        assert_eq!(resp.records[0].form_type, None);
        assert_eq!(resp.records[1].form_type.as_deref(), Some("security"));
    }
}
