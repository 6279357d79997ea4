//! Response bodies returned by the search service.

use serde::{Deserialize, Serialize};

use crate::facet::Facet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResponse {
    pub total_hits: u64,
    pub results: Vec<SearchResultItem>,
    pub facets: Vec<Facet>,
}

/// One row of a result page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResultItem {
    pub id: String,
    pub name: String,
    pub content_type: Option<String>,
    pub source: Option<String>,
    pub locale: Option<String>,
    /// Duration in minutes, for playable content.
    pub duration: Option<u64>,
}

/// Full record behind a result row, fetched on open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ResultDetail {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub content_type: Option<String>,
    pub source: Option<String>,
    pub locale: Option<String>,
    pub last_updated_on: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_parses_service_payload() {
        let json = r#"{
            "totalHits": 42,
            "results": [
                {"id": "a1", "name": "Intro to Rust", "contentType": "Course", "locale": "en", "duration": 90}
            ],
            "facets": [
                {"name": "contentType", "values": [{"name": "Course", "count": 12}]},
                {"name": "catalogPaths", "values": [
                    {"name": "Technology", "count": 30, "children": [
                        {"name": "Programming", "count": 18},
                        {"name": "Cloud", "count": 12}
                    ]}
                ]}
            ]
        }"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.total_hits, 42);
        assert_eq!(response.results[0].content_type.as_deref(), Some("Course"));
        assert_eq!(response.results[0].duration, Some(90));
        assert_eq!(response.facets.len(), 2);
        let catalog = &response.facets[1];
        assert_eq!(catalog.values[0].children.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_response_tolerates_missing_fields() {
        let response: SearchResponse = serde_json::from_str(r#"{"totalHits": 0}"#).unwrap();
        assert!(response.results.is_empty());
        assert!(response.facets.is_empty());
    }

    #[test]
    fn test_detail_parses_camel_case() {
        let json = r#"{"id":"a1","name":"Intro to Rust","lastUpdatedOn":"2024-11-02","contentType":"Course"}"#;
        let detail: ResultDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.last_updated_on.as_deref(), Some("2024-11-02"));
        assert!(detail.description.is_none());
    }
}
