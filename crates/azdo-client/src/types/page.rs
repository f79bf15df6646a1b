//! Wiki page types.

use serde::{Deserialize, Serialize};

/// Wiki page as returned by the pages endpoint.
///
/// Only includes fields that are actually used.
/// Serde ignores unknown fields from the API response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WikiPage {
    /// Page ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Logical page path.
    #[serde(default)]
    pub path: String,
    /// Markdown content (present when requested).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Path of the backing file in the wiki repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_item_path: Option<String>,
    /// Whether the page has sub-pages.
    #[serde(default)]
    pub is_parent_page: bool,
    /// Order among siblings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    /// Web UI link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_url: Option<String>,
}

/// Page entry from the pages batch endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WikiPageDetail {
    /// Page ID.
    pub id: u64,
    /// Logical page path.
    pub path: String,
    /// Daily view counts for the requested window.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub view_stats: Vec<WikiPageStat>,
}

/// View count of a page on one day.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WikiPageStat {
    /// Day (ISO 8601).
    pub day: String,
    /// Number of views.
    pub count: u64,
}

/// Request body of the pages batch endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagesBatchRequest<'a> {
    /// Maximum number of pages to return.
    pub top: u32,
    /// Continuation token from a previous batch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuation_token: Option<&'a str>,
    /// Window for `viewStats`, in days.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_views_for_days: Option<u32>,
}

/// One batch of pages plus the token for the next one.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WikiPageBatch {
    /// Pages in this batch.
    pub pages: Vec<WikiPageDetail>,
    /// `x-ms-continuationtoken` response header, when more pages exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuation_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_page_response() {
        let json = r#"{
            "id": 42,
            "path": "/Docs/Home",
            "order": 0,
            "gitItemPath": "/Docs/Home.md",
            "subPages": [],
            "url": "https://dev.azure.com/contoso/_apis/wiki/wikis/W/pages/%2FDocs%2FHome",
            "remoteUrl": "https://dev.azure.com/contoso/Docs/_wiki/wikis/W?pagePath=%2FDocs%2FHome",
            "content": "Hello"
        }"#;

        let page: WikiPage = serde_json::from_str(json).unwrap();

        assert_eq!(page.id, Some(42));
        assert_eq!(page.path, "/Docs/Home");
        assert_eq!(page.content.as_deref(), Some("Hello"));
        assert_eq!(page.git_item_path.as_deref(), Some("/Docs/Home.md"));
        assert!(!page.is_parent_page);
    }

    #[test]
    fn test_deserialize_without_content() {
        let page: WikiPage = serde_json::from_str(r#"{"path": "/Home"}"#).unwrap();
        assert_eq!(page.content, None);
    }

    #[test]
    fn test_deserialize_page_detail_with_view_stats() {
        let json = r#"{
            "id": 7,
            "path": "/Guides",
            "viewStats": [{"day": "2026-10-01T00:00:00Z", "count": 3}]
        }"#;

        let page: WikiPageDetail = serde_json::from_str(json).unwrap();

        assert_eq!(page.id, 7);
        assert_eq!(page.view_stats.len(), 1);
        assert_eq!(page.view_stats[0].count, 3);
    }

    #[test]
    fn test_serialize_pages_batch_request() {
        let body = PagesBatchRequest {
            top: 20,
            continuation_token: None,
            page_views_for_days: Some(30),
        };

        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json, serde_json::json!({"top": 20, "pageViewsForDays": 30}));
    }
}
