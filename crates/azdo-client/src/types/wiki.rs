//! Wiki container types.

use serde::{Deserialize, Serialize};

/// Wiki as returned by the wikis endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Wiki {
    /// Wiki ID (GUID).
    pub id: String,
    /// Wiki name.
    pub name: String,
    /// Owning project ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// `projectWiki` or `codeWiki`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub wiki_type: Option<String>,
    /// Folder of the backing repository mapped to the wiki root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapped_path: Option<String>,
    /// Web UI link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_url: Option<String>,
}

/// Wikis list response.
#[derive(Debug, Clone, Deserialize)]
pub struct WikiList {
    /// Number of wikis.
    #[serde(default)]
    pub count: usize,
    /// Wikis.
    pub value: Vec<Wiki>,
}

/// Request body for creating a project wiki.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WikiCreate<'a> {
    /// Wiki name.
    pub name: &'a str,
    /// Project name or ID.
    pub project_id: &'a str,
    /// Always `projectWiki`.
    #[serde(rename = "type")]
    pub wiki_type: &'a str,
    /// Mapped path, when given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapped_path: Option<&'a str>,
}
