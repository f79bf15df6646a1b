//! Upsert result types.

use crate::types::WikiPage;

/// Observed state of a page right before a write.
///
/// Fetched fresh for every upsert and never cached.
#[derive(Debug, Clone, Default)]
pub struct PageSnapshot {
    /// Whether the page exists.
    pub exists: bool,
    /// Concurrency token, when the page exists and the server sent one.
    pub etag: Option<String>,
    /// Stored content.
    pub content: Option<String>,
}

/// Result of a page upsert.
#[derive(Debug, Clone)]
pub struct UpsertOutcome {
    /// No page existed before the write.
    pub created: bool,
    /// Stored content already matched; nothing was written.
    pub unchanged: bool,
    /// `ETag` returned by the write.
    pub etag: Option<String>,
    /// Page representation returned by the write.
    pub page: Option<WikiPage>,
}

/// Result of a dry-run upsert (no changes made).
#[derive(Debug, Clone)]
pub struct DryRunResult {
    /// Normalized page path.
    pub path: String,
    /// Whether the page exists.
    pub exists: bool,
    /// Whether the write would be skipped.
    pub unchanged: bool,
    /// `ETag` that would be sent as `If-Match`.
    pub etag: Option<String>,
    /// Length in bytes of the content that would be written.
    pub content_length: usize,
}
