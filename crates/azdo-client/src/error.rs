//! Error types for Azure DevOps wiki and work item operations.

use crate::gateway::GatewayResponse;

/// Marker the service uses when the wiki container itself is missing.
const WIKI_NOT_FOUND_MARKER: &str = "wiki not found";

/// Error from wiki API operations.
#[derive(Debug, thiserror::Error)]
pub enum WikiError {
    /// A required argument was missing or empty.
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// The wiki does not exist in the target project.
    #[error("Wiki {wiki} not found")]
    WikiNotFound {
        /// Wiki name or ID as given by the caller.
        wiki: String,
    },

    /// The page path does not resolve.
    #[error("Wiki page {path} not found in wiki {wiki}")]
    PageNotFound {
        /// Wiki name or ID.
        wiki: String,
        /// Normalized page path.
        path: String,
    },

    /// The page changed between the read and the conditional write.
    ///
    /// The server rejected the `If-Match` precondition. Re-running the
    /// upsert fetches a fresh ETag.
    #[error("Wiki page {path} was modified by someone else (HTTP {status}): {body}")]
    Conflict {
        /// Normalized page path.
        path: String,
        /// HTTP status code (412).
        status: u16,
        /// Response body.
        body: String,
    },

    /// Any other non-success response.
    #[error("HTTP error: {status} for {} - {body}", .path.as_deref().unwrap_or("wiki"))]
    Api {
        /// HTTP status code.
        status: u16,
        /// Page path the request targeted, if any.
        path: Option<String>,
        /// Response body (may contain error details).
        body: String,
    },

    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] ureq::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WikiError {
    /// Map a non-success page response onto the error taxonomy.
    ///
    /// 404 becomes [`WikiError::WikiNotFound`] when the status text or body
    /// names a missing wiki, otherwise [`WikiError::PageNotFound`]. 412 becomes
    /// [`WikiError::Conflict`]. Everything else is [`WikiError::Api`].
    pub(crate) fn from_page_response(response: GatewayResponse, wiki: &str, path: &str) -> Self {
        match response.status {
            404 if response.mentions(WIKI_NOT_FOUND_MARKER) => Self::WikiNotFound {
                wiki: wiki.to_owned(),
            },
            404 => Self::PageNotFound {
                wiki: wiki.to_owned(),
                path: path.to_owned(),
            },
            412 => Self::Conflict {
                path: path.to_owned(),
                status: response.status,
                body: response.body,
            },
            status => Self::Api {
                status,
                path: Some(path.to_owned()),
                body: response.body,
            },
        }
    }

    /// Map a non-success wiki-level response (listing, search).
    ///
    /// 404 becomes [`WikiError::WikiNotFound`] when the response names a
    /// missing wiki. Everything else is [`WikiError::Api`].
    pub(crate) fn from_wiki_response(response: GatewayResponse, wiki: &str) -> Self {
        if response.status == 404 && response.mentions(WIKI_NOT_FOUND_MARKER) {
            return Self::WikiNotFound {
                wiki: wiki.to_owned(),
            };
        }
        Self::Api {
            status: response.status,
            path: None,
            body: response.body,
        }
    }

    /// Whether retrying the same call may succeed.
    ///
    /// Only a lost optimistic-concurrency race qualifies; nothing is retried
    /// automatically.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// Whether the service rejected the credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401 | 403, .. })
    }
}

/// Error from work item tracking operations.
#[derive(Debug, thiserror::Error)]
pub enum WorkItemError {
    /// A required argument was missing or empty.
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// The work item does not exist or is not visible to the caller.
    #[error("Work item {id} not found")]
    NotFound {
        /// Work item ID.
        id: u64,
    },

    /// Any other non-success response.
    #[error("HTTP error: {status} - {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] ureq::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WorkItemError {
    /// Map a non-success response. A 404 for a single known ID becomes
    /// [`WorkItemError::NotFound`].
    pub(crate) fn from_response(response: GatewayResponse, id: Option<u64>) -> Self {
        match (response.status, id) {
            (404, Some(id)) => Self::NotFound { id },
            (status, _) => Self::Api {
                status,
                body: response.body,
            },
        }
    }

    /// Whether the service rejected the credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401 | 403, .. })
    }
}
