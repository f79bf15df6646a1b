//! Raw page transport used by [`PageUpserter`](crate::PageUpserter).
//!
//! The gateway only moves bytes: it reports the status, `ETag` and body of
//! each response and leaves interpretation to the caller. Transport failures
//! are the only errors it raises.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::WikiError;
use crate::page_ref::WikiPageRef;

/// Response from a page request.
#[derive(Debug, Clone)]
pub struct GatewayResponse {
    /// HTTP status code.
    pub status: u16,
    /// Status text (reason phrase).
    pub status_text: String,
    /// `ETag` response header.
    pub etag: Option<String>,
    /// Raw response body.
    pub body: String,
}

impl GatewayResponse {
    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, WikiError> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Case-insensitive search in status text and body.
    pub(crate) fn mentions(&self, needle: &str) -> bool {
        self.status_text.to_lowercase().contains(needle)
            || self.body.to_lowercase().contains(needle)
    }
}

/// JSON body of a page PUT.
#[derive(Debug, Serialize)]
pub struct PageWrite<'a> {
    /// Markdown content.
    pub content: &'a str,
    /// Revision comment.
    pub comment: &'a str,
}

/// Page GET/PUT against the wiki REST endpoints.
pub trait WikiGateway {
    /// GET the page with its content included.
    ///
    /// # Errors
    ///
    /// Returns [`WikiError::Transport`] when no response was received.
    fn fetch_page(&self, page: &WikiPageRef) -> Result<GatewayResponse, WikiError>;

    /// PUT new content, optionally conditioned on `If-Match: <if_match>`.
    ///
    /// # Errors
    ///
    /// Returns [`WikiError::Transport`] when no response was received.
    fn put_page(
        &self,
        page: &WikiPageRef,
        write: &PageWrite<'_>,
        if_match: Option<&str>,
    ) -> Result<GatewayResponse, WikiError>;
}
