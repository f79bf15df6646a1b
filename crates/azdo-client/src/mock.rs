//! Mock gateway implementation for testing.
//!
//! Provides [`MockGateway`] for unit testing without network access.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use serde_json::json;

use crate::error::WikiError;
use crate::gateway::{GatewayResponse, PageWrite, WikiGateway};
use crate::page_ref::WikiPageRef;

/// A request seen by [`MockGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// `GET` or `PUT`.
    pub method: &'static str,
    /// Wiki name or ID.
    pub wiki: String,
    /// Explicit project, if any.
    pub project: Option<String>,
    /// Normalized page path.
    pub path: String,
    /// `If-Match` header sent with a PUT.
    pub if_match: Option<String>,
    /// Content sent with a PUT.
    pub content: Option<String>,
    /// Comment sent with a PUT.
    pub comment: Option<String>,
}

#[derive(Debug, Clone)]
struct StoredPage {
    id: u64,
    content: String,
    etag: String,
}

#[derive(Debug, Default)]
struct State {
    wikis: HashSet<String>,
    pages: HashMap<(String, String), StoredPage>,
    requests: Vec<RecordedRequest>,
    next_get_failure: Option<(u16, String)>,
    next_put_failure: Option<(u16, String)>,
    edit_after_read: Option<String>,
    revision: u64,
}

impl State {
    fn next_etag(&mut self) -> (u64, String) {
        self.revision += 1;
        (self.revision, format!("\"rev-{}\"", self.revision))
    }
}

/// Mock wiki gateway for testing.
///
/// Stores pages in memory, hands out a fresh `ETag` on every write and
/// enforces `If-Match` the way the service does. Use the builder methods
/// to configure the mock with test data.
///
/// # Example
///
/// ```ignore
/// use azdo_client::{MockGateway, PageUpserter, WikiPageRef};
///
/// let gateway = MockGateway::new().with_page("Docs.wiki", "/Home", "# Home");
/// let page = WikiPageRef::new("Docs.wiki", None, "/Home").unwrap();
///
/// let outcome = PageUpserter::new(&gateway).upsert(&page, "# Home", None).unwrap();
/// assert!(outcome.unchanged);
/// assert!(gateway.puts().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct MockGateway {
    state: RwLock<State>,
}

impl MockGateway {
    /// Create a new mock gateway with no wikis.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an empty wiki.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_wiki(self, wiki: &str) -> Self {
        self.state.write().unwrap().wikis.insert(wiki.to_owned());
        self
    }

    /// Register a page (and its wiki).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_page(self, wiki: &str, path: &str, content: &str) -> Self {
        {
            let mut state = self.state.write().unwrap();
            state.wikis.insert(wiki.to_owned());
            let (id, etag) = state.next_etag();
            state.pages.insert(
                (wiki.to_owned(), path.to_owned()),
                StoredPage {
                    id,
                    content: content.to_owned(),
                    etag,
                },
            );
        }
        self
    }

    /// Answer the next GET with `status` and `body`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn fail_next_get(self, status: u16, body: &str) -> Self {
        self.state.write().unwrap().next_get_failure = Some((status, body.to_owned()));
        self
    }

    /// Answer the next PUT with `status` and `body`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn fail_next_put(self, status: u16, body: &str) -> Self {
        self.state.write().unwrap().next_put_failure = Some((status, body.to_owned()));
        self
    }

    /// Simulate another writer: after the next successful GET, replace the
    /// fetched page's content and `ETag`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn modify_after_read(self, content: &str) -> Self {
        self.state.write().unwrap().edit_after_read = Some(content.to_owned());
        self
    }

    /// All requests in the order they were received.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.read().unwrap().requests.clone()
    }

    /// PUT requests in the order they were received.
    pub fn puts(&self) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == "PUT")
            .collect()
    }

    /// Current content of a page.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn content_of(&self, wiki: &str, path: &str) -> Option<String> {
        let state = self.state.read().unwrap();
        state
            .pages
            .get(&(wiki.to_owned(), path.to_owned()))
            .map(|p| p.content.clone())
    }

    /// Current `ETag` of a page.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn etag_of(&self, wiki: &str, path: &str) -> Option<String> {
        let state = self.state.read().unwrap();
        state
            .pages
            .get(&(wiki.to_owned(), path.to_owned()))
            .map(|p| p.etag.clone())
    }
}

fn respond(status: u16, etag: Option<String>, body: String) -> GatewayResponse {
    let status_text = match status {
        200 => "OK",
        201 => "Created",
        404 => "Not Found",
        409 => "Conflict",
        412 => "Precondition Failed",
        _ => "",
    };
    GatewayResponse {
        status,
        status_text: status_text.to_owned(),
        etag,
        body,
    }
}

fn page_body(id: u64, path: &str, content: &str) -> String {
    json!({ "id": id, "path": path, "content": content }).to_string()
}

fn wiki_not_found(wiki: &str) -> GatewayResponse {
    respond(
        404,
        None,
        json!({ "message": format!("Wiki not found: {wiki}") }).to_string(),
    )
}

impl WikiGateway for MockGateway {
    fn fetch_page(&self, page: &WikiPageRef) -> Result<GatewayResponse, WikiError> {
        let mut state = self.state.write().unwrap();
        state.requests.push(RecordedRequest {
            method: "GET",
            wiki: page.wiki().to_owned(),
            project: page.project().map(str::to_owned),
            path: page.path().to_owned(),
            if_match: None,
            content: None,
            comment: None,
        });

        if let Some((status, body)) = state.next_get_failure.take() {
            return Ok(respond(status, None, body));
        }
        if !state.wikis.contains(page.wiki()) {
            return Ok(wiki_not_found(page.wiki()));
        }

        let key = (page.wiki().to_owned(), page.path().to_owned());
        let Some(stored) = state.pages.get(&key).cloned() else {
            let body = json!({ "message": format!("The page '{}' does not exist", page.path()) });
            return Ok(respond(404, None, body.to_string()));
        };

        if let Some(edit) = state.edit_after_read.take() {
            let (_, etag) = state.next_etag();
            state.pages.insert(
                key,
                StoredPage {
                    id: stored.id,
                    content: edit,
                    etag,
                },
            );
        }

        Ok(respond(
            200,
            Some(stored.etag),
            page_body(stored.id, page.path(), &stored.content),
        ))
    }

    fn put_page(
        &self,
        page: &WikiPageRef,
        write: &PageWrite<'_>,
        if_match: Option<&str>,
    ) -> Result<GatewayResponse, WikiError> {
        let mut state = self.state.write().unwrap();
        state.requests.push(RecordedRequest {
            method: "PUT",
            wiki: page.wiki().to_owned(),
            project: page.project().map(str::to_owned),
            path: page.path().to_owned(),
            if_match: if_match.map(str::to_owned),
            content: Some(write.content.to_owned()),
            comment: Some(write.comment.to_owned()),
        });

        if let Some((status, body)) = state.next_put_failure.take() {
            return Ok(respond(status, None, body));
        }
        if !state.wikis.contains(page.wiki()) {
            return Ok(wiki_not_found(page.wiki()));
        }

        let key = (page.wiki().to_owned(), page.path().to_owned());
        let existing = state.pages.get(&key).cloned();
        match (&existing, if_match) {
            (Some(current), Some(expected)) if current.etag != expected => {
                return Ok(respond(412, None, "The page was changed".to_owned()));
            }
            (None, Some(_)) => {
                return Ok(respond(412, None, "The page no longer exists".to_owned()));
            }
            (Some(_), None) => {
                return Ok(respond(409, None, "The page already exists".to_owned()));
            }
            _ => {}
        }

        let (revision, etag) = state.next_etag();
        let id = existing.as_ref().map_or(revision, |p| p.id);
        state.pages.insert(
            key,
            StoredPage {
                id,
                content: write.content.to_owned(),
                etag: etag.clone(),
            },
        );

        let status = if existing.is_some() { 200 } else { 201 };
        Ok(respond(
            status,
            Some(etag),
            page_body(id, page.path(), write.content),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(path: &str) -> WikiPageRef {
        WikiPageRef::new("W", None, path).unwrap()
    }

    fn write(content: &str) -> PageWrite<'_> {
        PageWrite {
            content,
            comment: "c",
        }
    }

    #[test]
    fn test_fetch_existing_page_returns_etag() {
        let gateway = MockGateway::new().with_page("W", "/Home", "hi");

        let response = gateway.fetch_page(&page("/Home")).unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.etag, gateway.etag_of("W", "/Home"));
        assert!(response.body.contains("\"hi\""));
    }

    #[test]
    fn test_unknown_wiki_mentions_wiki_not_found() {
        let gateway = MockGateway::new();

        let response = gateway.fetch_page(&page("/Home")).unwrap();

        assert_eq!(response.status, 404);
        assert!(response.mentions("wiki not found"));
    }

    #[test]
    fn test_put_with_stale_etag_is_rejected() {
        let gateway = MockGateway::new().with_page("W", "/Home", "hi");

        let response = gateway
            .put_page(&page("/Home"), &write("new"), Some("\"stale\""))
            .unwrap();

        assert_eq!(response.status, 412);
        assert_eq!(gateway.content_of("W", "/Home").as_deref(), Some("hi"));
    }

    #[test]
    fn test_put_without_etag_on_existing_page_is_rejected() {
        let gateway = MockGateway::new().with_page("W", "/Home", "hi");

        let response = gateway.put_page(&page("/Home"), &write("new"), None).unwrap();

        assert_eq!(response.status, 409);
    }

    #[test]
    fn test_put_creates_page_with_201() {
        let gateway = MockGateway::new().with_wiki("W");

        let response = gateway.put_page(&page("/New"), &write("x"), None).unwrap();

        assert_eq!(response.status, 201);
        assert_eq!(response.etag, gateway.etag_of("W", "/New"));
        assert_eq!(gateway.puts().len(), 1);
    }
}
