//! Page upserter implementation.

use tracing::{debug, info};

use crate::error::WikiError;
use crate::gateway::{PageWrite, WikiGateway};
use crate::page_ref::WikiPageRef;
use crate::types::WikiPage;

use super::expand_newline_escapes;
use super::result::{DryRunResult, PageSnapshot, UpsertOutcome};

/// Creates or updates wiki pages through a [`WikiGateway`].
pub struct PageUpserter<'a, G: WikiGateway + ?Sized> {
    gateway: &'a G,
}

impl<'a, G: WikiGateway + ?Sized> PageUpserter<'a, G> {
    /// Create a new page upserter.
    #[must_use]
    pub fn new(gateway: &'a G) -> Self {
        Self { gateway }
    }

    /// Create the page if absent, update it if present.
    ///
    /// Literal `\n` sequences in `content` become newlines before the
    /// equality check and the write. When the stored content already
    /// matches, no write is issued. `comment` defaults to
    /// "Created page {path}" or "Updated page {path}".
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `content` is empty ([`WikiError::InvalidParams`])
    /// - the existence check fails with anything but 404 ([`WikiError::Api`])
    /// - the write fails ([`WikiError::WikiNotFound`], [`WikiError::PageNotFound`],
    ///   [`WikiError::Conflict`] or [`WikiError::Api`])
    pub fn upsert(
        &self,
        page: &WikiPageRef,
        content: &str,
        comment: Option<&str>,
    ) -> Result<UpsertOutcome, WikiError> {
        let content = Self::prepare_content(content)?;
        let snapshot = self.snapshot(page)?;

        if snapshot.exists && snapshot.content.as_deref() == Some(content.as_ref()) {
            info!("Page {} is unchanged, skipping write", page.path());
            return Ok(UpsertOutcome {
                created: false,
                unchanged: true,
                etag: snapshot.etag,
                page: None,
            });
        }

        let default_comment;
        let comment = match comment.filter(|c| !c.is_empty()) {
            Some(comment) => comment,
            None => {
                let verb = if snapshot.exists { "Updated" } else { "Created" };
                default_comment = format!("{verb} page {}", page.path());
                &default_comment
            }
        };

        let if_match = if snapshot.exists {
            snapshot.etag.as_deref()
        } else {
            None
        };
        let write = PageWrite {
            content: content.as_ref(),
            comment,
        };
        let response = self.gateway.put_page(page, &write, if_match)?;

        if !response.is_success() {
            return Err(WikiError::from_page_response(
                response,
                page.wiki(),
                page.path(),
            ));
        }

        let written: WikiPage = response.json()?;
        info!(
            "{} page {} in wiki {}",
            if snapshot.exists { "Updated" } else { "Created" },
            page.path(),
            page.wiki()
        );

        Ok(UpsertOutcome {
            created: !snapshot.exists,
            unchanged: false,
            etag: response.etag,
            page: Some(written),
        })
    }

    /// Perform a dry-run upsert (no changes made).
    ///
    /// Issues only the existence check and reports what [`upsert`](Self::upsert)
    /// would do.
    ///
    /// # Errors
    ///
    /// Same validation and read errors as [`upsert`](Self::upsert).
    pub fn dry_run(&self, page: &WikiPageRef, content: &str) -> Result<DryRunResult, WikiError> {
        let content = Self::prepare_content(content)?;
        let snapshot = self.snapshot(page)?;

        Ok(DryRunResult {
            path: page.path().to_owned(),
            exists: snapshot.exists,
            unchanged: snapshot.exists && snapshot.content.as_deref() == Some(content.as_ref()),
            etag: snapshot.etag,
            content_length: content.len(),
        })
    }

    /// Fetch the current state of a page.
    ///
    /// A 404 is recorded as "does not exist". Any other failure is returned,
    /// so an authorization problem never turns into an unconditional create.
    pub fn snapshot(&self, page: &WikiPageRef) -> Result<PageSnapshot, WikiError> {
        let response = self.gateway.fetch_page(page)?;

        if response.status == 404 {
            debug!("Page {} does not exist yet", page.path());
            return Ok(PageSnapshot::default());
        }
        if !response.is_success() {
            return Err(WikiError::Api {
                status: response.status,
                path: Some(page.path().to_owned()),
                body: response.body,
            });
        }

        let current: WikiPage = response.json()?;
        debug!(
            "Found page {} with ETag {}",
            page.path(),
            response.etag.as_deref().unwrap_or("(none)")
        );

        Ok(PageSnapshot {
            exists: true,
            etag: response.etag,
            content: current.content,
        })
    }

    fn prepare_content(content: &str) -> Result<std::borrow::Cow<'_, str>, WikiError> {
        if content.is_empty() {
            return Err(WikiError::InvalidParams(
                "page content is required".to_owned(),
            ));
        }
        Ok(expand_newline_escapes(content))
    }
}
