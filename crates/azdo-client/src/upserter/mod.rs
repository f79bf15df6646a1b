//! Create-or-update of a single wiki page.
//!
//! This module provides the [`PageUpserter`] struct that encapsulates the
//! workflow for writing a page whether or not it already exists:
//!
//! 1. Normalize the page path (done by [`WikiPageRef`](crate::WikiPageRef))
//! 2. Read the current page; 404 means "does not exist"
//! 3. Skip the write when the stored content is identical
//! 4. PUT the new content, with `If-Match` when an `ETag` was seen
//! 5. Map the write response onto [`UpsertOutcome`] or a [`WikiError`](crate::WikiError)
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::time::Duration;
//! use azdo_client::{AzureDevOpsClient, PageUpserter, WikiPageRef};
//!
//! let client = AzureDevOpsClient::new(
//!     "https://dev.azure.com/contoso",
//!     "Docs",
//!     "personal-access-token",
//!     "7.0",
//!     Duration::from_secs(30),
//! );
//! let upserter = PageUpserter::new(&client);
//! let page = WikiPageRef::new("Docs.wiki", None, "/Home")?;
//!
//! // Preview without writing
//! let preview = upserter.dry_run(&page, "# Home")?;
//!
//! // Perform the upsert
//! let outcome = upserter.upsert(&page, "# Home", Some("Refresh home page"))?;
//! # Ok(())
//! # }
//! ```

mod executor;
mod result;

pub use executor::PageUpserter;
pub use result::{DryRunResult, PageSnapshot, UpsertOutcome};

use std::borrow::Cow;

/// Turn literal backslash-n sequences into newlines.
///
/// Content passed through shells and tool arguments often arrives with
/// `\n` spelled out. No other escape is translated.
pub fn expand_newline_escapes(content: &str) -> Cow<'_, str> {
    if content.contains("\\n") {
        Cow::Owned(content.replace("\\n", "\n"))
    } else {
        Cow::Borrowed(content)
    }
}
