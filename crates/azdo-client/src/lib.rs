//! Azure DevOps wiki and work item integration for azdo.
//!
//! This crate provides:
//! - [`AzureDevOpsClient`]: REST API client authenticated with a personal access token,
//!   covering wikis, pages, page listing and search, and work items with their comments
//! - [`WikiGateway`]: the raw page GET/PUT surface the upsert logic is written against
//! - [`PageUpserter`]: create-or-update of a page with `If-Match` concurrency control
//! - [`MockGateway`]: in-memory gateway for tests (behind the `mock` feature)
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
//! let page = WikiPageRef::new("Docs.wiki", None, "Guides/Setup.md")?;
//!
//! let outcome = PageUpserter::new(&client).upsert(&page, "# Setup", None)?;
//! println!("created: {}, unchanged: {}", outcome.created, outcome.unchanged);
//! # Ok(())
//! # }
//! ```

// API client
mod client;
pub use client::{AzureDevOpsClient, WorkItemFetch};

// Gateway seam between the upserter and HTTP
mod gateway;
pub use gateway::{GatewayResponse, PageWrite, WikiGateway};

// Page addressing
mod page_ref;
pub use page_ref::{WikiPageRef, normalize_page_path};

// Wire types
pub mod types;

// Create-or-update workflow
pub mod upserter;
pub use upserter::{DryRunResult, PageUpserter, UpsertOutcome};

#[cfg(any(test, feature = "mock"))]
mod mock;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockGateway, RecordedRequest};

// Errors
pub mod error;
pub use error::{WikiError, WorkItemError};
