//! `azdo wiki pages` command implementation.

use azdo_client::AzureDevOpsClient;
use azdo_client::types::PagesBatchRequest;
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the wiki pages command.
#[derive(Args)]
pub(crate) struct PagesArgs {
    /// Wiki identifier (name or ID).
    #[arg(short, long)]
    wiki: String,

    /// Project name (defaults to the one in config).
    #[arg(long)]
    project: Option<String>,

    /// Include page views for the last N days.
    #[arg(short, long, default_value_t = 30)]
    days: u32,

    /// Number of pages to return.
    #[arg(short, long, default_value_t = 100)]
    top: u32,

    /// Continuation token from a previous listing.
    #[arg(short, long)]
    continuation: Option<String>,
}

impl PagesArgs {
    pub(crate) fn execute(
        self,
        client: &AzureDevOpsClient,
        output: &Output,
    ) -> Result<(), CliError> {
        let request = PagesBatchRequest {
            top: self.top,
            continuation_token: self.continuation.as_deref(),
            page_views_for_days: Some(self.days),
        };
        let batch = client.list_pages(&self.wiki, self.project.as_deref(), &request)?;
        if let Some(token) = &batch.continuation_token {
            output.info(&format!("More pages available; pass --continuation {token}"));
        }
        output.json(&batch)
    }
}
