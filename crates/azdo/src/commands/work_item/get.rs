//! `azdo work-item get` command implementation.

use azdo_client::types::{ErrorPolicy, WorkItemExpand};
use azdo_client::{AzureDevOpsClient, WorkItemFetch};
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the work item get command.
#[derive(Args)]
pub(crate) struct GetArgs {
    /// Work item IDs (comma-separated).
    #[arg(short, long, required = true, value_delimiter = ',')]
    ids: Vec<u64>,

    /// Fields to include (comma-separated; replaces --expand).
    #[arg(short, long, value_delimiter = ',')]
    fields: Vec<String>,

    /// Return the work items as of this time (ISO 8601).
    #[arg(long)]
    as_of: Option<String>,

    /// Expansion: none, relations, fields, links or all (or 0-4).
    #[arg(short, long, conflicts_with = "fields")]
    expand: Option<WorkItemExpand>,

    /// Missing IDs: fail or omit (or 1-2).
    #[arg(long)]
    error_policy: Option<ErrorPolicy>,

    /// Project name (defaults to the one in config).
    #[arg(long)]
    project: Option<String>,
}

impl GetArgs {
    pub(crate) fn execute(
        self,
        client: &AzureDevOpsClient,
        output: &Output,
    ) -> Result<(), CliError> {
        let options = WorkItemFetch {
            fields: self.fields,
            as_of: self.as_of,
            expand: self.expand,
            error_policy: self.error_policy,
        };
        let items = client.summarize_work_items(&self.ids, &options, self.project.as_deref())?;
        output.json(&items)
    }
}
