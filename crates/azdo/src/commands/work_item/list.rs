//! `azdo work-item list` command implementation.

use azdo_client::AzureDevOpsClient;
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the work item list command.
#[derive(Args)]
pub(crate) struct ListArgs {
    /// WIQL query.
    #[arg(short, long)]
    query: String,

    /// Maximum number of work items to return (at most 200).
    #[arg(short, long, default_value_t = 50)]
    top: usize,

    /// Project name (defaults to the one in config).
    #[arg(long)]
    project: Option<String>,
}

impl ListArgs {
    pub(crate) fn execute(
        self,
        client: &AzureDevOpsClient,
        output: &Output,
    ) -> Result<(), CliError> {
        let result = client.query_work_items(&self.query, self.top, self.project.as_deref())?;
        if result.total_items > result.work_items.len() {
            output.info(&format!(
                "Showing {} of {} matching work items",
                result.work_items.len(),
                result.total_items
            ));
        }
        output.json(&result)
    }
}
