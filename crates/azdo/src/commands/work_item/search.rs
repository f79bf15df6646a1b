//! `azdo work-item search` command implementation.

use azdo_client::AzureDevOpsClient;
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the work item search command.
#[derive(Args)]
pub(crate) struct SearchArgs {
    /// Text to search for.
    #[arg(short, long)]
    search_text: String,

    /// Maximum number of results.
    #[arg(short, long, default_value_t = 10)]
    top: u32,

    /// Number of results to skip.
    #[arg(long, default_value_t = 0)]
    skip: u32,
}

impl SearchArgs {
    pub(crate) fn execute(
        self,
        client: &AzureDevOpsClient,
        output: &Output,
    ) -> Result<(), CliError> {
        let found = client.search_work_items(&self.search_text, self.top, self.skip)?;
        output.json(&found)
    }
}
