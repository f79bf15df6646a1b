//! `azdo wiki search` command implementation.

use azdo_client::AzureDevOpsClient;
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the wiki search command.
#[derive(Args)]
pub(crate) struct SearchArgs {
    /// Wiki identifier (name or ID).
    #[arg(short, long)]
    wiki: String,

    /// Text to search for.
    #[arg(short, long)]
    search: String,

    /// Project name (defaults to the one in config).
    #[arg(long)]
    project: Option<String>,

    /// Maximum number of results.
    #[arg(short, long, default_value_t = 20)]
    top: u32,
}

impl SearchArgs {
    pub(crate) fn execute(
        self,
        client: &AzureDevOpsClient,
        output: &Output,
    ) -> Result<(), CliError> {
        let found = client.search_pages(
            &self.wiki,
            self.project.as_deref(),
            &self.search,
            self.top,
        )?;
        output.json(&found)
    }
}
