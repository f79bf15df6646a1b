//! `azdo wiki list` command implementation.

use azdo_client::AzureDevOpsClient;
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the wiki list command.
#[derive(Args)]
pub(crate) struct ListArgs {
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
        let wikis = client.list_wikis(self.project.as_deref())?;
        output.json(&wikis.value)
    }
}
