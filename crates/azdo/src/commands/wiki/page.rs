//! `azdo wiki page` command implementation.

use azdo_client::{AzureDevOpsClient, WikiPageRef};
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the wiki page command.
#[derive(Args)]
pub(crate) struct PageArgs {
    /// Wiki identifier (name or ID).
    #[arg(short, long)]
    wiki: String,

    /// Page path.
    #[arg(short, long)]
    path: String,

    /// Project name (defaults to the one in config).
    #[arg(long)]
    project: Option<String>,

    /// Include page content.
    #[arg(long)]
    include_content: bool,
}

impl PageArgs {
    pub(crate) fn execute(
        self,
        client: &AzureDevOpsClient,
        output: &Output,
    ) -> Result<(), CliError> {
        let page = WikiPageRef::new(&self.wiki, self.project.as_deref(), &self.path)?;
        let found = client.read_page(&page, self.include_content)?;
        output.json(&found)
    }
}
