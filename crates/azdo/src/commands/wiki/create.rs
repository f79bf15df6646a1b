//! `azdo wiki create` command implementation.

use azdo_client::AzureDevOpsClient;
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the wiki create command.
#[derive(Args)]
pub(crate) struct CreateArgs {
    /// Wiki name.
    #[arg(short, long)]
    name: String,

    /// Project name or ID (defaults to the one in config).
    #[arg(long)]
    project: Option<String>,

    /// Mapped path.
    #[arg(short, long)]
    mapped_path: Option<String>,
}

impl CreateArgs {
    pub(crate) fn execute(
        self,
        client: &AzureDevOpsClient,
        output: &Output,
    ) -> Result<(), CliError> {
        let wiki = client.create_wiki(
            &self.name,
            self.project.as_deref(),
            self.mapped_path.as_deref(),
        )?;
        output.success(&format!("Created wiki {} ({})", wiki.name, wiki.id));
        output.json(&wiki)
    }
}
