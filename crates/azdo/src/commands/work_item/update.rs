//! `azdo work-item update` command implementation.

use azdo_client::AzureDevOpsClient;
use azdo_client::types::WorkItemDetails;
use clap::Args;

use super::document::DocumentArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the work item update command.
#[derive(Args)]
pub(crate) struct UpdateArgs {
    /// Work item ID.
    #[arg(short, long)]
    id: u64,

    #[command(flatten)]
    document: DocumentArgs,

    /// Project name (defaults to the one in config).
    #[arg(long)]
    project: Option<String>,
}

impl UpdateArgs {
    pub(crate) fn execute(
        self,
        client: &AzureDevOpsClient,
        output: &Output,
    ) -> Result<(), CliError> {
        let operations = self.document.operations()?;
        let item = client.update_work_item(self.id, &operations, self.project.as_deref())?;
        output.success(&format!(
            "Updated work item {} (rev {})",
            item.id,
            item.rev.unwrap_or_default()
        ));
        output.json(&WorkItemDetails::from(&item))
    }
}
