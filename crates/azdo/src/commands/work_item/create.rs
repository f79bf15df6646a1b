//! `azdo work-item create` command implementation.

use azdo_client::AzureDevOpsClient;
use azdo_client::types::WorkItemDetails;
use clap::Args;

use super::document::DocumentArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the work item create command.
#[derive(Args)]
pub(crate) struct CreateArgs {
    /// Work item type, e.g. Task or Bug.
    #[arg(short = 't', long = "type")]
    work_item_type: String,

    #[command(flatten)]
    document: DocumentArgs,

    /// Project name (defaults to the one in config).
    #[arg(long)]
    project: Option<String>,
}

impl CreateArgs {
    pub(crate) fn execute(
        self,
        client: &AzureDevOpsClient,
        output: &Output,
    ) -> Result<(), CliError> {
        let operations = self.document.operations()?;
        let item =
            client.create_work_item(&self.work_item_type, &operations, self.project.as_deref())?;
        output.success(&format!("Created {} {}", self.work_item_type, item.id));
        output.json(&WorkItemDetails::from(&item))
    }
}
