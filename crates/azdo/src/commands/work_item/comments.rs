//! `azdo work-item comments` and `azdo work-item comment` command implementation.

use azdo_client::AzureDevOpsClient;
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the work item comments command.
#[derive(Args)]
pub(crate) struct CommentsArgs {
    /// Work item ID.
    #[arg(short, long)]
    id: u64,

    /// Project name (defaults to the one in config).
    #[arg(long)]
    project: Option<String>,
}

impl CommentsArgs {
    pub(crate) fn execute(
        self,
        client: &AzureDevOpsClient,
        output: &Output,
    ) -> Result<(), CliError> {
        let comments = client.get_comments(self.id, self.project.as_deref())?;
        output.json(&comments)
    }
}

/// Arguments for the work item comment command.
#[derive(Args)]
pub(crate) struct CommentArgs {
    /// Work item ID.
    #[arg(short, long)]
    id: u64,

    /// Comment text.
    #[arg(short, long)]
    text: String,

    /// Project name (defaults to the one in config).
    #[arg(long)]
    project: Option<String>,
}

impl CommentArgs {
    pub(crate) fn execute(
        self,
        client: &AzureDevOpsClient,
        output: &Output,
    ) -> Result<(), CliError> {
        let comment = client.add_comment(self.id, &self.text, self.project.as_deref())?;
        output.success(&format!("Added comment {} to work item {}", comment.id, self.id));
        output.json(&comment)
    }
}
