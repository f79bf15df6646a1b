//! `azdo work-item` commands.

mod comments;
mod create;
mod document;
mod get;
mod list;
mod search;
mod update;

use clap::Subcommand;

use super::ConnectionArgs;
use crate::error::CliError;
use crate::output::Output;

/// Work item commands.
#[derive(Subcommand)]
pub(crate) enum WorkItemCommand {
    /// Get work items by ID.
    Get(get::GetArgs),
    /// List work items matching a WIQL query.
    List(list::ListArgs),
    /// Create a new work item.
    Create(create::CreateArgs),
    /// Update an existing work item.
    Update(update::UpdateArgs),
    /// Search for work items by text.
    Search(search::SearchArgs),
    /// List the comments of a work item.
    Comments(comments::CommentsArgs),
    /// Add a comment to a work item.
    Comment(comments::CommentArgs),
}

impl WorkItemCommand {
    /// Execute the work item command.
    pub(crate) fn execute(
        self,
        connection: &ConnectionArgs,
        output: &Output,
    ) -> Result<(), CliError> {
        let client = connection.client()?;
        match self {
            Self::Get(args) => args.execute(&client, output),
            Self::List(args) => args.execute(&client, output),
            Self::Create(args) => args.execute(&client, output),
            Self::Update(args) => args.execute(&client, output),
            Self::Search(args) => args.execute(&client, output),
            Self::Comments(args) => args.execute(&client, output),
            Self::Comment(args) => args.execute(&client, output),
        }
    }
}
