//! `azdo wiki` commands.

mod create;
mod list;
mod page;
mod pages;
mod search;
mod update;

use clap::Subcommand;

use super::ConnectionArgs;
use crate::error::CliError;
use crate::output::Output;

use update::UpsertMode;

/// Wiki management commands.
#[derive(Subcommand)]
pub(crate) enum WikiCommand {
    /// List all wikis in the project.
    List(list::ListArgs),
    /// Get a wiki page by path.
    Page(page::PageArgs),
    /// List the pages of a wiki.
    Pages(pages::PagesArgs),
    /// Search for pages in a wiki by text.
    Search(search::SearchArgs),
    /// Create a new project wiki.
    Create(create::CreateArgs),
    /// Create or update a wiki page.
    Update(update::UpdateArgs),
    /// Create a new wiki page (updates it if it already exists).
    CreatePage(update::UpdateArgs),
}

impl WikiCommand {
    /// Execute the wiki command.
    pub(crate) fn execute(
        self,
        connection: &ConnectionArgs,
        output: &Output,
    ) -> Result<(), CliError> {
        let client = connection.client()?;
        match self {
            Self::List(args) => args.execute(&client, output),
            Self::Page(args) => args.execute(&client, output),
            Self::Pages(args) => args.execute(&client, output),
            Self::Search(args) => args.execute(&client, output),
            Self::Create(args) => args.execute(&client, output),
            Self::Update(args) => args.execute(&client, output, UpsertMode::Update),
            Self::CreatePage(args) => args.execute(&client, output, UpsertMode::Create),
        }
    }
}
