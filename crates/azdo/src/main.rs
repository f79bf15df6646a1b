//! azdo CLI - Azure DevOps wiki and work item tooling.
//!
//! Provides commands for:
//! - `wiki list|page|pages|search|create`: Inspect, search and create wikis
//! - `wiki update|create-page`: Create or update a page with `If-Match` concurrency control
//! - `work-item get|list|create|update|search|comments|comment`: Work item tracking
//! - `tools list|call`: Tool definitions and invocation for agent integrations

mod commands;
mod error;
mod output;
mod tools;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ConnectionArgs, ToolsCommand, WikiCommand, WorkItemCommand};
use output::Output;

/// azdo - Azure DevOps wiki and work item tooling.
#[derive(Parser)]
#[command(name = "azdo", version, about)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Enable info-level logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Wiki management commands.
    #[command(subcommand)]
    Wiki(WikiCommand),
    /// Work item commands.
    #[command(subcommand)]
    WorkItem(WorkItemCommand),
    /// Agent tool definitions and invocation.
    #[command(subcommand)]
    Tools(ToolsCommand),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose forces INFO; otherwise RUST_LOG decides (errors only when unset)
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Wiki(cmd) => cmd.execute(&cli.connection, &output),
        Commands::WorkItem(cmd) => cmd.execute(&cli.connection, &output),
        Commands::Tools(cmd) => cmd.execute(&cli.connection, &output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        if err.is_unauthorized() {
            output.info("Check the wiki and work item permissions of your Personal Access Token.");
        }
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_wiki_update() {
        let cli = Cli::try_parse_from([
            "azdo", "wiki", "update", "-w", "W", "-p", "Home.md", "-c", "hello", "--dry-run",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Wiki(WikiCommand::Update(_))));
    }

    #[test]
    fn test_update_requires_content_or_file() {
        let result = Cli::try_parse_from(["azdo", "wiki", "update", "-w", "W", "-p", "/Home"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_content_and_file_conflict() {
        let result = Cli::try_parse_from([
            "azdo", "wiki", "create-page", "-w", "W", "-p", "/Home", "-c", "x", "-f", "page.md",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "azdo", "tools", "list", "--verbose", "--config", "azdo.toml",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Tools(ToolsCommand::List)));
    }

    #[test]
    fn test_parse_wiki_pages_defaults() {
        let cli = Cli::try_parse_from(["azdo", "wiki", "pages", "-w", "W"]).unwrap();
        assert!(matches!(cli.command, Commands::Wiki(WikiCommand::Pages(_))));
    }

    #[test]
    fn test_wiki_search_requires_text() {
        assert!(Cli::try_parse_from(["azdo", "wiki", "search", "-w", "W"]).is_err());
        let cli =
            Cli::try_parse_from(["azdo", "wiki", "search", "-w", "W", "-s", "setup"]).unwrap();
        assert!(matches!(cli.command, Commands::Wiki(WikiCommand::Search(_))));
    }

    #[test]
    fn test_parse_work_item_get() {
        let cli = Cli::try_parse_from([
            "azdo", "work-item", "get", "-i", "1,2,3", "-e", "relations", "--error-policy", "2",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::WorkItem(WorkItemCommand::Get(_))
        ));
    }

    #[test]
    fn test_work_item_get_rejects_bad_input() {
        for args in [
            vec!["azdo", "work-item", "get"],
            vec!["azdo", "work-item", "get", "-i", "1,x"],
            vec!["azdo", "work-item", "get", "-i", "1", "-e", "everything"],
            vec!["azdo", "work-item", "get", "-i", "1", "-f", "System.Title", "-e", "all"],
        ] {
            assert!(Cli::try_parse_from(args.iter().copied()).is_err(), "{args:?}");
        }
    }

    #[test]
    fn test_work_item_create_needs_document_or_field() {
        let result = Cli::try_parse_from(["azdo", "work-item", "create", "-t", "Task"]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from([
            "azdo", "work-item", "create", "-t", "Task", "--field", "System.Title=Fix login",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::WorkItem(WorkItemCommand::Create(_))
        ));
    }

    #[test]
    fn test_work_item_update_rejects_malformed_field() {
        let result = Cli::try_parse_from([
            "azdo", "work-item", "update", "-i", "5", "--field", "System.State",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_work_item_list_search_and_comments() {
        for args in [
            vec!["azdo", "work-item", "list", "-q", "SELECT [System.Id] FROM WorkItems"],
            vec!["azdo", "work-item", "search", "-s", "login", "--skip", "10"],
            vec!["azdo", "work-item", "comments", "-i", "7"],
            vec!["azdo", "work-item", "comment", "-i", "7", "-t", "Looks good"],
        ] {
            let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
            assert!(matches!(cli.command, Commands::WorkItem(_)), "{args:?}");
        }
    }
}
