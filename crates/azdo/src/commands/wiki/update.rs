//! `azdo wiki update` and `azdo wiki create-page` command implementation.

use std::path::PathBuf;

use azdo_client::{AzureDevOpsClient, DryRunResult, PageUpserter, UpsertOutcome, WikiPageRef};
use clap::Args;

use crate::error::CliError;
use crate::output::Output;
use crate::tools::upsert_report;

/// Which subcommand invoked the upsert.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum UpsertMode {
    Update,
    Create,
}

/// Arguments for the page upsert commands.
#[derive(Args)]
pub(crate) struct UpdateArgs {
    /// Wiki identifier (name or ID).
    #[arg(short, long)]
    wiki: String,

    /// Page path (a trailing .md is ignored).
    #[arg(short, long)]
    path: String,

    /// Page content in markdown format (literal \n becomes a newline).
    #[arg(
        short,
        long,
        required_unless_present = "file",
        conflicts_with = "file"
    )]
    content: Option<String>,

    /// Read page content from a file.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Comment for the revision.
    #[arg(long)]
    comment: Option<String>,

    /// Project name (defaults to the one in config).
    #[arg(long)]
    project: Option<String>,

    /// Preview what would happen without writing.
    #[arg(long)]
    dry_run: bool,
}

impl UpdateArgs {
    /// Execute the upsert command.
    ///
    /// # Errors
    ///
    /// Returns an error if the content cannot be read or the upsert fails.
    pub(crate) fn execute(
        self,
        client: &AzureDevOpsClient,
        output: &Output,
        mode: UpsertMode,
    ) -> Result<(), CliError> {
        let content = self.read_content()?;
        let page = WikiPageRef::new(&self.wiki, self.project.as_deref(), &self.path)?;
        let upserter = PageUpserter::new(client);

        if self.dry_run {
            let result = upserter.dry_run(&page, &content)?;
            print_dry_run_result(output, &result);
            return Ok(());
        }

        let outcome = upserter.upsert(&page, &content, self.comment.as_deref())?;
        print_upsert_status(output, &page, &outcome, mode);
        output.json(&upsert_report(&page, &content, &outcome))
    }

    fn read_content(&self) -> Result<String, CliError> {
        match (&self.content, &self.file) {
            (Some(content), _) => Ok(content.clone()),
            (None, Some(file)) => Ok(std::fs::read_to_string(file)?),
            (None, None) => Err(CliError::Validation(
                "either --content or --file is required".to_owned(),
            )),
        }
    }
}

fn print_dry_run_result(output: &Output, result: &DryRunResult) {
    output.highlight("\n[DRY RUN] No changes made.");
    output.info(&format!("Path: {}", result.path));

    if !result.exists {
        output.info(&format!(
            "Page does not exist; it would be created ({} bytes).",
            result.content_length
        ));
    } else if result.unchanged {
        output.success("Content is identical; no write would be issued.");
    } else {
        output.info(&format!(
            "Page would be updated ({} bytes) with If-Match {}.",
            result.content_length,
            result.etag.as_deref().unwrap_or("(none)")
        ));
    }
}

fn print_upsert_status(
    output: &Output,
    page: &WikiPageRef,
    outcome: &UpsertOutcome,
    mode: UpsertMode,
) {
    if outcome.unchanged {
        output.success(&format!("Page {} is already up to date.", page.path()));
    } else if outcome.created {
        output.success(&format!("Created page {}.", page.path()));
    } else if mode == UpsertMode::Create {
        output.warning(&format!(
            "Page {} already existed and was updated.",
            page.path()
        ));
    } else {
        output.success(&format!("Updated page {}.", page.path()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(content: Option<&str>, file: Option<PathBuf>) -> UpdateArgs {
        UpdateArgs {
            wiki: "W".to_owned(),
            path: "/Home".to_owned(),
            content: content.map(str::to_owned),
            file,
            comment: None,
            project: None,
            dry_run: false,
        }
    }

    #[test]
    fn test_read_content_inline() {
        assert_eq!(args(Some("hi"), None).read_content().unwrap(), "hi");
    }

    #[test]
    fn test_read_content_missing_file() {
        let err = args(None, Some(PathBuf::from("/nonexistent/page.md")))
            .read_content()
            .unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }

    #[test]
    fn test_read_content_requires_source() {
        let err = args(None, None).read_content().unwrap_err();
        assert!(matches!(err, CliError::Validation(_)));
    }
}
