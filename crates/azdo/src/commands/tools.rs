//! `azdo tools` command implementation.

use clap::Subcommand;
use serde_json::Value;

use super::ConnectionArgs;
use crate::error::CliError;
use crate::output::Output;
use crate::tools::{ToolResult, call_tool, definitions};

/// Agent tool commands.
#[derive(Subcommand)]
pub(crate) enum ToolsCommand {
    /// Print the tool definitions as JSON.
    List,
    /// Invoke a tool and print its result payload.
    Call {
        /// Tool name, e.g. `update_wiki_page`.
        name: String,

        /// Tool arguments as a JSON object.
        #[arg(short, long, default_value = "{}")]
        args: String,
    },
}

impl ToolsCommand {
    /// Execute the tools command.
    pub(crate) fn execute(
        self,
        connection: &ConnectionArgs,
        output: &Output,
    ) -> Result<(), CliError> {
        match self {
            Self::List => output.json(&definitions()),
            Self::Call { name, args } => {
                let args: Value = serde_json::from_str(&args).map_err(|err| {
                    CliError::Validation(format!("--args must be a JSON object: {err}"))
                })?;
                let client = connection.client()?;
                let result = call_tool(&client, &name, args);
                if result.is_error {
                    output.warning(&format!("Tool {name} reported an error"));
                }
                output.json::<ToolResult>(&result)
            }
        }
    }
}
