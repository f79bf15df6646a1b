//! Connection options shared by every command.

use std::path::PathBuf;

use azdo_config::{CliSettings, Config};
use azdo_client::AzureDevOpsClient;
use clap::Args;

use crate::error::CliError;

/// Where to find the organization and how to authenticate.
#[derive(Args)]
pub(crate) struct ConnectionArgs {
    /// Path to configuration file (default: auto-discover azdo.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Organization URL (overrides config).
    #[arg(long, global = true, env = "AZURE_DEVOPS_ORG_URL")]
    org_url: Option<String>,

    /// Default project (overrides config).
    #[arg(long = "default-project", global = true, env = "AZURE_DEVOPS_PROJECT")]
    default_project: Option<String>,

    /// Personal access token (overrides config).
    #[arg(long, global = true, env = "AZURE_DEVOPS_PAT", hide_env_values = true)]
    pat: Option<String>,
}

impl ConnectionArgs {
    /// Load config, apply overrides and build a client.
    pub(crate) fn client(&self) -> Result<AzureDevOpsClient, CliError> {
        let cli_settings = CliSettings {
            org_url: self.org_url.clone(),
            project: self.default_project.clone(),
            pat: self.pat.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let settings = config.require_azure_devops()?;
        Ok(AzureDevOpsClient::from_settings(&settings))
    }
}
