//! Configuration management for azdo.
//!
//! Parses `azdo.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings (flags or their environment variables) can be applied during
//! load via [`CliSettings`] and take precedence over file values.
//!
//! ## Environment Variable Expansion
//!
//! String values in the `[azure_devops]` section support:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! ## Example
//!
//! ```toml
//! [azure_devops]
//! org_url = "https://dev.azure.com/contoso"
//! project = "Docs"
//! pat = "${AZURE_DEVOPS_PAT}"
//! timeout_secs = 30
//! ```

mod expand;

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "azdo.toml";

/// Default REST API version sent with every request.
const DEFAULT_API_VERSION: &str = "7.0";

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Default)]
pub struct CliSettings {
    /// Override organization URL.
    pub org_url: Option<String>,
    /// Override default project.
    pub project: Option<String>,
    /// Override personal access token.
    pub pat: Option<String>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Azure DevOps connection section.
    pub azure_devops: AzureDevOpsConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// `[azure_devops]` section as parsed from TOML.
#[derive(Deserialize)]
#[serde(default)]
pub struct AzureDevOpsConfig {
    /// Organization URL, e.g. `https://dev.azure.com/contoso`.
    pub org_url: Option<String>,
    /// Project used when a command does not name one.
    pub project: Option<String>,
    /// Personal access token.
    pub pat: Option<String>,
    /// REST API version query parameter.
    pub api_version: String,
    /// Global HTTP timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for AzureDevOpsConfig {
    fn default() -> Self {
        Self {
            org_url: None,
            project: None,
            pat: None,
            api_version: DEFAULT_API_VERSION.to_owned(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl fmt::Debug for AzureDevOpsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AzureDevOpsConfig")
            .field("org_url", &self.org_url)
            .field("project", &self.project)
            .field("pat", &self.pat.as_ref().map(|_| "<redacted>"))
            .field("api_version", &self.api_version)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Validated connection settings ready to build a client from.
pub struct ConnectionSettings {
    /// Organization URL without trailing slash.
    pub org_url: String,
    /// Default project.
    pub project: String,
    /// Personal access token.
    pub pat: String,
    /// REST API version.
    pub api_version: String,
    /// Global HTTP timeout.
    pub timeout: Duration,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`azure_devops.pat`").
        field: String,
        /// Error message (e.g., "${`AZURE_DEVOPS_PAT`} not set").
        message: String,
    },
}

/// Require a field to be present and non-empty.
fn require_non_empty<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, ConfigError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::Validation(format!("{field} is required"))),
    }
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `azdo.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Get validated connection settings.
    ///
    /// Use this instead of reading `azure_devops` directly when a command
    /// needs to talk to the service.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if a field is missing or invalid.
    pub fn require_azure_devops(&self) -> Result<ConnectionSettings, ConfigError> {
        let section = &self.azure_devops;

        let org_url = require_non_empty(section.org_url.as_deref(), "azure_devops.org_url")?;
        require_http_url(org_url, "azure_devops.org_url")?;
        let project = require_non_empty(section.project.as_deref(), "azure_devops.project")?;
        let pat = require_non_empty(section.pat.as_deref(), "azure_devops.pat")?;
        require_non_empty(Some(section.api_version.as_str()), "azure_devops.api_version")?;

        if section.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "azure_devops.timeout_secs must be greater than 0".to_owned(),
            ));
        }

        Ok(ConnectionSettings {
            org_url: org_url.trim_end_matches('/').to_owned(),
            project: project.to_owned(),
            pat: pat.to_owned(),
            api_version: section.api_version.clone(),
            timeout: Duration::from_secs(section.timeout_secs),
        })
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        let section = &mut self.azure_devops;
        if let Some(org_url) = &settings.org_url {
            section.org_url = Some(org_url.clone());
        }
        if let Some(project) = &settings.project {
            section.project = Some(project.clone());
        }
        if let Some(pat) = &settings.pat {
            section.pat = Some(pat.clone());
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let section = &mut self.azure_devops;
        expand::expand_in_place(&mut section.org_url, "azure_devops.org_url")?;
        expand::expand_in_place(&mut section.project, "azure_devops.project")?;
        expand::expand_in_place(&mut section.pat, "azure_devops.pat")?;
        section.api_version = expand::expand_env(&section.api_version, "azure_devops.api_version")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn full_config() -> Config {
        toml::from_str(
            r#"
[azure_devops]
org_url = "https://dev.azure.com/contoso/"
project = "Docs"
pat = "token123"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.azure_devops.org_url, None);
        assert_eq!(config.azure_devops.api_version, "7.0");
        assert_eq!(config.azure_devops.timeout_secs, 30);
    }

    #[test]
    fn test_parse_azure_devops_section() {
        let config: Config = toml::from_str(
            r#"
[azure_devops]
org_url = "https://dev.azure.com/contoso"
project = "Docs"
pat = "token123"
api_version = "7.1"
timeout_secs = 10
"#,
        )
        .unwrap();

        let section = &config.azure_devops;
        assert_eq!(section.org_url.as_deref(), Some("https://dev.azure.com/contoso"));
        assert_eq!(section.project.as_deref(), Some("Docs"));
        assert_eq!(section.pat.as_deref(), Some("token123"));
        assert_eq!(section.api_version, "7.1");
        assert_eq!(section.timeout_secs, 10);
    }

    #[test]
    fn test_require_azure_devops_trims_trailing_slash() {
        let settings = full_config().require_azure_devops().unwrap();
        assert_eq!(settings.org_url, "https://dev.azure.com/contoso");
        assert_eq!(settings.project, "Docs");
        assert_eq!(settings.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_require_azure_devops_missing_pat() {
        let mut config = full_config();
        config.azure_devops.pat = None;

        let err = config.require_azure_devops().err().unwrap();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("azure_devops.pat"));
    }

    #[test]
    fn test_require_azure_devops_rejects_blank_project() {
        let mut config = full_config();
        config.azure_devops.project = Some("  ".to_owned());

        let err = config.require_azure_devops().err().unwrap();
        assert!(err.to_string().contains("azure_devops.project"));
    }

    #[test]
    fn test_require_azure_devops_rejects_non_http_url() {
        let mut config = full_config();
        config.azure_devops.org_url = Some("dev.azure.com/contoso".to_owned());

        let err = config.require_azure_devops().err().unwrap();
        assert!(err.to_string().contains("http://"));
    }

    #[test]
    fn test_require_azure_devops_rejects_zero_timeout() {
        let mut config = full_config();
        config.azure_devops.timeout_secs = 0;

        let err = config.require_azure_devops().err().unwrap();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_apply_cli_settings_overrides_only_given_fields() {
        let mut config = full_config();
        let overrides = CliSettings {
            project: Some("Platform".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.azure_devops.project.as_deref(), Some("Platform"));
        assert_eq!(config.azure_devops.pat.as_deref(), Some("token123"));
    }

    #[test]
    fn test_cli_settings_fill_missing_file_values() {
        let mut config = Config::default();
        let overrides = CliSettings {
            org_url: Some("https://dev.azure.com/fabrikam".to_owned()),
            project: Some("Wiki".to_owned()),
            pat: Some("abc".to_owned()),
        };

        config.apply_cli_settings(&overrides);

        let settings = config.require_azure_devops().unwrap();
        assert_eq!(settings.org_url, "https://dev.azure.com/fabrikam");
        assert_eq!(settings.pat, "abc");
    }

    #[test]
    fn test_debug_redacts_pat() {
        let rendered = format!("{:?}", full_config().azure_devops);
        assert!(!rendered.contains("token123"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/azdo.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_from_file_expands_env() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("AZDO_CONFIG_TEST_PAT", "from-env");
        }
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            r#"
[azure_devops]
org_url = "https://dev.azure.com/contoso"
project = "Docs"
pat = "${AZDO_CONFIG_TEST_PAT}"
"#,
        )
        .unwrap();

        let config = Config::load(Some(path.as_path()), None).unwrap();

        assert_eq!(config.azure_devops.pat.as_deref(), Some("from-env"));
        assert_eq!(config.config_path, Some(path));
        unsafe {
            std::env::remove_var("AZDO_CONFIG_TEST_PAT");
        }
    }

    #[test]
    fn test_discover_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();

        let found = Config::discover_config(&nested).unwrap();

        assert_eq!(found, dir.path().join(CONFIG_FILENAME));
    }

    #[test]
    fn test_cli_settings_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            r#"
[azure_devops]
org_url = "https://dev.azure.com/contoso"
project = "Docs"
pat = "file-pat"
"#,
        )
        .unwrap();
        let overrides = CliSettings {
            pat: Some("flag-pat".to_owned()),
            ..Default::default()
        };

        let config = Config::load(Some(path.as_path()), Some(&overrides)).unwrap();

        assert_eq!(config.azure_devops.pat.as_deref(), Some("flag-pat"));
    }
}
