//! Azure DevOps REST API client.
//!
//! Provides a sync HTTP client for the wiki and work item tracking
//! endpoints, authenticated with a personal access token sent as HTTP Basic
//! credentials.

mod pages;
mod wikis;
mod work_items;

pub use work_items::WorkItemFetch;

use std::time::Duration;

use azdo_config::ConnectionSettings;
use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use ureq::Agent;
use ureq::http::Response;

use crate::gateway::GatewayResponse;

/// Characters left alone by JavaScript's `encodeURIComponent`.
const COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a path segment or query value.
fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT_ENCODE_SET).to_string()
}

/// Build the `Authorization` header value for a PAT.
fn basic_auth_header(pat: &str) -> String {
    format!("Basic {}", BASE64_STANDARD.encode(format!(":{pat}")))
}

/// Azure DevOps REST API client.
///
/// Constructed once by the caller and passed by reference to whatever needs
/// it; there is no shared global connection.
pub struct AzureDevOpsClient {
    agent: Agent,
    org_url: String,
    project: String,
    auth_header: String,
    api_version: String,
}

impl AzureDevOpsClient {
    /// Create a client.
    ///
    /// # Arguments
    /// * `org_url` - Organization URL, e.g. `https://dev.azure.com/contoso`
    /// * `project` - Project used when a request does not name one
    /// * `pat` - Personal access token
    /// * `api_version` - REST API version query parameter
    /// * `timeout` - Global timeout applied to every request
    pub fn new(
        org_url: &str,
        project: &str,
        pat: &str,
        api_version: &str,
        timeout: Duration,
    ) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            org_url: org_url.trim_end_matches('/').to_owned(),
            project: project.to_owned(),
            auth_header: basic_auth_header(pat),
            api_version: api_version.to_owned(),
        }
    }

    /// Create client from validated config values.
    pub fn from_settings(settings: &ConnectionSettings) -> Self {
        Self::new(
            &settings.org_url,
            &settings.project,
            &settings.pat,
            &settings.api_version,
            settings.timeout,
        )
    }

    /// Project used when a request does not name one.
    pub fn default_project(&self) -> &str {
        &self.project
    }

    /// Wiki API base URL for a project.
    fn wiki_api_url(&self, project: Option<&str>) -> String {
        let project = project.unwrap_or(&self.project);
        format!("{}/{}/_apis/wiki", self.org_url, encode_component(project))
    }

    /// Collect status, `ETag` and body from a response.
    fn read_response(response: Response<ureq::Body>) -> Result<GatewayResponse, ureq::Error> {
        let status = response.status();
        let etag = header_value(&response, "etag");

        let mut body_reader = response.into_body();
        let body = body_reader.read_to_string()?;

        Ok(GatewayResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_owned(),
            etag,
            body,
        })
    }
}

/// String value of a response header, if present and ASCII.
fn header_value(response: &Response<ureq::Body>, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> AzureDevOpsClient {
        AzureDevOpsClient::new(
            "https://dev.azure.com/contoso/",
            "Docs",
            "abc",
            "7.0",
            Duration::from_secs(5),
        )
    }

    #[test]
    fn test_basic_auth_header_uses_empty_user() {
        assert_eq!(basic_auth_header("abc"), "Basic OmFiYw==");
    }

    #[test]
    fn test_encode_component_matches_uri_component_rules() {
        assert_eq!(encode_component("/Docs/Home Page"), "%2FDocs%2FHome%20Page");
        assert_eq!(encode_component("a-b_c.d!e~f*g'h(i)"), "a-b_c.d!e~f*g'h(i)");
        assert_eq!(encode_component("Ü"), "%C3%9C");
    }

    #[test]
    fn test_wiki_api_url_uses_default_project() {
        let client = client();
        assert_eq!(
            client.wiki_api_url(None),
            "https://dev.azure.com/contoso/Docs/_apis/wiki"
        );
    }

    #[test]
    fn test_wiki_api_url_encodes_explicit_project() {
        let client = client();
        assert_eq!(
            client.wiki_api_url(Some("My Project")),
            "https://dev.azure.com/contoso/My%20Project/_apis/wiki"
        );
    }
}
