//! Wiki container operations.

use tracing::info;

use super::{AzureDevOpsClient, encode_component};
use crate::error::WikiError;
use crate::gateway::GatewayResponse;
use crate::types::{Wiki, WikiCreate, WikiList};

impl AzureDevOpsClient {
    fn wikis_url(&self, project: Option<&str>) -> String {
        format!(
            "{}/wikis?api-version={}",
            self.wiki_api_url(project),
            self.api_version
        )
    }

    /// List all wikis in a project.
    pub fn list_wikis(&self, project: Option<&str>) -> Result<WikiList, WikiError> {
        let url = self.wikis_url(project);

        info!(
            "Listing wikis in project {}",
            project.unwrap_or(&self.project)
        );

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .call()?;

        expect_success(Self::read_response(response)?)?.json()
    }

    /// Get a wiki by name or ID.
    ///
    /// # Errors
    ///
    /// Returns [`WikiError::WikiNotFound`] on 404.
    pub fn get_wiki(&self, project: Option<&str>, wiki: &str) -> Result<Wiki, WikiError> {
        let url = format!(
            "{}/wikis/{}?api-version={}",
            self.wiki_api_url(project),
            encode_component(wiki),
            self.api_version
        );

        info!("Getting wiki {}", wiki);

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .call()?;

        let response = Self::read_response(response)?;
        if response.status == 404 {
            return Err(WikiError::WikiNotFound {
                wiki: wiki.to_owned(),
            });
        }
        expect_success(response)?.json()
    }

    /// Create a project wiki.
    ///
    /// `project` defaults to the client's project and is sent as the
    /// wiki's `projectId`.
    pub fn create_wiki(
        &self,
        name: &str,
        project: Option<&str>,
        mapped_path: Option<&str>,
    ) -> Result<Wiki, WikiError> {
        if name.trim().is_empty() {
            return Err(WikiError::InvalidParams("wiki name is required".to_owned()));
        }

        let project_id = project.unwrap_or(&self.project);
        let url = self.wikis_url(Some(project_id));
        let payload = serde_json::to_vec(&WikiCreate {
            name,
            project_id,
            wiki_type: "projectWiki",
            mapped_path,
        })?;

        info!("Creating wiki {} in project {}", name, project_id);

        let response = self
            .agent
            .post(&url)
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&payload[..])?;

        expect_success(Self::read_response(response)?)?.json()
    }
}

/// Turn any non-2xx response into [`WikiError::Api`].
fn expect_success(response: GatewayResponse) -> Result<GatewayResponse, WikiError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(WikiError::Api {
            status: response.status,
            path: None,
            body: response.body,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn client() -> AzureDevOpsClient {
        AzureDevOpsClient::new(
            "https://dev.azure.com/contoso",
            "Docs",
            "abc",
            "7.1",
            Duration::from_secs(5),
        )
    }

    #[test]
    fn test_wikis_url() {
        assert_eq!(
            client().wikis_url(None),
            "https://dev.azure.com/contoso/Docs/_apis/wiki/wikis?api-version=7.1"
        );
    }

    #[test]
    fn test_create_wiki_requires_name() {
        let err = client().create_wiki(" ", None, None).unwrap_err();
        assert!(matches!(err, WikiError::InvalidParams(_)));
    }

    #[test]
    fn test_expect_success_maps_error_status() {
        let response = GatewayResponse {
            status: 403,
            status_text: "Forbidden".to_owned(),
            etag: None,
            body: "denied".to_owned(),
        };
        let err = expect_success(response).unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "HTTP error: 403 for wiki - denied");
    }
}
