//! Page operations for the wiki API.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use super::{AzureDevOpsClient, encode_component, header_value};
use crate::error::WikiError;
use crate::gateway::{GatewayResponse, PageWrite, WikiGateway};
use crate::page_ref::WikiPageRef;
use crate::types::{PagesBatchRequest, WikiPage, WikiPageBatch, WikiPageDetail};

/// Body of a pages batch response.
#[derive(Deserialize)]
struct PageDetailList {
    #[serde(default)]
    value: Vec<WikiPageDetail>,
}

fn require(value: &str, what: &str) -> Result<(), WikiError> {
    if value.trim().is_empty() {
        return Err(WikiError::InvalidParams(format!("{what} is required")));
    }
    Ok(())
}

impl AzureDevOpsClient {
    /// Pages endpoint URL for a page.
    fn page_url(&self, page: &WikiPageRef, include_content: bool) -> String {
        let mut url = format!(
            "{}/wikis/{}/pages?path={}",
            self.wiki_api_url(page.project()),
            encode_component(page.wiki()),
            encode_component(page.path())
        );
        if include_content {
            url.push_str("&includeContent=true");
        }
        url.push_str("&api-version=");
        url.push_str(&self.api_version);
        url
    }

    fn get_page_response(
        &self,
        page: &WikiPageRef,
        include_content: bool,
    ) -> Result<GatewayResponse, WikiError> {
        let url = self.page_url(page, include_content);

        info!("Getting page {} in wiki {}", page.path(), page.wiki());

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .call()?;

        Ok(Self::read_response(response)?)
    }

    /// Get a page, failing when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`WikiError::WikiNotFound`] or [`WikiError::PageNotFound`] on
    /// 404, and [`WikiError::Api`] on any other non-success status.
    pub fn read_page(
        &self,
        page: &WikiPageRef,
        include_content: bool,
    ) -> Result<WikiPage, WikiError> {
        let response = self.get_page_response(page, include_content)?;
        if !response.is_success() {
            return Err(WikiError::from_page_response(
                response,
                page.wiki(),
                page.path(),
            ));
        }
        response.json()
    }

    /// List the pages of a wiki, one batch at a time.
    ///
    /// Pass the returned `continuation_token` back in `request` to fetch the
    /// next batch.
    ///
    /// # Errors
    ///
    /// Returns [`WikiError::WikiNotFound`] when the wiki does not exist.
    pub fn list_pages(
        &self,
        wiki: &str,
        project: Option<&str>,
        request: &PagesBatchRequest<'_>,
    ) -> Result<WikiPageBatch, WikiError> {
        require(wiki, "wiki identifier")?;

        let url = format!(
            "{}/wikis/{}/pagesbatch?api-version={}",
            self.wiki_api_url(project),
            encode_component(wiki),
            self.api_version
        );
        let payload = serde_json::to_vec(request)?;

        info!("Listing up to {} pages in wiki {}", request.top, wiki);

        let response = self
            .agent
            .post(&url)
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&payload[..])?;

        let continuation_token = header_value(&response, "x-ms-continuationtoken");
        let response = Self::read_response(response)?;
        if !response.is_success() {
            return Err(WikiError::from_wiki_response(response, wiki));
        }

        let list: PageDetailList = response.json()?;
        debug!("Received {} pages", list.value.len());

        Ok(WikiPageBatch {
            pages: list.value,
            continuation_token,
        })
    }

    /// Full-text search within one wiki.
    ///
    /// The result is passed through as returned by the service.
    ///
    /// # Errors
    ///
    /// Returns [`WikiError::WikiNotFound`] when the wiki does not exist.
    pub fn search_pages(
        &self,
        wiki: &str,
        project: Option<&str>,
        search_text: &str,
        top: u32,
    ) -> Result<Value, WikiError> {
        require(wiki, "wiki identifier")?;
        require(search_text, "search text")?;

        let url = self.search_url(wiki, project, search_text, top);

        info!("Searching wiki {} for '{}'", wiki, search_text);

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .call()?;

        let response = Self::read_response(response)?;
        if !response.is_success() {
            return Err(WikiError::from_wiki_response(response, wiki));
        }
        response.json()
    }

    fn search_url(&self, wiki: &str, project: Option<&str>, search_text: &str, top: u32) -> String {
        format!(
            "{}/wikis/{}/searchResults?searchText={}&top={}&api-version={}",
            self.wiki_api_url(project),
            encode_component(wiki),
            encode_component(search_text),
            top,
            self.api_version
        )
    }
}

impl WikiGateway for AzureDevOpsClient {
    fn fetch_page(&self, page: &WikiPageRef) -> Result<GatewayResponse, WikiError> {
        self.get_page_response(page, true)
    }

    fn put_page(
        &self,
        page: &WikiPageRef,
        write: &PageWrite<'_>,
        if_match: Option<&str>,
    ) -> Result<GatewayResponse, WikiError> {
        let url = self.page_url(page, false);
        let payload = serde_json::to_vec(write)?;

        info!(
            "Writing page {} in wiki {} ({})",
            page.path(),
            page.wiki(),
            if if_match.is_some() { "conditional" } else { "unconditional" }
        );

        let mut request = self
            .agent
            .put(&url)
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json");
        if let Some(etag) = if_match {
            debug!("Sending If-Match {}", etag);
            request = request.header("If-Match", etag);
        }

        let response = request.send(&payload[..])?;
        Ok(Self::read_response(response)?)
    }
}
