//! Work item tracking operations.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::{AzureDevOpsClient, encode_component};
use crate::error::WorkItemError;
use crate::gateway::GatewayResponse;
use crate::types::{
    CommentList, ErrorPolicy, PatchOperation, WiqlResult, WorkItem, WorkItemComment,
    WorkItemExpand, WorkItemList, WorkItemQueryResult, WorkItemSearchResponse,
    WorkItemSearchResult, WorkItemSummary,
};

/// Maximum number of IDs the work items endpoint accepts per request.
const MAX_BATCH_IDS: usize = 200;

/// Fields fetched for WIQL listings.
const LIST_FIELDS: [&str; 3] = ["System.Id", "System.State", "System.Title"];

/// Comments are only available in a preview revision of the API.
const COMMENTS_PREVIEW: &str = "-preview.3";

/// Host of the search service for `dev.azure.com` organizations.
const SEARCH_HOST: &str = "https://almsearch.dev.azure.com/";

/// Options of a work item batch fetch.
#[derive(Debug, Clone, Default)]
pub struct WorkItemFetch {
    /// Fields to return. When empty, `expand` applies instead.
    pub fields: Vec<String>,
    /// Return the work items as of this time (ISO 8601).
    pub as_of: Option<String>,
    /// Expansion; defaults to [`WorkItemExpand::All`] when no fields are given.
    pub expand: Option<WorkItemExpand>,
    /// How to treat missing IDs.
    pub error_policy: Option<ErrorPolicy>,
}

#[derive(Serialize)]
struct WiqlQuery<'a> {
    query: &'a str,
}

#[derive(Serialize)]
struct NewComment<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    #[serde(rename = "searchText")]
    search_text: &'a str,
    #[serde(rename = "$skip")]
    skip: u32,
    #[serde(rename = "$top")]
    top: u32,
}

impl AzureDevOpsClient {
    /// Work item tracking base URL for a project.
    fn wit_url(&self, project: Option<&str>) -> String {
        let project = project.unwrap_or(&self.project);
        format!("{}/{}/_apis/wit", self.org_url, encode_component(project))
    }

    /// Web UI link of a work item.
    fn work_item_edit_url(&self, project: Option<&str>, id: u64) -> String {
        let project = project.unwrap_or(&self.project);
        format!(
            "{}/{}/_workitems/edit/{id}",
            self.org_url,
            encode_component(project)
        )
    }

    /// Base URL of the search service.
    ///
    /// `dev.azure.com` organizations are served from a separate host; other
    /// installations serve search from the organization URL itself.
    fn search_base_url(&self) -> String {
        match self.org_url.strip_prefix("https://dev.azure.com/") {
            Some(org) => format!("{SEARCH_HOST}{org}"),
            None => self.org_url.clone(),
        }
    }

    fn work_items_batch_url(
        &self,
        ids: &[u64],
        options: &WorkItemFetch,
        project: Option<&str>,
    ) -> String {
        let ids = ids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let mut url = format!("{}/workitems?ids={ids}", self.wit_url(project));

        // The service rejects `fields` combined with `$expand`.
        if options.fields.is_empty() {
            let expand = options.expand.unwrap_or(WorkItemExpand::All);
            url.push_str("&$expand=");
            url.push_str(expand.as_str());
        } else {
            let fields = options
                .fields
                .iter()
                .map(|f| encode_component(f))
                .collect::<Vec<_>>()
                .join(",");
            url.push_str("&fields=");
            url.push_str(&fields);
        }
        if let Some(as_of) = &options.as_of {
            url.push_str("&asOf=");
            url.push_str(&encode_component(as_of));
        }
        if let Some(policy) = options.error_policy {
            url.push_str("&errorPolicy=");
            url.push_str(policy.as_str());
        }
        url.push_str("&api-version=");
        url.push_str(&self.api_version);
        url
    }

    /// Get work items by ID.
    ///
    /// IDs omitted by [`ErrorPolicy::Omit`] are dropped from the result.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemError::InvalidParams`] for an empty or oversized ID
    /// list and [`WorkItemError::NotFound`] when a single requested ID does
    /// not exist.
    pub fn get_work_items(
        &self,
        ids: &[u64],
        options: &WorkItemFetch,
        project: Option<&str>,
    ) -> Result<Vec<WorkItem>, WorkItemError> {
        if ids.is_empty() {
            return Err(WorkItemError::InvalidParams(
                "at least one work item ID is required".to_owned(),
            ));
        }
        if ids.len() > MAX_BATCH_IDS {
            return Err(WorkItemError::InvalidParams(format!(
                "at most {MAX_BATCH_IDS} work item IDs can be fetched at once"
            )));
        }

        let url = self.work_items_batch_url(ids, options, project);

        info!("Getting {} work item(s)", ids.len());

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .call()?;

        let single = (ids.len() == 1).then_some(ids[0]);
        let list: WorkItemList = parse(check(Self::read_response(response)?, single)?)?;
        Ok(list.value.into_iter().flatten().collect())
    }

    /// Run a WIQL query and summarize up to `top` matching work items.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemError::InvalidParams`] for an empty query.
    pub fn query_work_items(
        &self,
        query: &str,
        top: usize,
        project: Option<&str>,
    ) -> Result<WorkItemQueryResult, WorkItemError> {
        if query.trim().is_empty() {
            return Err(WorkItemError::InvalidParams(
                "a WIQL query is required".to_owned(),
            ));
        }

        let url = format!(
            "{}/wiql?api-version={}",
            self.wit_url(project),
            self.api_version
        );
        let payload = serde_json::to_vec(&WiqlQuery { query })?;

        info!("Running WIQL query");
        debug!("WIQL: {}", query);

        let response = self
            .agent
            .post(&url)
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&payload[..])?;

        let result: WiqlResult = parse(check(Self::read_response(response)?, None)?)?;
        let total_items = result.work_items.len();
        let ids: Vec<u64> = result
            .work_items
            .iter()
            .map(|r| r.id)
            .take(top.min(MAX_BATCH_IDS))
            .collect();

        let work_items = if ids.is_empty() {
            Vec::new()
        } else {
            let options = WorkItemFetch {
                fields: LIST_FIELDS.iter().map(|&f| f.to_owned()).collect(),
                ..WorkItemFetch::default()
            };
            self.get_work_items(&ids, &options, project)?
                .iter()
                .map(|item| {
                    let fallback = self.work_item_edit_url(project, item.id);
                    WorkItemSummary::from_work_item(item, false, fallback)
                })
                .collect()
        };

        Ok(WorkItemQueryResult {
            as_of: result.as_of,
            total_items,
            work_items,
        })
    }

    /// Summaries of work items by ID, including descriptions.
    pub fn summarize_work_items(
        &self,
        ids: &[u64],
        options: &WorkItemFetch,
        project: Option<&str>,
    ) -> Result<Vec<WorkItemSummary>, WorkItemError> {
        Ok(self
            .get_work_items(ids, options, project)?
            .iter()
            .map(|item| {
                let fallback = self.work_item_edit_url(project, item.id);
                WorkItemSummary::from_work_item(item, true, fallback)
            })
            .collect())
    }

    /// Create a work item of `work_item_type` from a JSON Patch document.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemError::InvalidParams`] when the type or document is
    /// empty.
    pub fn create_work_item(
        &self,
        work_item_type: &str,
        document: &[PatchOperation],
        project: Option<&str>,
    ) -> Result<WorkItem, WorkItemError> {
        if work_item_type.trim().is_empty() || document.is_empty() {
            return Err(WorkItemError::InvalidParams(
                "work item type and patch document are required".to_owned(),
            ));
        }

        let url = format!(
            "{}/workitems/${}?api-version={}",
            self.wit_url(project),
            encode_component(work_item_type),
            self.api_version
        );
        let payload = serde_json::to_vec(document)?;

        info!(
            "Creating {} with {} field operation(s)",
            work_item_type,
            document.len()
        );

        let response = self
            .agent
            .post(&url)
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json-patch+json")
            .header("Accept", "application/json")
            .send(&payload[..])?;

        parse(check(Self::read_response(response)?, None)?)
    }

    /// Apply a JSON Patch document to a work item.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemError::NotFound`] when the work item does not exist.
    pub fn update_work_item(
        &self,
        id: u64,
        document: &[PatchOperation],
        project: Option<&str>,
    ) -> Result<WorkItem, WorkItemError> {
        if document.is_empty() {
            return Err(WorkItemError::InvalidParams(
                "patch document is required".to_owned(),
            ));
        }

        let url = format!(
            "{}/workitems/{id}?api-version={}",
            self.wit_url(project),
            self.api_version
        );
        let payload = serde_json::to_vec(document)?;

        info!(
            "Updating work item {} with {} operation(s)",
            id,
            document.len()
        );

        let response = self
            .agent
            .patch(&url)
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json-patch+json")
            .header("Accept", "application/json")
            .send(&payload[..])?;

        parse(check(Self::read_response(response)?, Some(id))?)
    }

    fn comments_url(&self, id: u64, project: Option<&str>) -> String {
        format!(
            "{}/workItems/{id}/comments?api-version={}{COMMENTS_PREVIEW}",
            self.wit_url(project),
            self.api_version
        )
    }

    /// Comments of a work item.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemError::NotFound`] when the work item does not exist.
    pub fn get_comments(
        &self,
        id: u64,
        project: Option<&str>,
    ) -> Result<CommentList, WorkItemError> {
        let url = self.comments_url(id, project);

        info!("Getting comments of work item {}", id);

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .call()?;

        let mut list: CommentList = parse(check(Self::read_response(response)?, Some(id))?)?;
        for comment in &mut list.comments {
            comment.work_item_id.get_or_insert(id);
        }
        Ok(list)
    }

    /// Add a comment to a work item.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemError::InvalidParams`] for blank text and
    /// [`WorkItemError::NotFound`] when the work item does not exist.
    pub fn add_comment(
        &self,
        id: u64,
        text: &str,
        project: Option<&str>,
    ) -> Result<WorkItemComment, WorkItemError> {
        if text.trim().is_empty() {
            return Err(WorkItemError::InvalidParams(
                "comment text is required".to_owned(),
            ));
        }

        let url = self.comments_url(id, project);
        let payload = serde_json::to_vec(&NewComment { text })?;

        info!("Adding comment to work item {}", id);

        let response = self
            .agent
            .post(&url)
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&payload[..])?;

        let mut comment: WorkItemComment =
            parse(check(Self::read_response(response)?, Some(id))?)?;
        comment.work_item_id.get_or_insert(id);
        Ok(comment)
    }

    /// Full-text search across work items of the organization.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemError::InvalidParams`] for blank search text.
    pub fn search_work_items(
        &self,
        search_text: &str,
        top: u32,
        skip: u32,
    ) -> Result<WorkItemSearchResult, WorkItemError> {
        if search_text.trim().is_empty() {
            return Err(WorkItemError::InvalidParams(
                "search text is required".to_owned(),
            ));
        }

        let url = format!(
            "{}/_apis/search/workitemsearchresults?api-version={}",
            self.search_base_url(),
            self.api_version
        );
        let payload = serde_json::to_vec(&SearchRequest {
            search_text,
            skip,
            top,
        })?;

        info!("Searching work items for '{}'", search_text);

        let response = self
            .agent
            .post(&url)
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&payload[..])?;

        let found: WorkItemSearchResponse = parse(check(Self::read_response(response)?, None)?)?;
        let work_items = found
            .results
            .iter()
            .filter_map(|hit| {
                let id = hit.id()?;
                let url = self.work_item_edit_url(hit.project_name(), id);
                Some(WorkItemSummary::from_search_hit(id, hit, url))
            })
            .collect();

        Ok(WorkItemSearchResult {
            count: found.count,
            work_items,
        })
    }
}

/// Turn a non-2xx response into a [`WorkItemError`].
fn check(response: GatewayResponse, id: Option<u64>) -> Result<GatewayResponse, WorkItemError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(WorkItemError::from_response(response, id))
    }
}

fn parse<T: DeserializeOwned>(response: GatewayResponse) -> Result<T, WorkItemError> {
    Ok(serde_json::from_str(&response.body)?)
}
