//! Work item tracking types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Work item as returned by the work item endpoints.
///
/// Field values are kept as raw JSON keyed by reference name
/// (`System.Title`, `System.State`, ...).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkItem {
    /// Work item ID.
    pub id: u64,
    /// Revision number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rev: Option<u64>,
    /// Field values by reference name.
    #[serde(default)]
    pub fields: Map<String, Value>,
    /// REST URL of the work item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Hypermedia links (`html`, `self`, ...).
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
}

impl WorkItem {
    /// String value of a field.
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    /// Web UI link from `_links.html.href`.
    pub fn html_url(&self) -> Option<&str> {
        self.links
            .as_ref()
            .and_then(|links| links.pointer("/html/href"))
            .and_then(Value::as_str)
    }

    fn identity(&self, name: &str) -> Option<IdentityRef> {
        self.fields.get(name).and_then(IdentityRef::from_field)
    }
}

/// Batch response of the work items endpoint.
///
/// With [`ErrorPolicy::Omit`] missing items come back as `null`.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkItemList {
    /// Number of entries.
    #[serde(default)]
    pub count: usize,
    /// Work items, `None` for omitted IDs.
    #[serde(default)]
    pub value: Vec<Option<WorkItem>>,
}

/// Person reference inside identity fields and comments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityRef {
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Identity ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Identity REST URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Account name, usually the e-mail address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_name: Option<String>,
    /// Subject descriptor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<String>,
}

impl IdentityRef {
    /// Read an identity field, which is either an object or a plain
    /// `"Name <mail>"` string.
    fn from_field(value: &Value) -> Option<Self> {
        match value {
            Value::String(name) => Some(Self {
                display_name: Some(name.clone()),
                ..Self::default()
            }),
            Value::Object(_) => serde_json::from_value(value.clone()).ok(),
            _ => None,
        }
    }
}

/// `$expand` option of the work items endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkItemExpand {
    /// No expansion.
    None,
    /// Include relations.
    Relations,
    /// Include all fields.
    Fields,
    /// Include hypermedia links.
    Links,
    /// Everything.
    All,
}

impl WorkItemExpand {
    /// Query parameter value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Relations => "relations",
            Self::Fields => "fields",
            Self::Links => "links",
            Self::All => "all",
        }
    }
}

impl fmt::Display for WorkItemExpand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts names (case-insensitive) or the service's numeric values 0-4.
impl FromStr for WorkItemExpand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "0" => Ok(Self::None),
            "relations" | "1" => Ok(Self::Relations),
            "fields" | "2" => Ok(Self::Fields),
            "links" | "3" => Ok(Self::Links),
            "all" | "4" => Ok(Self::All),
            other => Err(format!(
                "unknown expand option '{other}' (expected none, relations, fields, links or all)"
            )),
        }
    }
}

/// `errorPolicy` option of the work items endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Fail the whole request when an ID is missing.
    Fail,
    /// Return `null` for missing IDs.
    Omit,
}

impl ErrorPolicy {
    /// Query parameter value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fail => "fail",
            Self::Omit => "omit",
        }
    }
}

/// Accepts names (case-insensitive) or the service's numeric values 1-2.
impl FromStr for ErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail" | "1" => Ok(Self::Fail),
            "omit" | "2" => Ok(Self::Omit),
            other => Err(format!(
                "unknown error policy '{other}' (expected fail or omit)"
            )),
        }
    }
}

/// JSON Patch operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    /// Add or set a value.
    Add,
    /// Remove a value.
    Remove,
    /// Replace a value.
    Replace,
    /// Assert a value.
    Test,
    /// Move a value.
    Move,
    /// Copy a value.
    Copy,
}

/// One JSON Patch operation of a create or update document.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PatchOperation {
    /// Operation kind.
    pub op: PatchOp,
    /// Target path, e.g. `/fields/System.Title`.
    pub path: String,
    /// Source path for `move` and `copy`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Value for `add`, `replace` and `test`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl PatchOperation {
    /// `add` operation that sets a field.
    pub fn add_field(field: &str, value: impl Into<Value>) -> Self {
        Self {
            op: PatchOp::Add,
            path: format!("/fields/{field}"),
            from: None,
            value: Some(value.into()),
        }
    }
}

/// Reference to a work item in a WIQL result.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkItemReference {
    /// Work item ID.
    pub id: u64,
    /// REST URL.
    #[serde(default)]
    pub url: Option<String>,
}

/// Response of a flat WIQL query.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WiqlResult {
    /// Time the query was evaluated.
    #[serde(default)]
    pub as_of: Option<String>,
    /// Matching work items in query order.
    #[serde(default)]
    pub work_items: Vec<WorkItemReference>,
}

/// Comment on a work item.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItemComment {
    /// Comment ID.
    pub id: u64,
    /// Comment text (HTML).
    #[serde(default)]
    pub text: String,
    /// Owning work item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_item_id: Option<u64>,
    /// Author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<IdentityRef>,
    /// Creation time (ISO 8601).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    /// REST URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Comments response.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentList {
    /// Total number of comments on the work item.
    #[serde(default)]
    pub total_count: u64,
    /// Comments in this response.
    #[serde(default)]
    pub comments: Vec<WorkItemComment>,
}

/// Project reference in a search hit.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchProject {
    /// Project name.
    #[serde(default)]
    pub name: Option<String>,
}

/// One hit of the work item search endpoint.
///
/// Field keys are lowercase reference names (`system.id`, `system.title`).
#[derive(Debug, Clone, Deserialize)]
pub struct WorkItemSearchHit {
    /// Selected field values.
    #[serde(default)]
    pub fields: Map<String, Value>,
    /// Project the work item belongs to.
    #[serde(default)]
    pub project: Option<SearchProject>,
}

impl WorkItemSearchHit {
    /// Work item ID, sent either as a number or a string.
    pub fn id(&self) -> Option<u64> {
        match self.fields.get("system.id")? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    fn field_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    /// Project name, if the hit carries one.
    pub fn project_name(&self) -> Option<&str> {
        self.project.as_ref().and_then(|p| p.name.as_deref())
    }
}

/// Response of the work item search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkItemSearchResponse {
    /// Total number of matches.
    #[serde(default)]
    pub count: u64,
    /// Hits in this page.
    #[serde(default)]
    pub results: Vec<WorkItemSearchHit>,
}

/// Compact view of a work item used by listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkItemSummary {
    /// Work item ID.
    pub id: u64,
    /// `System.State`, or `Unknown`.
    pub state: String,
    /// `System.Title`, or `Untitled`.
    pub title: String,
    /// `System.Description`, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Web UI link.
    pub url: String,
}

impl WorkItemSummary {
    /// Summarize a work item. `fallback_url` is used when the item has no
    /// `html` link.
    pub fn from_work_item(item: &WorkItem, with_description: bool, fallback_url: String) -> Self {
        Self {
            id: item.id,
            state: item.field_str("System.State").unwrap_or("Unknown").to_owned(),
            title: item.field_str("System.Title").unwrap_or("Untitled").to_owned(),
            description: with_description
                .then(|| item.field_str("System.Description").unwrap_or_default().to_owned()),
            url: item.html_url().map_or(fallback_url, str::to_owned),
        }
    }

    /// Summarize a search hit.
    pub fn from_search_hit(id: u64, hit: &WorkItemSearchHit, url: String) -> Self {
        Self {
            id,
            state: hit.field_str("system.state").unwrap_or("Unknown").to_owned(),
            title: hit.field_str("system.title").unwrap_or("Untitled").to_owned(),
            description: None,
            url,
        }
    }
}

/// Detailed view of a work item returned after create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItemDetails {
    /// Work item ID.
    pub id: u64,
    /// Revision number.
    pub rev: Option<u64>,
    /// `System.TeamProject`.
    pub team_project: Option<String>,
    /// `System.AreaPath`.
    pub area_path: Option<String>,
    /// `System.IterationPath`.
    pub iteration_path: Option<String>,
    /// `System.Title`.
    pub title: Option<String>,
    /// `System.Description`.
    pub description: Option<String>,
    /// `System.State`.
    pub state: Option<String>,
    /// REST URL.
    pub url: Option<String>,
    /// `System.CreatedBy`.
    pub created_by: Option<IdentityRef>,
    /// `System.CreatedDate`.
    pub created_date: Option<String>,
    /// `System.AssignedTo`.
    pub assigned_to: Option<IdentityRef>,
}

impl From<&WorkItem> for WorkItemDetails {
    fn from(item: &WorkItem) -> Self {
        let text = |name: &str| item.field_str(name).map(str::to_owned);
        Self {
            id: item.id,
            rev: item.rev,
            team_project: text("System.TeamProject"),
            area_path: text("System.AreaPath"),
            iteration_path: text("System.IterationPath"),
            title: text("System.Title"),
            description: text("System.Description"),
            state: text("System.State"),
            url: item.url.clone(),
            created_by: item.identity("System.CreatedBy"),
            created_date: text("System.CreatedDate"),
            assigned_to: item.identity("System.AssignedTo"),
        }
    }
}

/// Result of a WIQL listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItemQueryResult {
    /// Time the query was evaluated.
    pub as_of: Option<String>,
    /// Number of work items the query matched.
    pub total_items: usize,
    /// Summaries of the returned work items.
    pub work_items: Vec<WorkItemSummary>,
}

/// Result of a work item text search.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItemSearchResult {
    /// Total number of matches.
    pub count: u64,
    /// Summaries of the returned hits.
    pub work_items: Vec<WorkItemSummary>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn bug() -> WorkItem {
        serde_json::from_value(json!({
            "id": 42,
            "rev": 3,
            "fields": {
                "System.TeamProject": "Docs",
                "System.AreaPath": "Docs\\Web",
                "System.Title": "Broken link",
                "System.State": "Active",
                "System.CreatedBy": {
                    "displayName": "Dana Li",
                    "id": "u1",
                    "uniqueName": "dana@contoso.com",
                    "imageUrl": "https://example.invalid/avatar"
                },
                "System.AssignedTo": "Sam Ortiz <sam@contoso.com>"
            },
            "url": "https://dev.azure.com/contoso/_apis/wit/workItems/42",
            "_links": {"html": {"href": "https://dev.azure.com/contoso/Docs/_workitems/edit/42"}}
        }))
        .unwrap()
    }

    #[test]
    fn test_summary_prefers_html_link() {
        let summary = WorkItemSummary::from_work_item(&bug(), false, "fallback".to_owned());

        assert_eq!(
            summary,
            WorkItemSummary {
                id: 42,
                state: "Active".to_owned(),
                title: "Broken link".to_owned(),
                description: None,
                url: "https://dev.azure.com/contoso/Docs/_workitems/edit/42".to_owned(),
            }
        );
    }

    #[test]
    fn test_summary_defaults_for_missing_fields() {
        let item: WorkItem = serde_json::from_value(json!({"id": 5})).unwrap();

        let summary = WorkItemSummary::from_work_item(&item, true, "edit/5".to_owned());

        assert_eq!(summary.state, "Unknown");
        assert_eq!(summary.title, "Untitled");
        assert_eq!(summary.description.as_deref(), Some(""));
        assert_eq!(summary.url, "edit/5");
    }

    #[test]
    fn test_details_filter_identity_fields() {
        let details = WorkItemDetails::from(&bug());

        assert_eq!(details.rev, Some(3));
        assert_eq!(details.area_path.as_deref(), Some("Docs\\Web"));
        assert_eq!(
            details.created_by,
            Some(IdentityRef {
                display_name: Some("Dana Li".to_owned()),
                id: Some("u1".to_owned()),
                unique_name: Some("dana@contoso.com".to_owned()),
                ..IdentityRef::default()
            })
        );
        assert_eq!(
            details.assigned_to.unwrap().display_name.as_deref(),
            Some("Sam Ortiz <sam@contoso.com>")
        );
    }

    #[test]
    fn test_omitted_items_deserialize_as_none() {
        let list: WorkItemList =
            serde_json::from_value(json!({"count": 2, "value": [{"id": 1}, null]})).unwrap();

        assert_eq!(list.value.len(), 2);
        assert!(list.value[1].is_none());
    }

    #[test]
    fn test_expand_parses_names_and_numbers() {
        assert_eq!("All".parse::<WorkItemExpand>(), Ok(WorkItemExpand::All));
        assert_eq!("1".parse::<WorkItemExpand>(), Ok(WorkItemExpand::Relations));
        assert!("everything".parse::<WorkItemExpand>().is_err());
        assert_eq!("2".parse::<ErrorPolicy>(), Ok(ErrorPolicy::Omit));
    }

    #[test]
    fn test_patch_operation_wire_format() {
        let op = PatchOperation::add_field("System.Title", "New bug");

        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({"op": "add", "path": "/fields/System.Title", "value": "New bug"})
        );
    }

    #[test]
    fn test_search_hit_id_as_string() {
        let hit: WorkItemSearchHit = serde_json::from_value(json!({
            "fields": {"system.id": "17", "system.title": "Login fails"},
            "project": {"name": "Docs"}
        }))
        .unwrap();

        assert_eq!(hit.id(), Some(17));
        assert_eq!(hit.project_name(), Some("Docs"));
    }
}
