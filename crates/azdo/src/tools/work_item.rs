//! Work item tools.

use std::str::FromStr;

use azdo_client::types::{PatchOperation, WorkItemDetails};
use azdo_client::{AzureDevOpsClient, WorkItemFetch};
use serde::Deserialize;
use serde_json::{Value, json};

use super::{ToolDefinition, ToolError, parse, to_text};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct GetWorkItemArgs {
    ids: Vec<u64>,
    fields: Vec<String>,
    as_of: Option<String>,
    #[serde(rename = "$expand")]
    expand: Option<Value>,
    error_policy: Option<Value>,
    project_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListWorkItemsArgs {
    #[serde(default)]
    query: String,
    #[serde(default = "list_top_default")]
    top: usize,
    project_name: Option<String>,
}

fn list_top_default() -> usize {
    50
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateWorkItemArgs {
    #[serde(default, rename = "type")]
    work_item_type: String,
    #[serde(default)]
    document: Vec<PatchOperation>,
    project_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateWorkItemArgs {
    id: u64,
    #[serde(default)]
    document: Vec<PatchOperation>,
    project_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchWorkItemsArgs {
    #[serde(default)]
    search_text: String,
    #[serde(default = "search_top_default")]
    top: u32,
    #[serde(default)]
    skip: u32,
}

fn search_top_default() -> u32 {
    10
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentsArgs {
    id: u64,
    project_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddCommentArgs {
    id: u64,
    #[serde(default)]
    text: String,
    project_name: Option<String>,
}

/// Parse an enum option given either by name or by its numeric value.
fn enum_arg<T>(value: Option<Value>, name: &str) -> Result<Option<T>, ToolError>
where
    T: FromStr<Err = String>,
{
    let text = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(text)) => text,
        Some(Value::Number(number)) => number.to_string(),
        Some(other) => {
            return Err(ToolError::InvalidParams(format!(
                "{name} must be a name or a number, got {other}"
            )));
        }
    };
    text.parse().map(Some).map_err(ToolError::InvalidParams)
}

fn patch_document_schema() -> Value {
    json!({
        "type": "array",
        "description": "JSON Patch operations, e.g. \
            [{\"op\":\"add\",\"path\":\"/fields/System.Title\",\"value\":\"Fix login\"}]",
        "items": {
            "type": "object",
            "properties": {
                "op": {
                    "type": "string",
                    "enum": ["add", "remove", "replace", "test", "move", "copy"],
                },
                "path": { "type": "string" },
                "from": { "type": "string" },
                "value": {},
            },
            "required": ["op", "path"],
        },
    })
}

fn project_property() -> Value {
    json!({ "type": "string", "description": "Project name (optional)" })
}

pub(super) fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "get_work_item",
            description: "Get work items by ID",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "ids": {
                        "type": "array",
                        "items": { "type": "number" },
                        "description": "Work item IDs (at most 200)",
                    },
                    "fields": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Fields to include (optional; replaces $expand)",
                    },
                    "asOf": {
                        "type": "string",
                        "description": "Return the items as of this time (ISO 8601)",
                    },
                    "$expand": {
                        "type": ["string", "number"],
                        "description": "None=0, Relations=1, Fields=2, Links=3, All=4 (default)",
                    },
                    "errorPolicy": {
                        "type": ["string", "number"],
                        "description": "Fail=1, Omit=2",
                    },
                    "projectName": project_property(),
                },
                "required": ["ids"],
            }),
        },
        ToolDefinition {
            name: "list_work_items",
            description: "List work items matching a WIQL query",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string", "description": "WIQL query" },
                    "top": {
                        "type": "number",
                        "description": "Maximum number of items (optional, default 50, max 200)",
                    },
                    "projectName": project_property(),
                },
                "required": ["query"],
            }),
        },
        ToolDefinition {
            name: "create_work_item",
            description: "Create a new work item",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "type": { "type": "string", "description": "Work item type, e.g. Task or Bug" },
                    "document": patch_document_schema(),
                    "projectName": project_property(),
                },
                "required": ["type", "document"],
            }),
        },
        ToolDefinition {
            name: "update_work_item",
            description: "Update an existing work item",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "id": { "type": "number", "description": "Work item ID" },
                    "document": patch_document_schema(),
                    "projectName": project_property(),
                },
                "required": ["id", "document"],
            }),
        },
        ToolDefinition {
            name: "search_work_items",
            description: "Search for work items using text search",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "searchText": { "type": "string", "description": "Text to search for" },
                    "top": {
                        "type": "number",
                        "description": "Maximum number of results (optional, defaults to 10)",
                    },
                    "skip": {
                        "type": "number",
                        "description": "Number of results to skip (optional, defaults to 0)",
                    },
                },
                "required": ["searchText"],
            }),
        },
        ToolDefinition {
            name: "get_work_item_comments",
            description: "Get the comments of a work item",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "id": { "type": "number", "description": "Work item ID" },
                    "projectName": project_property(),
                },
                "required": ["id"],
            }),
        },
        ToolDefinition {
            name: "add_work_item_comment",
            description: "Add a comment to a work item",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "id": { "type": "number", "description": "Work item ID" },
                    "text": { "type": "string", "description": "Comment text" },
                    "projectName": project_property(),
                },
                "required": ["id", "text"],
            }),
        },
    ]
}

fn fetch_options(args: &mut GetWorkItemArgs) -> Result<WorkItemFetch, ToolError> {
    Ok(WorkItemFetch {
        fields: std::mem::take(&mut args.fields),
        as_of: args.as_of.take(),
        expand: enum_arg(args.expand.take(), "$expand")?,
        error_policy: enum_arg(args.error_policy.take(), "errorPolicy")?,
    })
}

pub(super) fn get_work_item(client: &AzureDevOpsClient, args: Value) -> Result<String, ToolError> {
    let mut args: GetWorkItemArgs = parse(args)?;
    let options = fetch_options(&mut args)?;
    let items = client.summarize_work_items(&args.ids, &options, args.project_name.as_deref())?;
    to_text(&items)
}

pub(super) fn list_work_items(
    client: &AzureDevOpsClient,
    args: Value,
) -> Result<String, ToolError> {
    let args: ListWorkItemsArgs = parse(args)?;
    let result = client.query_work_items(&args.query, args.top, args.project_name.as_deref())?;
    to_text(&result)
}

pub(super) fn create_work_item(
    client: &AzureDevOpsClient,
    args: Value,
) -> Result<String, ToolError> {
    let args: CreateWorkItemArgs = parse(args)?;
    let item = client.create_work_item(
        &args.work_item_type,
        &args.document,
        args.project_name.as_deref(),
    )?;
    to_text(&WorkItemDetails::from(&item))
}

pub(super) fn update_work_item(
    client: &AzureDevOpsClient,
    args: Value,
) -> Result<String, ToolError> {
    let args: UpdateWorkItemArgs = parse(args)?;
    let item = client.update_work_item(args.id, &args.document, args.project_name.as_deref())?;
    to_text(&WorkItemDetails::from(&item))
}

pub(super) fn search_work_items(
    client: &AzureDevOpsClient,
    args: Value,
) -> Result<String, ToolError> {
    let args: SearchWorkItemsArgs = parse(args)?;
    to_text(&client.search_work_items(&args.search_text, args.top, args.skip)?)
}

pub(super) fn get_work_item_comments(
    client: &AzureDevOpsClient,
    args: Value,
) -> Result<String, ToolError> {
    let args: CommentsArgs = parse(args)?;
    to_text(&client.get_comments(args.id, args.project_name.as_deref())?)
}

pub(super) fn add_work_item_comment(
    client: &AzureDevOpsClient,
    args: Value,
) -> Result<String, ToolError> {
    let args: AddCommentArgs = parse(args)?;
    to_text(&client.add_comment(args.id, &args.text, args.project_name.as_deref())?)
}
