//! Tool definitions for agent integrations.
//!
//! Each tool has a JSON-Schema `inputSchema` and returns a result payload of
//! the form `{"content":[{"type":"text","text":...}]}`. Failures are reported
//! in the payload with `"isError": true` rather than as process errors.

mod wiki;
mod work_item;

use azdo_client::{AzureDevOpsClient, WikiError, WorkItemError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub(crate) use wiki::upsert_report;

/// A tool advertised to agents.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ToolDefinition {
    pub(crate) name: &'static str,
    pub(crate) description: &'static str,
    pub(crate) input_schema: Value,
}

/// Text block in a tool result.
#[derive(Debug, Serialize)]
pub(crate) struct ToolContent {
    #[serde(rename = "type")]
    kind: &'static str,
    text: String,
}

/// Payload returned from a tool call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ToolResult {
    content: Vec<ToolContent>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub(crate) is_error: bool,
}

impl ToolResult {
    fn text(text: String) -> Self {
        Self {
            content: vec![ToolContent { kind: "text", text }],
            is_error: false,
        }
    }

    fn error(text: String) -> Self {
        Self {
            content: vec![ToolContent { kind: "text", text }],
            is_error: true,
        }
    }
}

/// Failure of a single tool call.
#[derive(Debug, thiserror::Error)]
enum ToolError {
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error(transparent)]
    Wiki(#[from] WikiError),

    #[error(transparent)]
    WorkItem(#[from] WorkItemError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ToolError {
    fn is_invalid_params(&self) -> bool {
        matches!(
            self,
            Self::InvalidParams(_)
                | Self::Wiki(WikiError::InvalidParams(_))
                | Self::WorkItem(WorkItemError::InvalidParams(_))
        )
    }

    fn is_unauthorized(&self) -> bool {
        match self {
            Self::Wiki(err) => err.is_unauthorized(),
            Self::WorkItem(err) => err.is_unauthorized(),
            _ => false,
        }
    }
}

/// All tools, in the order they are advertised.
pub(crate) fn definitions() -> Vec<ToolDefinition> {
    let mut tools = wiki::definitions();
    tools.extend(work_item::definitions());
    tools
}

/// Run a tool by name against the service.
pub(crate) fn call_tool(client: &AzureDevOpsClient, name: &str, args: Value) -> ToolResult {
    let result = match name {
        "get_wikis" => wiki::get_wikis(client, args),
        "get_wiki_page" => wiki::get_wiki_page(client, args),
        "list_wiki_pages" => wiki::list_wiki_pages(client, args),
        "search_wiki_page" => wiki::search_wiki_page(client, args),
        "create_wiki" => wiki::create_wiki(client, args),
        "update_wiki_page" | "create_wiki_page" => wiki::upsert_wiki_page(client, args),
        "get_work_item" => work_item::get_work_item(client, args),
        "list_work_items" => work_item::list_work_items(client, args),
        "create_work_item" => work_item::create_work_item(client, args),
        "update_work_item" => work_item::update_work_item(client, args),
        "search_work_items" => work_item::search_work_items(client, args),
        "get_work_item_comments" => work_item::get_work_item_comments(client, args),
        "add_work_item_comment" => work_item::add_work_item_comment(client, args),
        other => return ToolResult::error(format!("Unknown tool: {other}")),
    };

    match result {
        Ok(text) => ToolResult::text(text),
        Err(err) => ToolResult::error(describe_failure(name, &err)),
    }
}

fn parse<T: DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    serde_json::from_value(args).map_err(|err| ToolError::InvalidParams(err.to_string()))
}

fn to_text<T: Serialize>(value: &T) -> Result<String, ToolError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// User-facing message for a failed tool call.
fn describe_failure(tool: &str, err: &ToolError) -> String {
    match err {
        ToolError::Wiki(WikiError::WikiNotFound { wiki }) => format!(
            "Wiki {wiki} not found. Make sure to provide the correct projectName parameter."
        ),
        ToolError::WorkItem(WorkItemError::NotFound { .. }) => err.to_string(),
        _ if err.is_invalid_params() => err.to_string(),
        _ if err.is_unauthorized() => format!(
            "Unauthorized access in {tool}. \
             Please check your Personal Access Token (PAT) permissions."
        ),
        _ => format!("{tool} failed: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    pub(super) fn offline_client() -> AzureDevOpsClient {
        AzureDevOpsClient::new(
            "http://127.0.0.1:9",
            "Docs",
            "pat",
            "7.0",
            Duration::from_secs(1),
        )
    }

    pub(super) fn error_text(result: &ToolResult) -> String {
        assert!(result.is_error);
        result.content[0].text.clone()
    }

    #[test]
    fn test_definitions_names() {
        let names: Vec<_> = definitions().iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            vec![
                "get_wikis",
                "get_wiki_page",
                "list_wiki_pages",
                "search_wiki_page",
                "create_wiki",
                "update_wiki_page",
                "create_wiki_page",
                "get_work_item",
                "list_work_items",
                "create_work_item",
                "update_work_item",
                "search_work_items",
                "get_work_item_comments",
                "add_work_item_comment",
            ]
        );
    }

    #[test]
    fn test_every_definition_is_callable() {
        // Every advertised name reaches a handler.
        for def in definitions() {
            let result = call_tool(&offline_client(), def.name, json!({"ids": []}));
            let text = serde_json::to_value(&result).unwrap()["content"][0]["text"].clone();
            assert!(
                !text.as_str().unwrap_or_default().starts_with("Unknown tool"),
                "{} is not dispatched",
                def.name
            );
        }
    }

    #[test]
    fn test_definition_serializes_input_schema_camel_case() {
        let json = serde_json::to_value(&definitions()[0]).unwrap();
        assert!(json.get("inputSchema").is_some());
    }

    #[test]
    fn test_unknown_tool_is_error_payload() {
        let result = call_tool(&offline_client(), "delete_everything", json!({}));
        assert_eq!(error_text(&result), "Unknown tool: delete_everything");
    }

    #[test]
    fn test_success_payload_has_no_error_flag() {
        let json = serde_json::to_value(ToolResult::text("ok".to_owned())).unwrap();
        assert_eq!(json, json!({"content": [{"type": "text", "text": "ok"}]}));
    }

    #[test]
    fn test_wiki_not_found_message_mentions_project_name() {
        let err = ToolError::Wiki(WikiError::WikiNotFound {
            wiki: "W".to_owned(),
        });
        assert_eq!(
            describe_failure("update_wiki_page", &err),
            "Wiki W not found. Make sure to provide the correct projectName parameter."
        );
    }

    #[test]
    fn test_work_item_not_found_message() {
        let err = ToolError::WorkItem(WorkItemError::NotFound { id: 7 });
        assert_eq!(describe_failure("get_work_item", &err), "Work item 7 not found");
    }

    #[test]
    fn test_unauthorized_message() {
        let err = ToolError::Wiki(WikiError::Api {
            status: 401,
            path: None,
            body: String::new(),
        });
        assert!(describe_failure("get_wikis", &err).contains("Personal Access Token"));

        let err = ToolError::WorkItem(WorkItemError::Api {
            status: 403,
            body: String::new(),
        });
        assert!(describe_failure("list_work_items", &err).contains("Personal Access Token"));
    }

    #[test]
    fn test_other_failures_name_the_tool() {
        let err = ToolError::WorkItem(WorkItemError::Api {
            status: 500,
            body: "boom".to_owned(),
        });
        assert_eq!(
            describe_failure("search_work_items", &err),
            "search_work_items failed: HTTP error: 500 - boom"
        );
    }
}
