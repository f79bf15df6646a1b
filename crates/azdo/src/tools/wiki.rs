//! Wiki and page tools.

use azdo_client::types::PagesBatchRequest;
use azdo_client::upserter::expand_newline_escapes;
use azdo_client::{
    AzureDevOpsClient, PageUpserter, UpsertOutcome, WikiError, WikiGateway, WikiPageRef,
};
use serde::Deserialize;
use serde_json::{Value, json};

use super::{ToolDefinition, ToolError, parse, to_text};

/// Number of characters of content echoed back in upsert results.
const PREVIEW_CHARS: usize = 100;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct GetWikisArgs {
    project_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetWikiPageArgs {
    #[serde(default)]
    wiki_identifier: String,
    #[serde(default)]
    path: String,
    project_name: Option<String>,
    #[serde(default = "include_content_default")]
    include_content: bool,
}

fn include_content_default() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListPagesArgs {
    #[serde(default)]
    wiki_identifier: String,
    project_name: Option<String>,
    #[serde(default = "page_views_default")]
    page_views_for_days: u32,
    #[serde(default = "list_top_default")]
    top: u32,
    continuation_token: Option<String>,
}

fn page_views_default() -> u32 {
    30
}

fn list_top_default() -> u32 {
    100
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchPagesArgs {
    #[serde(default)]
    wiki_identifier: String,
    #[serde(default)]
    search_text: String,
    project_name: Option<String>,
    #[serde(default = "search_top_default")]
    top: u32,
}

fn search_top_default() -> u32 {
    20
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CreateWikiArgs {
    name: String,
    project_id: Option<String>,
    mapped_path: Option<String>,
}

/// Arguments of `update_wiki_page` and `create_wiki_page`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(super) struct UpsertPageArgs {
    wiki_identifier: String,
    path: String,
    content: String,
    comment: Option<String>,
    project_name: Option<String>,
}

fn page_properties() -> Value {
    json!({
        "wikiIdentifier": { "type": "string", "description": "Wiki identifier (name or ID)" },
        "path": {
            "type": "string",
            "description": "Page path, e.g. /Docs/Home (a .md suffix is ignored)",
        },
        "projectName": {
            "type": "string",
            "description": "Project name (optional, defaults to the configured project)",
        },
    })
}

fn upsert_schema(comment_description: &str) -> Value {
    let mut properties = page_properties();
    properties["content"] = json!({
        "type": "string",
        "description": "Page content in markdown format",
    });
    properties["comment"] = json!({ "type": "string", "description": comment_description });
    json!({
        "type": "object",
        "properties": properties,
        "required": ["wikiIdentifier", "path", "content"],
    })
}

pub(super) fn definitions() -> Vec<ToolDefinition> {
    let mut page_props = page_properties();
    page_props["includeContent"] = json!({
        "type": "boolean",
        "description": "Include page content (optional, defaults to true)",
    });

    vec![
        ToolDefinition {
            name: "get_wikis",
            description: "List all wikis in the project",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "projectName": { "type": "string", "description": "Project name (optional)" },
                },
            }),
        },
        ToolDefinition {
            name: "get_wiki_page",
            description: "Get a wiki page by path",
            input_schema: json!({
                "type": "object",
                "properties": page_props,
                "required": ["wikiIdentifier", "path"],
            }),
        },
        ToolDefinition {
            name: "list_wiki_pages",
            description: "List pages in a wiki in the project",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "wikiIdentifier": { "type": "string", "description": "Wiki identifier" },
                    "projectName": { "type": "string", "description": "Project name (optional)" },
                    "pageViewsForDays": {
                        "type": "number",
                        "description": "Days of page view stats (optional, defaults to 30)",
                    },
                    "top": {
                        "type": "number",
                        "description": "Number of pages to return (optional, defaults to 100)",
                    },
                    "continuationToken": {
                        "type": "string",
                        "description": "Continuation token from a previous call (optional)",
                    },
                },
                "required": ["wikiIdentifier"],
            }),
        },
        ToolDefinition {
            name: "search_wiki_page",
            description: "Search for pages in a wiki by text",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "wikiIdentifier": { "type": "string", "description": "Wiki identifier" },
                    "searchText": { "type": "string", "description": "Text to search for" },
                    "projectName": { "type": "string", "description": "Project name (optional)" },
                    "top": {
                        "type": "number",
                        "description": "Maximum number of results (optional, defaults to 20)",
                    },
                },
                "required": ["wikiIdentifier", "searchText"],
            }),
        },
        ToolDefinition {
            name: "create_wiki",
            description: "Create a new project wiki",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Wiki name" },
                    "projectId": {
                        "type": "string",
                        "description": "Project ID (optional, defaults to the configured project)",
                    },
                    "mappedPath": { "type": "string", "description": "Mapped path (optional)" },
                },
                "required": ["name"],
            }),
        },
        ToolDefinition {
            name: "update_wiki_page",
            description: "Create or update a wiki page; unchanged content is not rewritten",
            input_schema: upsert_schema("Comment for the update (optional)"),
        },
        ToolDefinition {
            name: "create_wiki_page",
            description: "Create a new wiki page, updating it if it already exists",
            input_schema: upsert_schema("Comment for the creation (optional)"),
        },
    ]
}

pub(super) fn get_wikis(client: &AzureDevOpsClient, args: Value) -> Result<String, ToolError> {
    let args: GetWikisArgs = parse(args)?;
    let wikis = client.list_wikis(args.project_name.as_deref())?;
    to_text(&wikis.value)
}

pub(super) fn get_wiki_page(client: &AzureDevOpsClient, args: Value) -> Result<String, ToolError> {
    let args: GetWikiPageArgs = parse(args)?;
    let page = WikiPageRef::new(&args.wiki_identifier, args.project_name.as_deref(), &args.path)?;
    to_text(&client.read_page(&page, args.include_content)?)
}

pub(super) fn list_wiki_pages(
    client: &AzureDevOpsClient,
    args: Value,
) -> Result<String, ToolError> {
    let args: ListPagesArgs = parse(args)?;
    let request = PagesBatchRequest {
        top: args.top,
        continuation_token: args.continuation_token.as_deref(),
        page_views_for_days: Some(args.page_views_for_days),
    };
    let batch = client.list_pages(&args.wiki_identifier, args.project_name.as_deref(), &request)?;
    to_text(&batch)
}

pub(super) fn search_wiki_page(
    client: &AzureDevOpsClient,
    args: Value,
) -> Result<String, ToolError> {
    let args: SearchPagesArgs = parse(args)?;
    let found = client.search_pages(
        &args.wiki_identifier,
        args.project_name.as_deref(),
        &args.search_text,
        args.top,
    )?;
    to_text(&found)
}

pub(super) fn create_wiki(client: &AzureDevOpsClient, args: Value) -> Result<String, ToolError> {
    let args: CreateWikiArgs = parse(args)?;
    let wiki = client.create_wiki(
        &args.name,
        args.project_id.as_deref(),
        args.mapped_path.as_deref(),
    )?;
    to_text(&wiki)
}

pub(super) fn upsert_wiki_page(
    client: &AzureDevOpsClient,
    args: Value,
) -> Result<String, ToolError> {
    let args: UpsertPageArgs = parse(args)?;
    to_text(&upsert_page(client, &args)?)
}

/// Upsert a page and build the JSON report.
fn upsert_page<G: WikiGateway + ?Sized>(
    gateway: &G,
    args: &UpsertPageArgs,
) -> Result<Value, WikiError> {
    let page = WikiPageRef::new(&args.wiki_identifier, args.project_name.as_deref(), &args.path)?;
    let outcome =
        PageUpserter::new(gateway).upsert(&page, &args.content, args.comment.as_deref())?;
    Ok(upsert_report(&page, &args.content, &outcome))
}

/// JSON summary of an upsert.
///
/// The preview shows the content as written, after `\n` substitution.
pub(crate) fn upsert_report(page: &WikiPageRef, content: &str, outcome: &UpsertOutcome) -> Value {
    let message = if outcome.unchanged {
        "Wiki page unchanged; no update was made"
    } else if outcome.created {
        "Wiki page created successfully"
    } else {
        "Wiki page updated successfully"
    };

    json!({
        "wikiIdentifier": page.wiki(),
        "path": page.path(),
        "created": outcome.created,
        "unchanged": outcome.unchanged,
        "etag": outcome.etag,
        "message": message,
        "contentPreview": preview(&expand_newline_escapes(content)),
    })
}

fn preview(content: &str) -> String {
    match content.char_indices().nth(PREVIEW_CHARS) {
        Some((end, _)) => format!("{}...", &content[..end]),
        None => content.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use azdo_client::MockGateway;
    use pretty_assertions::assert_eq;

    use super::super::call_tool;
    use super::super::tests::{error_text, offline_client};
    use super::*;

    fn upsert_args(path: &str, content: &str) -> UpsertPageArgs {
        UpsertPageArgs {
            wiki_identifier: "W".to_owned(),
            path: path.to_owned(),
            content: content.to_owned(),
            ..Default::default()
        }
    }

    fn definition(name: &str) -> ToolDefinition {
        definitions().into_iter().find(|d| d.name == name).unwrap()
    }

    #[test]
    fn test_update_schema_requires_content() {
        let update = definition("update_wiki_page");
        assert_eq!(
            update.input_schema["required"],
            json!(["wikiIdentifier", "path", "content"])
        );
        assert_eq!(update.input_schema["properties"]["comment"]["type"], "string");
    }

    #[test]
    fn test_list_pages_schema() {
        let list = definition("list_wiki_pages");
        assert_eq!(list.input_schema["required"], json!(["wikiIdentifier"]));
        assert_eq!(
            list.input_schema["properties"]["continuationToken"]["type"],
            "string"
        );
    }

    #[test]
    fn test_list_pages_args_defaults() {
        let args: ListPagesArgs = parse(json!({"wikiIdentifier": "W"})).unwrap();
        assert_eq!(args.page_views_for_days, 30);
        assert_eq!(args.top, 100);
        assert_eq!(args.continuation_token, None);
    }

    #[test]
    fn test_search_args_default_top() {
        let args: SearchPagesArgs =
            parse(json!({"wikiIdentifier": "W", "searchText": "setup"})).unwrap();
        assert_eq!(args.top, 20);
    }

    #[test]
    fn test_list_pages_requires_wiki() {
        let result = call_tool(&offline_client(), "list_wiki_pages", json!({}));
        assert_eq!(
            error_text(&result),
            "Invalid parameters: wiki identifier is required"
        );
    }

    #[test]
    fn test_search_requires_text() {
        let result = call_tool(
            &offline_client(),
            "search_wiki_page",
            json!({"wikiIdentifier": "W"}),
        );
        assert_eq!(error_text(&result), "Invalid parameters: search text is required");
    }

    #[test]
    fn test_upsert_page_creates_and_reports() {
        let gateway = MockGateway::new().with_wiki("W");

        let report = upsert_page(&gateway, &upsert_args("Guides/Setup.md", "hello")).unwrap();

        assert_eq!(report["path"], "/Guides/Setup");
        assert_eq!(report["created"], true);
        assert_eq!(report["unchanged"], false);
        assert_eq!(report["message"], "Wiki page created successfully");
        assert_eq!(report["contentPreview"], "hello");
        assert!(report["etag"].is_string());
    }

    #[test]
    fn test_upsert_page_unchanged_report() {
        let gateway = MockGateway::new().with_page("W", "/Home", "X");

        let report = upsert_page(&gateway, &upsert_args("/Home", "X")).unwrap();

        assert_eq!(report["unchanged"], true);
        assert_eq!(report["message"], "Wiki page unchanged; no update was made");
        assert!(gateway.puts().is_empty());
    }

    #[test]
    fn test_preview_shows_substituted_newlines() {
        let gateway = MockGateway::new().with_wiki("W");

        let report = upsert_page(&gateway, &upsert_args("/Notes", r"A\nB")).unwrap();

        assert_eq!(report["contentPreview"], "A\nB");
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let long = "é".repeat(150);
        let shown = preview(&long);
        assert_eq!(shown.chars().count(), PREVIEW_CHARS + 3);
        assert!(shown.ends_with("..."));
        assert_eq!(preview("short"), "short");
    }

    #[test]
    fn test_missing_required_args_are_invalid_params() {
        let result = call_tool(
            &offline_client(),
            "update_wiki_page",
            json!({"wikiIdentifier": "W", "path": "/Home"}),
        );
        assert!(error_text(&result).starts_with("Invalid parameters"));
    }
}
