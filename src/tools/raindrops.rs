//! Bookmark ("raindrop") operations.

use serde_json::{json, Value as JsonValue};

use crate::core::error::ToolError;
use crate::domain::ApiRequest;
use crate::tools::args::{ArgBag, Body};
use crate::tools::operation::{shown_id, Operation, Render};

const PAGE_HELP: &str = "Page number (default: 0)";
const PERPAGE_HELP: &str = "Items per page (default: 25, max: 50)";

pub static GET_RAINDROP: Operation = Operation {
    name: "get_raindrop",
    description: "Get a single bookmark/raindrop by ID",
    schema: || id_schema("The raindrop ID"),
    build: |args| Ok(ApiRequest::get(format!("/raindrop/{}", args.id("id")?))),
    render: Render::Json,
};

pub static CREATE_RAINDROP: Operation = Operation {
    name: "create_raindrop",
    description: "Create a new bookmark/raindrop with optional title, tags, excerpt, and collection",
    schema: create_schema,
    build: create_request,
    render: Render::Confirm(|_| "✓ Bookmark created successfully!".to_owned()),
};

pub static UPDATE_RAINDROP: Operation = Operation {
    name: "update_raindrop",
    description: "Update an existing bookmark/raindrop",
    schema: update_schema,
    build: update_request,
    render: Render::Confirm(|_| "✓ Bookmark updated successfully!".to_owned()),
};

pub static DELETE_RAINDROP: Operation = Operation {
    name: "delete_raindrop",
    description: "Delete a bookmark/raindrop (moves to Trash)",
    schema: || id_schema("The raindrop ID to delete"),
    build: |args| Ok(ApiRequest::delete(format!("/raindrop/{}", args.id("id")?))),
    render: Render::Message(|args| {
        format!("✓ Bookmark {} deleted successfully (moved to Trash)", shown_id(args, "id"))
    }),
};

pub static GET_RAINDROPS: Operation = Operation {
    name: "get_raindrops",
    description: "Get raindrops from a collection with optional search and pagination",
    schema: list_schema,
    build: list_request,
    render: Render::Json,
};

pub static SEARCH_RAINDROPS: Operation = Operation {
    name: "search_raindrops",
    description: "Search raindrops across all collections with advanced query syntax",
    schema: search_schema,
    build: search_request,
    render: Render::Json,
};

fn id_schema(help: &str) -> JsonValue {
    json!({
        "type": "object",
        "properties": { "id": { "type": "number", "description": help } },
        "required": ["id"]
    })
}

fn create_schema() -> JsonValue {
    json!({
        "type": "object",
        "properties": {
            "link": { "type": "string", "description": "The URL to bookmark" },
            "title": { "type": "string", "description": "Title of the bookmark (max 1000 chars)" },
            "excerpt": { "type": "string", "description": "Description/excerpt (max 10000 chars)" },
            "tags": { "type": "array", "items": { "type": "string" }, "description": "Array of tags" },
            "collectionId": {
                "type": "number",
                "description": "Collection ID (-1 for Unsorted, -99 for Trash, or specific collection ID)"
            },
            "pleaseParse": {
                "type": "boolean",
                "description": "Set to true to auto-parse page metadata (title, excerpt, cover)"
            }
        },
        "required": ["link"]
    })
}

fn update_schema() -> JsonValue {
    json!({
        "type": "object",
        "properties": {
            "id": { "type": "number", "description": "The raindrop ID to update" },
            "link": { "type": "string", "description": "Updated URL" },
            "title": { "type": "string", "description": "Updated title" },
            "excerpt": { "type": "string", "description": "Updated description" },
            "tags": { "type": "array", "items": { "type": "string" }, "description": "Updated tags array" },
            "important": { "type": "boolean", "description": "Mark as favorite" },
            "collectionId": { "type": "number", "description": "Move to different collection" }
        },
        "required": ["id"]
    })
}

fn list_schema() -> JsonValue {
    json!({
        "type": "object",
        "properties": {
            "collectionId": {
                "type": "number",
                "description": "Collection ID (0 for all, -1 for Unsorted, -99 for Trash)"
            },
            "page": { "type": "number", "description": PAGE_HELP },
            "perpage": { "type": "number", "description": PERPAGE_HELP },
            "search": { "type": "string", "description": "Search query" }
        },
        "required": ["collectionId"]
    })
}

fn search_schema() -> JsonValue {
    json!({
        "type": "object",
        "properties": {
            "search": { "type": "string", "description": "Search query (supports tags, domain filters, etc.)" },
            "page": { "type": "number", "description": PAGE_HELP },
            "perpage": { "type": "number", "description": PERPAGE_HELP }
        },
        "required": ["search"]
    })
}

fn create_request(args: &ArgBag<'_>) -> Result<ApiRequest, ToolError> {
    let body = Body::new()
        .set("link", args.require("link")?.clone())
        .copy(args, "title")
        .copy(args, "excerpt")
        .copy(args, "tags")
        .reference(args, "collectionId", "collection")
        .marker(args, "pleaseParse")
        .build();
    Ok(ApiRequest::post("/raindrop", body))
}

fn update_request(args: &ArgBag<'_>) -> Result<ApiRequest, ToolError> {
    let id = args.id("id")?;
    let body = Body::new()
        .copy(args, "link")
        .copy(args, "title")
        .copy(args, "excerpt")
        .copy(args, "tags")
        .copy(args, "important")
        .reference(args, "collectionId", "collection")
        .build();
    Ok(ApiRequest::put(format!("/raindrop/{id}"), body))
}

fn list_request(args: &ArgBag<'_>) -> Result<ApiRequest, ToolError> {
    let collection = args.id("collectionId")?;
    let mut query = Vec::new();
    push_query(&mut query, args, "page");
    push_query(&mut query, args, "perpage");
    push_query(&mut query, args, "search");
    Ok(ApiRequest::get(format!("/raindrops/{collection}")).with_query(query))
}

fn search_request(args: &ArgBag<'_>) -> Result<ApiRequest, ToolError> {
    args.require("search")?;
    let mut query = Vec::new();
    push_query(&mut query, args, "search");
    push_query(&mut query, args, "page");
    push_query(&mut query, args, "perpage");
    Ok(ApiRequest::get("/raindrops/0").with_query(query))
}

fn push_query(query: &mut Vec<(&'static str, String)>, args: &ArgBag<'_>, key: &'static str) {
    if let Some(text) = args.query_text(key) {
        query.push((key, text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;
    use rmcp::model::JsonObject;

    fn build(op: &Operation, v: JsonValue) -> Result<ApiRequest, ToolError> {
        let o: JsonObject = v.as_object().cloned().unwrap();
        op.request(&ArgBag::new(&o))
    }

    #[test]
    fn create_with_only_link_sends_only_link() {
        let req = build(&CREATE_RAINDROP, json!({"link": "https://rust-lang.org"})).unwrap();
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.path, "/raindrop");
        assert_eq!(req.body, Some(json!({"link": "https://rust-lang.org"})));
    }

    #[test]
    fn create_shapes_collection_and_parse_marker() {
        let req = build(
            &CREATE_RAINDROP,
            json!({
                "link": "https://x.test",
                "title": "X",
                "tags": ["a", "b"],
                "collectionId": 12,
                "pleaseParse": true
            }),
        )
        .unwrap();
        assert_eq!(
            req.body,
            Some(json!({
                "link": "https://x.test",
                "title": "X",
                "tags": ["a", "b"],
                "collection": {"$id": 12},
                "pleaseParse": {}
            }))
        );
    }

    #[test]
    fn create_requires_link() {
        let err = build(&CREATE_RAINDROP, json!({"title": "no link"})).unwrap_err();
        assert!(matches!(err, ToolError::MissingArgument("link")));
    }

    #[test]
    fn update_keeps_explicit_false() {
        let req = build(&UPDATE_RAINDROP, json!({"id": 5, "important": false})).unwrap();
        assert_eq!(req.method, Method::PUT);
        assert_eq!(req.path, "/raindrop/5");
        assert_eq!(req.body, Some(json!({"important": false})));
    }

    #[test]
    fn update_forwards_unsorted_collection() {
        let req = build(&UPDATE_RAINDROP, json!({"id": 5, "collectionId": -1})).unwrap();
        assert_eq!(req.body, Some(json!({"collection": {"$id": -1}})));
    }

    #[test]
    fn list_appends_only_present_params() {
        let bare = build(&GET_RAINDROPS, json!({"collectionId": 0})).unwrap();
        assert_eq!(bare.path_and_query().unwrap(), "/raindrops/0");

        let full = build(
            &GET_RAINDROPS,
            json!({"collectionId": 7, "page": 0, "perpage": 50, "search": "rust"}),
        )
        .unwrap();
        assert_eq!(full.path_and_query().unwrap(), "/raindrops/7?page=0&perpage=50&search=rust");
    }

    #[test]
    fn search_puts_query_first() {
        let req = build(&SEARCH_RAINDROPS, json!({"search": "foo", "page": 2})).unwrap();
        assert_eq!(req.path_and_query().unwrap(), "/raindrops/0?search=foo&page=2");
    }

    #[test]
    fn search_requires_query() {
        let err = build(&SEARCH_RAINDROPS, json!({"page": 1})).unwrap_err();
        assert!(matches!(err, ToolError::MissingArgument("search")));
    }

    #[test]
    fn delete_message_names_the_bookmark() {
        let o: JsonObject = json!({"id": 99}).as_object().cloned().unwrap();
        let text = DELETE_RAINDROP.render(&ArgBag::new(&o), &json!({"success": true}));
        assert_eq!(text, "✓ Bookmark 99 deleted successfully (moved to Trash)");
    }

    #[test]
    fn create_confirmation_precedes_payload() {
        let o = JsonObject::new();
        let text = CREATE_RAINDROP.render(&ArgBag::new(&o), &json!({"result": true}));
        assert!(text.starts_with("✓ Bookmark created successfully!\n\n{"));
        assert!(text.contains("\"result\": true"));
    }
}
