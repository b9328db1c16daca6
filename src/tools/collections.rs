//! Collection operations.

use serde_json::{json, Value as JsonValue};

use crate::core::error::ToolError;
use crate::domain::{ApiRequest, CollectionView};
use crate::tools::args::{ArgBag, Body};
use crate::tools::operation::{no_args, shown_id, Operation, Render};

pub static GET_COLLECTIONS: Operation = Operation {
    name: "get_collections",
    description: "Get all root collections",
    schema: no_args,
    build: |_| Ok(ApiRequest::get("/collections")),
    render: Render::Json,
};

pub static GET_COLLECTIONS_NESTED: Operation = Operation {
    name: "get_collections_nested",
    description: "Get all nested/children collections",
    schema: no_args,
    build: |_| Ok(ApiRequest::get("/collections/childrens")),
    render: Render::Json,
};

pub static GET_COLLECTION: Operation = Operation {
    name: "get_collection",
    description: "Get a single collection by ID",
    schema: || id_schema("Collection ID"),
    build: |args| Ok(ApiRequest::get(format!("/collection/{}", args.id("id")?))),
    render: Render::Json,
};

pub static CREATE_COLLECTION: Operation = Operation {
    name: "create_collection",
    description: "Create a new collection",
    schema: create_schema,
    build: create_request,
    render: Render::Confirm(|_| "✓ Collection created successfully!".to_owned()),
};

pub static UPDATE_COLLECTION: Operation = Operation {
    name: "update_collection",
    description: "Update an existing collection",
    schema: update_schema,
    build: update_request,
    render: Render::Confirm(|_| "✓ Collection updated successfully!".to_owned()),
};

pub static DELETE_COLLECTION: Operation = Operation {
    name: "delete_collection",
    description: "Delete a collection",
    schema: || id_schema("Collection ID to delete"),
    build: |args| Ok(ApiRequest::delete(format!("/collection/{}", args.id("id")?))),
    render: Render::Message(|args| format!("✓ Collection {} deleted successfully", shown_id(args, "id"))),
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
            "title": { "type": "string", "description": "Collection title" },
            "parentId": { "type": "number", "description": "Parent collection ID (omit for root collection)" },
            "view": {
                "type": "string",
                "enum": CollectionView::names(),
                "description": "View style (default: list)"
            },
            "public": { "type": "boolean", "description": "Make collection public" }
        },
        "required": ["title"]
    })
}

fn update_schema() -> JsonValue {
    json!({
        "type": "object",
        "properties": {
            "id": { "type": "number", "description": "Collection ID to update" },
            "title": { "type": "string", "description": "Updated title" },
            "view": {
                "type": "string",
                "enum": CollectionView::names(),
                "description": "Updated view style"
            },
            "public": { "type": "boolean", "description": "Update public status" },
            "parentId": { "type": "number", "description": "Move to different parent" }
        },
        "required": ["id"]
    })
}

fn create_request(args: &ArgBag<'_>) -> Result<ApiRequest, ToolError> {
    let body = Body::new()
        .set("title", args.require("title")?.clone())
        .copy(args, "view")
        .copy(args, "public")
        .reference(args, "parentId", "parent")
        .build();
    Ok(ApiRequest::post("/collection", body))
}

fn update_request(args: &ArgBag<'_>) -> Result<ApiRequest, ToolError> {
    let id = args.id("id")?;
    let body = Body::new()
        .copy(args, "title")
        .copy(args, "view")
        .copy(args, "public")
        .reference(args, "parentId", "parent")
        .build();
    Ok(ApiRequest::put(format!("/collection/{id}"), body))
}
