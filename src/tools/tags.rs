//! Tag operations. `collectionId` 0 addresses every collection.

use serde_json::{json, Value as JsonValue};

use crate::core::error::ToolError;
use crate::domain::ApiRequest;
use crate::tools::args::{scalar_text, ArgBag, Body};
use crate::tools::operation::{Operation, Render};

pub static GET_TAGS: Operation = Operation {
    name: "get_tags",
    description: "Get all tags from all collections or a specific collection",
    schema: || {
        json!({
            "type": "object",
            "properties": {
                "collectionId": { "type": "number", "description": "Optional: Collection ID to get tags from" }
            }
        })
    },
    build: |args| {
        Ok(match args.optional_id("collectionId")? {
            Some(collection) => ApiRequest::get(format!("/tags/{collection}")),
            None => ApiRequest::get("/tags"),
        })
    },
    render: Render::Json,
};

pub static RENAME_TAG: Operation = Operation {
    name: "rename_tag",
    description: "Rename or merge tags",
    schema: rename_schema,
    build: rename_request,
    render: Render::Confirm(|args| {
        let new_tag = args.get("newTag").map(scalar_text).unwrap_or_default();
        format!("✓ Tags renamed to \"{new_tag}\" successfully!")
    }),
};

pub static DELETE_TAG: Operation = Operation {
    name: "delete_tag",
    description: "Remove tag(s) from raindrops",
    schema: delete_schema,
    build: delete_request,
    render: Render::Message(|args| format!("✓ Tags {} deleted successfully", joined_tags(args))),
};

fn rename_schema() -> JsonValue {
    json!({
        "type": "object",
        "properties": {
            "collectionId": { "type": "number", "description": "Collection ID (0 for all collections)" },
            "tags": {
                "type": "array",
                "items": { "type": "string" },
                "description": "Array of old tag names to rename"
            },
            "newTag": { "type": "string", "description": "New tag name" }
        },
        "required": ["collectionId", "tags", "newTag"]
    })
}

fn delete_schema() -> JsonValue {
    json!({
        "type": "object",
        "properties": {
            "collectionId": { "type": "number", "description": "Collection ID (0 for all collections)" },
            "tags": {
                "type": "array",
                "items": { "type": "string" },
                "description": "Array of tag names to remove"
            }
        },
        "required": ["collectionId", "tags"]
    })
}

fn rename_request(args: &ArgBag<'_>) -> Result<ApiRequest, ToolError> {
    let collection = args.id("collectionId")?;
    let body = Body::new()
        .set("tags", args.require("tags")?.clone())
        .set("new", args.require("newTag")?.clone())
        .build();
    Ok(ApiRequest::put(format!("/tags/{collection}"), body))
}

fn delete_request(args: &ArgBag<'_>) -> Result<ApiRequest, ToolError> {
    let collection = args.id("collectionId")?;
    let body = Body::new().set("tags", args.require("tags")?.clone()).build();
    Ok(ApiRequest::delete(format!("/tags/{collection}")).with_body(body))
}

fn joined_tags(args: &ArgBag<'_>) -> String {
    match args.get("tags") {
        Some(JsonValue::Array(items)) => items.iter().map(scalar_text).collect::<Vec<_>>().join(", "),
        Some(other) => scalar_text(other),
        None => String::new(),
    }
}
