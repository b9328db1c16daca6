use std::sync::Arc;

use rmcp::model::{JsonObject, Tool};

use crate::core::tool::ToolSpec;
use crate::tools::operation::Operation;
use crate::tools::{collections, raindrops, tags, user};

/// Every operation the server exposes, in listing order.
pub static CATALOG: [&Operation; 16] = [
    &user::GET_USER,
    &raindrops::GET_RAINDROP,
    &raindrops::CREATE_RAINDROP,
    &raindrops::UPDATE_RAINDROP,
    &raindrops::DELETE_RAINDROP,
    &raindrops::GET_RAINDROPS,
    &collections::GET_COLLECTIONS,
    &collections::GET_COLLECTIONS_NESTED,
    &collections::GET_COLLECTION,
    &collections::CREATE_COLLECTION,
    &collections::UPDATE_COLLECTION,
    &collections::DELETE_COLLECTION,
    &tags::GET_TAGS,
    &tags::RENAME_TAG,
    &tags::DELETE_TAG,
    &raindrops::SEARCH_RAINDROPS,
];

/// Catalog as MCP tool descriptors.
pub fn list_tools() -> Vec<Tool> {
    CATALOG.iter().map(|op| to_tool(op)).collect()
}

pub fn to_tool(op: &Operation) -> Tool {
    let schema: JsonObject = match op.input_schema() {
        serde_json::Value::Object(map) => map,
        _ => JsonObject::new(),
    };
    Tool::new(op.name(), op.description(), Arc::new(schema))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let names: HashSet<_> = CATALOG.iter().map(|op| op.name).collect();
        assert_eq!(names.len(), CATALOG.len());
    }

    #[test]
    fn listing_keeps_catalog_order() {
        let tools = list_tools();
        assert_eq!(tools.len(), 16);
        assert_eq!(tools[0].name, "get_user");
        assert_eq!(tools[15].name, "search_raindrops");
    }

    #[test]
    fn every_schema_is_an_object_schema() {
        for op in CATALOG.iter() {
            let schema = op.input_schema();
            assert_eq!(schema["type"], "object", "{} schema", op.name);
            assert!(schema["properties"].is_object(), "{} properties", op.name);
            if let Some(required) = schema.get("required").and_then(|r| r.as_array()) {
                for field in required {
                    let field = field.as_str().unwrap();
                    assert!(
                        schema["properties"].get(field).is_some(),
                        "{} requires undeclared field {field}",
                        op.name
                    );
                }
            }
        }
    }
}
