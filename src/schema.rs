//! JSON schema generation for MCP tool inputs.

use rmcp::model::JsonObject;
use rmcp::schemars::{self, JsonSchema, generate::SchemaSettings};
use std::sync::Arc;

/// Generate an inline JSON schema for MCP tools
///
/// Unlike rmcp's default `schema_for_type()`, this function sets `inline_subschemas = true`
/// so nested request types are rendered inline instead of as $ref patterns, which
/// MCP clients display as plain form fields.
pub fn inline_schema_for_type<T: JsonSchema>() -> Arc<JsonObject> {
    let mut settings = SchemaSettings::draft07();
    settings.transforms = vec![Box::new(schemars::transform::AddNullable::default())];
    settings.inline_subschemas = true;

    let generator = settings.into_generator();
    let schema = generator.into_root_schema_for::<T>();
    let object = serde_json::to_value(schema).expect("failed to serialize schema");

    let serde_json::Value::Object(json_object) = object else {
        panic!("Schema serialization produced non-object value");
    };

    Arc::new(json_object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{GetRuleRequest, KeywordsRequest, SearchRequest};
    use assert2::check;

    #[test]
    fn test_request_schemas_list_properties() {
        let search = inline_schema_for_type::<SearchRequest>();
        check!(search["properties"].get("query").is_some());
        check!(search["properties"].get("threshold").is_some());

        let keywords = inline_schema_for_type::<KeywordsRequest>();
        check!(keywords["properties"].get("keywords").is_some());

        let rule = inline_schema_for_type::<GetRuleRequest>();
        check!(rule["properties"].get("number").is_some());
    }
}
