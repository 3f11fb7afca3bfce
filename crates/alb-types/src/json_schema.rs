//! JSON Schema (draft-07) export of the side-table, for editors and linters.
//!
//! The export is as permissive as the codec on unknown keys but carries the
//! advisory constraints (enum tokens, ranges) as well.

use serde_json::{Map, Value, json};

use crate::schema::{FieldKind, FieldSpec, ObjectSchema};

pub const DRAFT_07: &str = "http://json-schema.org/draft-07/schema#";

pub fn to_json_schema(schema: &ObjectSchema) -> Value {
    let mut root = object_schema(schema);
    if let Value::Object(map) = &mut root {
        map.insert("$schema".into(), Value::String(DRAFT_07.into()));
    }
    root
}

/// Schema for a `{count, next, results}` page of `schema` items.
pub fn collection_json_schema(schema: &ObjectSchema) -> Value {
    json!({
        "$schema": DRAFT_07,
        "title": format!("{}Collection", schema.name),
        "type": "object",
        "properties": {
            "count": {"type": "integer", "minimum": 0},
            "next": {"type": "string"},
            "results": {"type": "array", "items": object_schema(schema)},
        },
        "required": ["count", "results"],
    })
}

fn object_schema(schema: &ObjectSchema) -> Value {
    let mut properties = Map::new();
    for spec in schema.fields {
        properties.insert(spec.name.into(), field_schema(spec));
    }
    let required: Vec<&str> = schema.required_fields().map(|f| f.name).collect();

    let mut out = Map::new();
    out.insert("title".into(), Value::String(schema.name.into()));
    out.insert("type".into(), Value::String("object".into()));
    out.insert("properties".into(), Value::Object(properties));
    if !required.is_empty() {
        out.insert("required".into(), json!(required));
    }
    Value::Object(out)
}

fn field_schema(spec: &FieldSpec) -> Value {
    let mut out = match kind_schema(&spec.kind) {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    if let Some((min, max)) = spec.range {
        out.insert("minimum".into(), json!(min));
        out.insert("maximum".into(), json!(max));
    }
    if let Some(default) = &spec.default {
        out.insert("default".into(), default.to_json());
    }
    if spec.is_read_only() {
        out.insert("readOnly".into(), Value::Bool(true));
    }
    if !spec.doc.is_empty() {
        out.insert("description".into(), Value::String(spec.doc.into()));
    }
    if spec.nullable {
        return json!({"anyOf": [Value::Object(out), {"type": "null"}]});
    }
    Value::Object(out)
}

fn kind_schema(kind: &FieldKind) -> Value {
    match kind {
        FieldKind::Bool => json!({"type": "boolean"}),
        FieldKind::Integer => json!({"type": "integer"}),
        FieldKind::Number => json!({"type": "number"}),
        FieldKind::String => json!({"type": "string"}),
        FieldKind::Enum(tokens) => json!({"type": "string", "enum": tokens}),
        FieldKind::Ref(target) => json!({
            "type": "string",
            "description": format!("reference to a {target}"),
        }),
        FieldKind::Timestamp => json!({"type": "string", "pattern": "^[0-9]+$"}),
        FieldKind::Object(nested) => object_schema(nested),
        FieldKind::List(inner) => json!({"type": "array", "items": kind_schema(inner)}),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Pool, Schema, VirtualService};

    #[test]
    fn root_carries_draft_marker_and_required() {
        let schema = to_json_schema(Pool::schema());
        assert_eq!(schema["$schema"], DRAFT_07);
        assert_eq!(schema["required"], json!(["name"]));
        assert_eq!(schema["properties"]["url"]["readOnly"], json!(true));
        assert_eq!(schema["properties"]["default_server_port"]["default"], json!(80));
        assert_eq!(
            schema["properties"]["servers"]["items"]["required"],
            json!(["ip"])
        );
    }

    #[test]
    fn nullable_field_accepts_null() {
        let schema = to_json_schema(VirtualService::schema());
        let pool_ref = &schema["properties"]["pool_ref"];
        assert_eq!(pool_ref["anyOf"][1], json!({"type": "null"}));
    }
}
