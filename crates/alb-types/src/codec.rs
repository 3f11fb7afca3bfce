//! JSON encode/decode guarded by the schema side-table.
//!
//! Decoding first walks the raw JSON against the [`ObjectSchema`]: every required
//! field must be present and non-null, and every present field must have the
//! declared JSON kind. Only then does serde populate the record, so a failure
//! never leaves a partially decoded value behind. Unknown keys are ignored.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    Collection,
    schema::{FieldKind, ObjectSchema, Schema},
};

const ROOT: &str = "$";

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed payload: {source}")]
    Malformed {
        #[source]
        source: serde_json::Error,
    },
    #[error("{kind}: missing required field '{field}'")]
    MissingRequired { kind: &'static str, field: String },
    #[error("{kind}: field '{field}' expected {expected}, found {found}")]
    TypeMismatch {
        kind: &'static str,
        field: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("{kind}: collection count {count} is smaller than the {results} results returned")]
    InconsistentCount {
        kind: &'static str,
        count: u64,
        results: usize,
    },
    #[error("{kind}: {source}")]
    Invalid {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl DecodeError {
    /// Field path the error points at, when it points at one.
    pub fn field(&self) -> Option<&str> {
        match self {
            DecodeError::MissingRequired { field, .. } | DecodeError::TypeMismatch { field, .. } => {
                Some(field.as_str())
            }
            _ => None,
        }
    }

    fn under(self, prefix: &str) -> Self {
        match self {
            DecodeError::MissingRequired { kind, field } => {
                DecodeError::MissingRequired { kind, field: join(prefix, &field) }
            }
            DecodeError::TypeMismatch { kind, field, expected, found } => DecodeError::TypeMismatch {
                kind,
                field: join(prefix, &field),
                expected,
                found,
            },
            other => other,
        }
    }
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("{kind}: required field '{field}' is not set")]
    MissingRequired { kind: &'static str, field: String },
    #[error("{kind}: collection count {count} is smaller than the {results} results held")]
    InconsistentCount {
        kind: &'static str,
        count: u64,
        results: usize,
    },
    #[error("{kind}: {source}")]
    Serialize {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Either side of a decode-then-encode pass.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

enum Problem {
    Missing {
        field: String,
    },
    Mismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl Problem {
    fn into_decode(self, kind: &'static str) -> DecodeError {
        match self {
            Problem::Missing { field } => DecodeError::MissingRequired { kind, field },
            Problem::Mismatch { field, expected, found } => {
                DecodeError::TypeMismatch { kind, field, expected, found }
            }
        }
    }

    fn into_encode(self, kind: &'static str) -> EncodeError {
        match self {
            Problem::Missing { field } | Problem::Mismatch { field, .. } => {
                EncodeError::MissingRequired { kind, field }
            }
        }
    }
}

pub fn encode<T: Schema + Serialize>(value: &T) -> Result<Vec<u8>, EncodeError> {
    let json = encode_value(value)?;
    serde_json::to_vec(&json).map_err(|source| EncodeError::Serialize { kind: T::schema().name, source })
}

/// Serializes `value`, failing if any required field (at any depth) is unset.
pub fn encode_value<T: Schema + Serialize>(value: &T) -> Result<Value, EncodeError> {
    let schema = T::schema();
    let json = serde_json::to_value(value)
        .map_err(|source| EncodeError::Serialize { kind: schema.name, source })?;
    if let Value::Object(map) = &json {
        check_object(schema, map, "", false).map_err(|p| p.into_encode(schema.name))?;
    }
    debug!(kind = schema.name, "encoded");
    Ok(json)
}

/// Like [`encode_value`] with every read-only field removed, ready to be sent
/// back to the controller.
pub fn encode_for_write<T: Schema + Serialize>(value: &T) -> Result<Value, EncodeError> {
    let mut json = encode_value(value)?;
    strip_read_only(T::schema(), &mut json);
    Ok(json)
}

pub fn decode<T: Schema + DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    let json: Value =
        serde_json::from_slice(bytes).map_err(|source| DecodeError::Malformed { source })?;
    decode_value(json)
}

pub fn decode_value<T: Schema + DeserializeOwned>(json: Value) -> Result<T, DecodeError> {
    let schema = T::schema();
    let Value::Object(map) = &json else {
        return Err(DecodeError::TypeMismatch {
            kind: schema.name,
            field: ROOT.to_string(),
            expected: "object",
            found: json_kind(&json),
        });
    };
    check_object(schema, map, "", true).map_err(|p| p.into_decode(schema.name))?;
    let value = serde_json::from_value(json)
        .map_err(|source| DecodeError::Invalid { kind: schema.name, source })?;
    debug!(kind = schema.name, "decoded");
    Ok(value)
}

pub fn decode_collection<T: Schema + DeserializeOwned>(
    bytes: &[u8],
) -> Result<Collection<T>, DecodeError> {
    let json: Value =
        serde_json::from_slice(bytes).map_err(|source| DecodeError::Malformed { source })?;
    decode_collection_value(json)
}

pub fn decode_collection_value<T: Schema + DeserializeOwned>(
    json: Value,
) -> Result<Collection<T>, DecodeError> {
    let kind = T::schema().name;
    let mismatch = |field: &str, expected: &'static str, found: &Value| DecodeError::TypeMismatch {
        kind,
        field: field.to_string(),
        expected,
        found: json_kind(found),
    };

    let mut map = match json {
        Value::Object(map) => map,
        other => return Err(mismatch(ROOT, "object", &other)),
    };
    let count = match map.get("count") {
        None | Some(Value::Null) => {
            return Err(DecodeError::MissingRequired { kind, field: "count".into() });
        }
        Some(value) => value.as_u64().ok_or_else(|| mismatch("count", "integer", value))?,
    };
    let next = match map.remove("next") {
        None | Some(Value::Null) => None,
        Some(Value::String(cursor)) => Some(cursor),
        Some(other) => return Err(mismatch("next", "string", &other)),
    };
    let items = match map.remove("results") {
        None | Some(Value::Null) => {
            return Err(DecodeError::MissingRequired { kind, field: "results".into() });
        }
        Some(Value::Array(items)) => items,
        Some(other) => return Err(mismatch("results", "array", &other)),
    };
    if items.len() as u64 > count {
        return Err(DecodeError::InconsistentCount { kind, count, results: items.len() });
    }

    let results = items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| decode_value::<T>(item).map_err(|e| e.under(&format!("results[{idx}]"))))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(kind, count, page = results.len(), more = next.is_some(), "decoded collection");
    Ok(Collection { count, next, results })
}

pub fn encode_collection<T: Schema + Serialize>(
    collection: &Collection<T>,
) -> Result<Value, EncodeError> {
    let kind = T::schema().name;
    if collection.results.len() as u64 > collection.count {
        return Err(EncodeError::InconsistentCount {
            kind,
            count: collection.count,
            results: collection.results.len(),
        });
    }
    let results = collection
        .results
        .iter()
        .map(encode_value)
        .collect::<Result<Vec<_>, _>>()?;

    let mut map = Map::new();
    map.insert("count".into(), Value::from(collection.count));
    if let Some(next) = &collection.next {
        map.insert("next".into(), Value::String(next.clone()));
    }
    map.insert("results".into(), Value::Array(results));
    Ok(Value::Object(map))
}

fn check_object(
    schema: &ObjectSchema,
    object: &Map<String, Value>,
    path: &str,
    check_types: bool,
) -> Result<(), Problem> {
    for spec in schema.fields {
        let field = join(path, spec.name);
        match object.get(spec.name) {
            None | Some(Value::Null) if spec.is_required() => {
                if spec.omit_empty {
                    warn!(
                        object = schema.name,
                        field = spec.name,
                        "field is required but tagged omit-empty; treating it as required"
                    );
                }
                return Err(Problem::Missing { field });
            }
            None | Some(Value::Null) => {}
            Some(value) => check_kind(&spec.kind, value, &field, check_types)?,
        }
    }
    Ok(())
}

fn check_kind(kind: &FieldKind, value: &Value, path: &str, check_types: bool) -> Result<(), Problem> {
    match (kind, value) {
        (FieldKind::Object(nested), Value::Object(map)) => check_object(nested, map, path, check_types),
        (FieldKind::List(inner), Value::Array(items)) => {
            for (idx, item) in items.iter().enumerate() {
                check_kind(inner, item, &format!("{path}[{idx}]"), check_types)?;
            }
            Ok(())
        }
        _ if !check_types || scalar_matches(kind, value) => Ok(()),
        _ => Err(Problem::Mismatch {
            field: path.to_string(),
            expected: kind.wire_type(),
            found: json_kind(value),
        }),
    }
}

fn scalar_matches(kind: &FieldKind, value: &Value) -> bool {
    match kind {
        FieldKind::Bool => value.is_boolean(),
        FieldKind::Integer => value.is_i64() || value.is_u64(),
        FieldKind::Number => value.is_number(),
        FieldKind::String | FieldKind::Enum(_) | FieldKind::Ref(_) | FieldKind::Timestamp => {
            value.is_string()
        }
        FieldKind::Object(_) | FieldKind::List(_) => false,
    }
}

fn strip_read_only(schema: &ObjectSchema, value: &mut Value) {
    let Value::Object(map) = value else {
        return;
    };
    for spec in schema.fields {
        if spec.is_read_only() {
            map.remove(spec.name);
        } else if let Some(child) = map.get_mut(spec.name) {
            strip_kind(&spec.kind, child);
        }
    }
}

fn strip_kind(kind: &FieldKind, value: &mut Value) {
    match kind {
        FieldKind::Object(nested) => strip_read_only(nested, value),
        FieldKind::List(inner) => {
            if let Value::Array(items) = value {
                for item in items {
                    strip_kind(inner, item);
                }
            }
        }
        _ => {}
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub(crate) fn join(prefix: &str, field: &str) -> String {
    if prefix.is_empty() || prefix == ROOT {
        field.to_string()
    } else if field.is_empty() || field == ROOT {
        prefix.to_string()
    } else if field.starts_with('[') {
        format!("{prefix}{field}")
    } else {
        format!("{prefix}.{field}")
    }
}
