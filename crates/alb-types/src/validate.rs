//! Advisory pre-flight checks.
//!
//! Nothing here is enforced by the codec: enum sets may grow on newer
//! controllers and edition gates are decided server-side. Callers decide
//! whether a [`Violation`] blocks a write.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    ApiVersion,
    codec::join,
    edition::{Allowance, Edition, allowance_for},
    schema::{FieldKind, FieldSpec, ObjectSchema, Schema},
};

#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "violation", rename_all = "snake_case")]
pub enum Violation {
    #[error("{field}: required field is missing")]
    MissingRequired { field: String },
    #[error("{field}: '{value}' is not one of the known values")]
    UnknownEnumValue {
        field: String,
        value: String,
        allowed: &'static [&'static str],
    },
    #[error("{field}: value {value} is not available in the {edition} edition")]
    EditionRestricted {
        field: String,
        edition: Edition,
        value: Value,
    },
    #[error("{field}: {value} is outside {min}..={max}")]
    OutOfRange { field: String, value: i64, min: i64, max: i64 },
    #[error("{field}: read-only field is set")]
    ReadOnlySet { field: String },
    #[error("{field}: introduced in {since}, target controller runs {version}")]
    NotInVersion {
        field: String,
        since: &'static str,
        version: String,
    },
    #[error("{field}: reference is empty")]
    EmptyReference { field: String },
}

impl Violation {
    pub fn field(&self) -> &str {
        match self {
            Violation::MissingRequired { field }
            | Violation::UnknownEnumValue { field, .. }
            | Violation::EditionRestricted { field, .. }
            | Violation::OutOfRange { field, .. }
            | Violation::ReadOnlySet { field }
            | Violation::NotInVersion { field, .. }
            | Violation::EmptyReference { field } => field,
        }
    }

    /// Re-roots the violation under `prefix`, e.g. `results[3]`.
    pub fn under(mut self, prefix: &str) -> Self {
        let field = match &mut self {
            Violation::MissingRequired { field }
            | Violation::UnknownEnumValue { field, .. }
            | Violation::EditionRestricted { field, .. }
            | Violation::OutOfRange { field, .. }
            | Violation::ReadOnlySet { field }
            | Violation::NotInVersion { field, .. }
            | Violation::EmptyReference { field } => field,
        };
        *field = join(prefix, field);
        self
    }
}

#[derive(Debug, Clone)]
pub struct ValidateOptions {
    pub edition: Edition,
    /// Target controller version; `None` skips introduction checks.
    pub api_version: Option<ApiVersion>,
    /// Also flag read-only fields, as a create/update body must not carry them.
    pub for_write: bool,
}

impl ValidateOptions {
    pub fn new(edition: Edition) -> Self {
        Self { edition, api_version: None, for_write: false }
    }

    pub fn with_api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    pub fn for_write(mut self) -> Self {
        self.for_write = true;
        self
    }
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self::new(Edition::Enterprise)
    }
}

pub fn validate<T: Schema + Serialize>(value: &T, opts: &ValidateOptions) -> Vec<Violation> {
    match serde_json::to_value(value) {
        Ok(json) => validate_value(T::schema(), &json, opts),
        Err(err) => {
            warn!(kind = T::schema().name, error = %err, "cannot serialize for validation");
            Vec::new()
        }
    }
}

/// Validates a raw JSON object against `schema`. Non-object input yields no
/// violations; shape problems are the codec's concern.
pub fn validate_value(schema: &ObjectSchema, value: &Value, opts: &ValidateOptions) -> Vec<Violation> {
    let mut out = Vec::new();
    if let Value::Object(map) = value {
        check_object(schema, map, "", opts, &mut out);
    }
    debug!(
        kind = schema.name,
        edition = %opts.edition,
        violations = out.len(),
        "validated"
    );
    out
}

fn check_object(
    schema: &ObjectSchema,
    object: &Map<String, Value>,
    path: &str,
    opts: &ValidateOptions,
    out: &mut Vec<Violation>,
) {
    for spec in schema.fields {
        let field = join(path, spec.name);
        let value = match object.get(spec.name) {
            None | Some(Value::Null) => {
                if spec.is_required() {
                    out.push(Violation::MissingRequired { field });
                }
                continue;
            }
            Some(value) => value,
        };
        if spec.is_read_only() && opts.for_write {
            out.push(Violation::ReadOnlySet { field: field.clone() });
        }
        check_since(spec, &field, opts, out);
        check_edition(spec, value, &field, opts.edition, out);
        check_kind(spec, &spec.kind, value, &field, opts, out);
    }
}

fn check_since(spec: &FieldSpec, field: &str, opts: &ValidateOptions, out: &mut Vec<Violation>) {
    let (Some(since), Some(target)) = (spec.since, opts.api_version.as_ref()) else {
        return;
    };
    match ApiVersion::parse(since) {
        Ok(introduced) if introduced > *target => out.push(Violation::NotInVersion {
            field: field.to_string(),
            since,
            version: target.to_string(),
        }),
        Ok(_) => {}
        Err(err) => warn!(field, error = %err, "bad introduction version in schema"),
    }
}

fn check_edition(
    spec: &FieldSpec,
    value: &Value,
    field: &str,
    edition: Edition,
    out: &mut Vec<Violation>,
) {
    let restricted = |value: &Value| Violation::EditionRestricted {
        field: field.to_string(),
        edition,
        value: value.clone(),
    };
    match allowance_for(spec.editions, edition) {
        Some(Allowance::Any) => {}
        Some(Allowance::Values(allowed)) => {
            for item in scalars(value) {
                if let Value::String(token) = item
                    && !allowed.contains(&token.as_str())
                {
                    out.push(restricted(item));
                }
            }
        }
        None => {
            let is_default = match (&spec.default, value) {
                (Some(default), value) => default.matches(value),
                (None, Value::Array(items)) => items.is_empty(),
                (None, _) => false,
            };
            if !is_default {
                out.push(restricted(value));
            }
        }
    }
}

fn check_kind(
    spec: &FieldSpec,
    kind: &FieldKind,
    value: &Value,
    field: &str,
    opts: &ValidateOptions,
    out: &mut Vec<Violation>,
) {
    match (kind, value) {
        (FieldKind::Object(nested), Value::Object(map)) => check_object(nested, map, field, opts, out),
        (FieldKind::List(inner), Value::Array(items)) => {
            for (idx, item) in items.iter().enumerate() {
                check_kind(spec, inner, item, &format!("{field}[{idx}]"), opts, out);
            }
        }
        (FieldKind::Enum(allowed), Value::String(token)) => {
            if !allowed.contains(&token.as_str()) {
                out.push(Violation::UnknownEnumValue {
                    field: field.to_string(),
                    value: token.clone(),
                    allowed: *allowed,
                });
            }
        }
        (FieldKind::Ref(_), Value::String(reference)) if reference.trim().is_empty() => {
            out.push(Violation::EmptyReference { field: field.to_string() });
        }
        (FieldKind::Integer, Value::Number(n)) => {
            if let (Some((min, max)), Some(v)) = (spec.range, n.as_i64())
                && !(min..=max).contains(&v)
            {
                out.push(Violation::OutOfRange { field: field.to_string(), value: v, min, max });
            }
        }
        _ => {}
    }
}

/// Scalar values of `value`, looking through one level of array.
fn scalars(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    }
}
