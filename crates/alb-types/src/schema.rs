//! Static schema side-table: one [`ObjectSchema`] per resource or nested object.
//!
//! Field specs carry everything the Rust types cannot: wire optionality when it
//! disagrees with the type (Required + omit-empty), closed enum sets, numeric
//! ranges, defaults, edition gates and introduction versions. None of this is
//! consulted by serde; the codec checks presence and scalar kinds, the validator
//! everything else.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::edition::EditionRule;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Must be present and non-null on the wire.
    Required,
    Optional,
    /// Assigned by the controller; never required on input.
    ReadOnly,
}

#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Bool,
    Integer,
    Number,
    String,
    Enum(&'static [&'static str]),
    /// Reference to a resource of the named kind.
    Ref(&'static str),
    /// Microseconds since epoch, rendered as a decimal string.
    Timestamp,
    Object(&'static ObjectSchema),
    List(&'static FieldKind),
}

impl FieldKind {
    /// JSON type name used in diagnostics.
    pub fn wire_type(&self) -> &'static str {
        match self {
            FieldKind::Bool => "boolean",
            FieldKind::Integer => "integer",
            FieldKind::Number => "number",
            FieldKind::String | FieldKind::Enum(_) | FieldKind::Ref(_) | FieldKind::Timestamp => {
                "string"
            }
            FieldKind::Object(_) => "object",
            FieldKind::List(_) => "array",
        }
    }

    /// Innermost kind, looking through lists.
    pub fn element(&self) -> &FieldKind {
        match self {
            FieldKind::List(inner) => inner.element(),
            other => other,
        }
    }
}

/// Constant default value of a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Str(&'static str),
}

impl Literal {
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Literal::Bool(b), Value::Bool(v)) => b == v,
            (Literal::Int(i), Value::Number(n)) => n.as_i64() == Some(*i),
            (Literal::Str(s), Value::String(v)) => s == v,
            _ => false,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Int(i) => Value::from(*i),
            Literal::Str(s) => Value::String((*s).to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Wire name.
    pub name: &'static str,
    pub kind: FieldKind,
    pub presence: Presence,
    /// Wire tag says the field may be omitted.
    pub omit_empty: bool,
    /// An explicit `null` is meaningful and must round-trip.
    pub nullable: bool,
    pub default: Option<Literal>,
    pub range: Option<(i64, i64)>,
    pub editions: &'static [EditionRule],
    pub since: Option<&'static str>,
    pub doc: &'static str,
}

impl FieldSpec {
    const fn with_presence(name: &'static str, kind: FieldKind, presence: Presence) -> Self {
        Self {
            name,
            kind,
            presence,
            omit_empty: false,
            nullable: false,
            default: None,
            range: None,
            editions: &[],
            since: None,
            doc: "",
        }
    }

    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self::with_presence(name, kind, Presence::Required)
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self::with_presence(name, kind, Presence::Optional)
    }

    pub const fn read_only(name: &'static str, kind: FieldKind) -> Self {
        Self::with_presence(name, kind, Presence::ReadOnly)
    }

    pub const fn omit_empty(mut self) -> Self {
        self.omit_empty = true;
        self
    }

    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub const fn with_default(mut self, default: Literal) -> Self {
        self.default = Some(default);
        self
    }

    pub const fn range(mut self, min: i64, max: i64) -> Self {
        self.range = Some((min, max));
        self
    }

    pub const fn gated(mut self, editions: &'static [EditionRule]) -> Self {
        self.editions = editions;
        self
    }

    pub const fn since(mut self, version: &'static str) -> Self {
        self.since = Some(version);
        self
    }

    pub const fn doc(mut self, doc: &'static str) -> Self {
        self.doc = doc;
        self
    }

    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }

    pub fn is_read_only(&self) -> bool {
        self.presence == Presence::ReadOnly
    }

    /// Required on the wire, yet tagged as omittable.
    pub fn is_conflicting(&self) -> bool {
        self.is_required() && self.omit_empty
    }
}

#[derive(Debug)]
pub struct ObjectSchema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

/// A field marked both Required and omit-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub object: &'static str,
    pub field: &'static str,
}

impl ObjectSchema {
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields.iter().filter(|f| f.is_required())
    }

    pub fn read_only_fields(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields.iter().filter(|f| f.is_read_only())
    }

    /// Required/omit-empty conflicts in this object and every nested object,
    /// each object reported once.
    pub fn conflicts(&'static self) -> Vec<Conflict> {
        let mut seen = Vec::new();
        let mut out = Vec::new();
        collect_conflicts(self, &mut seen, &mut out);
        out
    }
}

fn collect_conflicts(
    schema: &'static ObjectSchema,
    seen: &mut Vec<&'static str>,
    out: &mut Vec<Conflict>,
) {
    if seen.contains(&schema.name) {
        return;
    }
    seen.push(schema.name);
    for field in schema.fields {
        if field.is_conflicting() {
            out.push(Conflict { object: schema.name, field: field.name });
        }
        if let FieldKind::Object(nested) = field.kind.element() {
            collect_conflicts(*nested, seen, out);
        }
    }
}

/// A record with a static schema (top-level resource or nested value object).
pub trait Schema {
    fn schema() -> &'static ObjectSchema;
}

/// A top-level, independently identified API object.
pub trait Resource: Schema + Serialize + DeserializeOwned {
    /// Wire kind name, as used in collection endpoints (`pool`, `virtualservice`).
    const KIND: &'static str;

    fn uuid(&self) -> Option<&str>;

    fn name(&self) -> Option<&str>;

    fn tenant_ref(&self) -> Option<&str> {
        None
    }
}
