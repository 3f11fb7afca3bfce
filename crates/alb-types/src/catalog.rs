//! Registry of every resource kind, keyed by its wire kind name.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde_json::Value;

use crate::{
    Alert, CodecError, HealthMonitor, HttpPolicySet, NetworkSecurityPolicy, Pool, Tenant,
    VirtualService,
    codec::{decode_collection_value, decode_value, encode_collection, encode_for_write, encode_value},
    schema::{Conflict, ObjectSchema, Resource},
    validate::{ValidateOptions, Violation, validate_value},
};

type Normalize = fn(Value) -> Result<Value, CodecError>;

#[derive(Debug, Clone)]
pub struct KindEntry {
    pub kind: &'static str,
    pub schema: &'static ObjectSchema,
    normalize: Normalize,
    normalize_for_write: Normalize,
    normalize_collection: Normalize,
}

impl KindEntry {
    fn of<T: Resource>() -> Self {
        Self {
            kind: T::KIND,
            schema: T::schema(),
            normalize: normalize::<T>,
            normalize_for_write: normalize_for_write::<T>,
            normalize_collection: normalize_collection::<T>,
        }
    }

    /// Decodes `json` as this kind and encodes it back, yielding the canonical
    /// wire form: unknown keys dropped, unset optionals omitted.
    pub fn normalize(&self, json: Value) -> Result<Value, CodecError> {
        (self.normalize)(json)
    }

    /// Like [`KindEntry::normalize`], with read-only fields dropped.
    pub fn normalize_for_write(&self, json: Value) -> Result<Value, CodecError> {
        (self.normalize_for_write)(json)
    }

    /// Same as [`KindEntry::normalize`] for a `{count, next, results}` envelope.
    pub fn normalize_collection(&self, json: Value) -> Result<Value, CodecError> {
        (self.normalize_collection)(json)
    }

    pub fn validate(&self, json: &Value, opts: &ValidateOptions) -> Vec<Violation> {
        validate_value(self.schema, json, opts)
    }
}

fn normalize<T: Resource>(json: Value) -> Result<Value, CodecError> {
    let value: T = decode_value(json)?;
    Ok(encode_value(&value)?)
}

fn normalize_for_write<T: Resource>(json: Value) -> Result<Value, CodecError> {
    let value: T = decode_value(json)?;
    Ok(encode_for_write(&value)?)
}

fn normalize_collection<T: Resource>(json: Value) -> Result<Value, CodecError> {
    let page = decode_collection_value::<T>(json)?;
    Ok(encode_collection(&page)?)
}

static KINDS: Lazy<IndexMap<&'static str, KindEntry>> = Lazy::new(|| {
    [
        KindEntry::of::<Tenant>(),
        KindEntry::of::<Pool>(),
        KindEntry::of::<HealthMonitor>(),
        KindEntry::of::<HttpPolicySet>(),
        KindEntry::of::<NetworkSecurityPolicy>(),
        KindEntry::of::<VirtualService>(),
        KindEntry::of::<Alert>(),
    ]
    .into_iter()
    .map(|entry| (entry.kind, entry))
    .collect()
});

pub fn kinds() -> impl Iterator<Item = &'static KindEntry> {
    KINDS.values()
}

/// Looks a kind up by wire name (`virtualservice`) or schema name
/// (`VirtualService`), ignoring case.
pub fn find_kind(name: &str) -> Option<&'static KindEntry> {
    KINDS.get(name).or_else(|| {
        KINDS.values().find(|entry| {
            entry.kind.eq_ignore_ascii_case(name) || entry.schema.name.eq_ignore_ascii_case(name)
        })
    })
}

/// Every Required + omit-empty field reachable from any kind, each reported once.
pub fn schema_conflicts() -> Vec<Conflict> {
    let mut out: Vec<Conflict> = Vec::new();
    for entry in kinds() {
        for conflict in entry.schema.conflicts() {
            if !out.contains(&conflict) {
                out.push(conflict);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn catalog_lists_kinds_in_registration_order() {
        let names: Vec<_> = kinds().map(|e| e.kind).collect();
        assert_eq!(
            names,
            vec![
                "tenant",
                "pool",
                "healthmonitor",
                "httppolicyset",
                "networksecuritypolicy",
                "virtualservice",
                "alert"
            ]
        );
    }

    #[test]
    fn lookup_ignores_case_and_accepts_schema_names() {
        assert_eq!(find_kind("pool").map(|e| e.kind), Some("pool"));
        assert_eq!(find_kind("VirtualService").map(|e| e.kind), Some("virtualservice"));
        assert_eq!(find_kind("HTTPPOLICYSET").map(|e| e.kind), Some("httppolicyset"));
        assert!(find_kind("gslb").is_none());
    }

    #[test]
    fn conflicts_cover_nested_objects() {
        let conflicts = schema_conflicts();
        assert!(conflicts.contains(&Conflict { object: "NetworkSecurityRule", field: "match" }));
        assert!(conflicts.contains(&Conflict { object: "HTTPPolicies", field: "http_policy_set_ref" }));
        assert_eq!(conflicts.len(), 2);
    }

    #[test]
    fn normalize_drops_unknown_keys() {
        let entry = find_kind("tenant").unwrap();
        let out = entry.normalize(json!({"name": "t1", "future_field": 7})).unwrap();
        assert_eq!(out, json!({"name": "t1"}));

        let out = entry
            .normalize_for_write(json!({"name": "t1", "url": "https://ctl/api/tenant/t-1"}))
            .unwrap();
        assert_eq!(out, json!({"name": "t1"}));
    }
}
