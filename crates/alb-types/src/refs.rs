use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    convert::Infallible,
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    str::FromStr,
};

use crate::schema::Resource;

/// Reference to another resource of kind `K`, carried as its UUID or URL.
///
/// The value is opaque: whether the target exists, or is of kind `K`, is only
/// known to the controller. Any string is accepted, the empty one included;
/// [`crate::validate`] reports empty references as advisory violations. The
/// marker exists so a `Ref<Pool>` cannot be put where a `Ref<HealthMonitor>`
/// is expected.
pub struct Ref<K> {
    value: String,
    kind: PhantomData<fn() -> K>,
}

impl<K> Ref<K> {
    pub fn new(value: impl Into<String>) -> Self {
        Ref { value: value.into(), kind: PhantomData }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }

    /// True when the value is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// True when the reference is a URL rather than a bare UUID.
    pub fn is_url(&self) -> bool {
        self.value.starts_with("https://")
            || self.value.starts_with("http://")
            || self.value.starts_with("/api/")
    }

    /// Last path segment with any `#name` fragment or query stripped.
    ///
    /// For `https://ctl/api/pool/pool-1a2b#web` this is `pool-1a2b`. Lexical only.
    pub fn last_segment(&self) -> &str {
        let end = self
            .value
            .find(['#', '?'])
            .unwrap_or(self.value.len());
        let trimmed = self.value[..end].trim_end_matches('/');
        trimmed.rsplit('/').next().unwrap_or(trimmed)
    }

    /// Reinterprets the reference as pointing at another kind.
    pub fn cast<T>(self) -> Ref<T> {
        Ref { value: self.value, kind: PhantomData }
    }
}

impl<K: Resource> Ref<K> {
    pub fn kind(&self) -> &'static str {
        K::KIND
    }
}

impl<K> Clone for Ref<K> {
    fn clone(&self) -> Self {
        Ref { value: self.value.clone(), kind: PhantomData }
    }
}

impl<K> PartialEq for Ref<K> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<K> Eq for Ref<K> {}

impl<K> Hash for Ref<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<K> fmt::Debug for Ref<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<K> fmt::Display for Ref<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<K> Serialize for Ref<K> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de, K> Deserialize<'de> for Ref<K> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Ref::new)
    }
}

impl<K> FromStr for Ref<K> {
    type Err = Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Ref::new(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Pool, Tenant};

    #[test]
    fn empty_reference_is_opaque() {
        let empty: Ref<Pool> = serde_json::from_str("\"\"").unwrap();
        assert!(empty.is_blank());
        assert_eq!(serde_json::to_string(&empty).unwrap(), "\"\"");
        assert!(Ref::<Pool>::new("  ").is_blank());
        assert!(!Ref::<Pool>::new("pool-1").is_blank());
    }

    #[test]
    fn last_segment_strips_fragment_and_query() {
        let url: Ref<Pool> = "https://10.0.0.1/api/pool/pool-1a2b#web".parse().unwrap();
        assert!(url.is_url());
        assert_eq!(url.last_segment(), "pool-1a2b");

        let query: Ref<Tenant> = "/api/tenant/?name=admin".parse().unwrap();
        assert_eq!(query.last_segment(), "tenant");

        let bare: Ref<Pool> = "pool-9f".parse().unwrap();
        assert!(!bare.is_url());
        assert_eq!(bare.last_segment(), "pool-9f");
    }

    #[test]
    fn serializes_as_plain_string() {
        let r: Ref<Tenant> = Ref::new("tenant-admin");
        assert_eq!(serde_json::to_string(&r).unwrap(), "\"tenant-admin\"");
        assert_eq!(r.kind(), "tenant");
    }
}
