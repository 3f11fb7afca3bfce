use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

use crate::schema::{FieldKind, FieldSpec, ObjectSchema, Schema};

/// Server-assigned modification time in microseconds since the epoch.
///
/// Carried on the wire as a decimal string (`"1699987200123456"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn from_micros(micros: u64) -> Self {
        Timestamp(micros)
    }

    pub fn as_micros(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Timestamp {
    type Err = std::num::ParseIntError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Timestamp)
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!("invalid timestamp '{s}': expected microseconds"))
        })
    }
}

pub const IP_ADDR_TYPES: &[&str] = &["V4", "DNS", "V6"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IpAddr {
    pub addr: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl IpAddr {
    pub fn v4(addr: impl Into<String>) -> Self {
        Self { addr: addr.into(), ty: "V4".into() }
    }
}

pub(crate) const IP_ADDR: ObjectSchema = ObjectSchema {
    name: "IpAddr",
    fields: &[
        FieldSpec::required("addr", FieldKind::String).doc("IP address or FQDN."),
        FieldSpec::required("type", FieldKind::Enum(IP_ADDR_TYPES)),
    ],
};

impl Schema for IpAddr {
    fn schema() -> &'static ObjectSchema {
        &IP_ADDR
    }
}

pub const MATCH_OPERATIONS: &[&str] = &["IS_IN", "IS_NOT_IN"];

/// Client address match shared by HTTP and network security rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IpAddrMatch {
    pub match_criteria: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "crate::nullable::list")]
    pub addrs: Vec<IpAddr>,
}

pub(crate) const IP_ADDR_MATCH: ObjectSchema = ObjectSchema {
    name: "IpAddrMatch",
    fields: &[
        FieldSpec::required("match_criteria", FieldKind::Enum(MATCH_OPERATIONS)),
        FieldSpec::optional("addrs", FieldKind::List(&FieldKind::Object(&IP_ADDR))),
    ],
};

impl Schema for IpAddrMatch {
    fn schema() -> &'static ObjectSchema {
        &IP_ADDR_MATCH
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

pub(crate) const KEY_VALUE: ObjectSchema = ObjectSchema {
    name: "KeyValue",
    fields: &[
        FieldSpec::required("key", FieldKind::String),
        FieldSpec::optional("value", FieldKind::String),
    ],
};

impl Schema for KeyValue {
    fn schema() -> &'static ObjectSchema {
        &KEY_VALUE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_uses_decimal_string() {
        let ts = Timestamp::from_micros(1_699_987_200_123_456);
        assert_eq!(serde_json::to_string(&ts).unwrap(), "\"1699987200123456\"");
        let back: Timestamp = serde_json::from_str("\"1699987200123456\"").unwrap();
        assert_eq!(back, ts);
        assert!(serde_json::from_str::<Timestamp>("\"yesterday\"").is_err());
        assert!(serde_json::from_str::<Timestamp>("1699987200123456").is_err());
    }

    #[test]
    fn ip_addr_renames_type() {
        let value = serde_json::to_value(IpAddr::v4("10.0.0.1")).unwrap();
        assert_eq!(value, serde_json::json!({"addr": "10.0.0.1", "type": "V4"}));
    }
}
