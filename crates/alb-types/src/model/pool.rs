use serde::{Deserialize, Serialize};

use super::{HealthMonitor, IP_ADDR, IpAddr, KEY_VALUE, KeyValue, Tenant, Timestamp};
use crate::{
    Ref,
    edition::{ENTERPRISE_ONLY, Edition, EditionRule},
    schema::{FieldKind, FieldSpec, Literal, ObjectSchema, Resource, Schema},
};

pub const LB_ALGORITHMS: &[&str] = &[
    "LB_ALGORITHM_LEAST_CONNECTIONS",
    "LB_ALGORITHM_ROUND_ROBIN",
    "LB_ALGORITHM_FASTEST_RESPONSE",
    "LB_ALGORITHM_CONSISTENT_HASH",
    "LB_ALGORITHM_LEAST_LOAD",
    "LB_ALGORITHM_FEWEST_SERVERS",
    "LB_ALGORITHM_RANDOM",
    "LB_ALGORITHM_FEWEST_TASKS",
    "LB_ALGORITHM_NEAREST_SERVER",
    "LB_ALGORITHM_CORE_AFFINITY",
    "LB_ALGORITHM_TOPOLOGY",
];

const BASIC_LB_ALGORITHMS: &[&str] = &[
    "LB_ALGORITHM_LEAST_CONNECTIONS",
    "LB_ALGORITHM_ROUND_ROBIN",
    "LB_ALGORITHM_CONSISTENT_HASH",
];

pub const LB_ALGORITHM_HASHES: &[&str] = &[
    "LB_ALGORITHM_CONSISTENT_HASH_SOURCE_IP_ADDRESS",
    "LB_ALGORITHM_CONSISTENT_HASH_SOURCE_IP_ADDRESS_AND_PORT",
    "LB_ALGORITHM_CONSISTENT_HASH_URI",
    "LB_ALGORITHM_CONSISTENT_HASH_CUSTOM_HEADER",
    "LB_ALGORITHM_CONSISTENT_HASH_CUSTOM_STRING",
    "LB_ALGORITHM_CONSISTENT_HASH_CALLID",
];

const BASIC_LB_ALGORITHM_HASHES: &[&str] = &["LB_ALGORITHM_CONSISTENT_HASH_SOURCE_IP_ADDRESS"];

const LB_ALGORITHM_GATES: &[EditionRule] = &[
    EditionRule::values(Edition::Essentials, BASIC_LB_ALGORITHMS),
    EditionRule::values(Edition::Basic, BASIC_LB_ALGORITHMS),
    EditionRule::any(Edition::Enterprise),
    EditionRule::any(Edition::EnterpriseWithCloudServices),
];

const LB_ALGORITHM_HASH_GATES: &[EditionRule] = &[
    EditionRule::values(Edition::Essentials, BASIC_LB_ALGORITHM_HASHES),
    EditionRule::values(Edition::Basic, BASIC_LB_ALGORITHM_HASHES),
    EditionRule::any(Edition::Enterprise),
    EditionRule::any(Edition::EnterpriseWithCloudServices),
];

pub const APPEND_PORT_MODES: &[&str] = &["NON_DEFAULT_80_443", "NEVER", "ALWAYS"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub ip: IpAddr,
    /// Overrides the pool's default server port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Relative share of traffic, 1-20.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Server {
    pub fn new(ip: IpAddr) -> Self {
        Self { ip, ..Default::default() }
    }
}

pub(crate) const SERVER: ObjectSchema = ObjectSchema {
    name: "Server",
    fields: &[
        FieldSpec::required("ip", FieldKind::Object(&IP_ADDR)),
        FieldSpec::optional("port", FieldKind::Integer).range(1, 65535),
        FieldSpec::optional("enabled", FieldKind::Bool).with_default(Literal::Bool(true)),
        FieldSpec::optional("ratio", FieldKind::Integer)
            .with_default(Literal::Int(1))
            .range(1, 20),
        FieldSpec::optional("hostname", FieldKind::String),
        FieldSpec::optional("description", FieldKind::String),
    ],
};

impl Schema for Server {
    fn schema() -> &'static ObjectSchema {
        &SERVER
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "_last_modified", default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_ref: Option<Ref<Tenant>>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_server_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lb_algorithm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lb_algorithm_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "crate::nullable::list")]
    pub servers: Vec<Server>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "crate::nullable::list")]
    pub health_monitor_refs: Vec<Ref<HealthMonitor>>,
    /// Zero means unlimited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_concurrent_connections_per_server: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_service_port: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub append_port: Option<String>,
    /// Minutes to drain a disabled server; -1 waits forever.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graceful_disable_timeout: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "crate::nullable::list")]
    pub markers: Vec<KeyValue>,
}

impl Pool {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    /// Servers that are not administratively disabled.
    pub fn enabled_servers(&self) -> impl Iterator<Item = &Server> {
        self.servers.iter().filter(|s| s.enabled != Some(false))
    }
}

pub(crate) const POOL: ObjectSchema = ObjectSchema {
    name: "Pool",
    fields: &[
        FieldSpec::optional("uuid", FieldKind::String),
        FieldSpec::read_only("url", FieldKind::String),
        FieldSpec::read_only("_last_modified", FieldKind::Timestamp),
        FieldSpec::optional("tenant_ref", FieldKind::Ref("tenant")),
        FieldSpec::required("name", FieldKind::String),
        FieldSpec::optional("description", FieldKind::String),
        FieldSpec::optional("default_server_port", FieldKind::Integer)
            .with_default(Literal::Int(80))
            .range(1, 65535),
        FieldSpec::optional("enabled", FieldKind::Bool).with_default(Literal::Bool(true)),
        FieldSpec::optional("lb_algorithm", FieldKind::Enum(LB_ALGORITHMS))
            .with_default(Literal::Str("LB_ALGORITHM_LEAST_CONNECTIONS"))
            .gated(LB_ALGORITHM_GATES),
        FieldSpec::optional("lb_algorithm_hash", FieldKind::Enum(LB_ALGORITHM_HASHES))
            .with_default(Literal::Str("LB_ALGORITHM_CONSISTENT_HASH_SOURCE_IP_ADDRESS"))
            .gated(LB_ALGORITHM_HASH_GATES),
        FieldSpec::optional("servers", FieldKind::List(&FieldKind::Object(&SERVER))),
        FieldSpec::optional("health_monitor_refs", FieldKind::List(&FieldKind::Ref("healthmonitor"))),
        FieldSpec::optional("max_concurrent_connections_per_server", FieldKind::Integer)
            .with_default(Literal::Int(0)),
        FieldSpec::optional("use_service_port", FieldKind::Bool)
            .with_default(Literal::Bool(false))
            .gated(ENTERPRISE_ONLY),
        FieldSpec::optional("append_port", FieldKind::Enum(APPEND_PORT_MODES))
            .with_default(Literal::Str("NEVER"))
            .since("20.1.1"),
        FieldSpec::optional("graceful_disable_timeout", FieldKind::Integer)
            .with_default(Literal::Int(1))
            .range(-1, 7200),
        FieldSpec::optional("markers", FieldKind::List(&FieldKind::Object(&KEY_VALUE)))
            .gated(ENTERPRISE_ONLY)
            .since("20.1.5"),
    ],
};

impl Schema for Pool {
    fn schema() -> &'static ObjectSchema {
        &POOL
    }
}

impl Resource for Pool {
    const KIND: &'static str = "pool";

    fn uuid(&self) -> Option<&str> {
        self.uuid.as_deref()
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn tenant_ref(&self) -> Option<&str> {
        self.tenant_ref.as_ref().map(Ref::as_str)
    }
}
