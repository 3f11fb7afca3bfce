use serde::{Deserialize, Serialize};

use super::{KEY_VALUE, KeyValue, Tenant, Timestamp};
use crate::{
    Ref,
    edition::{ENTERPRISE_ONLY, Edition, EditionRule},
    schema::{FieldKind, FieldSpec, Literal, ObjectSchema, Resource, Schema},
};

pub const HEALTH_MONITOR_TYPES: &[&str] = &[
    "HEALTH_MONITOR_PING",
    "HEALTH_MONITOR_TCP",
    "HEALTH_MONITOR_HTTP",
    "HEALTH_MONITOR_HTTPS",
    "HEALTH_MONITOR_EXTERNAL",
    "HEALTH_MONITOR_UDP",
    "HEALTH_MONITOR_DNS",
    "HEALTH_MONITOR_GSLB",
    "HEALTH_MONITOR_SIP",
    "HEALTH_MONITOR_RADIUS",
];

const BASIC_HEALTH_MONITOR_TYPES: &[&str] = &[
    "HEALTH_MONITOR_PING",
    "HEALTH_MONITOR_TCP",
    "HEALTH_MONITOR_UDP",
    "HEALTH_MONITOR_HTTP",
    "HEALTH_MONITOR_HTTPS",
];

const HEALTH_MONITOR_TYPE_GATES: &[EditionRule] = &[
    EditionRule::values(Edition::Essentials, BASIC_HEALTH_MONITOR_TYPES),
    EditionRule::values(Edition::Basic, BASIC_HEALTH_MONITOR_TYPES),
    EditionRule::any(Edition::Enterprise),
    EditionRule::any(Edition::EnterpriseWithCloudServices),
];

pub const HTTP_RESPONSE_CODES: &[&str] =
    &["HTTP_ANY", "HTTP_1XX", "HTTP_2XX", "HTTP_3XX", "HTTP_4XX", "HTTP_5XX"];

/// Request/response expectations shared by the HTTP and HTTPS monitors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthMonitorHttp {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_request: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "crate::nullable::list")]
    pub http_response_code: Vec<String>,
    /// Substring that must appear in the response body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exact_http_request: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_request_body: Option<String>,
}

pub(crate) const HEALTH_MONITOR_HTTP: ObjectSchema = ObjectSchema {
    name: "HealthMonitorHttp",
    fields: &[
        FieldSpec::optional("http_request", FieldKind::String)
            .with_default(Literal::Str("GET / HTTP/1.0")),
        FieldSpec::optional("http_response_code", FieldKind::List(&FieldKind::Enum(HTTP_RESPONSE_CODES))),
        FieldSpec::optional("http_response", FieldKind::String),
        FieldSpec::optional("exact_http_request", FieldKind::Bool)
            .with_default(Literal::Bool(false))
            .since("17.2.8"),
        FieldSpec::optional("http_request_body", FieldKind::String).since("18.2.3"),
    ],
};

impl Schema for HealthMonitorHttp {
    fn schema() -> &'static ObjectSchema {
        &HEALTH_MONITOR_HTTP
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthMonitor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "_last_modified", default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_ref: Option<Ref<Tenant>>,
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Seconds between two probes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_interval: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receive_timeout: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub successful_checks: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_checks: Option<u32>,
    /// Probe port when it differs from the server port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitor_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_federated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_monitor: Option<HealthMonitorHttp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub https_monitor: Option<HealthMonitorHttp>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "crate::nullable::list")]
    pub markers: Vec<KeyValue>,
}

impl HealthMonitor {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self { name: name.into(), ty: ty.into(), ..Default::default() }
    }
}

pub(crate) const HEALTH_MONITOR: ObjectSchema = ObjectSchema {
    name: "HealthMonitor",
    fields: &[
        FieldSpec::optional("uuid", FieldKind::String),
        FieldSpec::read_only("url", FieldKind::String),
        FieldSpec::read_only("_last_modified", FieldKind::Timestamp),
        FieldSpec::optional("tenant_ref", FieldKind::Ref("tenant")),
        FieldSpec::required("name", FieldKind::String),
        FieldSpec::required("type", FieldKind::Enum(HEALTH_MONITOR_TYPES))
            .gated(HEALTH_MONITOR_TYPE_GATES),
        FieldSpec::optional("description", FieldKind::String),
        FieldSpec::optional("send_interval", FieldKind::Integer)
            .with_default(Literal::Int(10))
            .range(1, 3600),
        FieldSpec::optional("receive_timeout", FieldKind::Integer)
            .with_default(Literal::Int(4))
            .range(1, 2400),
        FieldSpec::optional("successful_checks", FieldKind::Integer)
            .with_default(Literal::Int(2))
            .range(1, 50),
        FieldSpec::optional("failed_checks", FieldKind::Integer)
            .with_default(Literal::Int(2))
            .range(1, 50),
        FieldSpec::optional("monitor_port", FieldKind::Integer).range(1, 65535),
        FieldSpec::optional("is_federated", FieldKind::Bool)
            .with_default(Literal::Bool(false))
            .since("17.1.3"),
        FieldSpec::optional("http_monitor", FieldKind::Object(&HEALTH_MONITOR_HTTP)),
        FieldSpec::optional("https_monitor", FieldKind::Object(&HEALTH_MONITOR_HTTP)),
        FieldSpec::optional("markers", FieldKind::List(&FieldKind::Object(&KEY_VALUE)))
            .gated(ENTERPRISE_ONLY)
            .since("20.1.5"),
    ],
};

impl Schema for HealthMonitor {
    fn schema() -> &'static ObjectSchema {
        &HEALTH_MONITOR
    }
}

impl Resource for HealthMonitor {
    const KIND: &'static str = "healthmonitor";

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
