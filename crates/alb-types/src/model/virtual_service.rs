use serde::{Deserialize, Serialize};

use super::{HttpPolicySet, NetworkSecurityPolicy, Pool, Tenant, Timestamp};
use crate::{
    Ref,
    edition::{ENTERPRISE_ONLY, Edition, EditionRule},
    schema::{FieldKind, FieldSpec, Literal, ObjectSchema, Resource, Schema},
};

pub const VS_TYPES: &[&str] = &["VS_TYPE_NORMAL", "VS_TYPE_VH_PARENT", "VS_TYPE_VH_CHILD"];

const NORMAL_ONLY: &[&str] = &["VS_TYPE_NORMAL"];

const VS_TYPE_GATES: &[EditionRule] = &[
    EditionRule::values(Edition::Essentials, NORMAL_ONLY),
    EditionRule::values(Edition::Basic, NORMAL_ONLY),
    EditionRule::any(Edition::Enterprise),
    EditionRule::any(Edition::EnterpriseWithCloudServices),
];

/// A listening port, or a port range when `port_range_end` is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_ssl: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_range_end: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_http2: Option<bool>,
}

impl Service {
    pub fn new(port: u16) -> Self {
        Self { port, ..Default::default() }
    }

    /// Inclusive port span served.
    pub fn ports(&self) -> std::ops::RangeInclusive<u16> {
        match self.port_range_end {
            Some(end) if end > self.port => self.port..=end,
            _ => self.port..=self.port,
        }
    }
}

pub(crate) const SERVICE: ObjectSchema = ObjectSchema {
    name: "Service",
    fields: &[
        FieldSpec::required("port", FieldKind::Integer).range(1, 65535),
        FieldSpec::optional("enable_ssl", FieldKind::Bool).with_default(Literal::Bool(false)),
        FieldSpec::optional("port_range_end", FieldKind::Integer)
            .with_default(Literal::Int(0))
            .range(0, 65535),
        FieldSpec::optional("enable_http2", FieldKind::Bool)
            .with_default(Literal::Bool(false))
            .gated(ENTERPRISE_ONLY)
            .since("18.2.6"),
    ],
};

impl Schema for Service {
    fn schema() -> &'static ObjectSchema {
        &SERVICE
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HttpPolicies {
    pub index: u32,
    /// Required by the controller, tagged omittable on the wire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_policy_set_ref: Option<Ref<HttpPolicySet>>,
}

pub(crate) const HTTP_POLICIES: ObjectSchema = ObjectSchema {
    name: "HTTPPolicies",
    fields: &[
        FieldSpec::required("index", FieldKind::Integer),
        FieldSpec::required("http_policy_set_ref", FieldKind::Ref("httppolicyset")).omit_empty(),
    ],
};

impl Schema for HttpPolicies {
    fn schema() -> &'static ObjectSchema {
        &HTTP_POLICIES
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VirtualService {
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
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traffic_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "crate::nullable::list")]
    pub services: Vec<Service>,
    /// `Some(None)` encodes an explicit `null`, detaching the pool.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "crate::nullable")]
    pub pool_ref: Option<Option<Ref<Pool>>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "crate::nullable::list")]
    pub http_policies: Vec<HttpPolicies>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_security_policy_ref: Option<Ref<NetworkSecurityPolicy>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub east_west_placement: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_client_conn_on_config_update: Option<bool>,
}

impl VirtualService {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    /// Pool currently attached, if any. An explicit detach reads as none.
    pub fn pool(&self) -> Option<&Ref<Pool>> {
        self.pool_ref.as_ref().and_then(Option::as_ref)
    }
}

pub(crate) const VIRTUAL_SERVICE: ObjectSchema = ObjectSchema {
    name: "VirtualService",
    fields: &[
        FieldSpec::optional("uuid", FieldKind::String),
        FieldSpec::read_only("url", FieldKind::String),
        FieldSpec::read_only("_last_modified", FieldKind::Timestamp),
        FieldSpec::optional("tenant_ref", FieldKind::Ref("tenant")),
        FieldSpec::required("name", FieldKind::String),
        FieldSpec::optional("description", FieldKind::String),
        FieldSpec::optional("type", FieldKind::Enum(VS_TYPES))
            .with_default(Literal::Str("VS_TYPE_NORMAL"))
            .gated(VS_TYPE_GATES),
        FieldSpec::optional("enabled", FieldKind::Bool).with_default(Literal::Bool(true)),
        FieldSpec::optional("traffic_enabled", FieldKind::Bool).with_default(Literal::Bool(true)),
        FieldSpec::optional("services", FieldKind::List(&FieldKind::Object(&SERVICE))),
        FieldSpec::optional("pool_ref", FieldKind::Ref("pool")).nullable(),
        FieldSpec::optional("http_policies", FieldKind::List(&FieldKind::Object(&HTTP_POLICIES))),
        FieldSpec::optional("network_security_policy_ref", FieldKind::Ref("networksecuritypolicy")),
        FieldSpec::optional("east_west_placement", FieldKind::Bool)
            .with_default(Literal::Bool(false))
            .gated(ENTERPRISE_ONLY),
        FieldSpec::optional("close_client_conn_on_config_update", FieldKind::Bool)
            .with_default(Literal::Bool(false))
            .since("20.1.4"),
    ],
};

impl Schema for VirtualService {
    fn schema() -> &'static ObjectSchema {
        &VIRTUAL_SERVICE
    }
}

impl Resource for VirtualService {
    const KIND: &'static str = "virtualservice";

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
