use serde::{Deserialize, Serialize};

use super::{IP_ADDR_MATCH, Indexed, IpAddrMatch, Tenant, Timestamp, sorted_by_index};
use crate::{
    Ref,
    schema::{FieldKind, FieldSpec, Literal, ObjectSchema, Resource, Schema},
};

pub const NETWORK_SECURITY_ACTIONS: &[&str] = &[
    "NETWORK_SECURITY_POLICY_ACTION_TYPE_ALLOW",
    "NETWORK_SECURITY_POLICY_ACTION_TYPE_DENY",
    "NETWORK_SECURITY_POLICY_ACTION_TYPE_RATE_LIMIT",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkSecurityMatchTarget {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_ip: Option<IpAddrMatch>,
}

pub(crate) const NETWORK_SECURITY_MATCH_TARGET: ObjectSchema = ObjectSchema {
    name: "NetworkSecurityMatchTarget",
    fields: &[FieldSpec::optional("client_ip", FieldKind::Object(&IP_ADDR_MATCH))],
};

impl Schema for NetworkSecurityMatchTarget {
    fn schema() -> &'static ObjectSchema {
        &NETWORK_SECURITY_MATCH_TARGET
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkSecurityRule {
    pub action: String,
    /// Minutes a blocked client stays blocked; 0 blocks indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    pub enable: bool,
    pub index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<bool>,
    /// Required by the controller although the wire tag allows omission.
    /// The codec rejects it when absent.
    #[serde(rename = "match", default, skip_serializing_if = "Option::is_none")]
    pub match_target: Option<NetworkSecurityMatchTarget>,
    pub name: String,
}

impl Indexed for NetworkSecurityRule {
    fn index(&self) -> u32 {
        self.index
    }
}

pub(crate) const NETWORK_SECURITY_RULE: ObjectSchema = ObjectSchema {
    name: "NetworkSecurityRule",
    fields: &[
        FieldSpec::required("action", FieldKind::Enum(NETWORK_SECURITY_ACTIONS)),
        FieldSpec::optional("age", FieldKind::Integer)
            .with_default(Literal::Int(0))
            .range(0, 6000),
        FieldSpec::required("enable", FieldKind::Bool),
        FieldSpec::required("index", FieldKind::Integer),
        FieldSpec::optional("log", FieldKind::Bool).with_default(Literal::Bool(false)),
        FieldSpec::required("match", FieldKind::Object(&NETWORK_SECURITY_MATCH_TARGET)).omit_empty(),
        FieldSpec::required("name", FieldKind::String),
    ],
};

impl Schema for NetworkSecurityRule {
    fn schema() -> &'static ObjectSchema {
        &NETWORK_SECURITY_RULE
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkSecurityPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "_last_modified", default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_ref: Option<Ref<Tenant>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "crate::nullable::list")]
    pub rules: Vec<NetworkSecurityRule>,
}

impl NetworkSecurityPolicy {
    pub fn sorted_rules(&self) -> Vec<&NetworkSecurityRule> {
        sorted_by_index(&self.rules)
    }
}

pub(crate) const NETWORK_SECURITY_POLICY: ObjectSchema = ObjectSchema {
    name: "NetworkSecurityPolicy",
    fields: &[
        FieldSpec::optional("uuid", FieldKind::String),
        FieldSpec::read_only("url", FieldKind::String),
        FieldSpec::read_only("_last_modified", FieldKind::Timestamp),
        FieldSpec::optional("tenant_ref", FieldKind::Ref("tenant")),
        FieldSpec::optional("name", FieldKind::String),
        FieldSpec::optional("description", FieldKind::String),
        FieldSpec::optional("rules", FieldKind::List(&FieldKind::Object(&NETWORK_SECURITY_RULE))),
    ],
};

impl Schema for NetworkSecurityPolicy {
    fn schema() -> &'static ObjectSchema {
        &NETWORK_SECURITY_POLICY
    }
}

impl Resource for NetworkSecurityPolicy {
    const KIND: &'static str = "networksecuritypolicy";

    fn uuid(&self) -> Option<&str> {
        self.uuid.as_deref()
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn tenant_ref(&self) -> Option<&str> {
        self.tenant_ref.as_ref().map(Ref::as_str)
    }
}
