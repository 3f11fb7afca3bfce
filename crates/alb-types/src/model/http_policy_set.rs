use serde::{Deserialize, Serialize};

use super::{IP_ADDR_MATCH, Indexed, IpAddrMatch, Tenant, Timestamp, sorted_by_index};
use crate::{
    Ref,
    schema::{FieldKind, FieldSpec, Literal, ObjectSchema, Resource, Schema},
};

pub const STRING_OPERATIONS: &[&str] = &[
    "BEGINS_WITH",
    "DOES_NOT_BEGIN_WITH",
    "CONTAINS",
    "DOES_NOT_CONTAIN",
    "ENDS_WITH",
    "DOES_NOT_END_WITH",
    "EQUALS",
    "DOES_NOT_EQUAL",
    "REGEX_MATCH",
    "REGEX_DOES_NOT_MATCH",
];

pub const MATCH_CASES: &[&str] = &["SENSITIVE", "INSENSITIVE"];

pub const REDIRECT_PROTOCOLS: &[&str] = &["HTTP", "HTTPS"];

pub const REDIRECT_STATUS_CODES: &[&str] = &[
    "HTTP_REDIRECT_STATUS_CODE_301",
    "HTTP_REDIRECT_STATUS_CODE_302",
    "HTTP_REDIRECT_STATUS_CODE_307",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathMatch {
    pub match_criteria: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "crate::nullable::list")]
    pub match_str: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_case: Option<String>,
}

pub(crate) const PATH_MATCH: ObjectSchema = ObjectSchema {
    name: "PathMatch",
    fields: &[
        FieldSpec::required("match_criteria", FieldKind::Enum(STRING_OPERATIONS)),
        FieldSpec::optional("match_str", FieldKind::List(&FieldKind::String)),
        FieldSpec::optional("match_case", FieldKind::Enum(MATCH_CASES))
            .with_default(Literal::Str("INSENSITIVE")),
    ],
};

impl Schema for PathMatch {
    fn schema() -> &'static ObjectSchema {
        &PATH_MATCH
    }
}

/// Conditions a request must meet for a rule to fire. All present matchers must hold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchTarget {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathMatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_ip: Option<IpAddrMatch>,
}

pub(crate) const MATCH_TARGET: ObjectSchema = ObjectSchema {
    name: "MatchTarget",
    fields: &[
        FieldSpec::optional("path", FieldKind::Object(&PATH_MATCH)),
        FieldSpec::optional("client_ip", FieldKind::Object(&IP_ADDR_MATCH)),
    ],
};

impl Schema for MatchTarget {
    fn schema() -> &'static ObjectSchema {
        &MATCH_TARGET
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HttpRedirectAction {
    pub protocol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_query: Option<bool>,
}

pub(crate) const HTTP_REDIRECT_ACTION: ObjectSchema = ObjectSchema {
    name: "HTTPRedirectAction",
    fields: &[
        FieldSpec::required("protocol", FieldKind::Enum(REDIRECT_PROTOCOLS)),
        FieldSpec::optional("host", FieldKind::String),
        FieldSpec::optional("port", FieldKind::Integer).range(1, 65535),
        FieldSpec::optional("status_code", FieldKind::Enum(REDIRECT_STATUS_CODES))
            .with_default(Literal::Str("HTTP_REDIRECT_STATUS_CODE_302")),
        FieldSpec::optional("keep_query", FieldKind::Bool).with_default(Literal::Bool(true)),
    ],
};

impl Schema for HttpRedirectAction {
    fn schema() -> &'static ObjectSchema {
        &HTTP_REDIRECT_ACTION
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HttpRequestRule {
    pub enable: bool,
    /// Evaluation order within the policy, lowest first.
    pub index: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_headers: Option<bool>,
    #[serde(rename = "match", default, skip_serializing_if = "Option::is_none")]
    pub match_target: Option<MatchTarget>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_action: Option<HttpRedirectAction>,
}

impl HttpRequestRule {
    /// An enabled rule with nothing but its identity set.
    pub fn new(index: u32, name: impl Into<String>) -> Self {
        Self { enable: true, index, name: name.into(), ..Default::default() }
    }
}

impl Indexed for HttpRequestRule {
    fn index(&self) -> u32 {
        self.index
    }
}

pub(crate) const HTTP_REQUEST_RULE: ObjectSchema = ObjectSchema {
    name: "HTTPRequestRule",
    fields: &[
        FieldSpec::required("enable", FieldKind::Bool),
        FieldSpec::required("index", FieldKind::Integer),
        FieldSpec::required("name", FieldKind::String),
        FieldSpec::optional("log", FieldKind::Bool).with_default(Literal::Bool(false)),
        FieldSpec::optional("all_headers", FieldKind::Bool).with_default(Literal::Bool(false)),
        FieldSpec::optional("match", FieldKind::Object(&MATCH_TARGET)),
        FieldSpec::optional("redirect_action", FieldKind::Object(&HTTP_REDIRECT_ACTION)),
    ],
};

impl Schema for HttpRequestRule {
    fn schema() -> &'static ObjectSchema {
        &HTTP_REQUEST_RULE
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HttpRequestPolicy {
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "crate::nullable::list")]
    pub rules: Vec<HttpRequestRule>,
}

impl HttpRequestPolicy {
    /// Rules in evaluation order. The wire order is not significant.
    pub fn sorted_rules(&self) -> Vec<&HttpRequestRule> {
        sorted_by_index(&self.rules)
    }
}

pub(crate) const HTTP_REQUEST_POLICY: ObjectSchema = ObjectSchema {
    name: "HTTPRequestPolicy",
    fields: &[FieldSpec::optional("rules", FieldKind::List(&FieldKind::Object(&HTTP_REQUEST_RULE)))],
};

impl Schema for HttpRequestPolicy {
    fn schema() -> &'static ObjectSchema {
        &HTTP_REQUEST_POLICY
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HttpPolicySet {
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
    pub http_request_policy: Option<HttpRequestPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_internal_policy: Option<bool>,
}

impl HttpPolicySet {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }
}

pub(crate) const HTTP_POLICY_SET: ObjectSchema = ObjectSchema {
    name: "HTTPPolicySet",
    fields: &[
        FieldSpec::optional("uuid", FieldKind::String),
        FieldSpec::read_only("url", FieldKind::String),
        FieldSpec::read_only("_last_modified", FieldKind::Timestamp),
        FieldSpec::optional("tenant_ref", FieldKind::Ref("tenant")),
        FieldSpec::required("name", FieldKind::String),
        FieldSpec::optional("description", FieldKind::String),
        FieldSpec::optional("http_request_policy", FieldKind::Object(&HTTP_REQUEST_POLICY)),
        FieldSpec::optional("is_internal_policy", FieldKind::Bool)
            .with_default(Literal::Bool(false)),
    ],
};

impl Schema for HttpPolicySet {
    fn schema() -> &'static ObjectSchema {
        &HTTP_POLICY_SET
    }
}

impl Resource for HttpPolicySet {
    const KIND: &'static str = "httppolicyset";

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
