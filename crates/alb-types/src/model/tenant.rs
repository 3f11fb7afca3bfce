use serde::{Deserialize, Serialize};

use super::Timestamp;
use crate::schema::{FieldKind, FieldSpec, Literal, ObjectSchema, Resource, Schema};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TenantConfiguration {
    /// Each tenant gets its own routing domain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_vrf: Option<bool>,
    /// Service engines are managed in the provider context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub se_in_provider_context: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_access_to_provider_se: Option<bool>,
}

pub(crate) const TENANT_CONFIGURATION: ObjectSchema = ObjectSchema {
    name: "TenantConfiguration",
    fields: &[
        FieldSpec::optional("tenant_vrf", FieldKind::Bool).with_default(Literal::Bool(false)),
        FieldSpec::optional("se_in_provider_context", FieldKind::Bool)
            .with_default(Literal::Bool(true)),
        FieldSpec::optional("tenant_access_to_provider_se", FieldKind::Bool)
            .with_default(Literal::Bool(true)),
    ],
};

impl Schema for TenantConfiguration {
    fn schema() -> &'static ObjectSchema {
        &TENANT_CONFIGURATION
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "_last_modified", default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<Timestamp>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_settings: Option<TenantConfiguration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

impl Tenant {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }
}

pub(crate) const TENANT: ObjectSchema = ObjectSchema {
    name: "Tenant",
    fields: &[
        FieldSpec::optional("uuid", FieldKind::String),
        FieldSpec::read_only("url", FieldKind::String),
        FieldSpec::read_only("_last_modified", FieldKind::Timestamp),
        FieldSpec::required("name", FieldKind::String),
        FieldSpec::optional("description", FieldKind::String),
        FieldSpec::optional("local", FieldKind::Bool).with_default(Literal::Bool(true)),
        FieldSpec::optional("config_settings", FieldKind::Object(&TENANT_CONFIGURATION)),
        FieldSpec::optional("created_by", FieldKind::String),
    ],
};

impl Schema for Tenant {
    fn schema() -> &'static ObjectSchema {
        &TENANT
    }
}

impl Resource for Tenant {
    const KIND: &'static str = "tenant";

    fn uuid(&self) -> Option<&str> {
        self.uuid.as_deref()
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}
