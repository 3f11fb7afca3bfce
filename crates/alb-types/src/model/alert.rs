use serde::{Deserialize, Serialize};
use serde_json::Number;

use super::{Tenant, Timestamp};
use crate::{
    Ref,
    schema::{FieldKind, FieldSpec, ObjectSchema, Resource, Schema},
};

pub const ALERT_LEVELS: &[&str] = &["ALERT_LOW", "ALERT_MEDIUM", "ALERT_HIGH"];

pub const ALERT_STATES: &[&str] =
    &["ALERT_STATE_ON", "ALERT_STATE_DISMISSED", "ALERT_STATE_THROTTLED"];

/// Alert raised by the controller. Most fields are server-populated; clients
/// mostly read alerts and occasionally dismiss them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "_last_modified", default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_ref: Option<Ref<Tenant>>,
    pub name: String,
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obj_uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obj_name: Option<String>,
    pub summary: String,
    pub reason: String,
    /// Seconds since the epoch. Kept as the wire number so whole and
    /// fractional values re-encode exactly as received.
    pub timestamp: Number,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "crate::nullable::list")]
    pub related_uuid: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throttle_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_throttle_timestamp: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Alert {
    pub fn timestamp_secs(&self) -> Option<f64> {
        self.timestamp.as_f64()
    }

    pub fn is_dismissed(&self) -> bool {
        self.state.as_deref() == Some("ALERT_STATE_DISMISSED")
    }
}

pub(crate) const ALERT: ObjectSchema = ObjectSchema {
    name: "Alert",
    fields: &[
        FieldSpec::optional("uuid", FieldKind::String),
        FieldSpec::read_only("url", FieldKind::String),
        FieldSpec::read_only("_last_modified", FieldKind::Timestamp),
        FieldSpec::optional("tenant_ref", FieldKind::Ref("tenant")),
        FieldSpec::required("name", FieldKind::String),
        FieldSpec::required("level", FieldKind::Enum(ALERT_LEVELS)),
        FieldSpec::optional("obj_uuid", FieldKind::String),
        FieldSpec::optional("obj_name", FieldKind::String),
        FieldSpec::required("summary", FieldKind::String),
        FieldSpec::required("reason", FieldKind::String),
        FieldSpec::required("timestamp", FieldKind::Number),
        FieldSpec::optional("threshold", FieldKind::Integer),
        FieldSpec::optional("state", FieldKind::Enum(ALERT_STATES)),
        FieldSpec::optional("related_uuid", FieldKind::List(&FieldKind::String)),
        FieldSpec::read_only("throttle_count", FieldKind::Integer),
        FieldSpec::read_only("last_throttle_timestamp", FieldKind::Number),
        FieldSpec::optional("description", FieldKind::String),
    ],
};

impl Schema for Alert {
    fn schema() -> &'static ObjectSchema {
        &ALERT
    }
}

impl Resource for Alert {
    const KIND: &'static str = "alert";

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
