//! License editions and the per-field allowances that gate non-default values.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edition {
    Essentials,
    Basic,
    Enterprise,
    EnterpriseWithCloudServices,
}

impl Edition {
    pub const ALL: [Edition; 4] = [
        Edition::Essentials,
        Edition::Basic,
        Edition::Enterprise,
        Edition::EnterpriseWithCloudServices,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Edition::Essentials => "essentials",
            Edition::Basic => "basic",
            Edition::Enterprise => "enterprise",
            Edition::EnterpriseWithCloudServices => "enterprise_with_cloud_services",
        }
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown edition '{value}': expected essentials, basic, enterprise or enterprise_with_cloud_services")]
pub struct EditionParseError {
    pub value: String,
}

impl FromStr for Edition {
    type Err = EditionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "essentials" => Ok(Edition::Essentials),
            "basic" => Ok(Edition::Basic),
            "enterprise" => Ok(Edition::Enterprise),
            "enterprise_with_cloud_services" | "cloud_services" => {
                Ok(Edition::EnterpriseWithCloudServices)
            }
            _ => Err(EditionParseError { value: s.to_string() }),
        }
    }
}

/// What an edition may put into a gated field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allowance {
    Any,
    Values(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditionRule {
    pub edition: Edition,
    pub allowance: Allowance,
}

impl EditionRule {
    pub const fn any(edition: Edition) -> Self {
        Self { edition, allowance: Allowance::Any }
    }

    pub const fn values(edition: Edition, values: &'static [&'static str]) -> Self {
        Self { edition, allowance: Allowance::Values(values) }
    }
}

/// Resolves the allowance for `edition` from a field's gate list.
///
/// An empty list means the field is not gated. An edition missing from a
/// non-empty list may only carry the field's default value, reported as `None`.
pub fn allowance_for(rules: &[EditionRule], edition: Edition) -> Option<Allowance> {
    if rules.is_empty() {
        return Some(Allowance::Any);
    }
    rules
        .iter()
        .find(|rule| rule.edition == edition)
        .map(|rule| rule.allowance)
}

/// Enterprise tiers with any value, every other edition restricted to the default.
pub const ENTERPRISE_ONLY: &[EditionRule] = &[
    EditionRule::any(Edition::Enterprise),
    EditionRule::any(Edition::EnterpriseWithCloudServices),
];
