//! CLI command handlers.

pub mod check;
pub mod conflicts;
pub mod kinds;
pub mod schema;
pub mod validate;

use alb_types::catalog::{KindEntry, find_kind, kinds};
use anyhow::{Result, anyhow};

/// Resolves a kind argument, listing the known kinds when it does not match.
pub fn resolve_kind(name: &str) -> Result<&'static KindEntry> {
    find_kind(name).ok_or_else(|| {
        let known: Vec<_> = kinds().map(|e| e.kind).collect();
        anyhow!("unknown kind '{name}'; expected one of: {}", known.join(", "))
    })
}
