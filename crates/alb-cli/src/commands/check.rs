//! `albctl check` command.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::json;
use tracing::debug;

use super::resolve_kind;
use crate::input::parse_input_json;
use crate::opts::GlobalOpts;
use crate::output::print_success;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Resource kind (e.g., pool, virtualservice)
    pub kind: String,

    /// Payload as JSON literal, @file, or @- for stdin
    pub input: String,

    /// Print the body a create/update request would carry (read-only fields dropped)
    #[arg(long)]
    pub for_write: bool,
}

pub fn cmd_check(opts: &GlobalOpts, args: &CheckArgs) -> Result<()> {
    let entry = resolve_kind(&args.kind)?;
    let payload = parse_input_json(&args.input)?;
    debug!(kind = entry.kind, collection = opts.collection, "checking payload");

    let normalized = if opts.collection {
        entry
            .normalize_collection(payload)
            .with_context(|| format!("{} collection did not decode", entry.kind))?
    } else if args.for_write {
        entry
            .normalize_for_write(payload)
            .with_context(|| format!("{} payload did not decode", entry.kind))?
    } else {
        entry
            .normalize(payload)
            .with_context(|| format!("{} payload did not decode", entry.kind))?
    };

    let meta = json!({ "kind": entry.kind, "schema": entry.schema.name });
    print_success(opts, normalized, Some(meta), Vec::new())
}
