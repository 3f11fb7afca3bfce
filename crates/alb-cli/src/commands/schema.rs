//! `albctl schema` command.

use alb_types::json_schema::{collection_json_schema, to_json_schema};
use anyhow::Result;
use clap::Args;

use super::resolve_kind;
use crate::opts::GlobalOpts;
use crate::output::print_success;

#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Resource kind (e.g., pool, virtualservice)
    pub kind: String,
}

pub fn cmd_schema(opts: &GlobalOpts, args: &SchemaArgs) -> Result<()> {
    let entry = resolve_kind(&args.kind)?;
    let schema = if opts.collection {
        collection_json_schema(entry.schema)
    } else {
        to_json_schema(entry.schema)
    };
    print_success(opts, schema, None, Vec::new())
}
