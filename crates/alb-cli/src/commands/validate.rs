//! `albctl validate` command.

use alb_types::Violation;
use anyhow::{Context, Result, bail};
use clap::Args;
use serde_json::{Value, json};
use tracing::debug;

use super::resolve_kind;
use crate::input::parse_input_json;
use crate::opts::GlobalOpts;
use crate::output::print_success;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Resource kind (e.g., pool, virtualservice)
    pub kind: String,

    /// Payload as JSON literal, @file, or @- for stdin
    pub input: String,

    /// Check the payload as a create/update body (read-only fields are flagged)
    #[arg(long)]
    pub for_write: bool,

    /// Exit non-zero when any violation is reported
    #[arg(long)]
    pub strict: bool,
}

pub fn cmd_validate(opts: &GlobalOpts, args: &ValidateArgs) -> Result<()> {
    let entry = resolve_kind(&args.kind)?;
    let payload = parse_input_json(&args.input)?;
    debug!(kind = entry.kind, edition = %opts.edition, "validating payload");
    let mut validate_opts = opts.validate_options();
    if args.for_write {
        validate_opts = validate_opts.for_write();
    }

    let violations: Vec<Violation> = if opts.collection {
        entry
            .normalize_collection(payload.clone())
            .with_context(|| format!("{} collection did not decode", entry.kind))?;
        let items = payload
            .get("results")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        items
            .iter()
            .enumerate()
            .flat_map(|(idx, item)| {
                entry
                    .validate(item, &validate_opts)
                    .into_iter()
                    .map(move |v| v.under(&format!("results[{idx}]")))
            })
            .collect()
    } else {
        entry
            .normalize(payload.clone())
            .with_context(|| format!("{} payload did not decode", entry.kind))?;
        entry.validate(&payload, &validate_opts)
    };

    let count = violations.len();
    let data = if opts.wants_json() {
        json!({ "valid": violations.is_empty(), "violations": violations })
    } else if violations.is_empty() {
        Value::String("ok".into())
    } else {
        let lines: Vec<String> = violations.iter().map(ToString::to_string).collect();
        Value::String(lines.join("\n"))
    };
    let meta = json!({
        "kind": entry.kind,
        "edition": validate_opts.edition,
        "api_version": validate_opts.api_version.as_ref().map(ToString::to_string),
    });
    print_success(opts, data, Some(meta), Vec::new())?;

    if args.strict && count > 0 {
        bail!("{count} violation(s) reported for {}", entry.kind);
    }
    Ok(())
}
