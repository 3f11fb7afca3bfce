//! `albctl kinds` command.

use alb_types::catalog::kinds;
use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

use crate::opts::GlobalOpts;
use crate::output::print_success;

#[derive(Serialize)]
struct KindRow {
    kind: &'static str,
    schema: &'static str,
    required: Vec<&'static str>,
}

pub fn cmd_kinds(opts: &GlobalOpts) -> Result<()> {
    let rows: Vec<KindRow> = kinds()
        .map(|entry| KindRow {
            kind: entry.kind,
            schema: entry.schema.name,
            required: entry.schema.required_fields().map(|f| f.name).collect(),
        })
        .collect();

    let data = if opts.wants_json() {
        serde_json::to_value(&rows)?
    } else {
        let lines: Vec<String> = rows
            .iter()
            .map(|row| format!("{:<24}{}", row.kind, row.schema))
            .collect();
        Value::String(lines.join("\n"))
    };
    print_success(opts, data, None, Vec::new())
}
