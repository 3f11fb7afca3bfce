//! `albctl conflicts` command.

use alb_types::catalog::schema_conflicts;
use anyhow::Result;
use serde_json::Value;

use crate::opts::GlobalOpts;
use crate::output::print_success;

pub fn cmd_conflicts(opts: &GlobalOpts) -> Result<()> {
    let conflicts = schema_conflicts();
    let data = if opts.wants_json() {
        serde_json::to_value(&conflicts)?
    } else {
        let lines: Vec<String> = conflicts
            .iter()
            .map(|c| format!("{}.{}", c.object, c.field))
            .collect();
        Value::String(lines.join("\n"))
    };
    let warnings = conflicts
        .iter()
        .map(|c| format!("{}.{} is treated as required", c.object, c.field))
        .collect();
    print_success(opts, data, None, warnings)
}
