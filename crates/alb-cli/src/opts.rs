//! Global CLI options.

use alb_types::{ApiVersion, Edition, ValidateOptions};
use clap::Args;

/// Global options for CLI commands.
///
/// These options apply to all commands and can be set via env vars.
#[derive(Args, Debug, Clone)]
pub struct GlobalOpts {
    /// JSON output envelope
    #[arg(long, global = true)]
    pub json: bool,

    /// Pretty-print JSON output (implies --json)
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Suppress notices
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Log filter directive, e.g. `debug` or `alb_types=trace` (env: ALB_LOG)
    #[arg(long, global = true, env = "ALB_LOG", default_value = "warn")]
    pub log_level: String,

    /// License edition used for gating checks (env: ALB_EDITION)
    #[arg(long, global = true, env = "ALB_EDITION", default_value = "enterprise")]
    pub edition: Edition,

    /// Target controller version for field introduction checks (env: ALB_API_VERSION)
    #[arg(long, global = true, env = "ALB_API_VERSION")]
    pub api_version: Option<ApiVersion>,

    /// Treat the input as a `{count, next, results}` collection page
    #[arg(long, global = true)]
    pub collection: bool,
}

impl GlobalOpts {
    pub fn wants_json(&self) -> bool {
        self.json || self.pretty
    }

    pub fn validate_options(&self) -> ValidateOptions {
        let opts = ValidateOptions::new(self.edition);
        match &self.api_version {
            Some(version) => opts.with_api_version(version.clone()),
            None => opts,
        }
    }
}
