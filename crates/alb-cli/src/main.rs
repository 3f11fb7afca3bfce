mod commands;
mod input;
mod opts;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::check::CheckArgs;
use commands::schema::SchemaArgs;
use commands::validate::ValidateArgs;
use opts::GlobalOpts;

#[derive(Parser, Debug)]
#[command(name = "albctl", version, about = "Load balancer controller payload tool")]
struct Cli {
    #[command(flatten)]
    opts: GlobalOpts,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the resource kinds known to the model
    Kinds,

    /// Decode a payload and print its canonical encoding
    Check(CheckArgs),

    /// Decode a payload and report advisory violations
    Validate(ValidateArgs),

    /// Print the JSON Schema of a resource kind
    Schema(SchemaArgs),

    /// List fields marked both required and omit-empty
    Conflicts,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let opts = &cli.opts;
    setup_logging(&opts.log_level);

    match cli.command {
        Command::Kinds => commands::kinds::cmd_kinds(opts),
        Command::Check(args) => commands::check::cmd_check(opts, &args),
        Command::Validate(args) => commands::validate::cmd_validate(opts, &args),
        Command::Schema(args) => commands::schema::cmd_schema(opts, &args),
        Command::Conflicts => commands::conflicts::cmd_conflicts(opts),
    }
}

/// Set up tracing subscriber; logs go to stderr so stdout stays parseable.
fn setup_logging(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .init();
}
