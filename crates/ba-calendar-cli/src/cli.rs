use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Business-calendar and agile planning tools.
#[derive(Parser)]
#[command(
    name = "ba-tools",
    version,
    about = "Working days, sprints, fiscal quarters, timezones and MoSCoW planning"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to TOML configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Print every tool with its JSON input schema.
    List,
    /// Run one tool and print its JSON result.
    Call(CallArgs),
    /// Answer line-delimited JSON requests on stdin.
    Serve,
}

/// Arguments for the `call` subcommand.
#[derive(clap::Args)]
pub struct CallArgs {
    /// Tool name, e.g. `calculate_working_days`.
    pub tool: String,

    /// JSON arguments object. Read from stdin when omitted.
    #[arg(short, long)]
    pub args: Option<String>,
}
