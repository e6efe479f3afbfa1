mod cli;
mod config;
mod logging;
mod serve;

use std::io::{self, Read};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;

use ba_calendar::Toolkit;

use crate::cli::{CallArgs, Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let toolkit = config::load_toolkit(cli.config.as_deref())?;
    match cli.command {
        Command::List => list(&toolkit),
        Command::Call(args) => call(&toolkit, args),
        Command::Serve => serve::run(&toolkit, io::stdin().lock(), io::stdout().lock()),
    }
}

fn list(toolkit: &Toolkit) -> Result<()> {
    let json = serde_json::to_string_pretty(&toolkit.tools())?;
    println!("{json}");
    Ok(())
}

fn call(toolkit: &Toolkit, args: CallArgs) -> Result<()> {
    let raw = match args.args {
        Some(raw) => raw,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read arguments from stdin")?;
            buf
        }
    };
    let arguments: Value = if raw.trim().is_empty() {
        Value::Object(Default::default())
    } else {
        serde_json::from_str(&raw).context("arguments are not valid JSON")?
    };

    let result = toolkit.call(&args.tool, arguments)?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
