//! Diagnostics for `ba-tools`.
//!
//! The engine library (`ba_calendar`) and this binary (`ba_tools`) log
//! through `tracing`. Everything is written to stderr: stdout belongs to the
//! JSON results of `list`, `call` and `serve`.

use tracing_subscriber::EnvFilter;

/// Targets that `-v` flags turn up. Dependencies stay silent unless
/// `RUST_LOG` asks for them.
const TARGETS: &[&str] = &["ba_calendar", "ba_tools"];

/// Level for our own targets given the number of `-v` flags. Warnings
/// (unknown timezone abbreviations, malformed serve requests) show by default.
fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn filter_directives(verbosity: u8) -> String {
    let level = level_for(verbosity);
    TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the stderr subscriber. A set `RUST_LOG` replaces the `-v` mapping
/// entirely.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
