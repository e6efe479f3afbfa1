//! Line-delimited JSON request loop.
//!
//! Each input line is one request:
//!
//! ```text
//! {"id": 1, "method": "tools/list"}
//! {"id": 2, "method": "tools/call", "params": {"name": "...", "arguments": {...}}}
//! ```
//!
//! Each request produces exactly one output line, either
//! `{"id": .., "result": ..}` or `{"id": .., "error": {"kind": .., "message": ..}}`.
//! Blank lines are skipped. A malformed line is answered with an error and
//! the loop carries on.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use ba_calendar::{CalendarError, Toolkit};

#[derive(Debug, Deserialize)]
struct Request {
    #[serde(default)]
    id: Value,
    method: String,
    #[serde(default)]
    params: Option<CallParams>,
}

#[derive(Debug, Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    kind: &'static str,
    message: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Response {
    Result { id: Value, result: Value },
    Error { id: Value, error: ErrorBody },
}

impl Response {
    fn error(id: Value, kind: &'static str, message: impl Into<String>) -> Self {
        Response::Error {
            id,
            error: ErrorBody {
                kind,
                message: message.into(),
            },
        }
    }

    fn from_outcome(id: Value, outcome: Result<Value, CalendarError>) -> Self {
        match outcome {
            Ok(result) => Response::Result { id, result },
            Err(e) => Response::error(id, e.kind(), e.to_string()),
        }
    }
}

/// Serve requests from `input` until EOF, writing responses to `output`.
pub fn run<R: BufRead, W: Write>(toolkit: &Toolkit, input: R, mut output: W) -> Result<()> {
    info!("serving line-delimited JSON requests");
    let mut handled = 0usize;

    for line in input.lines() {
        let line = line.context("failed to read request")?;
        if line.trim().is_empty() {
            continue;
        }

        let response = handle_line(toolkit, &line);
        let encoded = serde_json::to_string(&response).context("failed to encode response")?;
        writeln!(output, "{encoded}").context("failed to write response")?;
        output.flush().context("failed to flush response")?;
        handled += 1;
    }

    info!(requests = handled, "input closed");
    Ok(())
}

fn handle_line(toolkit: &Toolkit, line: &str) -> Response {
    let request: Request = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "malformed request");
            let id = recover_id(line);
            return Response::error(id, "invalid_request", format!("Invalid request: {e}"));
        }
    };
    debug!(method = %request.method, id = %request.id, "request");

    match request.method.as_str() {
        "tools/list" => match serde_json::to_value(toolkit.tools()) {
            Ok(tools) => Response::Result {
                id: request.id,
                result: json!({ "tools": tools }),
            },
            Err(e) => Response::error(request.id, "internal", e.to_string()),
        },
        "tools/call" => match request.params {
            Some(params) => {
                let outcome = toolkit.call(&params.name, params.arguments);
                Response::from_outcome(request.id, outcome)
            }
            None => Response::error(
                request.id,
                "invalid_request",
                "Invalid request: tools/call requires params.name",
            ),
        },
        other => Response::error(
            request.id,
            "unsupported",
            format!("Unsupported operation: unknown method '{other}'"),
        ),
    }
}

/// Best-effort id from a line that failed to parse as a request.
fn recover_id(line: &str) -> Value {
    serde_json::from_str::<Value>(line)
        .ok()
        .and_then(|v| v.get("id").cloned())
        .unwrap_or(Value::Null)
}
