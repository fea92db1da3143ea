//! Passgen RPC Server — JSON-RPC over stdin/stdout for a front end process.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"password.generate", "params":{"length":16}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//!
//! Logs go to stderr; filter with `PASSGEN_LOG` (default `info`).

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::Mutex;

use serde_json::{json, Value};
use tracing::{error, info};
use tracing_subscriber::{fmt::layer, layer::SubscriberExt, registry, util::SubscriberInitExt, EnvFilter};

use passgen::app::App;
use passgen::rpc_handler::handle_method;

fn init_tracing() {
    let filter = EnvFilter::try_from_env("PASSGEN_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    registry()
        .with(filter)
        .with(layer().with_writer(io::stderr))
        .init();
}

fn send(out: &mut impl Write, value: &Value) -> io::Result<()> {
    writeln!(out, "{}", value)?;
    out.flush()
}

fn main() -> ExitCode {
    init_tracing();

    let app = match App::new(None) {
        Ok(app) => Mutex::new(app),
        Err(e) => {
            error!(error = %e, "failed to initialize");
            return ExitCode::FAILURE;
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if send(&mut out, &json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")})).is_err() {
        return ExitCode::FAILURE;
    }
    info!("listening on stdin");

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Value>(&line) {
            Ok(req) => {
                let id = req.get("id").cloned().unwrap_or(Value::Null);
                let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
                let params = req.get("params").cloned().unwrap_or(json!({}));

                match handle_method(&app, method, &params) {
                    Ok(val) => json!({"id": id, "result": val}),
                    Err(err) => json!({"id": id, "error": err}),
                }
            }
            Err(e) => json!({"id": null, "error": format!("parse error: {}", e)}),
        };

        if send(&mut out, &response).is_err() {
            break;
        }
    }

    ExitCode::SUCCESS
}
