//! RPC method handler for the Passgen JSON-RPC protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` dispatches each call to the `App`.

use std::sync::Mutex;

use serde_json::{json, Value};

use crate::app::App;
use crate::managers::history_store::HistoryStoreTrait;
use crate::services::charset_builder::build_charset;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::services::strength_scorer;
use crate::types::charset::{CharacterClass, GenerationRequest};
use crate::types::history::HistoryEntry;

fn entry_json(entry: &HistoryEntry) -> Value {
    json!({
        "password": entry.password().as_str(),
        "timestamp": entry.timestamp(),
        "strength": entry.strength().label(),
    })
}

/// Reads `params.classes` as a list of class names; `None` when absent.
fn parse_classes(params: &Value) -> Result<Option<Vec<CharacterClass>>, String> {
    let Some(raw) = params.get("classes") else {
        return Ok(None);
    };
    let names = raw.as_array().ok_or("classes must be an array")?;
    names
        .iter()
        .map(|v| -> Result<CharacterClass, String> {
            let name = v.as_str().ok_or("class names must be strings")?;
            CharacterClass::from_name(name).ok_or_else(|| format!("unknown class: {}", name))
        })
        .collect::<Result<Vec<_>, String>>()
        .map(Some)
}

fn parse_usize(params: &Value, key: &str) -> Result<Option<usize>, String> {
    match params.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_u64()
            .map(|n| Some(n as usize))
            .ok_or_else(|| format!("{} must be a non-negative integer", key)),
    }
}

/// Dispatch a JSON-RPC method call.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Generation ───
        "charset.build" => {
            let classes = parse_classes(params)?.unwrap_or_default();
            let alphabet = build_charset(&classes).map_err(|e| e.to_string())?;
            Ok(json!({"alphabet": alphabet.to_string(), "size": alphabet.len()}))
        }
        "password.generate" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let defaults = a.settings_engine.get_settings().to_request();
            let request = GenerationRequest {
                length: parse_usize(params, "length")?.unwrap_or(defaults.length),
                classes: match parse_classes(params)? {
                    Some(classes) => classes.into_iter().collect(),
                    None => defaults.classes,
                },
            };
            let entry = a.generate(&request).map_err(|e| e.to_string())?;
            Ok(entry_json(&entry))
        }
        "password.score" => {
            let password = params
                .get("password")
                .and_then(|v| v.as_str())
                .ok_or("missing password")?;
            Ok(json!({
                "strength": strength_scorer::score(password).label(),
                "points": strength_scorer::points(password),
            }))
        }

        // ─── History ───
        "history.recent" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let n = parse_usize(params, "n")?
                .unwrap_or(a.settings_engine.get_settings().recent_limit);
            let items: Vec<Value> = a.history.recent(n).into_iter().map(entry_json).collect();
            Ok(json!({"items": items, "total": a.history.len()}))
        }
        "history.lines" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let n = parse_usize(params, "n")?;
            Ok(json!(a.display_lines(n)))
        }
        "history.export" => {
            let path = params
                .get("path")
                .and_then(|v| v.as_str())
                .ok_or("missing path")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let rows = a.history.export_to_path(path).map_err(|e| e.to_string())?;
            Ok(json!({"rows": rows, "path": path}))
        }

        // ─── Settings ───
        "settings.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            serde_json::to_value(a.settings_engine.get_settings()).map_err(|e| e.to_string())
        }
        "settings.set" => {
            let key = params.get("key").and_then(|v| v.as_str()).ok_or("missing key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.update_setting(key, value).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "settings.reset" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.reset_settings().map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
