//! Structured logging for the FleetX client.
//!
//! Every entry is a single JSON line on stderr, so stdout carries only
//! command output:
//! `{"ts", "seq", "lvl", "component", "event", "msg", "data"}`.
//! Filtering by level (`LOG_LEVEL`) and domain (`LOG_DOMAINS`) happens
//! before anything is serialized.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use sha2::{Digest, Sha256};
use std::cell::RefCell;
use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};

// =============================================================================
// Log Levels
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl Level {
    pub fn from_env() -> Self {
        match std::env::var("LOG_LEVEL").as_deref() {
            Ok("trace") => Level::Trace,
            Ok("debug") => Level::Debug,
            Ok("info") => Level::Info,
            Ok("warn") => Level::Warn,
            Ok("error") => Level::Error,
            _ => Level::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }
}

// =============================================================================
// Log Domains
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Api,      // Requests, responses, status handling
    Resolve,  // Remote-or-fallback decisions
    Session,  // Login, logout, credential invalidation
    Tracking, // Public lookups, live positions
    System,   // Startup, configuration
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Api => "api",
            Domain::Resolve => "resolve",
            Domain::Session => "session",
            Domain::Tracking => "tracking",
            Domain::System => "system",
        }
    }

    pub fn is_enabled(&self) -> bool {
        match std::env::var("LOG_DOMAINS").as_deref() {
            Ok("all") | Err(_) => true,
            Ok(domains) => domains.split(',').any(|d| d.trim() == self.as_str()),
        }
    }
}

static LOG_SEQ: AtomicU64 = AtomicU64::new(0);

fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst)
}

thread_local! {
    static CAPTURE: RefCell<Option<Vec<Value>>> = const { RefCell::new(None) };
}

/// In-process capture of emitted entries on the current thread.
///
/// Tests call [`capture::begin`], run the code under test on the same thread
/// (plain `#[test]` or the default current-thread `#[tokio::test]`), then
/// [`capture::finish`] to get every entry that passed the level/domain filter.
pub mod capture {
    use super::CAPTURE;
    use serde_json::Value;

    pub fn begin() {
        CAPTURE.with(|c| *c.borrow_mut() = Some(Vec::new()));
    }

    pub fn finish() -> Vec<Value> {
        CAPTURE.with(|c| c.borrow_mut().take().unwrap_or_default())
    }

    /// Entries captured so far whose `event` equals `event`.
    pub fn count(entries: &[Value], event: &str) -> usize {
        entries
            .iter()
            .filter(|e| e.get("event").and_then(Value::as_str) == Some(event))
            .count()
    }
}

fn sanitize_fields(mut fields: Map<String, Value>) -> Map<String, Value> {
    let redacted = Value::String("[REDACTED]".to_string());
    for key in ["authorization", "Authorization", "token", "password"] {
        if fields.contains_key(key) {
            fields.insert(key.to_string(), redacted.clone());
        }
    }
    fields
}

fn split_fields(mut fields: Map<String, Value>) -> (Map<String, Value>, Map<String, Value>) {
    let mut top = Map::new();
    for key in ["kind", "endpoint", "msg"] {
        if let Some(value) = fields.remove(key) {
            top.insert(key.to_string(), value);
        }
    }
    (top, fields)
}

// =============================================================================
// Core logging functions
// =============================================================================

/// RFC3339 timestamp with milliseconds
pub fn ts_now() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Emit a structured log entry
pub fn log(level: Level, domain: Domain, event: &str, fields: Map<String, Value>) {
    let min_level = Level::from_env();
    if level < min_level || !domain.is_enabled() {
        return;
    }

    emit_record(level, domain.as_str(), event, fields);
}

fn emit_record(level: Level, component: &str, event: &str, fields: Map<String, Value>) {
    let fields = sanitize_fields(fields);
    let (mut top, data) = split_fields(fields);

    let msg = top.remove("msg").unwrap_or(Value::String(String::new()));
    let mut entry = Map::new();
    entry.insert("ts".to_string(), json!(ts_now()));
    entry.insert("seq".to_string(), json!(next_seq()));
    entry.insert("lvl".to_string(), json!(level.as_str().to_uppercase()));
    entry.insert("component".to_string(), json!(component));
    entry.insert("event".to_string(), json!(event));
    entry.insert("msg".to_string(), msg);
    for (k, v) in top {
        entry.insert(k, v);
    }
    entry.insert("data".to_string(), Value::Object(data));

    let entry = Value::Object(entry);
    let captured = CAPTURE.with(|c| match c.borrow_mut().as_mut() {
        Some(buf) => {
            buf.push(entry.clone());
            true
        }
        None => false,
    });
    if captured {
        return;
    }
    // Logging never fails the caller.
    let _ = write_line(&mut std::io::stderr().lock(), &entry);
}

fn write_line(out: &mut impl Write, entry: &Value) -> std::io::Result<()> {
    serde_json::to_writer(&mut *out, entry)?;
    out.write_all(b"\n")
}

pub fn log_request(method: &str, endpoint: &str, authenticated: bool) {
    log(
        Level::Debug,
        Domain::Api,
        "request",
        obj(&[
            ("method", v_str(method)),
            ("endpoint", v_str(endpoint)),
            ("authenticated", Value::Bool(authenticated)),
        ]),
    );
}

pub fn log_response(method: &str, endpoint: &str, status: u16, elapsed_ms: f64) {
    let level = if status >= 400 { Level::Warn } else { Level::Debug };
    log(
        level,
        Domain::Api,
        "response",
        obj(&[
            ("method", v_str(method)),
            ("endpoint", v_str(endpoint)),
            ("status", json!(status)),
            ("elapsed_ms", v_num(elapsed_ms)),
        ]),
    );
}

// =============================================================================
// Utility Functions
// =============================================================================

/// Short, non-reversible fingerprint for correlating a credential across log lines.
pub fn fingerprint(secret: &str) -> String {
    let digest = Sha256::digest(secret.as_bytes());
    hex::encode(&digest[..6])
}

pub fn obj(pairs: &[(&str, Value)]) -> Map<String, Value> {
    let mut map = Map::new();
    for (k, v) in pairs {
        map.insert((*k).to_string(), v.clone());
    }
    map
}

pub fn v_str(s: &str) -> Value {
    Value::String(s.to_string())
}

pub fn v_num(n: f64) -> Value {
    json!(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
    }

    #[test]
    fn test_fingerprint_deterministic() {
        assert_eq!(fingerprint("demo-token-12345"), fingerprint("demo-token-12345"));
        assert_ne!(fingerprint("a"), fingerprint("b"));
        assert_eq!(fingerprint("a").len(), 12);
    }

    #[test]
    fn test_obj_helper() {
        let m = obj(&[("key", v_str("value")), ("num", v_num(42.0))]);
        assert_eq!(m.get("key").unwrap(), "value");
        assert_eq!(m.get("num").unwrap(), 42.0);
    }

    #[test]
    fn test_secrets_are_redacted() {
        let m = sanitize_fields(obj(&[("token", v_str("abc")), ("email", v_str("a@b.c"))]));
        assert_eq!(m.get("token").unwrap(), "[REDACTED]");
        assert_eq!(m.get("email").unwrap(), "a@b.c");
    }

    #[test]
    fn test_capture_collects_entries() {
        capture::begin();
        log(Level::Error, Domain::System, "sample", obj(&[("msg", v_str("hello"))]));
        let entries = capture::finish();
        assert_eq!(capture::count(&entries, "sample"), 1);
        assert_eq!(entries[0]["msg"], "hello");
        assert_eq!(entries[0]["component"], "system");
    }

    #[test]
    fn test_seq_increments() {
        let s1 = next_seq();
        let s2 = next_seq();
        assert!(s2 > s1);
    }

    #[test]
    fn test_entries_are_one_json_line_each() {
        let mut out = Vec::new();
        write_line(&mut out, &json!({"event": "a", "msg": "two\nlines"})).unwrap();
        write_line(&mut out, &json!({"event": "b"})).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["msg"], "two\nlines");
        assert!(text.ends_with('\n'));
    }
}
