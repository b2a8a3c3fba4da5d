//! Structured Logging with Key Redaction
//!
//! Log lines go to stderr as `timestamp LEVEL [module] message | k=v ...`.
//! Field values are redacted by key name:
//! - private keys and other secrets are fully redacted
//! - addresses keep their first and last characters
//! - signed payloads keep a short prefix

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// Minimum level that gets written (defaults to Info)
static MAX_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Info as u8);

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl LogLevel {
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => LogLevel::Debug,
            1 => LogLevel::Info,
            2 => LogLevel::Warn,
            _ => LogLevel::Error,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// Set the lowest level that is written
pub fn set_max_level(level: LogLevel) {
    MAX_LEVEL.store(level as u8, Ordering::SeqCst);
}

/// Current lowest written level
pub fn max_level() -> LogLevel {
    LogLevel::from_u8(MAX_LEVEL.load(Ordering::SeqCst))
}

/// Whether an entry at `level` would be written
pub fn is_enabled(level: LogLevel) -> bool {
    level >= max_level()
}

/// Structured log entry
#[derive(Debug)]
pub struct LogEntry {
    pub level: LogLevel,
    pub module: &'static str,
    pub message: String,
    pub fields: Vec<(&'static str, String)>,
}

impl LogEntry {
    pub fn new(level: LogLevel, module: &'static str, message: impl Into<String>) -> Self {
        Self {
            level,
            module,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field, redacted according to its key
    pub fn field(mut self, key: &'static str, value: impl fmt::Display) -> Self {
        let redacted = redact_for_key(key, &value.to_string());
        self.fields.push((key, redacted));
        self
    }

    /// Render the line without the timestamp
    pub fn render(&self) -> String {
        let fields_str = self
            .fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ");

        if fields_str.is_empty() {
            format!("{} [{}] {}", self.level, self.module, self.message)
        } else {
            format!("{} [{}] {} | {}", self.level, self.module, self.message, fields_str)
        }
    }

    /// Write the entry to stderr if its level is enabled
    pub fn log(self) {
        if !is_enabled(self.level) {
            return;
        }

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ");
        eprintln!("[{}] {}", timestamp, self.render());
    }
}

const SECRET_KEYS: &[&str] = &["private_key", "privatekey", "secret", "key_hex", "signing_key"];
const ADDRESS_KEYS: &[&str] = &["address", "to", "from", "contract"];
const PAYLOAD_KEYS: &[&str] = &["raw_tx", "signed", "data", "bytecode"];

fn redact_for_key(key: &str, value: &str) -> String {
    let key_lower = key.to_lowercase();

    if SECRET_KEYS.iter().any(|k| key_lower.contains(k)) {
        return redact_value(value);
    }
    if ADDRESS_KEYS.iter().any(|k| key_lower == *k || key_lower.ends_with(&format!("_{}", k))) {
        return redact_address(value);
    }
    if PAYLOAD_KEYS.iter().any(|k| key_lower.contains(k)) {
        return abbreviate_payload(value);
    }

    value.to_string()
}

/// Fully redact a sensitive value
fn redact_value(value: &str) -> String {
    if value.is_empty() {
        return "[EMPTY]".to_string();
    }

    if value.len() <= 4 {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED:{}chars]", value.len())
    }
}

/// Partially redact an address (first 8 and last 4 chars)
fn redact_address(address: &str) -> String {
    let trimmed = address.trim();

    if trimmed.is_empty() {
        return "[EMPTY]".to_string();
    }
    if trimmed.len() <= 15 || !trimmed.is_ascii() {
        return trimmed.to_string();
    }

    format!("{}...{}", &trimmed[..8], &trimmed[trimmed.len() - 4..])
}

/// Shorten long hex payloads to their prefix and byte count
fn abbreviate_payload(payload: &str) -> String {
    if payload.len() <= 26 || !payload.is_ascii() {
        return payload.to_string();
    }

    let digits = payload.trim_start_matches("0x").len();
    format!("{}...({} bytes)", &payload[..18], digits / 2)
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_at {
    ($level:ident, $module:expr, $msg:expr $(, $key:ident = $value:expr)* $(,)?) => {
        $crate::utils::logging::LogEntry::new(
            $crate::utils::logging::LogLevel::$level,
            $module,
            $msg
        )
        $(.field(stringify!($key), &$value))*
        .log()
    };
}

/// Debug-level structured log line
#[macro_export]
macro_rules! log_debug {
    ($($args:tt)*) => { $crate::__log_at!(Debug, $($args)*) };
}

/// Info-level structured log line
#[macro_export]
macro_rules! log_info {
    ($($args:tt)*) => { $crate::__log_at!(Info, $($args)*) };
}

/// Warn-level structured log line
#[macro_export]
macro_rules! log_warn {
    ($($args:tt)*) => { $crate::__log_at!(Warn, $($args)*) };
}

/// Error-level structured log line
#[macro_export]
macro_rules! log_error {
    ($($args:tt)*) => { $crate::__log_at!(Error, $($args)*) };
}
