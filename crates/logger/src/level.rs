//! Level — configured verbosity, per-call severities, and the gates between them.
//!
//! Two separate questions are answered here:
//! - `LogLevel::is_*` — ordinal queries ("is the configured level at least X?")
//! - `Severity::is_enabled_at` — the emission gate for one kind of message
//!
//! They are not the same thing: a `debug` message is already emitted at the
//! `verbose` level even though `is_debug()` reports false there.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LoggerError;
use crate::format::ansi::Color;

/// Configured verbosity, least to most verbose.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LogLevel {
    Info = 0,
    #[default]
    Verbose = 1,
    Debug = 2,
    Trace = 3,
}

impl LogLevel {
    pub const ALL: [LogLevel; 4] = [LogLevel::Info, LogLevel::Verbose, LogLevel::Debug, LogLevel::Trace];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Verbose => "verbose",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Parse a level name, ignoring case and an optional leading `:`
    /// (`"Trace"`, `"DEBUG"`, `":info"` are all accepted).
    pub fn parse(token: &str) -> Result<Self, LoggerError> {
        let name = token.trim();
        let name = name.strip_prefix(':').unwrap_or(name);
        match name.to_ascii_lowercase().as_str() {
            "info" => Ok(LogLevel::Info),
            "verbose" => Ok(LogLevel::Verbose),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(LoggerError::InvalidLevel(token.to_string())),
        }
    }

    pub fn is_trace(&self) -> bool {
        *self >= LogLevel::Trace
    }

    pub fn is_debug(&self) -> bool {
        *self >= LogLevel::Debug
    }

    pub fn is_verbose(&self) -> bool {
        *self >= LogLevel::Verbose
    }

    /// Warnings are never gated by verbosity.
    pub fn is_warn(&self) -> bool {
        true
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogLevel::parse(s)
    }
}

impl TryFrom<String> for LogLevel {
    type Error = LoggerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        LogLevel::parse(&value)
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.as_str().to_string()
    }
}

/// The category of a single logging call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warn,
    Success,
    Notify,
    HostOutput,
    Debug,
    Trace,
}

impl Severity {
    /// Emission gate. Failure and status output is never silenced by
    /// verbosity; only `debug` and `trace` depend on the configured level.
    pub fn is_enabled_at(&self, level: LogLevel) -> bool {
        match self {
            Severity::Error
            | Severity::Warn
            | Severity::Success
            | Severity::Notify
            | Severity::HostOutput => true,
            Severity::Debug => level.is_verbose(),
            Severity::Trace => level.is_trace(),
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Severity::Error => Color::BrightRed,
            Severity::Warn => Color::Yellow,
            Severity::Success => Color::Green,
            Severity::Notify => Color::BrightWhite,
            Severity::HostOutput => Color::Grey,
            Severity::Debug => Color::White,
            Severity::Trace => Color::Cyan,
        }
    }

    /// Whether color escapes already embedded in the message are removed
    /// before the severity's own color is applied.
    pub fn strips_embedded_color(&self) -> bool {
        matches!(self, Severity::HostOutput | Severity::Debug | Severity::Trace)
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            Severity::Warn => "Warning: ",
            _ => "",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warn => "warn",
            Severity::Success => "success",
            Severity::Notify => "notify",
            Severity::HostOutput => "host_output",
            Severity::Debug => "debug",
            Severity::Trace => "trace",
        }
    }
}
