//! Settings validation.
//!
//! Parsing already enforces types; this catches values that parse but cannot
//! work at runtime.

use std::fmt;

use bootstrapbot_irc::is_channel;

use crate::schema::BotConfig;

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// A single validation diagnostic.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Dotted path, e.g. "server.port"
    pub path: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.severity, self.path, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    /// Returns `true` if any diagnostic is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    fn push(&mut self, severity: Severity, path: impl Into<String>, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            severity,
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Check a fully merged configuration (file plus command-line overrides).
pub fn validate(cfg: &BotConfig) -> ValidationResult {
    let mut result = ValidationResult::default();

    if cfg.server.host.trim().is_empty() {
        result.push(Severity::Error, "server.host", "server host is empty");
    }
    if cfg.server.port == 0 {
        result.push(Severity::Error, "server.port", "port 0 is not connectable");
    }
    if cfg.identity.nickname.trim().is_empty() {
        result.push(Severity::Error, "identity.nickname", "nickname is empty");
    } else if cfg.identity.nickname.contains(char::is_whitespace) {
        result.push(
            Severity::Error,
            "identity.nickname",
            "nickname must not contain whitespace",
        );
    }
    match cfg.identity.controller.as_deref().map(str::trim) {
        None | Some("") => result.push(
            Severity::Warning,
            "identity.controller",
            "no controller nick configured; the one stored in the registry file is used",
        ),
        Some(_) => {},
    }
    if cfg.identity.max_nick_attempts == 0 {
        result.push(
            Severity::Error,
            "identity.max_nick_attempts",
            "at least one nickname attempt is required",
        );
    }
    if cfg.invites.delay_ms == 0 {
        result.push(
            Severity::Warning,
            "invites.delay_ms",
            "invites are sent without pause; servers may throttle or disconnect the bot",
        );
    }
    for (i, channel) in cfg.channels.autojoin.iter().enumerate() {
        if !is_channel(channel) {
            result.push(
                Severity::Error,
                format!("channels.autojoin[{i}]"),
                format!("{channel:?} is not a channel name"),
            );
        }
    }

    result
}
