//! # Logger
//!
//! Installs a global `tracing` subscriber according to [`LoggerSettings`].
//! The builder emits its events through `tracing` whether or not a subscriber
//! is installed; this module only exists for hosts that do not install their
//! own.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::{Error, Result};

static INITIALIZED: OnceLock<()> = OnceLock::new();

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggerSettings {
    pub enable: bool,
    pub level: LogLevel,
    pub format: Format,
    /// Extra filter directives appended after the level, e.g.
    /// `ontology_builder::ontology::hierarchy=trace`.
    pub override_filter: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Off,
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self {
            Self::Off => "off",
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        };
        f.write_str(level)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    #[default]
    Compact,
    Pretty,
    Json,
}

/// Builds the filter directives for `settings`.
///
/// `RUST_LOG` takes precedence when set.
#[must_use]
pub fn filter_directives(settings: &LoggerSettings) -> String {
    if let Ok(from_env) = std::env::var(EnvFilter::DEFAULT_ENV) {
        if !from_env.trim().is_empty() {
            return from_env;
        }
    }
    match &settings.override_filter {
        Some(extra) if !extra.trim().is_empty() => format!("{},{extra}", settings.level),
        _ => settings.level.to_string(),
    }
}

/// Installs the global subscriber once. Later calls, and calls with logging
/// disabled, do nothing.
///
/// # Errors
///
/// Returns an error when the filter directives are invalid or another global
/// subscriber was already installed by the host.
pub fn init(settings: &LoggerSettings) -> Result<()> {
    if !settings.enable || INITIALIZED.get().is_some() {
        return Ok(());
    }

    let filter = EnvFilter::try_new(filter_directives(settings))
        .map_err(|err| Error::Logger {
            action: "parse filter for",
            source: Box::new(err),
        })?;

    let layer = match settings.format {
        Format::Compact => fmt::layer().compact().with_ansi(true).boxed(),
        Format::Pretty => fmt::layer().pretty().with_ansi(true).boxed(),
        Format::Json => fmt::layer().json().with_ansi(false).boxed(),
    };

    tracing_subscriber::registry()
        .with(layer.with_filter(filter))
        .try_init()
        .map_err(|err| Error::Logger {
            action: "install",
            source: Box::new(err),
        })?;

    let _ = INITIALIZED.set(());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{filter_directives, init, LogLevel, LoggerSettings};
    use crate::Error;

    #[test]
    fn disabled_logger_is_a_no_op() {
        init(&LoggerSettings::default()).expect("disabled logger");
    }

    #[test]
    fn invalid_directives_are_reported() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let settings = LoggerSettings {
            enable: true,
            override_filter: Some("ontology_builder=loudest".to_string()),
            ..LoggerSettings::default()
        };
        let err = init(&settings).expect_err("unknown level");
        assert!(matches!(err, Error::Logger { action: "parse filter for", .. }));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn directives_append_override_filter() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let settings = LoggerSettings {
            level: LogLevel::Warn,
            override_filter: Some("ontology_builder=trace".to_string()),
            ..LoggerSettings::default()
        };
        assert_eq!(filter_directives(&settings), "warn,ontology_builder=trace");
    }
}
