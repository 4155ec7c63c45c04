//! # Configuration
//!
//! Settings for the namespace builder and for the logger, deserialized from
//! YAML. Every field has a default, so an empty document is a valid
//! configuration.
//!
//! ```yaml
//! builder:
//!   base_uri: http://example.com/namespace#
//!   default_language: en
//!   range_inheritance: union
//! logger:
//!   enable: true
//!   level: debug
//!   format: compact
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{logger::LoggerSettings, Error, Result};

/// Language tag applied to text that carries none.
pub const DEFAULT_LANGUAGE_TAG: &str = "en";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub builder: BuilderSettings,
    pub logger: LoggerSettings,
}

impl Config {
    /// Parses a YAML configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the document is not valid.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Reads and parses a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the file cannot be read and
    /// [`Error::Config`] when its content is not valid.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }
}

/// Settings controlling one namespace build.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BuilderSettings {
    /// Namespace prefix stripped from subject IRIs to derive short names.
    /// Inferred from the statements when absent.
    pub base_uri: Option<String>,
    /// Language tag given to untagged text.
    pub default_language: String,
    pub range_inheritance: RangeInheritance,
}

impl Default for BuilderSettings {
    fn default() -> Self {
        Self {
            base_uri: None,
            default_language: DEFAULT_LANGUAGE_TAG.to_string(),
            range_inheritance: RangeInheritance::default(),
        }
    }
}

/// How a property type that has super-properties derives its domain and range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeInheritance {
    /// Own entries when present, otherwise those of the nearest ancestor.
    #[default]
    MostDerived,
    /// Own entries followed by every ancestor's.
    Union,
}

#[cfg(test)]
mod tests {
    use super::{Config, RangeInheritance, DEFAULT_LANGUAGE_TAG};
    use crate::logger::{Format, LogLevel};

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::from_yaml_str("").expect("empty config");
        assert_eq!(config.builder.base_uri, None);
        assert_eq!(config.builder.default_language, DEFAULT_LANGUAGE_TAG);
        assert_eq!(config.builder.range_inheritance, RangeInheritance::MostDerived);
        assert!(!config.logger.enable);
    }

    #[test]
    fn parses_builder_and_logger_sections() {
        let config = Config::from_yaml_str(
            r"
builder:
  base_uri: http://example.com/namespace#
  default_language: fr
  range_inheritance: union
logger:
  enable: true
  level: debug
  format: json
",
        )
        .expect("valid config");

        assert_eq!(
            config.builder.base_uri.as_deref(),
            Some("http://example.com/namespace#")
        );
        assert_eq!(config.builder.default_language, "fr");
        assert_eq!(config.builder.range_inheritance, RangeInheritance::Union);
        assert!(config.logger.enable);
        assert_eq!(config.logger.level, LogLevel::Debug);
        assert_eq!(config.logger.format, Format::Json);
    }

    #[test]
    fn rejects_unknown_inheritance_mode() {
        let err = Config::from_yaml_str("builder:\n  range_inheritance: closest\n")
            .expect_err("unknown variant");
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn reports_missing_file() {
        let path = std::env::temp_dir().join("ontology-builder-missing-config.yaml");
        let err = Config::from_path(&path).expect_err("missing file");
        assert!(matches!(err, crate::Error::Io { .. }));
    }
}
