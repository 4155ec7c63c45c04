use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use oxrdf::NamedNode;
use serde::Serialize;
use thiserror::Error;

/// Value object ensuring that supplied text represents a valid IRI.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Iri {
    value: String,
}

impl Iri {
    /// Validates and constructs a new [`Iri`] value object.
    ///
    /// The constructor rejects malformed identifiers in order to guarantee that
    /// every statement and type uses canonical identifiers.
    pub fn new(value: impl Into<String>) -> Result<Self, IriError> {
        let value = value.into();
        NamedNode::new(value.as_str()).map_err(|_| IriError::Invalid {
            value: value.clone(),
        })?;
        Ok(Self { value })
    }

    /// Returns the underlying textual representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns the namespace part of a fragment IRI, up to and including the
    /// `#` separator. `None` when the IRI carries no fragment.
    #[must_use]
    pub fn fragment_namespace(&self) -> Option<&str> {
        let index = self.value.find('#')?;
        if index + 1 == self.value.len() {
            return None;
        }
        Some(&self.value[..=index])
    }

    /// Returns the text after the last `#` or `/`.
    #[must_use]
    pub fn local_name(&self) -> &str {
        self.value
            .rsplit(['#', '/'])
            .find(|segment| !segment.is_empty())
            .unwrap_or(&self.value)
    }

    /// Strips `base` from the front of the IRI when it is a proper prefix.
    #[must_use]
    pub fn strip_base(&self, base: &str) -> Option<&str> {
        self.value
            .strip_prefix(base)
            .filter(|rest| !rest.is_empty())
    }
}

impl Display for Iri {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl FromStr for Iri {
    type Err = IriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_owned())
    }
}

impl TryFrom<String> for Iri {
    type Error = IriError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NamedNode> for Iri {
    fn from(node: NamedNode) -> Self {
        Self {
            value: node.into_string(),
        }
    }
}

impl From<&NamedNode> for Iri {
    fn from(node: &NamedNode) -> Self {
        Self {
            value: node.as_str().to_owned(),
        }
    }
}

/// Errors produced when validating an [`Iri`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum IriError {
    /// The provided text could not be parsed as an IRI.
    #[error("invalid IRI: {value}")]
    Invalid { value: String },
}

/// A text value carrying a language tag.
///
/// Language tags are compared case-insensitively, as BCP 47 requires, and
/// normalized to lowercase on construction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct LangString {
    value: String,
    language: String,
}

impl LangString {
    #[must_use]
    pub fn new(value: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language: language.into().to_ascii_lowercase(),
        }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Returns `true` when the literal is tagged with `language`.
    #[must_use]
    pub fn is_language(&self, language: &str) -> bool {
        self.language.eq_ignore_ascii_case(language)
    }
}

impl Display for LangString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"@{}", self.value, self.language)
    }
}

#[cfg(test)]
mod tests {
    use super::{Iri, LangString};

    #[test]
    fn accepts_valid_iri() {
        let iri = Iri::new("https://example.org/resource").expect("valid IRI");
        assert_eq!(iri.as_str(), "https://example.org/resource");
    }

    #[test]
    fn rejects_invalid_iri() {
        let err = Iri::new("not an iri").expect_err("invalid IRI");
        assert!(matches!(err, super::IriError::Invalid { value } if value == "not an iri"));
    }

    #[test]
    fn fragment_namespace_includes_separator() {
        let iri = Iri::new("http://example.com/namespace#Thing").expect("valid IRI");
        assert_eq!(iri.fragment_namespace(), Some("http://example.com/namespace#"));

        let slash = Iri::new("https://schema.org/Thing").expect("valid IRI");
        assert_eq!(slash.fragment_namespace(), None);
    }

    #[test]
    fn local_name_uses_last_segment() {
        let hash = Iri::new("http://example.com/namespace#Thing").expect("valid IRI");
        assert_eq!(hash.local_name(), "Thing");

        let slash = Iri::new("https://schema.org/Person/").expect("valid IRI");
        assert_eq!(slash.local_name(), "Person");
    }

    #[test]
    fn strip_base_requires_remainder() {
        let iri = Iri::new("http://example.com/namespace#").expect("valid IRI");
        assert_eq!(iri.strip_base("http://example.com/namespace#"), None);
        assert_eq!(iri.strip_base("http://example.com/"), Some("namespace#"));
    }

    #[test]
    fn lang_string_tags_are_case_insensitive() {
        let literal = LangString::new("Acme", "EN");
        assert_eq!(literal.language(), "en");
        assert!(literal.is_language("en"));
        assert!(literal.is_language("En"));
        assert!(!literal.is_language("es"));
        assert_eq!(literal.to_string(), "\"Acme\"@en");
    }
}
