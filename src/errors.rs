//! # Ontology Builder Errors
//!
//! This module defines the error kinds raised while building a namespace from
//! schema statements and while constructing or mutating instances of the
//! resulting types. All of them propagate synchronously to the caller.

use std::path::PathBuf;

use crate::ontology::value_objects::IriError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The sub-class graph contains a cycle. No type is created.
    #[error("cyclic class hierarchy between: {}", .subjects.join(", "))]
    CyclicHierarchy { subjects: Vec<String> },

    /// Two distinct subjects resolve to the same short name.
    #[error("type name `{name}` is claimed by both `{existing}` and `{duplicate}`")]
    DuplicateName {
        name: String,
        existing: String,
        duplicate: String,
    },

    /// A super-type was referenced before it was created.
    #[error("super-type `{supertype}` of `{subject}` has not been created")]
    UnresolvedSupertype { subject: String, supertype: String },

    #[error("no value tagged with language `{language}`")]
    NoLabelForLanguage { language: String },

    /// The value does not satisfy the range of the property it was assigned to.
    #[error("invalid assignment to `{property}`: expected {expected}, got {actual}")]
    InvalidPropertyAssignment {
        property: String,
        expected: String,
        actual: String,
    },

    #[error("type `{type_name}` has no property `{property}`")]
    UnknownProperty { type_name: String, property: String },

    #[error("unknown type `{name}`")]
    UnknownType { name: String },

    /// A domain or range was declared for a type that is not a property.
    #[error("`{name}` is not a property type")]
    NotAProperty { name: String },

    #[error("invalid {annotation} annotation on `{subject}`: {reason}")]
    InvalidAnnotation {
        subject: String,
        annotation: &'static str,
        reason: String,
    },

    #[error("base URI could not be inferred: no typed subject carries a fragment")]
    BaseUriUnresolved,

    #[error(transparent)]
    Iri(#[from] IriError),

    #[error("failed to read configuration `{path}`: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] serde_yaml::Error),

    #[error("failed to {action} logger")]
    Logger {
        action: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    /// Create an error for a literal query that found no value in `language`.
    #[must_use]
    pub fn no_label(language: &str) -> Self {
        Self::NoLabelForLanguage {
            language: language.to_string(),
        }
    }

    #[must_use]
    pub fn unknown_type(name: impl Into<String>) -> Self {
        Self::UnknownType { name: name.into() }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
