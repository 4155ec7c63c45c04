//! Schema statements and their classification by predicate role.
//!
//! A [`Statement`] is the crate's view of one `(subject, predicate, object)`
//! triple. Parsing a serialized graph is left to the caller; the usual source
//! is a collection of [`oxrdf::Triple`] values converted with
//! [`Statement::from_triple`].

use oxrdf::vocab::{rdf, rdfs};
use oxrdf::{Term, Triple};
use serde::Serialize;

use super::value_objects::{Iri, IriError};

const OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
const OWL_OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#ObjectProperty";
const OWL_DATATYPE_PROPERTY: &str = "http://www.w3.org/2002/07/owl#DatatypeProperty";
const OWL_ANNOTATION_PROPERTY: &str = "http://www.w3.org/2002/07/owl#AnnotationProperty";
const RDF_PLAIN_LITERAL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#PlainLiteral";
const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";

/// Role of a statement, determined solely by its predicate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum StatementKind {
    TypeAssertion,
    SubClassAssertion,
    Label,
    Comment,
    Domain,
    Range,
    Other,
}

impl StatementKind {
    /// Classifies a predicate against the closed schema vocabulary.
    #[must_use]
    pub fn of_predicate(predicate: &Iri) -> Self {
        let predicate = predicate.as_str();
        if predicate == rdf::TYPE.as_str() {
            Self::TypeAssertion
        } else if predicate == rdfs::SUB_CLASS_OF.as_str() {
            Self::SubClassAssertion
        } else if predicate == rdfs::LABEL.as_str() {
            Self::Label
        } else if predicate == rdfs::COMMENT.as_str() {
            Self::Comment
        } else if predicate == rdfs::DOMAIN.as_str() {
            Self::Domain
        } else if predicate == rdfs::RANGE.as_str() {
            Self::Range
        } else {
            Self::Other
        }
    }
}

/// Kind of type a type assertion declares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TypeKind {
    Class,
    Property,
}

impl TypeKind {
    /// Maps the object of a type assertion to the kind of type it declares.
    ///
    /// Returns `None` for objects that do not declare a schema type, such as
    /// `owl:Ontology` or a local class used to type an individual.
    #[must_use]
    pub fn from_marker(marker: &Iri) -> Option<Self> {
        let marker = marker.as_str();
        if marker == rdfs::CLASS.as_str() || marker == OWL_CLASS || marker == rdfs::DATATYPE.as_str()
        {
            Some(Self::Class)
        } else if marker == rdf::PROPERTY.as_str()
            || marker == OWL_OBJECT_PROPERTY
            || marker == OWL_DATATYPE_PROPERTY
            || marker == OWL_ANNOTATION_PROPERTY
        {
            Some(Self::Property)
        } else {
            None
        }
    }
}

/// Returns `true` when `iri` declares a datatype, whose values are literals.
#[must_use]
pub fn is_datatype_marker(iri: &Iri) -> bool {
    iri.as_str() == rdfs::DATATYPE.as_str()
}

/// Returns `true` when `iri` names a literal kind usable as a property range.
#[must_use]
pub fn is_literal_marker(iri: &Iri) -> bool {
    let iri = iri.as_str();
    iri == rdfs::LITERAL.as_str()
        || iri == rdf::LANG_STRING.as_str()
        || iri == RDF_PLAIN_LITERAL
        || iri.starts_with(XSD_NAMESPACE)
}

/// Object position of a statement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Object {
    Iri(Iri),
    BlankNode(String),
    Literal {
        value: String,
        language: Option<String>,
        datatype: Option<Iri>,
    },
}

impl Object {
    /// Creates an IRI object.
    pub fn iri(value: &str) -> Result<Self, IriError> {
        Ok(Self::Iri(Iri::new(value)?))
    }

    /// Creates an untagged literal object.
    #[must_use]
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal {
            value: value.into(),
            language: None,
            datatype: None,
        }
    }

    /// Creates a language-tagged literal object.
    #[must_use]
    pub fn lang_literal(value: impl Into<String>, language: impl Into<String>) -> Self {
        Self::Literal {
            value: value.into(),
            language: Some(language.into()),
            datatype: None,
        }
    }

    #[must_use]
    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Self::Iri(iri) => Some(iri),
            _ => None,
        }
    }
}

impl From<Iri> for Object {
    fn from(iri: Iri) -> Self {
        Self::Iri(iri)
    }
}

/// A single `(subject, predicate, object)` schema assertion.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Statement {
    pub subject: Iri,
    pub predicate: Iri,
    pub object: Object,
}

impl Statement {
    /// Creates a statement from textual IRIs.
    pub fn new(subject: &str, predicate: &str, object: Object) -> Result<Self, IriError> {
        Ok(Self {
            subject: Iri::new(subject)?,
            predicate: Iri::new(predicate)?,
            object,
        })
    }

    /// Converts a parsed RDF triple.
    ///
    /// Returns `None` for triples whose subject is not an IRI; blank-node
    /// subjects (OWL restrictions, RDF lists) have no counterpart in the type
    /// hierarchy.
    #[must_use]
    pub fn from_triple(triple: &Triple) -> Option<Self> {
        let subject = match Term::from(triple.subject.clone()) {
            Term::NamedNode(node) => Iri::from(node),
            _ => return None,
        };
        let object = match &triple.object {
            Term::NamedNode(node) => Object::Iri(Iri::from(node)),
            Term::BlankNode(node) => Object::BlankNode(node.as_str().to_owned()),
            Term::Literal(literal) => Object::Literal {
                value: literal.value().to_owned(),
                language: literal.language().map(str::to_owned),
                datatype: Some(Iri::from(literal.datatype().into_owned())),
            },
            #[allow(unreachable_patterns)]
            _ => return None,
        };
        Some(Self {
            subject,
            predicate: Iri::from(&triple.predicate),
            object,
        })
    }

    /// Classifies the statement by its predicate.
    #[must_use]
    pub fn kind(&self) -> StatementKind {
        StatementKind::of_predicate(&self.predicate)
    }
}

impl TryFrom<&Triple> for Statement {
    type Error = Triple;

    fn try_from(triple: &Triple) -> Result<Self, Self::Error> {
        Self::from_triple(triple).ok_or_else(|| triple.clone())
    }
}
