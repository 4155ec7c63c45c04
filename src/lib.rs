//! Builds navigable type hierarchies from RDFS schema statements.
//!
//! ```rust
//! use ontology_builder::ontology::{Object, OntologyBuilder, SessionStack, Statement};
//!
//! let statements = vec![
//!     Statement::new(
//!         "http://example.com/namespace#Thing",
//!         "http://www.w3.org/1999/02/22-rdf-syntax-ns#type",
//!         Object::iri("http://www.w3.org/2000/01/rdf-schema#Class").unwrap(),
//!     )
//!     .unwrap(),
//!     Statement::new(
//!         "http://example.com/namespace#Organization",
//!         "http://www.w3.org/2000/01/rdf-schema#subClassOf",
//!         Object::iri("http://example.com/namespace#Thing").unwrap(),
//!     )
//!     .unwrap(),
//! ];
//!
//! let mut sessions = SessionStack::new();
//! let namespace = OntologyBuilder::new(statements).build(&mut sessions).unwrap();
//! let organization = namespace.get("Organization").unwrap();
//! assert_eq!(organization.parents()[0].name(), "Thing");
//! ```

pub mod config;
pub mod errors;
pub mod logger;
pub mod ontology;
#[cfg(any(test, feature = "testing"))]
pub mod tests_cfg;

pub use errors::{Error, Result};
