//! RDFS schema graphs materialized as typed hierarchies.
//!
//! A build classifies [`Statement`]s by predicate, creates one type per
//! declared subject in dependency order, then attaches labels, comments,
//! domains and ranges. The resulting [`Namespace`] hands out [`Instance`]s
//! whose property values are checked against the schema on assignment.

pub mod builder;
pub mod entities;
pub mod hierarchy;
pub mod instance;
pub mod namespace;
pub mod proxy;
pub mod registry;
pub mod session;
pub mod statement;
pub mod value_objects;

pub use builder::OntologyBuilder;
pub use entities::{PropertyConstraints, RangeEntry, TypeDefinition, TypeId};
pub use hierarchy::{HierarchyResolver, ResolvedType};
pub use instance::{Instance, InstanceId, InstanceInit, InstanceRef};
pub use namespace::{Namespace, NamespaceSummary, TypeRef};
pub use proxy::{PropertyProxy, PropertyValue, ValueConstraint};
pub use registry::TypeRegistry;
pub use session::{Session, SessionScope, SessionStack, TypeEntry};
pub use statement::{Object, Statement, StatementKind, TypeKind};
pub use value_objects::{Iri, IriError, LangString};
