use std::sync::Arc;

use oxrdf::Triple;

use crate::{config::BuilderSettings, Error, Result};

use super::hierarchy::HierarchyResolver;
use super::namespace::Namespace;
use super::registry::TypeRegistry;
use super::session::{Session, SessionStack};
use super::statement::{is_datatype_marker, Object, Statement, StatementKind, TypeKind};
use super::value_objects::{Iri, LangString};

/// Materializes a [`Namespace`] from schema statements.
///
/// The build runs in three passes: statements are classified by predicate,
/// declared types are created in dependency order, and annotations (labels,
/// comments, domains and ranges) are applied to the created types. A failing
/// build creates nothing and records nothing in the session.
#[derive(Clone, Debug, Default)]
pub struct OntologyBuilder {
    statements: Vec<Statement>,
    settings: BuilderSettings,
}

impl OntologyBuilder {
    #[must_use]
    pub fn new(statements: impl IntoIterator<Item = Statement>) -> Self {
        Self {
            statements: statements.into_iter().collect(),
            settings: BuilderSettings::default(),
        }
    }

    /// Creates a builder from parsed RDF triples. Triples with a blank-node
    /// subject are dropped.
    #[must_use]
    pub fn from_triples<'a>(triples: impl IntoIterator<Item = &'a Triple>) -> Self {
        let mut skipped = 0_usize;
        let statements = triples
            .into_iter()
            .filter_map(|triple| {
                let statement = Statement::from_triple(triple);
                if statement.is_none() {
                    skipped += 1;
                }
                statement
            })
            .collect::<Vec<_>>();
        if skipped > 0 {
            tracing::debug!(skipped, "blank_node_statements_skipped");
        }
        Self::new(statements)
    }

    #[must_use]
    pub fn with_settings(mut self, settings: BuilderSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the namespace prefix used to derive short names, replacing
    /// inference.
    #[must_use]
    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.settings.base_uri = Some(base_uri.into());
        self
    }

    #[must_use]
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Infers the base URI from the first type assertion whose subject has a
    /// fragment: everything up to and including the `#`.
    #[must_use]
    pub fn infer_base_uri(statements: &[Statement]) -> Option<String> {
        statements
            .iter()
            .filter(|statement| statement.kind() == StatementKind::TypeAssertion)
            .find_map(|statement| statement.subject.fragment_namespace())
            .map(str::to_string)
    }

    /// Builds the namespace and records its types in the current session of
    /// `sessions`.
    ///
    /// # Errors
    ///
    /// * [`Error::BaseUriUnresolved`] when no base URI is configured and none
    ///   can be inferred.
    /// * [`Error::CyclicHierarchy`] when the sub-class graph has a cycle.
    /// * [`Error::DuplicateName`] when two subjects share a short name.
    /// * [`Error::UnknownType`], [`Error::NotAProperty`] or
    ///   [`Error::InvalidAnnotation`] when an annotation cannot be applied.
    pub fn build(self, sessions: &mut SessionStack) -> Result<Arc<Namespace>> {
        let Self {
            statements,
            settings,
        } = self;

        let mut resolver = HierarchyResolver::new();
        let mut annotations = Vec::new();
        let mut uninterpreted = Vec::new();

        for statement in &statements {
            match statement.kind() {
                StatementKind::TypeAssertion => {
                    let marker = statement.object.as_iri();
                    match marker.and_then(TypeKind::from_marker) {
                        Some(kind) => {
                            resolver.declare(&statement.subject, kind);
                            if marker.is_some_and(is_datatype_marker) {
                                resolver.mark_datatype(&statement.subject);
                            }
                        }
                        None => uninterpreted.push(statement.clone()),
                    }
                }
                StatementKind::SubClassAssertion => match statement.object.as_iri() {
                    Some(supertype) => resolver.add_sub_class(&statement.subject, supertype),
                    None => uninterpreted.push(statement.clone()),
                },
                StatementKind::Label
                | StatementKind::Comment
                | StatementKind::Domain
                | StatementKind::Range => annotations.push(statement),
                StatementKind::Other => uninterpreted.push(statement.clone()),
            }
        }
        tracing::debug!(
            statements = statements.len(),
            types = resolver.len(),
            annotations = annotations.len(),
            uninterpreted = uninterpreted.len(),
            "statements_classified"
        );

        let base_uri = match settings.base_uri.clone() {
            Some(base_uri) => base_uri,
            None => match Self::infer_base_uri(&statements) {
                Some(inferred) => {
                    tracing::debug!(base_uri = %inferred, "base_uri_inferred");
                    inferred
                }
                None if resolver.is_empty() => String::new(),
                None => return Err(Error::BaseUriUnresolved),
            },
        };

        let order = resolver.resolve()?;

        let mut staged = Session::default();
        let mut registry = TypeRegistry::new(base_uri);
        for resolved in &order {
            registry.create(&resolved.subject, &resolved.parents, resolved.kind, &mut staged)?;
            if resolved.datatype {
                registry.mark_datatype(&resolved.subject)?;
            }
        }

        for statement in annotations {
            if registry.id_of_uri(&statement.subject).is_none() {
                tracing::debug!(
                    subject = %statement.subject,
                    predicate = %statement.predicate,
                    "annotation_skipped"
                );
                continue;
            }
            apply_annotation(&mut registry, statement, &settings)?;
        }

        let namespace = Arc::new(Namespace::new(registry, settings, uninterpreted));
        tracing::info!(
            base_uri = namespace.base_uri(),
            types = namespace.len(),
            "namespace_built"
        );
        sessions.current_mut().absorb(staged);
        Ok(namespace)
    }
}

fn apply_annotation(
    registry: &mut TypeRegistry,
    statement: &Statement,
    settings: &BuilderSettings,
) -> Result<()> {
    let subject = &statement.subject;
    match statement.kind() {
        StatementKind::Label => {
            registry.add_label(subject, literal(statement, "label", settings)?)
        }
        StatementKind::Comment => {
            registry.add_comment(subject, literal(statement, "comment", settings)?)
        }
        StatementKind::Domain => {
            let class = reference(statement, "domain")?;
            registry.add_property_domain(subject, class)
        }
        StatementKind::Range => {
            let range = reference(statement, "range")?;
            registry.add_property_range(subject, range)
        }
        _ => Ok(()),
    }
}

fn literal(
    statement: &Statement,
    annotation: &'static str,
    settings: &BuilderSettings,
) -> Result<LangString> {
    match &statement.object {
        Object::Literal {
            value, language, ..
        } => Ok(LangString::new(
            value.clone(),
            language
                .clone()
                .unwrap_or_else(|| settings.default_language.clone()),
        )),
        _ => Err(Error::InvalidAnnotation {
            subject: statement.subject.to_string(),
            annotation,
            reason: "expected a literal".to_string(),
        }),
    }
}

fn reference<'a>(statement: &'a Statement, annotation: &'static str) -> Result<&'a Iri> {
    statement
        .object
        .as_iri()
        .ok_or_else(|| Error::InvalidAnnotation {
            subject: statement.subject.to_string(),
            annotation,
            reason: "expected an IRI".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::OntologyBuilder;
    use crate::ontology::session::SessionStack;
    use crate::ontology::statement::{Object, Statement};
    use crate::Error;

    const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    const RDFS_CLASS: &str = "http://www.w3.org/2000/01/rdf-schema#Class";
    const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
    const RDFS_DOMAIN: &str = "http://www.w3.org/2000/01/rdf-schema#domain";
    const SUB_CLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";

    fn statement(subject: &str, predicate: &str, object: Object) -> Statement {
        Statement::new(subject, predicate, object).expect("valid statement")
    }

    fn class(subject: &str) -> Statement {
        statement(subject, RDF_TYPE, Object::iri(RDFS_CLASS).expect("valid iri"))
    }

    #[test]
    fn infers_base_uri_from_first_fragment_subject() {
        let statements = vec![
            class("https://example.org/ontology"),
            class("http://example.com/namespace#Thing"),
            class("http://other.example/ns#Place"),
        ];
        assert_eq!(
            OntologyBuilder::infer_base_uri(&statements).as_deref(),
            Some("http://example.com/namespace#")
        );
    }

    #[test]
    fn requires_a_base_uri_for_slash_namespaces() {
        let mut sessions = SessionStack::new();
        let err = OntologyBuilder::new(vec![class("https://schema.org/Thing")])
            .build(&mut sessions)
            .expect_err("no fragment");
        assert!(matches!(err, Error::BaseUriUnresolved));

        let namespace = OntologyBuilder::new(vec![class("https://schema.org/Thing")])
            .with_base_uri("https://schema.org/")
            .build(&mut sessions)
            .expect("explicit base uri");
        assert!(namespace.get("Thing").is_some());
    }

    #[test]
    fn empty_input_builds_an_empty_namespace() {
        let mut sessions = SessionStack::new();
        let namespace = OntologyBuilder::default()
            .build(&mut sessions)
            .expect("empty build");
        assert!(namespace.is_empty());
    }

    #[test]
    fn annotations_on_individuals_are_skipped() {
        let mut sessions = SessionStack::new();
        let namespace = OntologyBuilder::new(vec![
            class("http://example.com/namespace#Organization"),
            statement(
                "http://example.com/namespace#acme",
                RDF_TYPE,
                Object::iri("http://example.com/namespace#Organization").expect("valid iri"),
            ),
            statement(
                "http://example.com/namespace#acme",
                RDFS_LABEL,
                Object::literal("Acme Inc."),
            ),
        ])
        .build(&mut sessions)
        .expect("individual annotations skipped");

        assert_eq!(namespace.len(), 1);
        assert_eq!(namespace.uninterpreted().len(), 1);
    }

    #[test]
    fn non_literal_labels_fail_the_build() {
        let mut sessions = SessionStack::new();
        let err = OntologyBuilder::new(vec![
            class("http://example.com/namespace#Thing"),
            statement(
                "http://example.com/namespace#Thing",
                RDFS_LABEL,
                Object::iri("http://example.com/namespace#Other").expect("valid iri"),
            ),
        ])
        .build(&mut sessions)
        .expect_err("label must be a literal");
        assert!(matches!(err, Error::InvalidAnnotation { annotation: "label", .. }));
        assert!(sessions.current().is_empty());
    }

    #[test]
    fn domain_on_a_class_fails_the_build() {
        let mut sessions = SessionStack::new();
        let err = OntologyBuilder::new(vec![
            class("http://example.com/namespace#Thing"),
            statement(
                "http://example.com/namespace#Organization",
                SUB_CLASS_OF,
                Object::iri("http://example.com/namespace#Thing").expect("valid iri"),
            ),
            statement(
                "http://example.com/namespace#Organization",
                RDFS_DOMAIN,
                Object::iri("http://example.com/namespace#Thing").expect("valid iri"),
            ),
        ])
        .build(&mut sessions)
        .expect_err("organization is not a property");
        assert!(matches!(err, Error::NotAProperty { name } if name == "Organization"));
        assert!(sessions.current().is_empty());
    }
}
