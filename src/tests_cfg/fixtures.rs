use std::sync::Arc;

use oxrdf::vocab::{rdf, rdfs};
use oxrdf::{Literal, NamedNode, Triple};

use crate::ontology::{Namespace, OntologyBuilder, SessionStack, Statement};

pub const BASE_URI: &str = "http://example.com/namespace#";

const ONTOLOGY_URI: &str = "http://example.com/namespace";
const OWL_ONTOLOGY: &str = "http://www.w3.org/2002/07/owl#Ontology";
const SKOS_EXACT_MATCH: &str = "http://www.w3.org/2004/02/skos/core#exactMatch";
const SCHEMA_THING: &str = "https://schema.org/Thing";

fn local(name: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("{BASE_URI}{name}"))
}

fn class(name: &str) -> Triple {
    Triple::new(local(name), rdf::TYPE, rdfs::CLASS.into_owned())
}

fn property(name: &str) -> Triple {
    Triple::new(local(name), rdf::TYPE, rdf::PROPERTY.into_owned())
}

fn sub_class(name: &str, parent: &str) -> Triple {
    Triple::new(local(name), rdfs::SUB_CLASS_OF, local(parent))
}

fn label(name: &str, value: &str, language: &str) -> Triple {
    Triple::new(
        local(name),
        rdfs::LABEL,
        Literal::new_language_tagged_literal_unchecked(value, language),
    )
}

fn comment(name: &str, value: &str, language: &str) -> Triple {
    Triple::new(
        local(name),
        rdfs::COMMENT,
        Literal::new_language_tagged_literal_unchecked(value, language),
    )
}

/// A small organization schema: six classes rooted at `Thing` and three
/// properties, `hasExecutive` refining `hasEmployee`.
#[must_use]
pub fn organization_triples() -> Vec<Triple> {
    vec![
        Triple::new(
            NamedNode::new_unchecked(ONTOLOGY_URI),
            rdf::TYPE,
            NamedNode::new_unchecked(OWL_ONTOLOGY),
        ),
        class("Thing"),
        label("Thing", "Thing", "en"),
        comment("Thing", "The most generic type of item.", "en"),
        Triple::new(
            local("Thing"),
            NamedNode::new_unchecked(SKOS_EXACT_MATCH),
            NamedNode::new_unchecked(SCHEMA_THING),
        ),
        class("Organization"),
        sub_class("Organization", "Thing"),
        label("Organization", "Organization", "en"),
        comment("Organization", "An organization such as a company.", "en"),
        comment("Organization", "Una organización como una empresa.", "es"),
        class("Corporation"),
        sub_class("Corporation", "Organization"),
        class("GovernmentOrganization"),
        sub_class("GovernmentOrganization", "Organization"),
        class("Person"),
        sub_class("Person", "Thing"),
        label("Person", "Person", "en"),
        class("Country"),
        sub_class("Country", "Thing"),
        label("Country", "Country", "en"),
        property("naics"),
        label("naics", "NAICS code", "en"),
        Triple::new(
            local("naics"),
            rdfs::COMMENT,
            Literal::new_simple_literal("North American Industry Classification System code."),
        ),
        Triple::new(local("naics"), rdfs::DOMAIN, local("Organization")),
        Triple::new(local("naics"), rdfs::RANGE, rdfs::LITERAL.into_owned()),
        property("hasEmployee"),
        Triple::new(local("hasEmployee"), rdfs::DOMAIN, local("Organization")),
        Triple::new(local("hasEmployee"), rdfs::RANGE, local("Person")),
        property("hasExecutive"),
        sub_class("hasExecutive", "hasEmployee"),
    ]
}

#[must_use]
pub fn organization_statements() -> Vec<Statement> {
    organization_triples()
        .iter()
        .filter_map(Statement::from_triple)
        .collect()
}

/// Builds the organization schema into the current session of `sessions`.
///
/// # Panics
///
/// Panics when the build fails.
#[must_use]
pub fn organization_namespace(sessions: &mut SessionStack) -> Arc<Namespace> {
    OntologyBuilder::from_triples(&organization_triples())
        .build(sessions)
        .expect("organization schema builds")
}
