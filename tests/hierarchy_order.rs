use std::collections::HashMap;

use ontology_builder::{
    ontology::{Object, OntologyBuilder, SessionStack, Statement},
    Error,
};
use proptest::prelude::*;

const BASE_URI: &str = "http://example.com/namespace#";
const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
const RDFS_CLASS: &str = "http://www.w3.org/2000/01/rdf-schema#Class";
const RDF_PROPERTY: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Property";
const SUB_CLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";

/// Random acyclic hierarchies: node `i` may only extend nodes `< i`.
fn hierarchy() -> impl Strategy<Value = Vec<Vec<usize>>> {
    (1_usize..24).prop_flat_map(|size| {
        (0..size)
            .map(|index| {
                if index == 0 {
                    Just(Vec::new()).boxed()
                } else {
                    proptest::collection::vec(0..index, 0..=3).boxed()
                }
            })
            .collect::<Vec<_>>()
    })
}

/// A random hierarchy plus one `(descendant, ancestor)` pair joined by a
/// chain of sub-class edges.
fn hierarchy_with_chain() -> impl Strategy<Value = (Vec<Vec<usize>>, (usize, usize))> {
    hierarchy()
        .prop_filter("needs a sub-class edge", |parents| {
            parents.iter().any(|direct| !direct.is_empty())
        })
        .prop_flat_map(|parents| {
            let chains: Vec<(usize, usize)> = (0..parents.len())
                .flat_map(|index| {
                    ancestors(&parents, index)
                        .into_iter()
                        .map(move |ancestor| (index, ancestor))
                })
                .collect();
            (Just(parents), proptest::sample::select(chains))
        })
}

fn ancestors(parents: &[Vec<usize>], index: usize) -> Vec<usize> {
    let mut found = Vec::new();
    let mut to_visit = parents[index].clone();
    while let Some(current) = to_visit.pop() {
        if !found.contains(&current) {
            found.push(current);
            to_visit.extend(parents[current].iter().copied());
        }
    }
    found
}

fn statements(parents: &[Vec<usize>], order: &[usize]) -> Vec<Statement> {
    statements_declared_as(parents, order, RDFS_CLASS)
}

fn statements_declared_as(parents: &[Vec<usize>], order: &[usize], marker: &str) -> Vec<Statement> {
    let iri = |index: usize| format!("{BASE_URI}C{index}");
    let mut statements = Vec::new();
    for &index in order {
        statements.push(
            Statement::new(
                &iri(index),
                RDF_TYPE,
                Object::iri(marker).expect("type marker"),
            )
            .expect("type assertion"),
        );
        for &parent in &parents[index] {
            statements.push(
                Statement::new(
                    &iri(index),
                    SUB_CLASS_OF,
                    Object::iri(&iri(parent)).expect("parent iri"),
                )
                .expect("sub-class assertion"),
            );
        }
    }
    statements
}

proptest! {
    #[test]
    fn super_types_are_created_before_sub_types(
        (parents, order) in hierarchy().prop_flat_map(|parents| {
            let indices: Vec<usize> = (0..parents.len()).collect();
            (Just(parents), Just(indices).prop_shuffle())
        })
    ) {
        let mut sessions = SessionStack::new();
        let namespace = OntologyBuilder::new(statements(&parents, &order))
            .build(&mut sessions)
            .expect("acyclic hierarchy builds");

        let position: HashMap<String, usize> = sessions
            .current()
            .types()
            .iter()
            .enumerate()
            .map(|(position, entry)| (entry.name.clone(), position))
            .collect();
        prop_assert_eq!(position.len(), parents.len());

        for (index, direct) in parents.iter().enumerate() {
            let child = namespace.type_named(&format!("C{index}")).expect("created");
            for parent in direct {
                let (parent_name, child_name) = (format!("C{parent}"), format!("C{index}"));
                prop_assert!(position[&parent_name] < position[&child_name]);
                let parent = namespace.type_named(&format!("C{parent}")).expect("created");
                prop_assert!(child.is_subtype_of(&parent));
            }
        }
    }

    #[test]
    fn identical_input_yields_identical_order(parents in hierarchy()) {
        let order: Vec<usize> = (0..parents.len()).collect();
        let build = || {
            let mut sessions = SessionStack::new();
            OntologyBuilder::new(statements(&parents, &order))
                .build(&mut sessions)
                .expect("acyclic hierarchy builds")
                .summary()
                .types
        };
        prop_assert_eq!(build(), build());
    }

    #[test]
    fn any_back_edge_is_rejected_without_recording_types(
        (parents, (descendant, ancestor)) in hierarchy_with_chain(),
        as_properties in any::<bool>(),
    ) {
        let order: Vec<usize> = (0..parents.len()).collect();
        let marker = if as_properties { RDF_PROPERTY } else { RDFS_CLASS };
        let mut statements = statements_declared_as(&parents, &order, marker);
        statements.push(
            Statement::new(
                &format!("{BASE_URI}C{ancestor}"),
                SUB_CLASS_OF,
                Object::iri(&format!("{BASE_URI}C{descendant}")).expect("descendant iri"),
            )
            .expect("back edge"),
        );

        let mut sessions = SessionStack::new();
        let err = OntologyBuilder::new(statements)
            .build(&mut sessions)
            .expect_err("cyclic hierarchy");

        let Error::CyclicHierarchy { subjects } = err else {
            panic!("expected a cyclic hierarchy error");
        };
        let (ancestor_uri, descendant_uri) =
            (format!("{BASE_URI}C{ancestor}"), format!("{BASE_URI}C{descendant}"));
        prop_assert!(subjects.contains(&ancestor_uri));
        prop_assert!(subjects.contains(&descendant_uri));
        prop_assert!(sessions.current().is_empty());
        prop_assert_eq!(sessions.depth(), 1);
    }
}
