//! Dependency ordering of type declarations.
//!
//! [`HierarchyResolver`] collects declared subjects and their sub-class edges
//! and produces a creation order in which every super-type precedes its
//! sub-types. Subjects without a super-type are their own base case. Ties are
//! broken by the order in which subjects were first seen, so the same input
//! always yields the same order.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::{Error, Result};

use super::statement::TypeKind;
use super::value_objects::Iri;

/// A declared subject in dependency-correct position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedType {
    pub subject: Iri,
    pub kind: TypeKind,
    /// Direct super-types, in assertion order.
    pub parents: Vec<Iri>,
    /// Declared as a datatype; used as a range it admits literals.
    pub datatype: bool,
}

#[derive(Debug)]
struct Node {
    subject: Iri,
    kind: TypeKind,
    parents: Vec<usize>,
    datatype: bool,
}

/// Sub-class dependency graph over declared subjects.
#[derive(Debug, Default)]
pub struct HierarchyResolver {
    nodes: Vec<Node>,
    index: HashMap<Iri, usize>,
}

impl HierarchyResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `subject` as a type of the given kind.
    ///
    /// A subject declared more than once keeps its first arrival position. A
    /// property declaration wins over a class declaration.
    pub fn declare(&mut self, subject: &Iri, kind: TypeKind) {
        let index = self.node(subject);
        if kind == TypeKind::Property {
            self.nodes[index].kind = TypeKind::Property;
        }
    }

    /// Flags `subject` as a datatype, declaring it as a class when unknown.
    pub fn mark_datatype(&mut self, subject: &Iri) {
        let index = self.node(subject);
        self.nodes[index].datatype = true;
    }

    /// Records that `supertype` is a direct super-type of `subject`.
    ///
    /// Both ends are declared as classes when not yet known. A reflexive
    /// assertion is the implicit base case and adds no edge.
    pub fn add_sub_class(&mut self, subject: &Iri, supertype: &Iri) {
        let child = self.node(subject);
        let parent = self.node(supertype);
        if child == parent {
            return;
        }
        let parents = &mut self.nodes[child].parents;
        if !parents.contains(&parent) {
            parents.push(parent);
        }
    }

    /// Number of declared subjects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Computes the creation order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CyclicHierarchy`] naming the subjects that take part in
    /// a cycle. Nothing is ordered in that case.
    pub fn resolve(&self) -> Result<Vec<ResolvedType>> {
        let mut pending: Vec<usize> = self.nodes.iter().map(|node| node.parents.len()).collect();
        let children = self.children();

        let mut ready: BinaryHeap<Reverse<usize>> = pending
            .iter()
            .enumerate()
            .filter(|(_, count)| **count == 0)
            .map(|(index, _)| Reverse(index))
            .collect();

        let mut order = Vec::with_capacity(self.nodes.len());
        while let Some(Reverse(current)) = ready.pop() {
            order.push(current);
            for &child in &children[current] {
                pending[child] -= 1;
                if pending[child] == 0 {
                    ready.push(Reverse(child));
                }
            }
        }

        if order.len() < self.nodes.len() {
            let subjects = self.cycle_members(&pending, &children);
            tracing::debug!(subjects = ?subjects, "class_hierarchy_cycle");
            return Err(Error::CyclicHierarchy { subjects });
        }

        Ok(order
            .into_iter()
            .map(|index| {
                let node = &self.nodes[index];
                ResolvedType {
                    subject: node.subject.clone(),
                    kind: node.kind,
                    parents: node
                        .parents
                        .iter()
                        .map(|parent| self.nodes[*parent].subject.clone())
                        .collect(),
                    datatype: node.datatype,
                }
            })
            .collect())
    }

    fn node(&mut self, subject: &Iri) -> usize {
        if let Some(index) = self.index.get(subject) {
            return *index;
        }
        let index = self.nodes.len();
        self.nodes.push(Node {
            subject: subject.clone(),
            kind: TypeKind::Class,
            parents: Vec::new(),
            datatype: false,
        });
        self.index.insert(subject.clone(), index);
        index
    }

    fn children(&self) -> Vec<Vec<usize>> {
        let mut children = vec![Vec::new(); self.nodes.len()];
        for (index, node) in self.nodes.iter().enumerate() {
            for &parent in &node.parents {
                children[parent].push(index);
            }
        }
        children
    }

    /// Subjects left unordered, minus those that only hang below a cycle.
    fn cycle_members(&self, pending: &[usize], children: &[Vec<usize>]) -> Vec<String> {
        let mut remaining: Vec<bool> = pending.iter().map(|count| *count > 0).collect();
        loop {
            let mut pruned = false;
            for index in 0..remaining.len() {
                if remaining[index] && !children[index].iter().any(|child| remaining[*child]) {
                    remaining[index] = false;
                    pruned = true;
                }
            }
            if !pruned {
                break;
            }
        }

        remaining
            .iter()
            .enumerate()
            .filter(|(_, keep)| **keep)
            .map(|(index, _)| self.nodes[index].subject.to_string())
            .collect()
    }
}
