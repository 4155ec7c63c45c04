//! Arena of the types created by one build.

use std::collections::{BTreeSet, HashMap, VecDeque};

use crate::{config::RangeInheritance, Error, Result};

use super::entities::{RangeEntry, TypeDefinition, TypeId};
use super::session::{Session, TypeEntry};
use super::statement::{is_literal_marker, TypeKind};
use super::value_objects::{Iri, LangString};

/// Owns every [`TypeDefinition`] of a namespace, addressed by [`TypeId`].
#[derive(Clone, Debug)]
pub struct TypeRegistry {
    base_uri: String,
    types: Vec<TypeDefinition>,
    by_name: HashMap<String, TypeId>,
    by_uri: HashMap<Iri, TypeId>,
}

impl TypeRegistry {
    #[must_use]
    pub fn new(base_uri: impl Into<String>) -> Self {
        Self {
            base_uri: base_uri.into(),
            types: Vec::new(),
            by_name: HashMap::new(),
            by_uri: HashMap::new(),
        }
    }

    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Derives the short name of `subject`: the IRI without the base URI, or
    /// its local name when it lives outside the base namespace.
    #[must_use]
    pub fn short_name(&self, subject: &Iri) -> String {
        subject
            .strip_base(&self.base_uri)
            .unwrap_or_else(|| subject.local_name())
            .to_string()
    }

    /// Creates a type whose parents are the already created `predecessors`.
    ///
    /// The new type is recorded in `session` once it is part of the registry.
    ///
    /// # Errors
    ///
    /// * [`Error::UnresolvedSupertype`] when a predecessor was not created yet.
    /// * [`Error::DuplicateName`] when another subject owns the short name.
    pub fn create(
        &mut self,
        subject: &Iri,
        predecessors: &[Iri],
        kind: TypeKind,
        session: &mut Session,
    ) -> Result<TypeId> {
        let parents = predecessors
            .iter()
            .map(|predecessor| {
                self.by_uri
                    .get(predecessor)
                    .copied()
                    .ok_or_else(|| Error::UnresolvedSupertype {
                        subject: subject.to_string(),
                        supertype: predecessor.to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let name = self.short_name(subject);
        if let Some(existing) = self.by_name.get(&name) {
            return Err(Error::DuplicateName {
                duplicate: subject.to_string(),
                existing: self.types[existing.index()].uri().to_string(),
                name,
            });
        }

        let id = TypeId::new(self.types.len());
        self.types.push(TypeDefinition::new(
            id,
            name.clone(),
            subject.clone(),
            kind,
            parents,
        ));
        self.by_name.insert(name.clone(), id);
        self.by_uri.insert(subject.clone(), id);

        tracing::debug!(name = %name, uri = %subject, kind = ?kind, "type_created");
        session.register_type(TypeEntry {
            name,
            uri: subject.clone(),
            kind,
        });
        Ok(id)
    }

    /// Appends a label to the type created for `subject`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownType`] when `subject` is not a created type.
    pub fn add_label(&mut self, subject: &Iri, label: LangString) -> Result<()> {
        let id = self.require(subject)?;
        self.types[id.index()].add_label(label);
        Ok(())
    }

    /// Appends a comment to the type created for `subject`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownType`] when `subject` is not a created type.
    pub fn add_comment(&mut self, subject: &Iri, comment: LangString) -> Result<()> {
        let id = self.require(subject)?;
        self.types[id.index()].add_comment(comment);
        Ok(())
    }

    /// Adds `class` to the domain of `property` and lists the property among
    /// the declared properties of `class`.
    ///
    /// # Errors
    ///
    /// * [`Error::UnknownType`] when either end is not a created type.
    /// * [`Error::NotAProperty`] when `property` is a class type.
    pub fn add_property_domain(&mut self, property: &Iri, class: &Iri) -> Result<()> {
        let property_id = self.require(property)?;
        let class_id = self.require(class)?;
        self.types[property_id.index()].add_domain(class_id)?;
        self.types[class_id.index()].add_declared_property(property_id);
        Ok(())
    }

    /// Adds `range` to the range of `property`. Literal kinds such as
    /// `rdfs:Literal`, XML Schema datatypes and types marked as datatypes are
    /// recorded as [`RangeEntry::Literal`], even when also declared as types.
    ///
    /// # Errors
    ///
    /// * [`Error::UnknownType`] when `range` is neither a created type nor a
    ///   literal kind.
    /// * [`Error::NotAProperty`] when `property` is a class type.
    pub fn add_property_range(&mut self, property: &Iri, range: &Iri) -> Result<()> {
        let property_id = self.require(property)?;
        let entry = if is_literal_marker(range) {
            RangeEntry::Literal
        } else {
            match self.by_uri.get(range) {
                Some(id) if self.types[id.index()].is_datatype() => RangeEntry::Literal,
                Some(id) => RangeEntry::Class(*id),
                None => return Err(Error::unknown_type(range.as_str())),
            }
        };
        self.types[property_id.index()].add_range(entry)?;
        Ok(())
    }

    /// Flags the type created for `subject` as a datatype.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownType`] when `subject` is not a created type.
    pub fn mark_datatype(&mut self, subject: &Iri) -> Result<()> {
        let id = self.require(subject)?;
        self.types[id.index()].mark_datatype();
        Ok(())
    }

    fn require(&self, subject: &Iri) -> Result<TypeId> {
        self.by_uri
            .get(subject)
            .copied()
            .ok_or_else(|| Error::unknown_type(subject.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Looks up a type by short name.
    #[must_use]
    pub fn id_of(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    /// Looks up a type by full IRI.
    #[must_use]
    pub fn id_of_uri(&self, uri: &Iri) -> Option<TypeId> {
        self.by_uri.get(uri).copied()
    }

    /// # Panics
    ///
    /// Panics when `id` was issued by another registry and is out of bounds.
    #[must_use]
    pub fn definition(&self, id: TypeId) -> &TypeDefinition {
        &self.types[id.index()]
    }

    /// All types in creation order.
    pub fn definitions(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.types.iter()
    }

    /// Direct sub-types of `id` in creation order.
    #[must_use]
    pub fn children(&self, id: TypeId) -> Vec<TypeId> {
        self.types
            .iter()
            .filter(|candidate| candidate.parents().contains(&id))
            .map(TypeDefinition::id)
            .collect()
    }

    /// Transitive super-types of `id`, breadth-first, nearest first.
    #[must_use]
    pub fn ancestors(&self, id: TypeId) -> Vec<TypeId> {
        let mut visited = BTreeSet::new();
        let mut to_visit: VecDeque<TypeId> =
            self.definition(id).parents().iter().copied().collect();
        let mut result = Vec::new();

        while let Some(current) = to_visit.pop_front() {
            if visited.insert(current) {
                result.push(current);
                to_visit.extend(self.definition(current).parents().iter().copied());
            }
        }

        result
    }

    /// Transitive sub-types of `id` in creation order.
    #[must_use]
    pub fn descendants(&self, id: TypeId) -> Vec<TypeId> {
        self.types
            .iter()
            .map(TypeDefinition::id)
            .filter(|candidate| *candidate != id && self.is_subtype_of(*candidate, id))
            .collect()
    }

    /// Returns `true` when `id` is `ancestor` or descends from it through any
    /// chain of parents.
    #[must_use]
    pub fn is_subtype_of(&self, id: TypeId, ancestor: TypeId) -> bool {
        if id == ancestor {
            return true;
        }
        let mut visited = BTreeSet::new();
        let mut to_visit: VecDeque<TypeId> = VecDeque::from([id]);
        while let Some(current) = to_visit.pop_front() {
            if current == ancestor {
                return true;
            }
            if visited.insert(current) {
                to_visit.extend(self.definition(current).parents().iter().copied());
            }
        }
        false
    }

    /// Range of `property` after applying `inheritance` over its super-types.
    #[must_use]
    pub fn effective_range(&self, property: TypeId, inheritance: RangeInheritance) -> Vec<RangeEntry> {
        self.inherited(property, inheritance, |definition| {
            definition
                .constraints()
                .map(|constraints| constraints.range().to_vec())
                .unwrap_or_default()
        })
    }

    /// Domain of `property` after applying `inheritance` over its super-types.
    #[must_use]
    pub fn effective_domain(&self, property: TypeId, inheritance: RangeInheritance) -> Vec<TypeId> {
        self.inherited(property, inheritance, |definition| {
            definition
                .constraints()
                .map(|constraints| constraints.domain().to_vec())
                .unwrap_or_default()
        })
    }

    fn inherited<T: PartialEq>(
        &self,
        id: TypeId,
        inheritance: RangeInheritance,
        entries: impl Fn(&TypeDefinition) -> Vec<T>,
    ) -> Vec<T> {
        let mut result = entries(self.definition(id));
        match inheritance {
            RangeInheritance::MostDerived => {
                if result.is_empty() {
                    result = self
                        .ancestors(id)
                        .into_iter()
                        .map(|ancestor| entries(self.definition(ancestor)))
                        .find(|candidate| !candidate.is_empty())
                        .unwrap_or_default();
                }
            }
            RangeInheritance::Union => {
                for ancestor in self.ancestors(id) {
                    for entry in entries(self.definition(ancestor)) {
                        if !result.contains(&entry) {
                            result.push(entry);
                        }
                    }
                }
            }
        }
        result
    }

    /// Property types applicable to instances of `class`, in creation order.
    ///
    /// A property applies when its effective domain is empty or names `class`
    /// or one of its ancestors.
    #[must_use]
    pub fn properties_of(&self, class: TypeId, inheritance: RangeInheritance) -> Vec<TypeId> {
        self.types
            .iter()
            .filter(|candidate| candidate.kind() == TypeKind::Property)
            .map(TypeDefinition::id)
            .filter(|property| {
                let domain = self.effective_domain(*property, inheritance);
                domain.is_empty()
                    || domain
                        .iter()
                        .any(|owner| self.is_subtype_of(class, *owner))
            })
            .collect()
    }
}
