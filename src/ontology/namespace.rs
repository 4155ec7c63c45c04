//! The short-name-to-type mapping produced by one build.

use std::fmt::Write as _;
use std::sync::Arc;

use serde::Serialize;

use crate::{config::BuilderSettings, Error, Result};

use super::entities::{RangeEntry, TypeDefinition, TypeId};
use super::instance::{Instance, InstanceInit};
use super::registry::TypeRegistry;
use super::session::SessionStack;
use super::statement::{Statement, TypeKind};
use super::value_objects::{Iri, LangString};

/// Every type created by one build, addressable by short name.
///
/// A namespace is immutable once built and is shared through an [`Arc`] by
/// the instances created from it.
#[derive(Debug)]
pub struct Namespace {
    registry: TypeRegistry,
    settings: BuilderSettings,
    uninterpreted: Vec<Statement>,
}

/// Serializable overview of a namespace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NamespaceSummary {
    pub base_uri: String,
    pub class_count: usize,
    pub property_count: usize,
    pub types: Vec<String>,
}

impl Namespace {
    pub(crate) fn new(
        registry: TypeRegistry,
        settings: BuilderSettings,
        uninterpreted: Vec<Statement>,
    ) -> Self {
        Self {
            registry,
            settings,
            uninterpreted,
        }
    }

    #[must_use]
    pub fn base_uri(&self) -> &str {
        self.registry.base_uri()
    }

    /// Language tag given to untagged text assigned to instances.
    #[must_use]
    pub fn default_language(&self) -> &str {
        &self.settings.default_language
    }

    #[must_use]
    pub fn settings(&self) -> &BuilderSettings {
        &self.settings
    }

    #[must_use]
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<TypeRef<'_>> {
        self.registry.id_of(name).map(|id| self.type_ref(id))
    }

    /// Looks up a type by short name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownType`] when no type has that name.
    pub fn type_named(&self, name: &str) -> Result<TypeRef<'_>> {
        self.get(name).ok_or_else(|| Error::unknown_type(name))
    }

    #[must_use]
    pub fn get_by_uri(&self, uri: &Iri) -> Option<TypeRef<'_>> {
        self.registry.id_of_uri(uri).map(|id| self.type_ref(id))
    }

    /// View of a type issued by this namespace's registry.
    ///
    /// # Panics
    ///
    /// Panics when `id` was issued by another namespace and is out of bounds.
    #[must_use]
    pub(crate) fn type_ref(&self, id: TypeId) -> TypeRef<'_> {
        TypeRef {
            namespace: self,
            id,
        }
    }

    /// All types in creation order.
    pub fn types(&self) -> impl Iterator<Item = TypeRef<'_>> {
        self.registry
            .definitions()
            .map(move |definition| self.type_ref(definition.id()))
    }

    /// Statements kept but not interpreted by the build, such as
    /// `skos:exactMatch` links or type assertions of individuals.
    #[must_use]
    pub fn uninterpreted(&self) -> &[Statement] {
        &self.uninterpreted
    }

    /// Creates an instance of the type called `name` and records it in the
    /// current session of `sessions`.
    ///
    /// # Errors
    ///
    /// * [`Error::UnknownType`] when no type has that name.
    /// * [`Error::UnknownProperty`] when `init` names a property the type does
    ///   not carry.
    /// * [`Error::InvalidPropertyAssignment`] when an initial value does not
    ///   satisfy its property's range.
    pub fn instantiate(
        self: &Arc<Self>,
        name: &str,
        sessions: &mut SessionStack,
        init: InstanceInit,
    ) -> Result<Instance> {
        let id = self.type_named(name)?.id();
        Instance::construct(self, id, sessions, init)
    }

    #[must_use]
    pub fn summary(&self) -> NamespaceSummary {
        let definitions = || self.registry.definitions();
        NamespaceSummary {
            base_uri: self.base_uri().to_string(),
            class_count: definitions()
                .filter(|definition| definition.kind() == TypeKind::Class)
                .count(),
            property_count: definitions()
                .filter(|definition| definition.kind() == TypeKind::Property)
                .count(),
            types: definitions()
                .map(|definition| definition.name().to_string())
                .collect(),
        }
    }

    /// Renders the hierarchy as an indented tree, roots in creation order.
    /// A type with several parents appears under each of them.
    #[must_use]
    pub fn render_tree(&self) -> String {
        let mut out = String::new();
        for root in self.types().filter(|candidate| candidate.parents().is_empty()) {
            self.render_node(root, 0, &mut out);
        }
        out
    }

    fn render_node(&self, node: TypeRef<'_>, depth: usize, out: &mut String) {
        let marker = match node.kind() {
            TypeKind::Class => "",
            TypeKind::Property => " [property]",
        };
        let _ = writeln!(out, "{}{}{marker}", "  ".repeat(depth), node.name());
        for child in node.children() {
            self.render_node(child, depth + 1, out);
        }
    }
}

/// Borrowed view of one type of a [`Namespace`].
#[derive(Clone, Copy)]
pub struct TypeRef<'a> {
    namespace: &'a Namespace,
    id: TypeId,
}

impl PartialEq for TypeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.namespace, other.namespace) && self.id == other.id
    }
}

impl Eq for TypeRef<'_> {}

impl std::fmt::Debug for TypeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRef")
            .field("name", &self.name())
            .field("kind", &self.kind())
            .finish()
    }
}

impl<'a> TypeRef<'a> {
    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    #[must_use]
    pub fn definition(&self) -> &'a TypeDefinition {
        self.namespace.registry.definition(self.id)
    }

    #[must_use]
    pub fn name(&self) -> &'a str {
        self.definition().name()
    }

    #[must_use]
    pub fn uri(&self) -> &'a Iri {
        self.definition().uri()
    }

    #[must_use]
    pub fn kind(&self) -> TypeKind {
        self.definition().kind()
    }

    #[must_use]
    pub fn parents(&self) -> Vec<TypeRef<'a>> {
        self.wrap(self.definition().parents().iter().copied())
    }

    /// Direct sub-types.
    #[must_use]
    pub fn children(&self) -> Vec<TypeRef<'a>> {
        self.wrap(self.namespace.registry.children(self.id))
    }

    /// Transitive super-types, nearest first.
    #[must_use]
    pub fn ancestors(&self) -> Vec<TypeRef<'a>> {
        self.wrap(self.namespace.registry.ancestors(self.id))
    }

    #[must_use]
    pub fn descendants(&self) -> Vec<TypeRef<'a>> {
        self.wrap(self.namespace.registry.descendants(self.id))
    }

    /// Returns `true` when this type is `other` or one of its descendants.
    #[must_use]
    pub fn is_subtype_of(&self, other: &TypeRef<'_>) -> bool {
        std::ptr::eq(self.namespace, other.namespace)
            && self.namespace.registry.is_subtype_of(self.id, other.id)
    }

    #[must_use]
    pub fn labels(&self) -> &'a [LangString] {
        self.definition().labels()
    }

    #[must_use]
    pub fn comments(&self) -> &'a [LangString] {
        self.definition().comments()
    }

    /// First label tagged with `language`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLabelForLanguage`] when none carries the tag.
    pub fn label(&self, language: &str) -> Result<&'a str> {
        self.definition().label(language)
    }

    /// First comment tagged with `language`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLabelForLanguage`] when none carries the tag.
    pub fn comment(&self, language: &str) -> Result<&'a str> {
        self.definition().comment(language)
    }

    /// Documentation text: the first comment in the default language.
    #[must_use]
    pub fn doc(&self) -> Option<&'a str> {
        self.comment(self.namespace.default_language()).ok()
    }

    /// Properties whose own domain names this type.
    #[must_use]
    pub fn declared_properties(&self) -> Vec<TypeRef<'a>> {
        self.wrap(self.definition().declared_properties().iter().copied())
    }

    /// Properties an instance of this type carries, inherited ones included.
    #[must_use]
    pub fn properties(&self) -> Vec<TypeRef<'a>> {
        self.wrap(
            self.namespace
                .registry
                .properties_of(self.id, self.namespace.settings.range_inheritance),
        )
    }

    /// Effective domain of a property type; empty for classes.
    #[must_use]
    pub fn domain(&self) -> Vec<TypeRef<'a>> {
        if self.kind() != TypeKind::Property {
            return Vec::new();
        }
        self.wrap(
            self.namespace
                .registry
                .effective_domain(self.id, self.namespace.settings.range_inheritance),
        )
    }

    /// Effective range of a property type; empty for classes.
    #[must_use]
    pub fn range(&self) -> Vec<RangeEntry> {
        if self.kind() != TypeKind::Property {
            return Vec::new();
        }
        self.namespace
            .registry
            .effective_range(self.id, self.namespace.settings.range_inheritance)
    }

    fn wrap(&self, ids: impl IntoIterator<Item = TypeId>) -> Vec<TypeRef<'a>> {
        let namespace = self.namespace;
        ids.into_iter().map(|id| namespace.type_ref(id)).collect()
    }
}
