use serde::Serialize;

use crate::{Error, Result};

use super::statement::TypeKind;
use super::value_objects::{Iri, LangString};

/// Handle of a type inside the registry that created it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TypeId(usize);

impl TypeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the type in creation order.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One acceptable kind of value for a property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum RangeEntry {
    /// Instances of this class or any of its descendants.
    Class(TypeId),
    /// Language-tagged literals.
    Literal,
}

/// Domain and range carried by property types.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PropertyConstraints {
    domain: Vec<TypeId>,
    range: Vec<RangeEntry>,
}

impl PropertyConstraints {
    /// Classes whose instances may carry the property.
    #[must_use]
    pub fn domain(&self) -> &[TypeId] {
        &self.domain
    }

    /// Kinds of values the property accepts.
    #[must_use]
    pub fn range(&self) -> &[RangeEntry] {
        &self.range
    }
}

/// A named node of the type hierarchy.
///
/// Class and property types share labels, comments and parents; property
/// types additionally carry [`PropertyConstraints`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TypeDefinition {
    id: TypeId,
    name: String,
    uri: Iri,
    kind: TypeKind,
    parents: Vec<TypeId>,
    labels: Vec<LangString>,
    comments: Vec<LangString>,
    declared_properties: Vec<TypeId>,
    constraints: Option<PropertyConstraints>,
    datatype: bool,
}

impl TypeDefinition {
    /// Creates a type with empty annotations.
    #[must_use]
    pub fn new(id: TypeId, name: String, uri: Iri, kind: TypeKind, parents: Vec<TypeId>) -> Self {
        let constraints = match kind {
            TypeKind::Class => None,
            TypeKind::Property => Some(PropertyConstraints::default()),
        };
        Self {
            id,
            name,
            uri,
            kind,
            parents,
            labels: Vec::new(),
            comments: Vec::new(),
            declared_properties: Vec::new(),
            constraints,
            datatype: false,
        }
    }

    /// Appends a label. Several labels per language are kept.
    pub fn add_label(&mut self, label: LangString) {
        self.labels.push(label);
    }

    /// Appends a comment. Several comments per language are kept.
    pub fn add_comment(&mut self, comment: LangString) {
        self.comments.push(comment);
    }

    /// Marks the type as a datatype: as a range it admits literals.
    pub fn mark_datatype(&mut self) {
        self.datatype = true;
    }

    /// Records a property whose domain names this type.
    pub fn add_declared_property(&mut self, property: TypeId) -> bool {
        if self.declared_properties.contains(&property) {
            return false;
        }
        self.declared_properties.push(property);
        true
    }

    /// Declares that instances of `class` may carry this property.
    pub fn add_domain(&mut self, class: TypeId) -> Result<bool> {
        let constraints = self.constraints_mut()?;
        if constraints.domain.contains(&class) {
            return Ok(false);
        }
        constraints.domain.push(class);
        Ok(true)
    }

    /// Declares a kind of value this property accepts.
    pub fn add_range(&mut self, entry: RangeEntry) -> Result<bool> {
        let constraints = self.constraints_mut()?;
        if constraints.range.contains(&entry) {
            return Ok(false);
        }
        constraints.range.push(entry);
        Ok(true)
    }

    fn constraints_mut(&mut self) -> Result<&mut PropertyConstraints> {
        let name = &self.name;
        self.constraints.as_mut().ok_or_else(|| Error::NotAProperty {
            name: name.clone(),
        })
    }

    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn uri(&self) -> &Iri {
        &self.uri
    }

    #[must_use]
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Direct super-types in assertion order. Empty for root types.
    #[must_use]
    pub fn parents(&self) -> &[TypeId] {
        &self.parents
    }

    #[must_use]
    pub fn labels(&self) -> &[LangString] {
        &self.labels
    }

    #[must_use]
    pub fn comments(&self) -> &[LangString] {
        &self.comments
    }

    /// Properties whose own domain names this type.
    #[must_use]
    pub fn declared_properties(&self) -> &[TypeId] {
        &self.declared_properties
    }

    #[must_use]
    pub fn is_datatype(&self) -> bool {
        self.datatype
    }

    /// Domain and range, for property types.
    #[must_use]
    pub fn constraints(&self) -> Option<&PropertyConstraints> {
        self.constraints.as_ref()
    }

    /// Returns the first label tagged with `language`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLabelForLanguage`] when no label carries the tag.
    pub fn label(&self, language: &str) -> Result<&str> {
        first_in_language(&self.labels, language)
    }

    /// Returns the first comment tagged with `language`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLabelForLanguage`] when no comment carries the tag.
    pub fn comment(&self, language: &str) -> Result<&str> {
        first_in_language(&self.comments, language)
    }
}

fn first_in_language<'a>(values: &'a [LangString], language: &str) -> Result<&'a str> {
    values
        .iter()
        .find(|literal| literal.is_language(language))
        .map(LangString::value)
        .ok_or_else(|| Error::no_label(language))
}
