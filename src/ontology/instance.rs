//! Runtime values of the types of a [`Namespace`].

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;

use crate::{Error, Result};

use super::entities::{RangeEntry, TypeId};
use super::namespace::{Namespace, TypeRef};
use super::proxy::{PropertyProxy, PropertyValue};
use super::session::SessionStack;
use super::statement::TypeKind;

static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

const LITERAL_BUILTINS: [&str; 2] = ["label", "comment"];
const RELATIONAL_BUILTINS: [&str; 3] = ["seeAlso", "isDefinedBy", "value"];
const LITERAL_RANGE_NAME: &str = "Literal";

/// Process-unique identity of an instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct InstanceId(u64);

impl InstanceId {
    fn next() -> Self {
        Self(NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Non-owning handle to an instance, used as a property value and as a
/// session record.
#[derive(Clone)]
pub struct InstanceRef {
    id: InstanceId,
    type_id: TypeId,
    namespace: Arc<Namespace>,
}

impl InstanceRef {
    #[must_use]
    pub fn id(&self) -> InstanceId {
        self.id
    }

    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[must_use]
    pub fn type_ref(&self) -> TypeRef<'_> {
        self.namespace.type_ref(self.type_id)
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        self.type_ref().name()
    }

    pub(crate) fn belongs_to(&self, namespace: &Arc<Namespace>) -> bool {
        Arc::ptr_eq(&self.namespace, namespace)
    }
}

impl PartialEq for InstanceRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for InstanceRef {}

impl std::fmt::Debug for InstanceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstanceRef")
            .field("id", &self.id)
            .field("type", &self.type_name())
            .finish()
    }
}

/// Initial property values for a new instance.
#[derive(Clone, Debug, Default)]
pub struct InstanceInit {
    values: Vec<(String, PropertyValue)>,
    domain: Option<Vec<String>>,
    range: Option<Vec<String>>,
}

impl InstanceInit {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an initial value for the property `name`. Values are assigned in
    /// the order they were added.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.values.push((name.into(), value.into()));
        self
    }

    /// Overrides the domain of a property instance with the named classes.
    #[must_use]
    pub fn with_domain<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domain = Some(classes.into_iter().map(Into::into).collect());
        self
    }

    /// Overrides the range of a property instance with the named classes;
    /// `Literal` names the literal kind.
    #[must_use]
    pub fn with_range<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.range = Some(classes.into_iter().map(Into::into).collect());
        self
    }
}

/// A runtime value of some type, owning one [`PropertyProxy`] per property.
///
/// Each instance has its own [`InstanceId`]; new instances only come from
/// [`Namespace::instantiate`], which records them in the current session.
pub struct Instance {
    id: InstanceId,
    type_id: TypeId,
    namespace: Arc<Namespace>,
    properties: BTreeMap<String, PropertyProxy>,
    domain: Option<Vec<TypeId>>,
    range: Option<Vec<RangeEntry>>,
}

impl std::fmt::Debug for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Instance")
            .field("id", &self.id)
            .field("type", &self.type_ref().name())
            .field("properties", &self.properties)
            .finish_non_exhaustive()
    }
}

impl Instance {
    /// Binds a proxy for every built-in and applicable property, assigns the
    /// initial values, and records the instance in the current session.
    ///
    /// Nothing is recorded when any step fails.
    pub(crate) fn construct(
        namespace: &Arc<Namespace>,
        type_id: TypeId,
        sessions: &mut SessionStack,
        init: InstanceInit,
    ) -> Result<Self> {
        let type_ref = namespace.type_ref(type_id);
        let type_name = type_ref.name();

        let mut properties = BTreeMap::new();
        for name in LITERAL_BUILTINS {
            properties.insert(name.to_string(), PropertyProxy::literal(name, namespace));
        }
        for name in RELATIONAL_BUILTINS {
            properties.insert(name.to_string(), PropertyProxy::unconstrained(name, namespace));
        }
        for property in type_ref.properties() {
            properties.insert(
                property.name().to_string(),
                PropertyProxy::for_property(property.id(), namespace),
            );
        }

        let InstanceInit {
            values,
            domain,
            range,
        } = init;

        if (domain.is_some() || range.is_some()) && type_ref.kind() != TypeKind::Property {
            return Err(Error::UnknownProperty {
                type_name: type_name.to_string(),
                property: String::from(if domain.is_some() { "domain" } else { "range" }),
            });
        }
        let domain = domain
            .map(|names| {
                names
                    .iter()
                    .map(|name| namespace.type_named(name).map(|class| class.id()))
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?;
        let range = range
            .map(|names| {
                names
                    .iter()
                    .map(|name| range_entry(namespace, name))
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?;

        for (name, value) in values {
            let proxy = properties
                .get_mut(&name)
                .ok_or_else(|| Error::UnknownProperty {
                    type_name: type_name.to_string(),
                    property: name.clone(),
                })?;
            proxy.assign(value)?;
        }

        let instance = Self {
            id: InstanceId::next(),
            type_id,
            namespace: Arc::clone(namespace),
            properties,
            domain,
            range,
        };
        sessions.current_mut().register_instance(instance.reference());
        tracing::trace!(id = instance.id.get(), type_name, "instance_created");
        Ok(instance)
    }

    #[must_use]
    pub fn id(&self) -> InstanceId {
        self.id
    }

    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[must_use]
    pub fn type_ref(&self) -> TypeRef<'_> {
        self.namespace.type_ref(self.type_id)
    }

    #[must_use]
    pub fn namespace(&self) -> &Arc<Namespace> {
        &self.namespace
    }

    /// A handle to this instance, for use as a property value.
    #[must_use]
    pub fn reference(&self) -> InstanceRef {
        InstanceRef {
            id: self.id,
            type_id: self.type_id,
            namespace: Arc::clone(&self.namespace),
        }
    }

    /// Returns `true` when the instance's type is `class` or descends from it.
    #[must_use]
    pub fn is_instance_of(&self, class: &TypeRef<'_>) -> bool {
        self.type_ref().is_subtype_of(class)
    }

    /// # Errors
    ///
    /// Returns [`Error::UnknownProperty`] when the instance has no property
    /// `name`.
    pub fn property(&self, name: &str) -> Result<&PropertyProxy> {
        self.properties
            .get(name)
            .ok_or_else(|| self.unknown_property(name))
    }

    /// # Errors
    ///
    /// Returns [`Error::UnknownProperty`] when the instance has no property
    /// `name`.
    pub fn property_mut(&mut self, name: &str) -> Result<&mut PropertyProxy> {
        let namespace = &self.namespace;
        let type_id = self.type_id;
        self.properties
            .get_mut(name)
            .ok_or_else(|| Error::UnknownProperty {
                type_name: namespace.type_ref(type_id).name().to_string(),
                property: name.to_string(),
            })
    }

    /// Proxies of every bound property, ordered by name.
    pub fn properties(&self) -> impl Iterator<Item = &PropertyProxy> {
        self.properties.values()
    }

    /// Validates and appends `value` to the property `name`.
    ///
    /// # Errors
    ///
    /// * [`Error::UnknownProperty`] when the instance has no property `name`.
    /// * [`Error::InvalidPropertyAssignment`] when the value is outside the
    ///   property's range.
    pub fn assign(&mut self, name: &str, value: impl Into<PropertyValue>) -> Result<()> {
        self.property_mut(name)?.assign(value)
    }

    /// First label in `language`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLabelForLanguage`] when no label carries the tag.
    pub fn label(&self, language: &str) -> Result<&str> {
        self.first_text("label", language)
    }

    /// First comment in `language`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLabelForLanguage`] when no comment carries the tag.
    pub fn comment(&self, language: &str) -> Result<&str> {
        self.first_text("comment", language)
    }

    /// Domain given at construction, for property instances.
    #[must_use]
    pub fn domain(&self) -> Option<&[TypeId]> {
        self.domain.as_deref()
    }

    /// Range given at construction, for property instances.
    #[must_use]
    pub fn range(&self) -> Option<&[RangeEntry]> {
        self.range.as_deref()
    }

    /// A proxy for `property` constrained by this property instance's range
    /// override, or by the property type's own range when there is none.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAProperty`] when the instance is not of a property
    /// type.
    pub fn bind(&self) -> Result<PropertyProxy> {
        if self.type_ref().kind() != TypeKind::Property {
            return Err(Error::NotAProperty {
                name: self.type_ref().name().to_string(),
            });
        }
        Ok(match &self.range {
            Some(range) => PropertyProxy::with_range(self.type_id, range, &self.namespace),
            None => PropertyProxy::for_property(self.type_id, &self.namespace),
        })
    }

    fn first_text(&self, property: &str, language: &str) -> Result<&str> {
        self.property(property)?
            .texts(language)
            .first()
            .copied()
            .ok_or_else(|| Error::no_label(language))
    }

    fn unknown_property(&self, name: &str) -> Error {
        Error::UnknownProperty {
            type_name: self.type_ref().name().to_string(),
            property: name.to_string(),
        }
    }
}

impl From<&Instance> for PropertyValue {
    fn from(instance: &Instance) -> Self {
        Self::Instance(instance.reference())
    }
}

fn range_entry(namespace: &Namespace, name: &str) -> Result<RangeEntry> {
    match namespace.get(name) {
        Some(class) => Ok(RangeEntry::Class(class.id())),
        None if name == LITERAL_RANGE_NAME => Ok(RangeEntry::Literal),
        None => Err(Error::unknown_type(name)),
    }
}
