//! Per-instance property value containers.
//!
//! Every property an [`Instance`](super::instance::Instance) carries is backed
//! by a [`PropertyProxy`]. Assigning through a proxy validates the value
//! against the property's range; an accepted value is appended and never
//! removed, a rejected one leaves the proxy untouched.

use std::sync::Arc;

use crate::{Error, Result};

use super::entities::{RangeEntry, TypeId};
use super::instance::InstanceRef;
use super::namespace::{Namespace, TypeRef};
use super::value_objects::LangString;

/// A value assigned to, or stored in, a property.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyValue {
    /// Untagged text, stored under the namespace's default language.
    Text(String),
    Literal(LangString),
    Instance(InstanceRef),
}

impl PropertyValue {
    #[must_use]
    pub fn as_literal(&self) -> Option<&LangString> {
        match self {
            Self::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_instance(&self) -> Option<&InstanceRef> {
        match self {
            Self::Instance(instance) => Some(instance),
            _ => None,
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Text(_) | Self::Literal(_) => "literal".to_string(),
            Self::Instance(instance) => instance.type_name().to_string(),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<LangString> for PropertyValue {
    fn from(value: LangString) -> Self {
        Self::Literal(value)
    }
}

impl From<InstanceRef> for PropertyValue {
    fn from(value: InstanceRef) -> Self {
        Self::Instance(value)
    }
}

/// What a proxy accepts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueConstraint {
    /// Literals only; untagged text is tagged with the default language.
    Literal,
    /// Anything.
    Unconstrained,
    /// Instances of one of `classes` or of their descendants, plus literals
    /// when `literal` is set.
    Range { classes: Vec<TypeId>, literal: bool },
}

impl ValueConstraint {
    fn from_range(range: &[RangeEntry]) -> Self {
        if range.is_empty() {
            return Self::Unconstrained;
        }
        let mut classes = Vec::new();
        let mut literal = false;
        for entry in range {
            match entry {
                RangeEntry::Class(id) => classes.push(*id),
                RangeEntry::Literal => literal = true,
            }
        }
        if classes.is_empty() {
            Self::Literal
        } else {
            Self::Range { classes, literal }
        }
    }
}

/// Values of one property on one instance.
#[derive(Clone)]
pub struct PropertyProxy {
    name: String,
    property: Option<TypeId>,
    constraint: ValueConstraint,
    values: Vec<PropertyValue>,
    namespace: Arc<Namespace>,
}

impl std::fmt::Debug for PropertyProxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyProxy")
            .field("name", &self.name)
            .field("constraint", &self.constraint)
            .field("values", &self.values)
            .finish_non_exhaustive()
    }
}

impl PropertyProxy {
    /// A built-in literal property such as `label` or `comment`.
    pub(crate) fn literal(name: &str, namespace: &Arc<Namespace>) -> Self {
        Self::with_constraint(name, None, ValueConstraint::Literal, namespace)
    }

    /// A built-in relational property such as `seeAlso`.
    pub(crate) fn unconstrained(name: &str, namespace: &Arc<Namespace>) -> Self {
        Self::with_constraint(name, None, ValueConstraint::Unconstrained, namespace)
    }

    /// A proxy for a property type of `namespace`, constrained by its
    /// effective range.
    pub(crate) fn for_property(property: TypeId, namespace: &Arc<Namespace>) -> Self {
        let definition = namespace.type_ref(property);
        let constraint = ValueConstraint::from_range(&definition.range());
        Self::with_constraint(definition.name(), Some(property), constraint, namespace)
    }

    /// A proxy for `property` whose range is replaced by `range`.
    pub(crate) fn with_range(
        property: TypeId,
        range: &[RangeEntry],
        namespace: &Arc<Namespace>,
    ) -> Self {
        let name = namespace.type_ref(property).name();
        Self::with_constraint(
            name,
            Some(property),
            ValueConstraint::from_range(range),
            namespace,
        )
    }

    fn with_constraint(
        name: &str,
        property: Option<TypeId>,
        constraint: ValueConstraint,
        namespace: &Arc<Namespace>,
    ) -> Self {
        Self {
            name: name.to_string(),
            property,
            constraint,
            values: Vec::new(),
            namespace: Arc::clone(namespace),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The property type behind the proxy; `None` for built-ins.
    #[must_use]
    pub fn property(&self) -> Option<TypeRef<'_>> {
        self.property.map(|id| self.namespace.type_ref(id))
    }

    #[must_use]
    pub fn constraint(&self) -> &ValueConstraint {
        &self.constraint
    }

    #[must_use]
    pub fn is_literal(&self) -> bool {
        self.constraint == ValueConstraint::Literal
    }

    /// Accepted values in insertion order. Untagged text appears as a
    /// literal in the default language.
    #[must_use]
    pub fn values(&self) -> &[PropertyValue] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns `true` when `value` satisfies the proxy's constraint.
    #[must_use]
    pub fn is_valid(&self, value: &PropertyValue) -> bool {
        match (&self.constraint, value) {
            (ValueConstraint::Unconstrained, _) => true,
            (ValueConstraint::Literal, PropertyValue::Instance(_)) => false,
            (ValueConstraint::Literal, _) => true,
            (
                ValueConstraint::Range { literal, .. },
                PropertyValue::Text(_) | PropertyValue::Literal(_),
            ) => *literal,
            (ValueConstraint::Range { classes, .. }, PropertyValue::Instance(instance)) => {
                instance.belongs_to(&self.namespace)
                    && classes.iter().any(|class| {
                        self.namespace
                            .registry()
                            .is_subtype_of(instance.type_id(), *class)
                    })
            }
        }
    }

    /// Validates and appends `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPropertyAssignment`] when the value is outside
    /// the range; the stored values are left unchanged.
    pub fn assign(&mut self, value: impl Into<PropertyValue>) -> Result<()> {
        let value = value.into();
        if !self.is_valid(&value) {
            return Err(Error::InvalidPropertyAssignment {
                property: self.name.clone(),
                expected: self.expected(),
                actual: value.describe(),
            });
        }
        let value = match value {
            PropertyValue::Text(text) => {
                PropertyValue::Literal(LangString::new(text, self.namespace.default_language()))
            }
            other => other,
        };
        self.values.push(value);
        Ok(())
    }

    /// Text values tagged with `language`, in insertion order. Empty when
    /// none carries the tag.
    #[must_use]
    pub fn texts(&self, language: &str) -> Vec<&str> {
        self.values
            .iter()
            .filter_map(PropertyValue::as_literal)
            .filter(|literal| literal.is_language(language))
            .map(LangString::value)
            .collect()
    }

    /// Returns `true` when `instance` is among the accepted values.
    #[must_use]
    pub fn contains(&self, instance: &InstanceRef) -> bool {
        self.values
            .iter()
            .filter_map(PropertyValue::as_instance)
            .any(|candidate| candidate == instance)
    }

    fn expected(&self) -> String {
        match &self.constraint {
            ValueConstraint::Literal => "literal".to_string(),
            ValueConstraint::Unconstrained => "any value".to_string(),
            ValueConstraint::Range { classes, literal } => {
                let mut accepted: Vec<&str> = classes
                    .iter()
                    .map(|class| self.namespace.type_ref(*class).name())
                    .collect();
                if *literal {
                    accepted.push("literal");
                }
                format!("one of [{}]", accepted.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PropertyValue, ValueConstraint};
    use crate::ontology::entities::RangeEntry;
    use crate::ontology::instance::InstanceInit;
    use crate::ontology::session::SessionStack;
    use crate::ontology::value_objects::LangString;
    use crate::tests_cfg::fixtures;
    use crate::Error;

    #[test]
    fn range_constraint_from_entries() {
        assert_eq!(ValueConstraint::from_range(&[]), ValueConstraint::Unconstrained);
        assert_eq!(
            ValueConstraint::from_range(&[RangeEntry::Literal]),
            ValueConstraint::Literal
        );
    }

    #[test]
    fn untagged_text_takes_the_default_language() {
        let mut sessions = SessionStack::new();
        let namespace = fixtures::organization_namespace(&mut sessions);
        let mut acme = namespace
            .instantiate("Corporation", &mut sessions, InstanceInit::new())
            .expect("corporation instance");

        let label = acme.property_mut("label").expect("built-in label");
        label.assign("Acme Inc.").expect("text is a literal");
        label
            .assign(LangString::new("Acme S.A.", "ES"))
            .expect("tagged literal");

        assert_eq!(
            label.values(),
            &[
                PropertyValue::Literal(LangString::new("Acme Inc.", "en")),
                PropertyValue::Literal(LangString::new("Acme S.A.", "es")),
            ]
        );
        assert_eq!(label.texts("es"), vec!["Acme S.A."]);
        assert!(label.texts("foo").is_empty());
    }

    #[test]
    fn literal_is_rejected_by_a_class_range() {
        let mut sessions = SessionStack::new();
        let namespace = fixtures::organization_namespace(&mut sessions);
        let mut acme = namespace
            .instantiate("Corporation", &mut sessions, InstanceInit::new())
            .expect("corporation instance");

        let employees = acme.property_mut("hasEmployee").expect("declared property");
        let err = employees.assign("Jane").expect_err("range is Person");

        assert_eq!(
            err.to_string(),
            "invalid assignment to `hasEmployee`: expected one of [Person], got literal"
        );
        assert!(employees.is_empty());
    }

    #[test]
    fn instance_is_rejected_outside_the_range() {
        let mut sessions = SessionStack::new();
        let namespace = fixtures::organization_namespace(&mut sessions);
        let country = namespace
            .instantiate("Country", &mut sessions, InstanceInit::new())
            .expect("country instance");
        let jane = namespace
            .instantiate("Person", &mut sessions, InstanceInit::new())
            .expect("person instance");
        let mut acme = namespace
            .instantiate("Corporation", &mut sessions, InstanceInit::new())
            .expect("corporation instance");

        let employees = acme.property_mut("hasEmployee").expect("declared property");
        assert!(matches!(
            employees.assign(&country),
            Err(Error::InvalidPropertyAssignment { actual, .. }) if actual == "Country"
        ));
        employees.assign(&jane).expect("person is in range");

        assert_eq!(employees.len(), 1);
        assert!(employees.contains(&jane.reference()));
        assert!(!employees.contains(&country.reference()));
    }

    #[test]
    fn instance_from_another_namespace_is_rejected() {
        let mut sessions = SessionStack::new();
        let namespace = fixtures::organization_namespace(&mut sessions);
        let other = fixtures::organization_namespace(&mut sessions);
        let stranger = other
            .instantiate("Person", &mut sessions, InstanceInit::new())
            .expect("person instance");
        let mut acme = namespace
            .instantiate("Corporation", &mut sessions, InstanceInit::new())
            .expect("corporation instance");

        assert!(acme.assign("hasEmployee", &stranger).is_err());
    }

    #[test]
    fn unconstrained_built_ins_accept_anything() {
        let mut sessions = SessionStack::new();
        let namespace = fixtures::organization_namespace(&mut sessions);
        let country = namespace
            .instantiate("Country", &mut sessions, InstanceInit::new())
            .expect("country instance");
        let mut acme = namespace
            .instantiate("Corporation", &mut sessions, InstanceInit::new())
            .expect("corporation instance");

        let see_also = acme.property_mut("seeAlso").expect("built-in seeAlso");
        see_also.assign("https://acme.example").expect("text");
        see_also.assign(&country).expect("instance");

        assert_eq!(see_also.constraint(), &ValueConstraint::Unconstrained);
        assert!(see_also.property().is_none());
        assert_eq!(see_also.len(), 2);
    }
}
