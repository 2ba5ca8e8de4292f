//! Attributes and the attribute builder
//!
//! An `Attribute` is immutable once built: a description plus a value
//! collection in which no two values are equal under the type's matching
//! rule. `AttributeBuilder` is the single-writer accumulator that enforces
//! that invariant; finalizing consumes the builder, so a finalized attribute
//! can never be affected by further mutation.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::trace;

use crate::description::AttributeDescription;
use crate::error::Result;
use crate::schema::{AttributeType, Schema};
use crate::value::AttributeValue;

/// An immutable directory-entry attribute.
///
/// Values are iterated in insertion order, but ordering is not significant
/// for equality: two attributes with the same description and the same value
/// set compare equal regardless of order. An attribute may hold zero values,
/// which is distinct from the attribute being absent from an entry.
#[derive(Debug, Clone, Serialize)]
pub struct Attribute {
    description: AttributeDescription,
    values: Vec<AttributeValue>,
}

impl Attribute {
    /// The description (type, name, options) of this attribute
    pub fn description(&self) -> &AttributeDescription {
        &self.description
    }

    /// The attribute type of this attribute
    pub fn attribute_type(&self) -> &Arc<AttributeType> {
        self.description.attribute_type()
    }

    /// The user-supplied display name
    pub fn name(&self) -> &str {
        self.description.name()
    }

    /// The values, in insertion order
    pub fn values(&self) -> &[AttributeValue] {
        &self.values
    }

    /// Iterate the values in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, AttributeValue> {
        self.values.iter()
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether this attribute holds no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether a value equal to `value` under the type's matching rule is
    /// present
    pub fn contains(&self, value: &AttributeValue) -> bool {
        let attribute_type = self.attribute_type();
        self.values.iter().any(|v| attribute_type.equal_values(v, value))
    }
}

impl PartialEq for Attribute {
    fn eq(&self, other: &Self) -> bool {
        // Both sides are deduplicated, so equal length plus one-way
        // containment is set equality.
        self.description == other.description
            && self.values.len() == other.values.len()
            && self.values.iter().all(|v| other.contains(v))
    }
}

impl Eq for Attribute {}

impl<'a> IntoIterator for &'a Attribute {
    type Item = &'a AttributeValue;
    type IntoIter = std::slice::Iter<'a, AttributeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {{", self.description)?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", value)?;
        }
        f.write_str("}")
    }
}

// Deserialization goes back through a builder so the deduplication invariant
// is re-imposed on whatever the input contained.
impl<'de> Deserialize<'de> for Attribute {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Repr {
            description: AttributeDescription,
            values: Vec<AttributeValue>,
        }

        let repr = Repr::deserialize(deserializer)?;
        let mut builder = AttributeBuilder::from_description(repr.description);
        builder.add_all(repr.values);
        Ok(builder.into_attribute())
    }
}

/// Mutable, single-writer accumulator for constructing an [`Attribute`].
///
/// Lifecycle: create fresh (or seeded from an existing attribute), mutate
/// through `add`/`remove` any number of times, then finalize once with
/// [`AttributeBuilder::into_attribute`], which consumes the builder.
#[derive(Debug, Clone)]
pub struct AttributeBuilder {
    description: AttributeDescription,
    values: Vec<AttributeValue>,
}

impl AttributeBuilder {
    /// Builder for an attribute of the given type and display name
    pub fn new(attribute_type: Arc<AttributeType>, name: impl Into<String>) -> Self {
        Self::from_description(AttributeDescription::new(attribute_type, name))
    }

    /// Builder carrying an existing description (type, name, options)
    pub fn from_description(description: AttributeDescription) -> Self {
        Self {
            description,
            values: Vec::new(),
        }
    }

    /// Builder seeded with an attribute's description and values, used to
    /// accumulate on top of an existing attribute
    pub fn from_attribute(attribute: &Attribute) -> Self {
        Self {
            description: attribute.description.clone(),
            values: attribute.values.clone(),
        }
    }

    /// Builder from a `name;option;option` description string, resolving the
    /// name through the schema
    pub fn parse(description: &str, schema: &Schema) -> Result<Self> {
        Ok(Self::from_description(AttributeDescription::parse(
            description,
            schema,
        )?))
    }

    /// Build an attribute from a raw value collection, deduplicating under
    /// the type's matching rule as it goes. The first occurrence of each
    /// value wins; later duplicates are silently dropped.
    pub fn create<I, V>(attribute_type: Arc<AttributeType>, name: impl Into<String>, values: I) -> Attribute
    where
        I: IntoIterator<Item = V>,
        V: Into<AttributeValue>,
    {
        let mut builder = Self::new(attribute_type, name);
        builder.add_all(values);
        builder.into_attribute()
    }

    /// The description being accumulated under
    pub fn description(&self) -> &AttributeDescription {
        &self.description
    }

    /// Add a value unless one equal to it under the matching rule is already
    /// present. Returns whether the value was inserted; on a duplicate the
    /// stored value is left untouched and keeps its position.
    pub fn add(&mut self, value: impl Into<AttributeValue>) -> bool {
        let value = value.into();
        if self.contains(&value) {
            trace!(attribute = %self.description, value = %value, "dropping duplicate value");
            return false;
        }
        self.values.push(value);
        true
    }

    /// Add every value in the collection; returns how many were inserted
    pub fn add_all<I, V>(&mut self, values: I) -> usize
    where
        I: IntoIterator<Item = V>,
        V: Into<AttributeValue>,
    {
        let mut added = 0;
        for value in values {
            if self.add(value) {
                added += 1;
            }
        }
        added
    }

    /// Remove the value equal to `value` under the matching rule, if any.
    /// Returns whether a value was removed.
    pub fn remove(&mut self, value: &AttributeValue) -> bool {
        let attribute_type = self.description.attribute_type();
        match self.values.iter().position(|v| attribute_type.equal_values(v, value)) {
            Some(index) => {
                self.values.remove(index);
                true
            }
            None => false,
        }
    }

    /// Whether a value equal to `value` under the matching rule is present
    pub fn contains(&self, value: &AttributeValue) -> bool {
        let attribute_type = self.description.attribute_type();
        self.values.iter().any(|v| attribute_type.equal_values(v, value))
    }

    /// Attach an option (e.g., a language tag) to the description; returns
    /// whether the option was not already present
    pub fn add_option(&mut self, option: impl Into<String>) -> bool {
        self.description.add_option(option)
    }

    /// Builder-style variant of [`AttributeBuilder::add_option`]
    pub fn with_option(mut self, option: impl Into<String>) -> Self {
        self.description.add_option(option);
        self
    }

    /// Number of accumulated values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no values have been accumulated
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Finalize into an immutable [`Attribute`], consuming the builder
    pub fn into_attribute(self) -> Attribute {
        Attribute {
            description: self.description,
            values: self.values,
        }
    }
}
