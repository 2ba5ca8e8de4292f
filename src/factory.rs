//! Attribute factory and set algebra
//!
//! Stateless construction helpers layered on [`AttributeBuilder`]: empty,
//! single-valued, and multi-valued attribute factories, plus `merge` and
//! `subtract` over finished attributes. The name-based factories resolve
//! through an explicit [`Schema`] and never fail; an unrecognized name gets a
//! synthesized placeholder type.
//!
//! For performance-critical incremental construction use an
//! [`AttributeBuilder`] directly; the multi-valued factories here are
//! conveniences for call sites that already hold a value collection.

use std::sync::Arc;

use crate::attribute::{Attribute, AttributeBuilder};
use crate::schema::{AttributeType, Schema};
use crate::value::AttributeValue;

/// Create an attribute with the given type, display name, and values.
///
/// Values equal under the type's matching rule collapse to the first
/// occurrence. An empty value collection yields the same result as
/// [`empty`].
pub fn create<I, V>(attribute_type: Arc<AttributeType>, name: impl Into<String>, values: I) -> Attribute
where
    I: IntoIterator<Item = V>,
    V: Into<AttributeValue>,
{
    AttributeBuilder::create(attribute_type, name, values)
}

/// Create a single-valued attribute named after its type
pub fn create_value(attribute_type: Arc<AttributeType>, value: impl Into<AttributeValue>) -> Attribute {
    let name = attribute_type.name_or_oid().to_string();
    create(attribute_type, name, [value])
}

/// Create an attribute by name, resolving the type through the schema.
///
/// Unknown names synthesize a placeholder type with the default syntax, so
/// this never fails on account of the name alone.
pub fn create_named<I, V>(schema: &Schema, attribute_name: &str, values: I) -> Attribute
where
    I: IntoIterator<Item = V>,
    V: Into<AttributeValue>,
{
    let attribute_type = schema.resolve_attribute_type(attribute_name);
    create(attribute_type, attribute_name, values)
}

/// Create a single-valued attribute by name
pub fn create_named_value(
    schema: &Schema,
    attribute_name: &str,
    value: impl Into<AttributeValue>,
) -> Attribute {
    create_named(schema, attribute_name, [value])
}

/// Create an attribute with the given type and name and no values
pub fn empty(attribute_type: Arc<AttributeType>, name: impl Into<String>) -> Attribute {
    AttributeBuilder::new(attribute_type, name).into_attribute()
}

/// Create an attribute named after its type with no values
pub fn empty_typed(attribute_type: Arc<AttributeType>) -> Attribute {
    let name = attribute_type.name_or_oid().to_string();
    empty(attribute_type, name)
}

/// Create an empty attribute by name, resolving through the schema
pub fn empty_named(schema: &Schema, attribute_name: &str) -> Attribute {
    let attribute_type = schema.resolve_attribute_type(attribute_name);
    empty(attribute_type, attribute_name)
}

/// Create an attribute with the same description (type, name, options) as
/// `attribute` but no values.
///
/// This represents "the attribute exists with no values", which is distinct
/// from the attribute being absent.
pub fn empty_like(attribute: &Attribute) -> Attribute {
    AttributeBuilder::from_description(attribute.description().clone()).into_attribute()
}

/// Merge the values of two attributes.
///
/// Equivalent to [`merge_with_duplicates`] with the duplicates discarded.
pub fn merge(a1: &Attribute, a2: &Attribute) -> Attribute {
    let mut duplicates = Vec::new();
    merge_with_duplicates(a1, a2, &mut duplicates)
}

/// Merge the values of two attributes, collecting duplicates.
///
/// The result carries `a1`'s description verbatim and contains every value
/// of `a1` in original order, followed by each value of `a2` not already
/// present under the matching rule, in `a2`'s order. Every value of `a2`
/// rejected as a duplicate is pushed onto `duplicates`.
pub fn merge_with_duplicates(
    a1: &Attribute,
    a2: &Attribute,
    duplicates: &mut Vec<AttributeValue>,
) -> Attribute {
    let mut builder = AttributeBuilder::from_attribute(a1);
    for value in a2 {
        if !builder.add(value.clone()) {
            duplicates.push(value.clone());
        }
    }
    builder.into_attribute()
}

/// Subtract the values of `a2` from `a1`.
///
/// Equivalent to [`subtract_with_missing`] with the missing values discarded.
pub fn subtract(a1: &Attribute, a2: &Attribute) -> Attribute {
    let mut missing = Vec::new();
    subtract_with_missing(a1, a2, &mut missing)
}

/// Subtract the values of `a2` from `a1`, collecting missing values.
///
/// The result carries `a1`'s description verbatim and contains the values of
/// `a1` with no counterpart in `a2` under the matching rule, in `a1`'s
/// order. Every value of `a2` that removed nothing (present in `a2` but
/// absent from `a1`) is pushed onto `missing`.
pub fn subtract_with_missing(
    a1: &Attribute,
    a2: &Attribute,
    missing: &mut Vec<AttributeValue>,
) -> Attribute {
    let mut builder = AttributeBuilder::from_attribute(a1);
    for value in a2 {
        if !builder.remove(value) {
            missing.push(value.clone());
        }
    }
    builder.into_attribute()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Schema {
        Schema::core()
    }

    #[test]
    fn test_create_with_no_values_equals_empty() {
        let s = schema();
        let cn = s.resolve_attribute_type("cn");
        let a = create(Arc::clone(&cn), "cn", Vec::<AttributeValue>::new());
        let b = empty(cn, "cn");
        assert_eq!(a, b);
        assert!(a.is_empty());
    }

    #[test]
    fn test_create_value_names_after_type() {
        let s = schema();
        let attr = create_value(s.resolve_attribute_type("CN"), "Bob");
        assert_eq!(attr.name(), "cn");
        assert_eq!(attr.len(), 1);
    }

    #[test]
    fn test_empty_typed_names_after_type() {
        let s = schema();
        let attr = empty_typed(s.resolve_attribute_type("commonName"));
        assert!(attr.is_empty());
        assert_eq!(attr.name(), "cn");
    }

    #[test]
    fn test_create_named_unknown_name_succeeds() {
        let s = schema();
        let attr = create_named(&s, "xyz-custom", ["v1", "v2"]);
        assert_eq!(attr.len(), 2);
        assert!(attr.attribute_type().placeholder);
        assert_eq!(attr.name(), "xyz-custom");
    }

    #[test]
    fn test_empty_like_preserves_description() {
        let s = schema();
        let attr = AttributeBuilder::parse("cn;lang-en", &s)
            .unwrap()
            .with_option("binary")
            .into_attribute();
        let emptied = empty_like(&attr);
        assert!(emptied.is_empty());
        assert_eq!(emptied.description(), attr.description());
        assert!(emptied.description().has_option("lang-en"));
        assert!(emptied.description().has_option("binary"));
    }

    #[test]
    fn test_merge_collects_duplicates() {
        let s = schema();
        let cn = s.resolve_attribute_type("cn");
        let a1 = create(Arc::clone(&cn), "cn", ["Bob", "Carol"]);
        let a2 = create(Arc::clone(&cn), "cn", ["BOB", "Dave"]);

        let mut duplicates = Vec::new();
        let merged = merge_with_duplicates(&a1, &a2, &mut duplicates);

        let values: Vec<_> = merged.iter().map(|v| v.as_str().unwrap()).collect();
        assert_eq!(values, ["Bob", "Carol", "Dave"]);
        assert_eq!(duplicates, [AttributeValue::from("BOB")]);
    }

    #[test]
    fn test_subtract_collects_missing() {
        let s = schema();
        let cn = s.resolve_attribute_type("cn");
        let a1 = create(Arc::clone(&cn), "cn", ["Bob", "Carol"]);
        let a2 = create(Arc::clone(&cn), "cn", ["BOB", "Dave"]);

        let mut missing = Vec::new();
        let result = subtract_with_missing(&a1, &a2, &mut missing);

        let values: Vec<_> = result.iter().map(|v| v.as_str().unwrap()).collect();
        assert_eq!(values, ["Carol"]);
        assert_eq!(missing, [AttributeValue::from("Dave")]);
    }

    #[test]
    fn test_merge_keeps_first_description() {
        let s = schema();
        let a1 = AttributeBuilder::parse("cn;lang-en", &s).unwrap().into_attribute();
        let a2 = create_named(&s, "cn", ["Bob"]);
        let merged = merge(&a1, &a2);
        assert_eq!(merged.description(), a1.description());
        assert!(merged.description().has_option("lang-en"));
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn test_subtract_keeps_first_description() {
        let s = schema();
        let mut b1 = AttributeBuilder::parse("cn;lang-en", &s).unwrap();
        b1.add("Bob");
        let a1 = b1.into_attribute();
        let a2 = create_named(&s, "cn", ["Bob"]);
        let result = subtract(&a1, &a2);
        assert_eq!(result.description(), a1.description());
        assert!(result.is_empty());
    }
}
