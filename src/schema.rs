//! Attribute types and the schema resolution shim
//!
//! The schema owns `AttributeType` instances for the life of the process;
//! attributes hold `Arc` references to them. Resolution never fails: a name
//! the schema does not know yields a synthesized placeholder type with the
//! default directory-string matching rule, so construction by name always
//! succeeds.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::matching::MatchingRule;
use crate::value::AttributeValue;

/// A schema attribute-type definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeType {
    /// Numeric OID (e.g., "2.5.4.3"), or a synthetic `<name>-oid` form for
    /// placeholder types
    pub oid: String,
    /// Names for this type, primary name first (e.g., ["cn", "commonName"])
    pub names: Vec<String>,
    /// Equality matching rule for values of this type
    pub matching_rule: MatchingRule,
    /// Whether this type was synthesized for a name unknown to the schema
    pub placeholder: bool,
}

impl AttributeType {
    /// Define a schema attribute type
    pub fn new(oid: impl Into<String>, names: Vec<String>, matching_rule: MatchingRule) -> Self {
        Self {
            oid: oid.into(),
            names,
            matching_rule,
            placeholder: false,
        }
    }

    /// Synthesize a placeholder type for a name the schema does not define.
    /// Placeholder types use the default directory-string matching rule.
    pub fn placeholder(name: &str) -> Self {
        Self {
            oid: format!("{}-oid", name.to_ascii_lowercase()),
            names: vec![name.to_string()],
            matching_rule: MatchingRule::CaseIgnore,
            placeholder: true,
        }
    }

    /// Primary name of this type, falling back to the OID for nameless types
    pub fn name_or_oid(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or(&self.oid)
    }

    /// Whether `name` is one of this type's names or its OID (case-insensitive)
    pub fn has_name(&self, name: &str) -> bool {
        self.oid.eq_ignore_ascii_case(name)
            || self.names.iter().any(|n| n.eq_ignore_ascii_case(name))
    }

    /// Whether two values are equal under this type's matching rule
    pub fn equal_values(&self, v1: &AttributeValue, v2: &AttributeValue) -> bool {
        self.matching_rule.values_match(v1, v2)
    }
}

// Types are identified by OID; names are aliases.
impl PartialEq for AttributeType {
    fn eq(&self, other: &Self) -> bool {
        self.oid == other.oid
    }
}

impl Eq for AttributeType {}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name_or_oid())
    }
}

/// A registry of attribute types keyed by name and OID. Lookup is
/// case-insensitive and total.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    types: HashMap<String, Arc<AttributeType>>,
}

impl Schema {
    /// An empty schema; every resolution synthesizes a placeholder
    pub fn new() -> Self {
        Self::default()
    }

    /// A schema pre-populated with the common user-application types
    pub fn core() -> Self {
        let mut schema = Self::new();
        schema.register(AttributeType::new(
            "2.5.4.3",
            vec!["cn".into(), "commonName".into()],
            MatchingRule::CaseIgnore,
        ));
        schema.register(AttributeType::new(
            "2.5.4.4",
            vec!["sn".into(), "surname".into()],
            MatchingRule::CaseIgnore,
        ));
        schema.register(AttributeType::new(
            "2.5.4.42",
            vec!["givenName".into()],
            MatchingRule::CaseIgnore,
        ));
        schema.register(AttributeType::new(
            "0.9.2342.19200300.100.1.1",
            vec!["uid".into()],
            MatchingRule::CaseIgnore,
        ));
        schema.register(AttributeType::new(
            "0.9.2342.19200300.100.1.3",
            vec!["mail".into()],
            MatchingRule::CaseIgnore,
        ));
        schema.register(AttributeType::new(
            "2.5.4.13",
            vec!["description".into()],
            MatchingRule::CaseIgnore,
        ));
        schema.register(AttributeType::new(
            "2.5.4.0",
            vec!["objectClass".into()],
            MatchingRule::CaseIgnore,
        ));
        schema.register(AttributeType::new(
            "2.5.4.20",
            vec!["telephoneNumber".into()],
            MatchingRule::Telephone,
        ));
        schema.register(AttributeType::new(
            "2.16.840.1.113730.3.1.3",
            vec!["employeeNumber".into()],
            MatchingRule::Numeric,
        ));
        schema.register(AttributeType::new(
            "2.5.4.35",
            vec!["userPassword".into()],
            MatchingRule::OctetString,
        ));
        schema
    }

    /// Register a type under all of its names and its OID
    pub fn register(&mut self, attribute_type: AttributeType) -> Arc<AttributeType> {
        let shared = Arc::new(attribute_type);
        self.types
            .insert(shared.oid.to_ascii_lowercase(), Arc::clone(&shared));
        for name in &shared.names {
            self.types
                .insert(name.to_ascii_lowercase(), Arc::clone(&shared));
        }
        debug!(oid = %shared.oid, name = %shared.name_or_oid(), "registered attribute type");
        shared
    }

    /// Look up a type by name or OID, if defined
    pub fn get_attribute_type(&self, name: &str) -> Option<&Arc<AttributeType>> {
        self.types.get(&name.to_ascii_lowercase())
    }

    /// Resolve a name or OID to an attribute type.
    ///
    /// Never fails: names unknown to the schema resolve to a freshly
    /// synthesized placeholder type. Resolution does not mutate the schema,
    /// so repeated lookups of the same unknown name yield equal (same-OID)
    /// but distinct placeholder instances.
    pub fn resolve_attribute_type(&self, name: &str) -> Arc<AttributeType> {
        match self.get_attribute_type(name) {
            Some(t) => {
                trace!(name, oid = %t.oid, "resolved attribute type");
                Arc::clone(t)
            }
            None => {
                debug!(name, "attribute type not in schema, synthesizing placeholder");
                Arc::new(AttributeType::placeholder(name))
            }
        }
    }

    /// Number of registered types (aliases counted once)
    pub fn len(&self) -> usize {
        let mut oids: Vec<&str> = self.types.values().map(|t| t.oid.as_str()).collect();
        oids.sort_unstable();
        oids.dedup();
        oids.len()
    }

    /// Whether the schema defines no types
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let schema = Schema::core();
        let by_name = schema.get_attribute_type("CN").unwrap();
        let by_alias = schema.get_attribute_type("commonname").unwrap();
        let by_oid = schema.get_attribute_type("2.5.4.3").unwrap();
        assert_eq!(by_name, by_alias);
        assert_eq!(by_name, by_oid);
        assert_eq!(by_name.name_or_oid(), "cn");
    }

    #[test]
    fn test_unknown_name_synthesizes_placeholder() {
        let schema = Schema::core();
        let t = schema.resolve_attribute_type("xyz-custom");
        assert!(t.placeholder);
        assert_eq!(t.name_or_oid(), "xyz-custom");
        assert_eq!(t.matching_rule, MatchingRule::CaseIgnore);
        // The schema itself is untouched
        assert!(schema.get_attribute_type("xyz-custom").is_none());
    }

    #[test]
    fn test_placeholder_resolution_is_stable() {
        let schema = Schema::new();
        let t1 = schema.resolve_attribute_type("foo");
        let t2 = schema.resolve_attribute_type("foo");
        assert_eq!(t1, t2);
        assert!(!Arc::ptr_eq(&t1, &t2));
    }

    #[test]
    fn test_type_equality_by_oid() {
        let a = AttributeType::new("1.2.3", vec!["a".into()], MatchingRule::CaseIgnore);
        let b = AttributeType::new("1.2.3", vec!["b".into()], MatchingRule::CaseExact);
        let c = AttributeType::new("1.2.4", vec!["a".into()], MatchingRule::CaseIgnore);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_equal_values_delegates_to_rule() {
        let schema = Schema::core();
        let cn = schema.resolve_attribute_type("cn");
        assert!(cn.equal_values(&"Bob".into(), &"BOB".into()));
        let pw = schema.resolve_attribute_type("userPassword");
        assert!(!pw.equal_values(&"Bob".into(), &"BOB".into()));
    }

    #[test]
    fn test_core_schema_len_counts_types_once() {
        let schema = Schema::core();
        assert_eq!(schema.len(), 10);
        assert!(!schema.is_empty());
    }
}
