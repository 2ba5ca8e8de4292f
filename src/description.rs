//! Attribute descriptions: type + display name + options

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::error::{AttributeError, Result};
use crate::schema::{AttributeType, Schema};

/// An attribute description: the attribute type, the user-supplied display
/// name, and an optional set of options such as language tags.
///
/// Two descriptions are equal iff their attribute type and case-insensitive
/// option set match; the display name is presentation only and never affects
/// equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeDescription {
    attribute_type: Arc<AttributeType>,
    name: String,
    options: Vec<String>,
}

impl AttributeDescription {
    /// Create a description with no options
    pub fn new(attribute_type: Arc<AttributeType>, name: impl Into<String>) -> Self {
        Self {
            attribute_type,
            name: name.into(),
            options: Vec::new(),
        }
    }

    /// Create a description with options (e.g., language tags)
    pub fn with_options(
        attribute_type: Arc<AttributeType>,
        name: impl Into<String>,
        options: Vec<String>,
    ) -> Self {
        Self {
            attribute_type,
            name: name.into(),
            options,
        }
    }

    /// Parse a `name;option;option` description string, resolving the name
    /// through the schema. Unknown names synthesize a placeholder type;
    /// an empty name or empty option is an error.
    pub fn parse(s: &str, schema: &Schema) -> Result<Self> {
        let mut parts = s.split(';');
        let name = parts.next().unwrap_or_default();
        if name.is_empty() {
            return Err(AttributeError::InvalidDescription {
                input: s.to_string(),
                reason: "empty attribute name".to_string(),
            });
        }
        let mut options = Vec::new();
        for option in parts {
            if option.is_empty() {
                return Err(AttributeError::InvalidDescription {
                    input: s.to_string(),
                    reason: "empty option".to_string(),
                });
            }
            options.push(option.to_string());
        }
        let attribute_type = schema.resolve_attribute_type(name);
        Ok(Self {
            attribute_type,
            name: name.to_string(),
            options,
        })
    }

    /// The attribute type of this description
    pub fn attribute_type(&self) -> &Arc<AttributeType> {
        &self.attribute_type
    }

    /// The user-supplied display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The options, in the order they were supplied
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Whether this description carries the given option (case-insensitive)
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o.eq_ignore_ascii_case(option))
    }

    /// Whether this description carries any options at all
    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }

    /// Add an option if a case-insensitive equal one is not already present;
    /// returns whether the option was added
    pub(crate) fn add_option(&mut self, option: impl Into<String>) -> bool {
        let option = option.into();
        if self.has_option(&option) {
            return false;
        }
        self.options.push(option);
        true
    }

    fn normalized_options(&self) -> BTreeSet<String> {
        self.options
            .iter()
            .map(|o| o.to_ascii_lowercase())
            .collect()
    }
}

impl PartialEq for AttributeDescription {
    fn eq(&self, other: &Self) -> bool {
        self.attribute_type == other.attribute_type
            && self.normalized_options() == other.normalized_options()
    }
}

impl Eq for AttributeDescription {}

impl fmt::Display for AttributeDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for option in &self.options {
            write!(f, ";{}", option)?;
        }
        Ok(())
    }
}
