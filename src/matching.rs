//! Matching rules: schema-defined value equality
//!
//! A matching rule decides when two attribute values are "the same". Every
//! containment and duplicate test in this crate goes through a rule; raw
//! byte comparison is only ever a fallback for values the rule cannot
//! interpret.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::value::AttributeValue;

/// The matching-rule families supported for attribute types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingRule {
    /// Case-insensitive string match with insignificant-whitespace handling
    /// (directory strings: `cn`, `sn`, `mail`, ...)
    CaseIgnore,
    /// Case-sensitive string match with insignificant-whitespace handling
    CaseExact,
    /// Numeric string match: all whitespace is insignificant
    Numeric,
    /// Telephone number match: whitespace and hyphens are insignificant,
    /// letters compare case-insensitively
    Telephone,
    /// Exact byte-sequence match (binary syntaxes such as `userPassword`)
    OctetString,
}

impl MatchingRule {
    /// Short descriptive name for this rule, as used in schema listings
    pub fn name(&self) -> &'static str {
        match self {
            MatchingRule::CaseIgnore => "caseIgnoreMatch",
            MatchingRule::CaseExact => "caseExactMatch",
            MatchingRule::Numeric => "numericStringMatch",
            MatchingRule::Telephone => "telephoneNumberMatch",
            MatchingRule::OctetString => "octetStringMatch",
        }
    }

    /// Normalize a value for comparison under this rule.
    ///
    /// Non-UTF-8 input under a string rule normalizes to itself, so malformed
    /// values compare equal only by byte identity. Returns a borrowed slice
    /// when the input is already in normal form.
    pub fn normalize<'a>(&self, value: &'a AttributeValue) -> Cow<'a, [u8]> {
        match self {
            MatchingRule::OctetString => Cow::Borrowed(value.as_bytes()),
            MatchingRule::CaseIgnore => match value.as_str() {
                Some(s) => fold_whitespace(s, true),
                None => Cow::Borrowed(value.as_bytes()),
            },
            MatchingRule::CaseExact => match value.as_str() {
                Some(s) => fold_whitespace(s, false),
                None => Cow::Borrowed(value.as_bytes()),
            },
            MatchingRule::Numeric => match value.as_str() {
                Some(s) => strip_chars(s, |c| c.is_whitespace(), false),
                None => Cow::Borrowed(value.as_bytes()),
            },
            MatchingRule::Telephone => match value.as_str() {
                Some(s) => strip_chars(s, |c| c.is_whitespace() || c == '-', true),
                None => Cow::Borrowed(value.as_bytes()),
            },
        }
    }

    /// Whether two values are equal under this rule. Pure and total: no
    /// well-formed pair of byte sequences can make this fail.
    pub fn values_match(&self, v1: &AttributeValue, v2: &AttributeValue) -> bool {
        if v1.as_bytes() == v2.as_bytes() {
            return true;
        }
        self.normalize(v1) == self.normalize(v2)
    }
}

/// Collapse internal whitespace runs to a single space, trim the ends, and
/// optionally lowercase. Borrows when the input is already normal.
fn fold_whitespace(s: &str, fold_case: bool) -> Cow<'_, [u8]> {
    let already_normal = !fold_case
        && s.trim() == s
        && !s.chars().any(|c| c.is_whitespace() && c != ' ')
        && !s.contains("  ");
    if already_normal {
        return Cow::Borrowed(s.as_bytes());
    }

    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;
    for c in s.trim().chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        if fold_case {
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out.into_bytes())
}

/// Drop every character matching `strip`, optionally lowercasing the rest
fn strip_chars(s: &str, strip: impl Fn(char) -> bool, fold_case: bool) -> Cow<'_, [u8]> {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if strip(c) {
            continue;
        }
        if fold_case {
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> AttributeValue {
        AttributeValue::from(s)
    }

    #[test]
    fn test_case_ignore_folds_case() {
        assert!(MatchingRule::CaseIgnore.values_match(&v("Bob"), &v("BOB")));
        assert!(MatchingRule::CaseIgnore.values_match(&v("bob"), &v("Bob")));
        assert!(!MatchingRule::CaseIgnore.values_match(&v("Bob"), &v("Carol")));
    }

    #[test]
    fn test_case_ignore_collapses_whitespace() {
        assert!(MatchingRule::CaseIgnore.values_match(&v("  John   Doe "), &v("john doe")));
    }

    #[test]
    fn test_case_exact_preserves_case() {
        assert!(!MatchingRule::CaseExact.values_match(&v("Bob"), &v("BOB")));
        assert!(MatchingRule::CaseExact.values_match(&v(" Bob  Smith"), &v("Bob Smith")));
    }

    #[test]
    fn test_numeric_ignores_all_whitespace() {
        assert!(MatchingRule::Numeric.values_match(&v("123 456"), &v("123456")));
        assert!(!MatchingRule::Numeric.values_match(&v("123456"), &v("123457")));
    }

    #[test]
    fn test_telephone_ignores_separators() {
        assert!(MatchingRule::Telephone.values_match(&v("+1 555-867-5309"), &v("+15558675309")));
    }

    #[test]
    fn test_octet_string_is_byte_exact() {
        assert!(!MatchingRule::OctetString.values_match(&v("Bob"), &v("BOB")));
        assert!(MatchingRule::OctetString.values_match(&v("Bob"), &v("Bob")));
    }

    #[test]
    fn test_malformed_values_match_only_themselves() {
        let bad1 = AttributeValue::from_bytes(vec![0xff, 0x41]);
        let bad2 = AttributeValue::from_bytes(vec![0xfe, 0x41]);
        assert!(MatchingRule::CaseIgnore.values_match(&bad1, &bad1.clone()));
        assert!(!MatchingRule::CaseIgnore.values_match(&bad1, &bad2));
        assert!(!MatchingRule::CaseIgnore.values_match(&bad1, &v("A")));
    }
}
