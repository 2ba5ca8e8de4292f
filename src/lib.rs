//! Schema-aware attribute value sets for directory entries
//!
//! An attribute pairs a schema attribute type and display name with a
//! collection of values, where value equality is decided by the type's
//! matching rule rather than by raw bytes: under `cn` the values `"Bob"` and
//! `"BOB"` are one value, under `userPassword` they are two.
//!
//! ## Components
//!
//! - **Matching rules** ([`MatchingRule`]): the substrate deciding when two
//!   values are duplicates.
//! - **Schema shim** ([`Schema`], [`AttributeType`]): name/OID resolution
//!   that never fails — unknown names synthesize placeholder types.
//! - **Builder** ([`AttributeBuilder`]): single-writer accumulator with
//!   schema-driven `add`/`remove`, consumed by its finalize.
//! - **Factory/algebra** ([`factory`]): `create`/`empty`/`merge`/`subtract`
//!   over immutable [`Attribute`]s, reporting duplicate and missing values.
//!
//! ## Example
//!
//! ```
//! use dirattr::{factory, Schema};
//!
//! let schema = Schema::core();
//! let a1 = factory::create_named(&schema, "cn", ["Bob", "Carol"]);
//! let a2 = factory::create_named(&schema, "cn", ["BOB", "Dave"]);
//!
//! let mut duplicates = Vec::new();
//! let merged = factory::merge_with_duplicates(&a1, &a2, &mut duplicates);
//! assert_eq!(merged.len(), 3);
//! assert_eq!(duplicates[0].as_str(), Some("BOB"));
//! ```
//!
//! Finished [`Attribute`] values are immutable and safe to share across
//! threads; an [`AttributeBuilder`] is single-writer and not thread-safe.

pub mod attribute;
pub mod description;
pub mod error;
pub mod factory;
pub mod matching;
pub mod schema;
pub mod value;

pub use attribute::{Attribute, AttributeBuilder};
pub use description::AttributeDescription;
pub use error::{AttributeError, Result};
pub use matching::MatchingRule;
pub use schema::{AttributeType, Schema};
pub use value::AttributeValue;
