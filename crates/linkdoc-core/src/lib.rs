//! Core runtime for linkdoc: resource descriptors, the query-plan parser, the
//! in-memory collection engine, projection, include resolution, and document
//! assembly.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod include;
pub mod model;
pub mod project;
pub mod query;
pub mod registry;
pub mod value;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use error::Error;

///
/// CONSTANTS
///

/// Identifier field read when no identity rule overrides it.
pub const DEFAULT_ID_FIELD: &str = "id";

/// Page size used when neither the request nor the config provides one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Class-name suffixes stripped when deriving a registry shape key.
pub const SHAPE_SUFFIXES: &[&str] = &["Serializer", "Resource", "Descriptor"];

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, engines, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        model::{
            AttributeDescriptor, Cardinality, IdentityRule, RelationshipDescriptor,
            ResourceDescriptor,
        },
        query::{FilterNode, FilterOp, QueryPlan, SortDirection, SortKey},
        value::Row,
    };
}
