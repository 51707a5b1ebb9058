//! Declarative resource descriptors.
//!
//! Descriptors are plain configuration values built once (usually at startup)
//! and registered with a [`Registry`](crate::registry::Registry). They are
//! immutable after construction.

mod attribute;
mod identity;
mod relationship;
mod resource;

#[cfg(test)]
mod tests;

use crate::{query::QueryPlan, value::Row};
use std::sync::Arc;

// re-exports
pub use attribute::AttributeDescriptor;
pub use identity::{IdentityFn, IdentityRule};
pub use relationship::{Cardinality, PolymorphicTarget, RelationshipDescriptor};
pub use resource::{ResourceDescriptor, ResourceDescriptorBuilder};

///
/// VisibilityFn
///
/// Conditional-visibility predicate evaluated per object with the active plan.
///

pub type VisibilityFn = Arc<dyn Fn(&dyn Row, &QueryPlan) -> bool + Send + Sync>;

// Evaluate an optional visibility predicate; absence means always visible.
pub(crate) fn is_visible(
    predicate: Option<&VisibilityFn>,
    object: &dyn Row,
    plan: &QueryPlan,
) -> bool {
    predicate.is_none_or(|visible| visible(object, plan))
}
