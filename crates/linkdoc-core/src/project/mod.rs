//! Attribute and relationship projection.
//!
//! A projector turns one raw object into a [`ResourceObject`] under a
//! descriptor and the active query plan. Projection never coerces attribute
//! values; it fails only when an identifier or a relationship target cannot
//! be resolved.

mod attribute;
mod object;
mod relationship;

#[cfg(test)]
mod tests;

use crate::{model::ResourceDescriptor, query::QueryPlan, registry::Registry, value::Row};
use thiserror::Error as ThisError;
use url::Url;

// re-exports
pub use attribute::project_attributes;
pub use object::{RelationshipData, RelationshipObject, ResourceIdentifier, ResourceLinks, ResourceObject};
pub use relationship::project_relationships;
pub(crate) use relationship::identify;

///
/// ProjectionError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ProjectionError {
    #[error("cannot resolve relationship '{relationship}' on '{resource}': {reason}")]
    RelationshipResolution {
        resource: String,
        relationship: String,
        reason: ResolutionFailure,
    },

    #[error("no identifier could be derived for a '{resource}' object")]
    IdentityResolution { resource: String },
}

///
/// ResolutionFailure
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
pub enum ResolutionFailure {
    #[error("no target type could be determined")]
    TargetType,

    #[error("no identifier could be determined")]
    Identifier,

    #[error("expected a single related value, found a list")]
    Cardinality,
}

///
/// Projector
///
/// Everything one projection reads: the registry (for related identity
/// rules), the query plan (field selection and visibility), and the base URL
/// for resource self links when those are enabled.
///

#[derive(Clone, Copy, Debug)]
pub struct Projector<'a> {
    registry: &'a Registry,
    plan: &'a QueryPlan,
    resource_base: Option<&'a Url>,
}

impl<'a> Projector<'a> {
    #[must_use]
    pub const fn new(registry: &'a Registry, plan: &'a QueryPlan) -> Self {
        Self {
            registry,
            plan,
            resource_base: None,
        }
    }

    /// Emit `links.self` as `<base>/<type>/<id>` on every projected object.
    #[must_use]
    pub const fn with_resource_links(mut self, base: Option<&'a Url>) -> Self {
        self.resource_base = base;
        self
    }

    #[must_use]
    pub const fn registry(&self) -> &'a Registry {
        self.registry
    }

    #[must_use]
    pub const fn plan(&self) -> &'a QueryPlan {
        self.plan
    }

    /// Project `object` under `descriptor`.
    pub fn project(
        &self,
        descriptor: &ResourceDescriptor,
        object: &dyn Row,
    ) -> Result<ResourceObject, ProjectionError> {
        let id = descriptor.identity().resolve(object).ok_or_else(|| {
            ProjectionError::IdentityResolution {
                resource: descriptor.type_name().to_string(),
            }
        })?;

        self.project_as(descriptor, object, id)
    }

    /// Project `object` under `descriptor` with an identifier already
    /// resolved elsewhere, such as a relationship's linkage key.
    pub fn project_as(
        &self,
        descriptor: &ResourceDescriptor,
        object: &dyn Row,
        id: String,
    ) -> Result<ResourceObject, ProjectionError> {
        let attributes = project_attributes(descriptor, object, self.plan);
        let relationships =
            project_relationships(self.registry, descriptor, object, self.plan)?;
        let links = self
            .resource_base
            .and_then(|base| ResourceLinks::under(base, descriptor.type_name(), &id));

        Ok(ResourceObject {
            id,
            type_name: descriptor.type_name().to_string(),
            attributes,
            relationships,
            links,
        })
    }
}
