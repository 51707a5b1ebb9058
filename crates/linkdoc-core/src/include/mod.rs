//! Include resolution.
//!
//! Walks declared relationships along the requested include paths and
//! side-loads every related object reached, projecting each one once.
//!
//! Traversal is depth-first per root object, in relationship declaration
//! order, then in root order. When two paths reach the same (type, id), the
//! first projection wins and the later path is not walked any further from
//! that object. Requested paths below the later route are lost with it: for
//! `author,comments.author.profile` where the comment author is the article
//! author, no profile is side-loaded.
//!
//! A side-loaded resource carries the id of the linkage that reached it, so a
//! relationship with its own identity rule still points into `included`.

mod set;


use crate::{
    Error,
    model::ResourceDescriptor,
    project::{ProjectionError, Projector, identify},
    value::Row,
};
use serde_json::Value;
use tracing::trace;

// re-exports
pub use set::IncludedSet;

///
/// IncludeResolver
///

#[derive(Clone, Copy, Debug)]
pub struct IncludeResolver<'a> {
    projector: Projector<'a>,
}

impl<'a> IncludeResolver<'a> {
    #[must_use]
    pub const fn new(projector: Projector<'a>) -> Self {
        Self { projector }
    }

    /// Side-load everything `paths` reaches from `roots` into `included`.
    pub fn resolve<R: Row>(
        &self,
        descriptor: &ResourceDescriptor,
        roots: &[R],
        paths: &[String],
        included: &mut IncludedSet,
    ) -> Result<(), Error> {
        if paths.is_empty() {
            return Ok(());
        }

        for root in roots {
            self.walk(descriptor, root, paths, included)?;
        }

        Ok(())
    }

    fn walk(
        &self,
        descriptor: &ResourceDescriptor,
        object: &dyn Row,
        paths: &[String],
        included: &mut IncludedSet,
    ) -> Result<(), Error> {
        let registry = self.projector.registry();
        let plan = self.projector.plan();

        for rel in descriptor.relationships() {
            let Some(next) = next_paths(rel.name(), paths) else {
                continue;
            };
            if !rel.is_visible(object, plan) {
                continue;
            }
            let Some(value) = object.field(rel.source()).non_null() else {
                continue;
            };

            for related in related_objects(value) {
                let key = identify(registry, rel, related).map_err(|reason| {
                    ProjectionError::RelationshipResolution {
                        resource: descriptor.type_name().to_string(),
                        relationship: rel.name().to_string(),
                        reason,
                    }
                })?;
                if !included.claim(key.clone()) {
                    continue;
                }

                let target = registry.resolve(&key.type_name)?;
                trace!(
                    from = descriptor.type_name(),
                    relationship = rel.name(),
                    type_name = %key.type_name,
                    id = %key.id,
                    "side-loading related resource"
                );

                // id follows the linkage key, which may come from a custom rule
                let resource = self.projector.project_as(&target, related, key.id.clone())?;
                included.insert(resource);
                if !next.is_empty() {
                    self.walk(&target, related, &next, included)?;
                }
            }
        }

        Ok(())
    }
}

/// Remaining path suffixes below relationship `name`.
///
/// `None` when no requested path goes through `name`; an empty list when
/// paths stop at `name`.
#[must_use]
pub fn next_paths(name: &str, paths: &[String]) -> Option<Vec<String>> {
    let mut matched = false;
    let mut next: Vec<String> = Vec::new();

    for path in paths {
        if path == name {
            matched = true;
        } else if let Some(rest) = path
            .strip_prefix(name)
            .and_then(|rest| rest.strip_prefix('.'))
        {
            matched = true;
            if !rest.is_empty() && !next.iter().any(|seen| seen == rest) {
                next.push(rest.to_string());
            }
        }
    }

    matched.then_some(next)
}

// Related objects behind one relationship value. Bare scalars carry no
// attributes and are never side-loaded.
fn related_objects(value: &Value) -> impl Iterator<Item = &Value> {
    let items = match value {
        Value::Array(items) => items.as_slice(),
        single => std::slice::from_ref(single),
    };

    items.iter().filter(|item| item.is_object())
}
