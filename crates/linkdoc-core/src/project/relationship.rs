use crate::{
    model::{Cardinality, IdentityRule, RelationshipDescriptor, ResourceDescriptor},
    project::{
        ProjectionError, RelationshipData, RelationshipObject, ResolutionFailure,
        ResourceIdentifier,
    },
    query::QueryPlan,
    registry::Registry,
    value::{Row, identifier_text},
};
use serde_json::Value;
use std::collections::BTreeMap;

/// Linkage for every visible relationship of `object`.
///
/// Absent or `null` properties yield `null` (to-one) or `[]` (to-many).
pub fn project_relationships(
    registry: &Registry,
    descriptor: &ResourceDescriptor,
    object: &dyn Row,
    plan: &QueryPlan,
) -> Result<BTreeMap<String, RelationshipObject>, ProjectionError> {
    let mut out = BTreeMap::new();

    for rel in descriptor.relationships() {
        if !rel.is_visible(object, plan) {
            continue;
        }

        let value = object.field(rel.source()).non_null();
        let data = linkage_of(registry, rel, value).map_err(|reason| {
            ProjectionError::RelationshipResolution {
                resource: descriptor.type_name().to_string(),
                relationship: rel.name().to_string(),
                reason,
            }
        })?;

        out.insert(rel.name().to_string(), RelationshipObject { data });
    }

    Ok(out)
}

fn linkage_of(
    registry: &Registry,
    rel: &RelationshipDescriptor,
    value: Option<&Value>,
) -> Result<RelationshipData, ResolutionFailure> {
    match (rel.cardinality(), value) {
        (Cardinality::ToOne, None) => Ok(RelationshipData::ToOne(None)),
        (Cardinality::ToMany, None) => Ok(RelationshipData::ToMany(Vec::new())),

        (Cardinality::ToOne, Some(Value::Array(_))) => Err(ResolutionFailure::Cardinality),
        (Cardinality::ToOne, Some(related)) => {
            identify(registry, rel, related).map(|id| RelationshipData::ToOne(Some(id)))
        }

        (Cardinality::ToMany, Some(Value::Array(items))) => items
            .iter()
            .filter(|item| !item.is_null())
            .map(|item| identify(registry, rel, item))
            .collect::<Result<_, _>>()
            .map(RelationshipData::ToMany),
        (Cardinality::ToMany, Some(related)) => {
            identify(registry, rel, related).map(|id| RelationshipData::ToMany(vec![id]))
        }
    }
}

/// Type and identifier of one related value.
///
/// Objects are typed by `target_type` and
/// identified by the relationship's rule, else the target descriptor's rule,
/// else the conventional `id` field. Bare scalars are taken as the
/// identifier of the declared target type.
pub(crate) fn identify(
    registry: &Registry,
    rel: &RelationshipDescriptor,
    related: &Value,
) -> Result<ResourceIdentifier, ResolutionFailure> {
    if !related.is_object() {
        let type_name = rel.target_type().ok_or(ResolutionFailure::TargetType)?;
        let id = identifier_text(related).ok_or(ResolutionFailure::Identifier)?;

        return Ok(ResourceIdentifier::new(type_name, id));
    }

    let type_name = target_type(registry, rel, related).ok_or(ResolutionFailure::TargetType)?;

    let id = match rel.identity() {
        Some(rule) => rule.resolve(related),
        None => match registry.get(&type_name) {
            Some(target) => target.identity().resolve(related),
            None => IdentityRule::default().resolve(related),
        },
    }
    .ok_or(ResolutionFailure::Identifier)?;

    Ok(ResourceIdentifier::new(type_name, id))
}

// Mapped polymorphic variant, then an unmapped discriminator naming a
// registered type or shape, then the declared direct type.
fn target_type(registry: &Registry, rel: &RelationshipDescriptor, related: &Value) -> Option<String> {
    let unmapped_tag = rel.polymorphic_target().and_then(|poly| {
        poly.tag_of(related)
            .filter(|tag| poly.type_for(tag).is_none())
    });

    match unmapped_tag.and_then(|tag| registry.get(tag)) {
        Some(target) => Some(target.type_name().to_string()),
        None => rel.resolve_target_type(related).map(str::to_string),
    }
}
