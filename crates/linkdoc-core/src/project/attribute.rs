use crate::{model::ResourceDescriptor, query::QueryPlan, value::Row};
use serde_json::{Map, Value};

/// Visible attribute map for `object`.
///
/// An attribute is skipped when a field selection exists for the resource
/// type and does not name it, when its visibility predicate fails, or when
/// the source property is absent. Values are copied verbatim.
#[must_use]
pub fn project_attributes(
    descriptor: &ResourceDescriptor,
    object: &dyn Row,
    plan: &QueryPlan,
) -> Map<String, Value> {
    let selected = plan.fields_for(descriptor.type_name());
    let mut out = Map::new();

    for attribute in descriptor.attributes() {
        if selected.is_some_and(|names| !names.contains(attribute.name())) {
            continue;
        }
        if !attribute.is_visible(object, plan) {
            continue;
        }
        if let Some(value) = object.field(attribute.source()).value() {
            out.insert(attribute.name().to_string(), value.clone());
        }
    }

    out
}
