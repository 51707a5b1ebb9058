use super::*;
use crate::{
    model::{IdentityRule, RelationshipDescriptor},
    query::QueryPlan,
    test_fixtures::{ada, article, article_descriptor, linus, registry},
};
use proptest::prelude::*;
use serde_json::json;

#[test]
fn projects_identity_attributes_and_linkage() {
    let registry = registry();
    let plan = QueryPlan::default();
    let object = article(1, ada());

    let resource = Projector::new(&registry, &plan)
        .project(&article_descriptor(), &object)
        .expect("article should project");

    assert_eq!(resource.id, "1");
    assert_eq!(resource.type_name, "articles");
    assert_eq!(resource.attributes["createdAt"], "2024-05-01");
    assert!(!resource.attributes.contains_key("created_at"));
    assert_eq!(
        resource.linkage("author"),
        Some(&RelationshipData::ToOne(Some(ResourceIdentifier::new("people", "9"))))
    );
    assert_eq!(
        resource.linkage("comments").map(RelationshipData::identifiers),
        Some(&[ResourceIdentifier::new("comments", "c1")][..])
    );
}

#[test]
fn polymorphic_linkage_uses_discriminator_and_target_identity() {
    let registry = registry();
    let plan = QueryPlan::default();

    let resource = Projector::new(&registry, &plan)
        .project(&article_descriptor(), &article(3, ada()))
        .expect("article should project");

    // videos are identified by `slug` through their registered descriptor
    assert_eq!(
        resource.linkage("media").map(RelationshipData::identifiers),
        Some(
            &[
                ResourceIdentifier::new("images", "i3"),
                ResourceIdentifier::new("videos", "v3"),
            ][..]
        )
    );
}

#[test]
fn absent_relationships_render_null_or_empty() {
    let registry = registry();
    let plan = QueryPlan::default();
    let object = json!({ "id": "1", "title": "Bare", "author": null });

    let resource = Projector::new(&registry, &plan)
        .project(&article_descriptor(), &object)
        .expect("article should project");

    assert_eq!(resource.linkage("author"), Some(&RelationshipData::ToOne(None)));
    assert_eq!(resource.linkage("comments"), Some(&RelationshipData::ToMany(vec![])));

    let wire = serde_json::to_value(&resource).expect("encode");
    assert_eq!(wire["relationships"]["author"], json!({ "data": null }));
    assert_eq!(wire["relationships"]["comments"], json!({ "data": [] }));
    // missing source properties are not emitted
    assert!(wire["attributes"].get("body").is_none());
}

#[test]
fn sparse_fieldset_only_touches_attributes() {
    let registry = registry();
    let plan = QueryPlan::parse(&[("fields[articles]", "title,unknown")]);

    let resource = Projector::new(&registry, &plan)
        .project(&article_descriptor(), &article(1, ada()))
        .expect("article should project");

    let keys: Vec<_> = resource.attributes.keys().map(String::as_str).collect();
    assert_eq!(keys, ["title"]);
    assert_eq!(resource.id, "1");
    assert_eq!(resource.relationships.len(), 3);
}

#[test]
fn empty_fieldset_leaves_only_identity_and_linkage() {
    let registry = registry();
    let plan = QueryPlan::default().with_fields("articles", Vec::<String>::new());

    let resource = Projector::new(&registry, &plan)
        .project(&article_descriptor(), &article(1, ada()))
        .expect("article should project");

    let wire = serde_json::to_value(&resource).expect("encode");
    assert!(wire.get("attributes").is_none());
    assert_eq!(wire["type"], "articles");
    assert!(wire.get("relationships").is_some());
}

#[test]
fn visibility_predicates_see_the_object() {
    let registry = registry();
    let plan = QueryPlan::default();
    let people = registry.resolve("people").expect("registered");
    let projector = Projector::new(&registry, &plan);

    let public = projector.project(&people, &ada()).expect("ada");
    let private = projector.project(&people, &linus()).expect("linus");

    assert!(public.attributes.contains_key("email"));
    assert!(!private.attributes.contains_key("email"));
}

#[test]
fn missing_identifier_fails_the_projection() {
    let registry = registry();
    let plan = QueryPlan::default();

    let err = Projector::new(&registry, &plan)
        .project(&article_descriptor(), &json!({ "title": "No id" }))
        .expect_err("identity is required");

    assert_eq!(
        err,
        ProjectionError::IdentityResolution {
            resource: "articles".to_string()
        }
    );
}

#[test]
fn related_object_without_identifier_fails() {
    let registry = registry();
    let plan = QueryPlan::default();
    let object = json!({ "id": "1", "author": { "name": "Anonymous" } });

    let err = Projector::new(&registry, &plan)
        .project(&article_descriptor(), &object)
        .expect_err("related identity is required");

    assert!(matches!(
        err,
        ProjectionError::RelationshipResolution {
            ref relationship,
            reason: ResolutionFailure::Identifier,
            ..
        } if relationship == "author"
    ));
}

#[test]
fn unmapped_polymorphic_variant_without_fallback_fails() {
    let registry = registry();
    let plan = QueryPlan::default();
    let object = json!({ "id": "1", "media": [{ "kind": "audio", "id": "x" }] });

    let err = Projector::new(&registry, &plan)
        .project(&article_descriptor(), &object)
        .expect_err("target type is required");

    assert!(matches!(
        err,
        ProjectionError::RelationshipResolution {
            reason: ResolutionFailure::TargetType,
            ..
        }
    ));
}

#[test]
fn to_one_holding_a_list_is_rejected() {
    let registry = registry();
    let plan = QueryPlan::default();
    let object = json!({ "id": "1", "author": [ada()] });

    let err = Projector::new(&registry, &plan)
        .project(&article_descriptor(), &object)
        .expect_err("cardinality mismatch");

    assert!(matches!(
        err,
        ProjectionError::RelationshipResolution {
            reason: ResolutionFailure::Cardinality,
            ..
        }
    ));
}

#[test]
fn scalar_relationship_values_are_identifiers() {
    let registry = registry();
    let plan = QueryPlan::default();
    let object = json!({ "id": "1", "author": 42, "comments": ["a", "b"] });

    let resource = Projector::new(&registry, &plan)
        .project(&article_descriptor(), &object)
        .expect("article should project");

    assert_eq!(
        resource.linkage("author"),
        Some(&RelationshipData::ToOne(Some(ResourceIdentifier::new("people", "42"))))
    );
    assert_eq!(resource.linkage("comments").map(|data| data.identifiers().len()), Some(2));
}

#[test]
fn custom_relationship_identity_wins() {
    let registry = registry();
    let plan = QueryPlan::default();
    let descriptor = crate::model::ResourceDescriptor::builder("posts")
        .relationship(
            RelationshipDescriptor::to_one("writer", "people").identify_by(IdentityRule::derive(
                |person| person.field("handle").value().and_then(|v| v.as_str()).map(|h| format!("@{h}")),
            )),
        )
        .build();
    let object = json!({ "id": "p", "writer": { "id": "9", "handle": "ada" } });

    let resource = Projector::new(&registry, &plan)
        .project(&descriptor, &object)
        .expect("post should project");

    assert_eq!(
        resource.linkage("writer"),
        Some(&RelationshipData::ToOne(Some(ResourceIdentifier::new("people", "@ada"))))
    );
}

#[test]
fn resource_links_are_built_under_the_base() {
    let registry = registry();
    let plan = QueryPlan::default();
    let base = url::Url::parse("https://api.test/v1/").expect("url");

    let resource = Projector::new(&registry, &plan)
        .with_resource_links(Some(&base))
        .project(&article_descriptor(), &article(5, ada()))
        .expect("article should project");

    assert_eq!(
        resource.links.map(|links| links.self_link).as_deref(),
        Some("https://api.test/v1/articles/5")
    );
}

proptest! {
    #[test]
    fn field_selection_is_exclusive(selected in prop::sample::subsequence(vec!["title", "body", "createdAt", "nope"], 0..=4)) {
        let registry = registry();
        let plan = QueryPlan::default().with_fields("articles", selected.clone());

        let resource = Projector::new(&registry, &plan)
            .project(&article_descriptor(), &article(1, ada()))
            .expect("article should project");

        let mut expected: Vec<&str> = selected.into_iter().filter(|name| *name != "nope").collect();
        expected.sort_unstable();
        let mut keys: Vec<&str> = resource.attributes.keys().map(String::as_str).collect();
        keys.sort_unstable();

        prop_assert_eq!(keys, expected);
        prop_assert_eq!(resource.relationships.len(), 3);
    }
}
