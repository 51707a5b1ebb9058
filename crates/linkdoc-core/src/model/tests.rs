use crate::{
    model::{
        AttributeDescriptor, Cardinality, IdentityRule, PolymorphicTarget, RelationshipDescriptor,
        ResourceDescriptor,
    },
    query::QueryPlan,
    value::Row,
};
use serde_json::json;

#[test]
fn builder_preserves_declaration_order() {
    let descriptor = ResourceDescriptor::builder("articles")
        .shape("ArticleResource")
        .attrs(["title", "body"])
        .attribute(AttributeDescriptor::new("created").rename("created_at"))
        .relationship(RelationshipDescriptor::to_one("author", "people"))
        .relationship(RelationshipDescriptor::to_many("comments", "comments"))
        .build();

    let names: Vec<_> = descriptor.attributes().iter().map(AttributeDescriptor::name).collect();
    assert_eq!(names, ["title", "body", "created_at"]);
    assert_eq!(descriptor.attribute("created_at").map(AttributeDescriptor::source), Some("created"));

    let rels: Vec<_> = descriptor.relationships().iter().map(RelationshipDescriptor::name).collect();
    assert_eq!(rels, ["author", "comments"]);
    assert_eq!(descriptor.shape(), Some("ArticleResource"));
}

#[test]
fn identity_defaults_to_id_field() {
    let descriptor = ResourceDescriptor::builder("tags").build();

    assert_eq!(descriptor.identity().resolve(&json!({ "id": 7 })).as_deref(), Some("7"));
    assert_eq!(descriptor.identity().resolve(&json!({ "id": "" })), None);
    assert_eq!(descriptor.identity().resolve(&json!({ "uuid": "x" })), None);
}

#[test]
fn derived_identity_composes_fields() {
    let rule = IdentityRule::derive(|row: &dyn Row| {
        let org = row.field("org").value()?.as_str()?;
        let slug = row.field("slug").value()?.as_str()?;
        Some(format!("{org}/{slug}"))
    });

    let row = json!({ "org": "acme", "slug": "rockets" });
    assert_eq!(rule.resolve(&row).as_deref(), Some("acme/rockets"));
    assert_eq!(rule.resolve(&json!({ "org": "acme" })), None);
}

#[test]
fn polymorphic_target_prefers_variant_then_fallback() {
    let rel = RelationshipDescriptor::polymorphic(
        "subject",
        Cardinality::ToOne,
        PolymorphicTarget::new("kind")
            .variant("Article", "articles")
            .variant("Video", "videos"),
    )
    .fallback_type("media");

    assert_eq!(rel.resolve_target_type(&json!({ "kind": "Video" })), Some("videos"));
    assert_eq!(rel.resolve_target_type(&json!({ "kind": "Podcast" })), Some("media"));
    assert_eq!(rel.resolve_target_type(&json!({})), Some("media"));
}

#[test]
fn polymorphic_target_without_fallback_can_fail() {
    let rel = RelationshipDescriptor::polymorphic(
        "subject",
        Cardinality::ToMany,
        PolymorphicTarget::new("kind").variant("Article", "articles"),
    );

    assert_eq!(rel.resolve_target_type(&json!({ "kind": "Podcast" })), None);
    assert_eq!(rel.cardinality(), Cardinality::ToMany);
}

#[test]
fn visibility_predicate_sees_object_and_plan() {
    let attr = AttributeDescriptor::new("email")
        .visible_when(|row: &dyn Row, plan: &QueryPlan| {
            row.field("public").value() == Some(&json!(true)) || plan.includes().is_empty()
        });

    let plan = QueryPlan::parse(&[("include", "author")]);
    assert!(attr.is_visible(&json!({ "public": true }), &plan));
    assert!(!attr.is_visible(&json!({ "public": false }), &plan));
    assert!(attr.is_visible(&json!({ "public": false }), &QueryPlan::default()));
}
