//! Shared descriptors and raw objects for unit tests.

use crate::{
    model::{
        AttributeDescriptor, Cardinality, PolymorphicTarget, RelationshipDescriptor,
        ResourceDescriptor,
    },
    registry::Registry,
};
use serde_json::{Value, json};

pub(crate) fn article_descriptor() -> ResourceDescriptor {
    ResourceDescriptor::builder("articles")
        .shape("ArticleSerializer")
        .attrs(["title", "body"])
        .attribute(AttributeDescriptor::new("created_at").rename("createdAt"))
        .relationship(RelationshipDescriptor::to_one("author", "people"))
        .relationship(RelationshipDescriptor::to_many("comments", "comments"))
        .relationship(RelationshipDescriptor::polymorphic(
            "media",
            Cardinality::ToMany,
            PolymorphicTarget::new("kind")
                .variant("image", "images")
                .variant("video", "videos"),
        ))
        .build()
}

pub(crate) fn registry() -> Registry {
    let registry = Registry::new();

    registry.register(article_descriptor());
    registry.register(
        ResourceDescriptor::builder("people")
            .shape("PersonResource")
            .attr("name")
            .attribute(
                AttributeDescriptor::new("email")
                    .visible_when(|person, _| person.field("public").value() == Some(&json!(true))),
            )
            .relationship(RelationshipDescriptor::to_one("profile", "profiles"))
            .build(),
    );
    registry.register(ResourceDescriptor::builder("profiles").attr("bio").build());
    registry.register(
        ResourceDescriptor::builder("comments")
            .attr("body")
            .relationship(RelationshipDescriptor::to_one("author", "people"))
            .build(),
    );
    registry.register(ResourceDescriptor::builder("images").attr("src").build());
    registry.register(
        ResourceDescriptor::builder("videos")
            .id_field("slug")
            .attr("src")
            .build(),
    );

    registry
}

pub(crate) fn ada() -> Value {
    json!({
        "id": "9",
        "name": "Ada",
        "email": "ada@example.test",
        "public": true,
        "profile": { "id": "p9", "bio": "Analyst" }
    })
}

pub(crate) fn linus() -> Value {
    json!({
        "id": "7",
        "name": "Linus",
        "email": "linus@example.test",
        "profile": null
    })
}

pub(crate) fn article(id: u32, author: Value) -> Value {
    json!({
        "id": id.to_string(),
        "title": format!("Article {id}"),
        "body": "Lorem ipsum",
        "created_at": "2024-05-01",
        "author": author,
        "comments": [
            { "id": format!("c{id}"), "body": "First!", "author": linus() }
        ],
        "media": [
            { "kind": "image", "id": format!("i{id}"), "src": "/a.png" },
            { "kind": "video", "slug": format!("v{id}"), "src": "/a.mp4" }
        ]
    })
}
