//! ## Crate layout
//! - `core`: descriptors, the registry, query-plan parsing, the collection
//!   engine, projection, include resolution and document assembly.
//!
//! The `prelude` module carries the vocabulary used when declaring resources
//! and serializing documents.

pub use linkdoc_core as core;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use linkdoc_core::{
    Error,
    config::EngineConfig,
    document::{Document, RequestContext, Serializer},
    registry::Registry,
};

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::{
        config::EngineConfig,
        document::{Document, RequestContext, Serializer},
        prelude::*,
        query::AllowList,
        registry::Registry,
    };
    pub use serde_json::{Value, json};
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Book {
        isbn: &'static str,
        title: &'static str,
    }

    #[test]
    fn prelude_covers_a_full_round() {
        let registry = Registry::new();
        registry.register(
            ResourceDescriptor::builder("books")
                .id_field("isbn")
                .attr("title")
                .build(),
        );
        let config = EngineConfig::default();
        let plan = QueryPlan::from_query_str("sort=-title");
        let books = [
            Book { isbn: "1", title: "Alpha" },
            Book { isbn: "2", title: "Omega" },
        ];

        let doc = Serializer::new(&registry, &config)
            .serialize_records("books", &books, &plan, &RequestContext::new())
            .and_then(|doc| doc.to_value())
            .expect("document should serialize");

        assert_eq!(doc["data"][0]["id"], "2");
        assert_eq!(doc["data"][1]["attributes"], json!({ "title": "Alpha" }));
    }

    #[test]
    fn version_is_set() {
        assert!(!crate::VERSION.is_empty());
    }
}
