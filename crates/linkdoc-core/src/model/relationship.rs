use crate::{
    model::{IdentityRule, VisibilityFn},
    query::QueryPlan,
    value::Row,
};
use std::{collections::BTreeMap, fmt, sync::Arc};

///
/// Cardinality
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Cardinality {
    ToOne,
    ToMany,
}

///
/// PolymorphicTarget
///
/// Maps a discriminator value carried by the related object (for example a
/// `kind` field) onto a resource type name.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PolymorphicTarget {
    discriminator: String,
    types: BTreeMap<String, String>,
}

impl PolymorphicTarget {
    #[must_use]
    pub fn new(discriminator: impl Into<String>) -> Self {
        Self {
            discriminator: discriminator.into(),
            types: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn variant(mut self, tag: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.types.insert(tag.into(), type_name.into());
        self
    }

    #[must_use]
    pub fn discriminator(&self) -> &str {
        &self.discriminator
    }

    /// Discriminator value carried by `related`, if any.
    #[must_use]
    pub fn tag_of<'a>(&self, related: &'a dyn Row) -> Option<&'a str> {
        related.discriminator(&self.discriminator)
    }

    #[must_use]
    pub fn type_for(&self, tag: &str) -> Option<&str> {
        self.types.get(tag).map(String::as_str)
    }
}

///
/// RelationshipDescriptor
///

#[derive(Clone)]
pub struct RelationshipDescriptor {
    source: String,
    name: String,
    cardinality: Cardinality,
    target_type: Option<String>,
    polymorphic: Option<PolymorphicTarget>,
    identity: Option<IdentityRule>,
    visible: Option<VisibilityFn>,
}

impl RelationshipDescriptor {
    fn new(source: String, cardinality: Cardinality, target_type: Option<String>) -> Self {
        Self {
            name: source.clone(),
            source,
            cardinality,
            target_type,
            polymorphic: None,
            identity: None,
            visible: None,
        }
    }

    #[must_use]
    pub fn to_one(source: impl Into<String>, target_type: impl Into<String>) -> Self {
        Self::new(source.into(), Cardinality::ToOne, Some(target_type.into()))
    }

    #[must_use]
    pub fn to_many(source: impl Into<String>, target_type: impl Into<String>) -> Self {
        Self::new(source.into(), Cardinality::ToMany, Some(target_type.into()))
    }

    /// Relationship whose target type is chosen per related object.
    #[must_use]
    pub fn polymorphic(
        source: impl Into<String>,
        cardinality: Cardinality,
        target: PolymorphicTarget,
    ) -> Self {
        let mut rel = Self::new(source.into(), cardinality, None);
        rel.polymorphic = Some(target);
        rel
    }

    #[must_use]
    pub fn rename(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Direct type used when no polymorphic variant matches.
    #[must_use]
    pub fn fallback_type(mut self, target_type: impl Into<String>) -> Self {
        self.target_type = Some(target_type.into());
        self
    }

    /// Override how related identifiers are extracted.
    #[must_use]
    pub fn identify_by(mut self, rule: IdentityRule) -> Self {
        self.identity = Some(rule);
        self
    }

    #[must_use]
    pub fn visible_when<F>(mut self, f: F) -> Self
    where
        F: Fn(&dyn Row, &QueryPlan) -> bool + Send + Sync + 'static,
    {
        self.visible = Some(Arc::new(f));
        self
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    #[must_use]
    pub fn target_type(&self) -> Option<&str> {
        self.target_type.as_deref()
    }

    #[must_use]
    pub const fn polymorphic_target(&self) -> Option<&PolymorphicTarget> {
        self.polymorphic.as_ref()
    }

    #[must_use]
    pub const fn identity(&self) -> Option<&IdentityRule> {
        self.identity.as_ref()
    }

    #[must_use]
    pub fn is_visible(&self, object: &dyn Row, plan: &QueryPlan) -> bool {
        super::is_visible(self.visible.as_ref(), object, plan)
    }

    /// Resolve the target type for one related object.
    ///
    /// Polymorphic variants win over the direct type; the direct type is the
    /// fallback when the discriminator is absent or unmapped.
    #[must_use]
    pub fn resolve_target_type<'a>(&'a self, related: &dyn Row) -> Option<&'a str> {
        self.polymorphic
            .as_ref()
            .and_then(|poly| poly.tag_of(related).and_then(|tag| poly.type_for(tag)))
            .or(self.target_type.as_deref())
    }
}

impl fmt::Debug for RelationshipDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelationshipDescriptor")
            .field("source", &self.source)
            .field("name", &self.name)
            .field("cardinality", &self.cardinality)
            .field("target_type", &self.target_type)
            .field("polymorphic", &self.polymorphic)
            .field("identity", &self.identity)
            .field("conditional", &self.visible.is_some())
            .finish()
    }
}
