use crate::model::{AttributeDescriptor, IdentityRule, RelationshipDescriptor};

///
/// ResourceDescriptor
///
/// Declarative mapping for one logical resource type.
/// Attribute and relationship order is significant: it is the projection and
/// include-traversal order.
///

#[derive(Clone, Debug)]
pub struct ResourceDescriptor {
    type_name: String,
    shape: Option<String>,
    identity: IdentityRule,
    attributes: Vec<AttributeDescriptor>,
    relationships: Vec<RelationshipDescriptor>,
}

impl ResourceDescriptor {
    #[must_use]
    pub fn builder(type_name: impl Into<String>) -> ResourceDescriptorBuilder {
        ResourceDescriptorBuilder::new(type_name.into())
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Originating shape name (for example `ArticleResource`), if declared.
    #[must_use]
    pub fn shape(&self) -> Option<&str> {
        self.shape.as_deref()
    }

    #[must_use]
    pub const fn identity(&self) -> &IdentityRule {
        &self.identity
    }

    #[must_use]
    pub fn attributes(&self) -> &[AttributeDescriptor] {
        &self.attributes
    }

    #[must_use]
    pub fn relationships(&self) -> &[RelationshipDescriptor] {
        &self.relationships
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.attributes.iter().find(|attr| attr.name() == name)
    }

    #[must_use]
    pub fn relationship(&self, name: &str) -> Option<&RelationshipDescriptor> {
        self.relationships.iter().find(|rel| rel.name() == name)
    }
}

///
/// ResourceDescriptorBuilder
///

#[derive(Debug)]
pub struct ResourceDescriptorBuilder {
    inner: ResourceDescriptor,
}

impl ResourceDescriptorBuilder {
    fn new(type_name: String) -> Self {
        Self {
            inner: ResourceDescriptor {
                type_name,
                shape: None,
                identity: IdentityRule::default(),
                attributes: Vec::new(),
                relationships: Vec::new(),
            },
        }
    }

    #[must_use]
    pub fn shape(mut self, shape: impl Into<String>) -> Self {
        self.inner.shape = Some(shape.into());
        self
    }

    #[must_use]
    pub fn identity(mut self, rule: IdentityRule) -> Self {
        self.inner.identity = rule;
        self
    }

    #[must_use]
    pub fn id_field(self, field: impl Into<String>) -> Self {
        self.identity(IdentityRule::field(field))
    }

    /// Add a plain attribute exposed under its source name.
    #[must_use]
    pub fn attr(self, source: impl Into<String>) -> Self {
        self.attribute(AttributeDescriptor::new(source))
    }

    #[must_use]
    pub fn attrs<I, S>(self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        sources
            .into_iter()
            .fold(self, |builder, source| builder.attr(source))
    }

    #[must_use]
    pub fn attribute(mut self, attribute: AttributeDescriptor) -> Self {
        self.inner.attributes.push(attribute);
        self
    }

    #[must_use]
    pub fn relationship(mut self, relationship: RelationshipDescriptor) -> Self {
        self.inner.relationships.push(relationship);
        self
    }

    #[must_use]
    pub fn build(self) -> ResourceDescriptor {
        self.inner
    }
}
