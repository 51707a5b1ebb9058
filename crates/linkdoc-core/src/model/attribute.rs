use crate::{model::VisibilityFn, query::QueryPlan, value::Row};
use std::{fmt, sync::Arc};

///
/// AttributeDescriptor
///
/// One exposed field. `source` is the raw-object property, `name` is the
/// exposed attribute key (they differ when the attribute is renamed).
///

#[derive(Clone)]
pub struct AttributeDescriptor {
    source: String,
    name: String,
    visible: Option<VisibilityFn>,
}

impl AttributeDescriptor {
    /// Expose `source` under its own name.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();

        Self {
            name: source.clone(),
            source,
            visible: None,
        }
    }

    #[must_use]
    pub fn rename(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
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
    pub fn is_visible(&self, object: &dyn Row, plan: &QueryPlan) -> bool {
        super::is_visible(self.visible.as_ref(), object, plan)
    }
}

impl fmt::Debug for AttributeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeDescriptor")
            .field("source", &self.source)
            .field("name", &self.name)
            .field("conditional", &self.visible.is_some())
            .finish()
    }
}
