use crate::{
    DEFAULT_ID_FIELD,
    value::{Row, identifier_text},
};
use std::{fmt, sync::Arc};

///
/// IdentityFn
///

pub type IdentityFn = Arc<dyn Fn(&dyn Row) -> Option<String> + Send + Sync>;

///
/// IdentityRule
///
/// How a resource identifier is read from a raw object: a named field, or a
/// derivation function for composite or computed identifiers.
///

#[derive(Clone)]
pub enum IdentityRule {
    Field(String),
    Derive(IdentityFn),
}

impl IdentityRule {
    #[must_use]
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }

    #[must_use]
    pub fn derive<F>(f: F) -> Self
    where
        F: Fn(&dyn Row) -> Option<String> + Send + Sync + 'static,
    {
        Self::Derive(Arc::new(f))
    }

    /// Resolve a non-empty identifier for `object`, if one can be derived.
    #[must_use]
    pub fn resolve(&self, object: &dyn Row) -> Option<String> {
        let id = match self {
            Self::Field(name) => object.field(name).value().and_then(identifier_text),
            Self::Derive(f) => f(object),
        };

        id.filter(|id| !id.is_empty())
    }
}

impl Default for IdentityRule {
    fn default() -> Self {
        Self::Field(DEFAULT_ID_FIELD.to_string())
    }
}

impl fmt::Debug for IdentityRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Self::Derive(_) => f.write_str("Derive(..)"),
        }
    }
}
