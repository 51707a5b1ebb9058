use serde_json::{Map, Value};

///
/// RequestContext
///
/// Per-request inputs owned by the host: where the request was addressed
/// and any extra top-level meta to merge into the document.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestContext {
    pub base_url: Option<String>,
    pub path: Option<String>,
    pub meta: Map<String, Value>,
}

impl RequestContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }
}
