use crate::project::{ResourceIdentifier, ResourceObject};
use derive_more::{Deref, IntoIterator};
use std::collections::HashSet;

///
/// IncludedSet
///
/// Side-loaded resources keyed by (type, id).
/// Order is first-seen insertion order; later duplicates are discarded.
///
/// Keys may be claimed without storing a resource: primary data is claimed
/// up front so it is never side-loaded.
///

#[derive(Clone, Debug, Default, Deref, IntoIterator)]
pub struct IncludedSet {
    #[deref]
    #[into_iterator(owned, ref)]
    resources: Vec<ResourceObject>,
    stored: HashSet<ResourceIdentifier>,
    seen: HashSet<ResourceIdentifier>,
}

impl IncludedSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key` as seen. Returns `false` if it was already seen.
    pub fn claim(&mut self, key: ResourceIdentifier) -> bool {
        self.seen.insert(key)
    }

    #[must_use]
    pub fn contains(&self, key: &ResourceIdentifier) -> bool {
        self.seen.contains(key)
    }

    /// Store a projected resource under its own key.
    /// Returns `false` (and drops `resource`) when the key holds a resource.
    pub fn insert(&mut self, resource: ResourceObject) -> bool {
        let key = resource.identifier();
        if !self.stored.insert(key.clone()) {
            return false;
        }

        self.seen.insert(key);
        self.resources.push(resource);

        true
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<ResourceObject> {
        self.resources
    }
}
