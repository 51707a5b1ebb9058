//! Resource registry.
//!
//! Descriptors are keyed by type name and, secondarily, by a shape key derived
//! from the originating shape name. Reads are concurrent; registration takes
//! the write lock. Re-registering a type name overwrites (last writer wins).


use crate::{SHAPE_SUFFIXES, model::ResourceDescriptor};
use std::{
    collections::HashMap,
    sync::{Arc, LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};
use thiserror::Error as ThisError;
use tracing::debug;

///
/// RegistryError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum RegistryError {
    #[error("no resource descriptor registered for '{key}'")]
    DescriptorNotFound { key: String },
}

///
/// GLOBAL
/// process-wide registry for hosts that register at startup
///

static GLOBAL: LazyLock<Registry> = LazyLock::new(Registry::new);

///
/// RegistryState
///

#[derive(Debug, Default)]
struct RegistryState {
    by_type: HashMap<String, Arc<ResourceDescriptor>>,
    by_shape: HashMap<String, String>,
}

///
/// Registry
///

#[derive(Debug, Default)]
pub struct Registry {
    state: RwLock<RegistryState>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry, created on first use.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    // Descriptors are immutable once stored, so a poisoned lock still guards
    // consistent data.
    fn read(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a descriptor, replacing any previous one with the same type name.
    pub fn register(&self, descriptor: ResourceDescriptor) -> Arc<ResourceDescriptor> {
        let descriptor = Arc::new(descriptor);
        let type_name = descriptor.type_name().to_string();
        let mut state = self.write();

        if let Some(previous) = state.by_type.get(&type_name)
            && let Some(shape) = previous.shape()
        {
            let stale = shape_key(shape);
            if state.by_shape.get(&stale) == Some(&type_name) {
                state.by_shape.remove(&stale);
            }
        }

        if let Some(shape) = descriptor.shape() {
            state.by_shape.insert(shape_key(shape), type_name.clone());
        }

        let replaced = state
            .by_type
            .insert(type_name.clone(), Arc::clone(&descriptor))
            .is_some();

        debug!(resource = %type_name, replaced, "registered resource descriptor");

        descriptor
    }

    /// Look up a descriptor by type name, falling back to the shape key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Arc<ResourceDescriptor>> {
        let state = self.read();

        if let Some(descriptor) = state.by_type.get(key) {
            return Some(Arc::clone(descriptor));
        }

        state
            .by_shape
            .get(&shape_key(key))
            .and_then(|type_name| state.by_type.get(type_name))
            .cloned()
    }

    /// Like [`get`](Self::get), but a miss is an error.
    pub fn resolve(&self, key: &str) -> Result<Arc<ResourceDescriptor>, RegistryError> {
        self.get(key)
            .ok_or_else(|| RegistryError::DescriptorNotFound {
                key: key.to_string(),
            })
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().by_type.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Derive the registry shape key: strip one known suffix, then lower-case.
///
/// `ArticleResource` → `article`, `CommentSerializer` → `comment`.
#[must_use]
pub fn shape_key(shape: &str) -> String {
    let stem = SHAPE_SUFFIXES
        .iter()
        .find_map(|suffix| shape.strip_suffix(suffix).filter(|stem| !stem.is_empty()))
        .unwrap_or(shape);

    stem.to_lowercase()
}
