use crate::{config::ConfigError, project::ProjectionError, registry::RegistryError};
use serde::Serialize;
use thiserror::Error as ThisError;

///
/// Error
///
/// Operation-level failure for one serialize call.
/// Any variant aborts the whole document; partial documents are never emitted.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Projection(#[from] ProjectionError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("document encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

impl Error {
    /// Stable classification for host-side mapping.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Registry(RegistryError::DescriptorNotFound { .. }) => ErrorClass::NotFound,
            Self::Projection(_) => ErrorClass::Unresolvable,
            Self::Config(_) | Self::Encode(_) => ErrorClass::Internal,
        }
    }

    /// Short machine-readable code, stable across releases.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Registry(RegistryError::DescriptorNotFound { .. }) => "descriptor_not_found",
            Self::Projection(ProjectionError::RelationshipResolution { .. }) => {
                "relationship_resolution"
            }
            Self::Projection(ProjectionError::IdentityResolution { .. }) => "identity_resolution",
            Self::Config(_) => "config",
            Self::Encode(_) => "encode",
        }
    }

    /// Render this error as a single-entry error document.
    #[must_use]
    pub fn to_document(&self) -> ErrorDocument {
        let class = self.class();

        ErrorDocument {
            errors: vec![ErrorObject {
                status: class.status().to_string(),
                code: self.code(),
                title: class.title(),
                detail: self.to_string(),
            }],
        }
    }
}

///
/// ErrorClass
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    NotFound,
    Unresolvable,
    Internal,
}

impl ErrorClass {
    /// Suggested HTTP status for hosts that map errors onto transport codes.
    #[must_use]
    pub const fn status(self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::Unresolvable | Self::Internal => 500,
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::NotFound => "Resource descriptor not found",
            Self::Unresolvable => "Resource could not be serialized",
            Self::Internal => "Internal serialization error",
        }
    }
}

///
/// ErrorDocument
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ErrorDocument {
    pub errors: Vec<ErrorObject>,
}

///
/// ErrorObject
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ErrorObject {
    pub status: String,
    pub code: &'static str,
    pub title: &'static str,
    pub detail: String,
}
