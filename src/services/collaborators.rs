use crate::models::{Entity, ParcelRecord};
use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by the text and entity extractors
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Service returned error: {0}")]
    ServiceError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Errors raised by the parcel registry
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Registry returned status {0}")]
    Status(u16),

    #[error("No parcel found for {0}")]
    NotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Turns a raster image into plain text
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, image: &[u8]) -> Result<String, CollaboratorError>;
}

/// Finds named entities in plain text, in document order
#[async_trait]
pub trait EntityExtractor: Send + Sync {
    async fn extract_entities(&self, text: &str) -> Result<Vec<Entity>, CollaboratorError>;
}

/// Looks up the parcel at an address within a jurisdiction
#[async_trait]
pub trait RegistryClient: Send + Sync {
    async fn lookup_parcel(&self, address: &str, jurisdiction: &str) -> Result<ParcelRecord, RegistryError>;
}
