use crate::services::{CollaboratorError, RegistryError};
use thiserror::Error;

/// Terminal failures of a verification. None of them is retried.
#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("Address not found in deed text")]
    AddressNotFound,

    #[error("Failed to fetch parcel from registry: {0}")]
    RegistryUnavailable(String),

    #[error("No parcel found for the given address: {0}")]
    ParcelNotFound(String),

    #[error("Unexpected failure: {0}")]
    UnexpectedFailure(String),
}

impl VerificationError {
    /// Stable machine-readable name
    pub fn kind(&self) -> &'static str {
        match self {
            VerificationError::AddressNotFound => "address_not_found",
            VerificationError::RegistryUnavailable(_) => "registry_unavailable",
            VerificationError::ParcelNotFound(_) => "parcel_not_found",
            VerificationError::UnexpectedFailure(_) => "unexpected_failure",
        }
    }
}

impl From<RegistryError> for VerificationError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(address) => VerificationError::ParcelNotFound(address),
            RegistryError::RequestError(_) | RegistryError::Status(_) => {
                VerificationError::RegistryUnavailable(err.to_string())
            }
            RegistryError::InvalidResponse(_) => VerificationError::UnexpectedFailure(err.to_string()),
        }
    }
}

impl From<CollaboratorError> for VerificationError {
    fn from(err: CollaboratorError) -> Self {
        VerificationError::UnexpectedFailure(err.to_string())
    }
}
