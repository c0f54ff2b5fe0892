//! Deedcheck - ownership verification for property deeds
//!
//! Cross-references the names and address read from a scanned deed and an
//! identity document against the owner of record in a parcel registry, and
//! returns a verdict together with the evidence behind it.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{Collaborators, MatchPolicy, VerificationError, Verifier};
pub use models::{AddressComponents, Entity, MatchResult, ParcelRecord, Valuation, VerifyRequest};
