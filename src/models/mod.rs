// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{AddressComponents, Entity, MatchResult, ParcelRecord, Valuation, PERSON_LABEL};
pub use requests::VerifyRequest;
pub use responses::{ErrorResponse, HealthResponse, VerificationFailure};
