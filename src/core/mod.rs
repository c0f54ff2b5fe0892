// Core algorithm exports
pub mod address;
pub mod error;
pub mod fusion;
pub mod names;
pub mod reconcile;
pub mod verifier;

pub use address::{AddressLocator, LocatorError, DEFAULT_STREET_TYPES};
pub use error::VerificationError;
pub use fusion::{fuse, Evidence};
pub use names::{candidate_names, initials, partial_ratio, NameMatcher, DEFAULT_FUZZY_THRESHOLD};
pub use reconcile::{AddressReconciler, Reconciliation, DEFAULT_MIN_ADDRESS_TOKENS};
pub use verifier::{Collaborators, Verifier};

/// Tunable matching parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPolicy {
    pub fuzzy_threshold: u8,
    pub min_address_tokens: usize,
    pub street_types: Vec<String>,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            min_address_tokens: DEFAULT_MIN_ADDRESS_TOKENS,
            street_types: DEFAULT_STREET_TYPES.iter().map(|s| s.to_string()).collect(),
        }
    }
}
