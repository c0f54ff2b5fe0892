use crate::models::AddressComponents;

/// Default number of registry address tokens that must appear in the deed
pub const DEFAULT_MIN_ADDRESS_TOKENS: usize = 3;

/// Outcome of comparing registry address tokens against deed text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciliation {
    pub tokens_present: usize,
    pub is_match: bool,
}

/// Token-overlap check between a registry address and raw deed text
///
/// Containment is a plain substring test on the upper-cased text. It is not
/// position-aware, so "ST" is found inside "STATE" and a zip code anywhere
/// in the deed counts.
#[derive(Debug, Clone, Copy)]
pub struct AddressReconciler {
    min_tokens: usize,
}

impl AddressReconciler {
    pub fn new(min_tokens: usize) -> Self {
        Self { min_tokens }
    }

    pub fn min_tokens(&self) -> usize {
        self.min_tokens
    }

    pub fn reconcile(&self, components: &AddressComponents, deed_text: &str) -> Reconciliation {
        let deed_upper = deed_text.to_uppercase();

        let tokens_present = components
            .tokens()
            .iter()
            .map(|token| token.trim())
            .filter(|token| !token.is_empty() && deed_upper.contains(&token.to_uppercase()))
            .count();

        Reconciliation {
            tokens_present,
            is_match: tokens_present >= self.min_tokens,
        }
    }
}

impl Default for AddressReconciler {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_ADDRESS_TOKENS)
    }
}
