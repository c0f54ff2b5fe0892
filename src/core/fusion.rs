use crate::core::reconcile::Reconciliation;
use crate::models::{MatchResult, ParcelRecord};

/// Final verdict: the address must corroborate and either document must
/// carry the owner's name. Only presence counts, never scores.
#[inline]
pub fn fuse(address_match: bool, name_from_deed: Option<&str>, name_from_id: Option<&str>) -> bool {
    address_match && (name_from_deed.is_some() || name_from_id.is_some())
}

/// Everything gathered by the pipeline for one verification
#[derive(Debug, Clone)]
pub struct Evidence {
    pub extracted_address: String,
    pub parcel: ParcelRecord,
    pub reconciliation: Reconciliation,
    pub deed_names: Vec<String>,
    pub id_names: Vec<String>,
    pub matched_name_from_deed: Option<String>,
    pub matched_name_from_id: Option<String>,
}

impl Evidence {
    /// Assemble the full payload; diagnostics are kept whatever the verdict
    pub fn into_result(self) -> MatchResult {
        let verdict = fuse(
            self.reconciliation.is_match,
            self.matched_name_from_deed.as_deref(),
            self.matched_name_from_id.as_deref(),
        );

        MatchResult {
            verdict,
            address_match: self.reconciliation.is_match,
            address_tokens_matched: self.reconciliation.tokens_present,
            extracted_address: self.extracted_address,
            deed_names: self.deed_names,
            id_names: self.id_names,
            name_match_from_deed: self.matched_name_from_deed.is_some(),
            name_match_from_id: self.matched_name_from_id.is_some(),
            matched_name_from_deed: self.matched_name_from_deed,
            matched_name_from_id: self.matched_name_from_id,
            registry_owner: self.parcel.owner,
            registry_address: self.parcel.display_address,
            valuation: self.parcel.valuation,
        }
    }
}
