use crate::core::{
    address::{AddressLocator, LocatorError},
    error::VerificationError,
    fusion::Evidence,
    names::{candidate_names, NameMatcher},
    reconcile::AddressReconciler,
    MatchPolicy,
};
use crate::models::MatchResult;
use crate::services::{EntityExtractor, RegistryClient, TextExtractor};
use std::sync::Arc;

/// External services the pipeline depends on, shared across requests
#[derive(Clone)]
pub struct Collaborators {
    pub text: Arc<dyn TextExtractor>,
    pub entities: Arc<dyn EntityExtractor>,
    pub registry: Arc<dyn RegistryClient>,
}

/// Text and candidate names read from one document image
#[derive(Debug)]
struct Document {
    text: String,
    names: Vec<String>,
}

/// Verification pipeline orchestrator
///
/// # Pipeline Stages
/// 1. Text extraction (deed and ID, concurrently)
/// 2. Person-name extraction
/// 3. Address location in the deed
/// 4. Registry lookup
/// 5. Owner name matching against both documents
/// 6. Address reconciliation
/// 7. Decision fusion
///
/// Holds no per-request state; one instance serves every request.
#[derive(Clone)]
pub struct Verifier {
    collaborators: Collaborators,
    locator: AddressLocator,
    names: NameMatcher,
    reconciler: AddressReconciler,
    jurisdiction: String,
}

impl Verifier {
    pub fn new(
        collaborators: Collaborators,
        policy: &MatchPolicy,
        jurisdiction: impl Into<String>,
    ) -> Result<Self, LocatorError> {
        Ok(Self {
            collaborators,
            locator: AddressLocator::new(&policy.street_types)?,
            names: NameMatcher::new(policy.fuzzy_threshold),
            reconciler: AddressReconciler::new(policy.min_address_tokens),
            jurisdiction: jurisdiction.into(),
        })
    }

    pub fn jurisdiction(&self) -> &str {
        &self.jurisdiction
    }

    /// Verify that the holder of `id_image` owns the parcel in `deed_image`
    pub async fn verify(&self, deed_image: &[u8], id_image: &[u8]) -> Result<MatchResult, VerificationError> {
        let (deed, id) = tokio::try_join!(
            self.read_document(deed_image, "deed"),
            self.read_document(id_image, "id"),
        )?;

        let extracted_address = self
            .locator
            .locate(&deed.text)
            .ok_or(VerificationError::AddressNotFound)?;

        tracing::info!("Deed address located: {}", extracted_address);

        let parcel = self
            .collaborators
            .registry
            .lookup_parcel(&extracted_address, &self.jurisdiction)
            .await?;

        let matched_name_from_deed = self
            .names
            .select_first(&deed.names, &parcel.owner)
            .map(str::to_string);
        let matched_name_from_id = self
            .names
            .select_first(&id.names, &parcel.owner)
            .map(str::to_string);

        let reconciliation = self.reconciler.reconcile(&parcel.address_components, &deed.text);

        tracing::debug!(
            "Reconciled {} address tokens (need {}), deed name: {:?}, id name: {:?}",
            reconciliation.tokens_present,
            self.reconciler.min_tokens(),
            matched_name_from_deed,
            matched_name_from_id
        );

        let result = Evidence {
            extracted_address,
            parcel,
            reconciliation,
            deed_names: deed.names,
            id_names: id.names,
            matched_name_from_deed,
            matched_name_from_id,
        }
        .into_result();

        tracing::info!(
            "Verification complete: match={}, address_match={}, deed_name={}, id_name={}",
            result.verdict,
            result.address_match,
            result.name_match_from_deed,
            result.name_match_from_id
        );

        Ok(result)
    }

    async fn read_document(&self, image: &[u8], label: &str) -> Result<Document, VerificationError> {
        let text = self.collaborators.text.extract_text(image).await.map_err(|e| {
            tracing::error!("Text extraction failed for {} image: {}", label, e);
            VerificationError::from(e)
        })?;

        let entities = self.collaborators.entities.extract_entities(&text).await.map_err(|e| {
            tracing::error!("Entity extraction failed for {} text: {}", label, e);
            VerificationError::from(e)
        })?;

        let names = candidate_names(&entities);
        tracing::debug!("{} image: {} characters, {} candidate names", label, text.len(), names.len());

        Ok(Document { text, names })
    }
}
