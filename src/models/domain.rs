use serde::{Deserialize, Serialize};

/// Entity label produced by the NER collaborator for person names
pub const PERSON_LABEL: &str = "PERSON";

/// A named entity as returned by the entity extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: String,
}

impl Entity {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

/// Situs address of a parcel, split the way the registry stores it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressComponents {
    pub house_number: String,
    pub street_name: String,
    pub street_type: String,
    pub city: String,
    pub zip: String,
}

impl AddressComponents {
    /// Tokens in reconciliation order: number, street, type, city, zip
    pub fn tokens(&self) -> [&str; 5] {
        [
            self.house_number.as_str(),
            self.street_name.as_str(),
            self.street_type.as_str(),
            self.city.as_str(),
            self.zip.as_str(),
        ]
    }
}

/// Assessed values for a parcel. Missing values are reported as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    #[serde(rename = "total_value")]
    pub total: f64,
    #[serde(rename = "land_value")]
    pub land: f64,
    #[serde(rename = "improvement_value")]
    pub improvement: f64,
}

/// The registry's answer for one address query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParcelRecord {
    pub owner: String,
    pub address_components: AddressComponents,
    pub display_address: String,
    pub valuation: Valuation,
}

/// Full evidence payload for one verification
///
/// Serialized field names match the public API consumed by the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "match")]
    pub verdict: bool,
    #[serde(rename = "deed_address_match")]
    pub address_match: bool,
    pub address_tokens_matched: usize,
    pub extracted_address: String,
    #[serde(rename = "extracted_deed_names")]
    pub deed_names: Vec<String>,
    #[serde(rename = "extracted_id_names")]
    pub id_names: Vec<String>,
    pub matched_name_from_deed: Option<String>,
    pub matched_name_from_id: Option<String>,
    #[serde(rename = "owner_name_match_from_deed")]
    pub name_match_from_deed: bool,
    #[serde(rename = "owner_name_match_from_id")]
    pub name_match_from_id: bool,
    #[serde(rename = "regrid_owner")]
    pub registry_owner: String,
    #[serde(rename = "regrid_address")]
    pub registry_address: String,
    pub valuation: Valuation,
}
