use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to verify a deed/ID pair
///
/// Both images are base64-encoded in the JSON body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "deed")]
    pub title: String,
    #[validate(length(min = 1))]
    pub id: String,
}

impl VerifyRequest {
    /// Decode both images, deed first
    pub fn decode(&self) -> Result<(Vec<u8>, Vec<u8>), base64::DecodeError> {
        let deed = STANDARD.decode(self.title.trim())?;
        let id = STANDARD.decode(self.id.trim())?;
        Ok((deed, id))
    }
}
