use crate::models::Entity;
use crate::services::collaborators::{CollaboratorError, EntityExtractor};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct NerRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct NerResponse {
    #[serde(default)]
    entities: Vec<Entity>,
}

/// Client for an NER sidecar service
///
/// `POST {endpoint}` with `{"text": ...}`, answered by
/// `{"entities": [{"text": ..., "label": ...}]}`.
pub struct NerServiceClient {
    endpoint: String,
    client: Client,
}

impl NerServiceClient {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, CollaboratorError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { endpoint, client })
    }
}

#[async_trait]
impl EntityExtractor for NerServiceClient {
    async fn extract_entities(&self, text: &str) -> Result<Vec<Entity>, CollaboratorError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let response = self
            .client
            .post(&self.endpoint)
            .json(&NerRequest { text })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CollaboratorError::ServiceError(format!(
                "NER service returned {}",
                response.status()
            )));
        }

        let body: NerResponse = response
            .json()
            .await
            .map_err(|e| CollaboratorError::InvalidResponse(format!("Failed to parse entities: {}", e)))?;

        tracing::debug!("NER service returned {} entities", body.entities.len());

        Ok(body.entities)
    }
}
