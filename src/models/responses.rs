use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response for request-level failures (bad JSON, bad base64)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Error response for a verification that failed inside the pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationFailure {
    #[serde(rename = "match")]
    pub verdict: bool,
    pub kind: String,
    pub error: String,
}
