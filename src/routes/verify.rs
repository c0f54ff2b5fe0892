use actix_web::{http::StatusCode, web, HttpResponse, Responder, ResponseError};
use tracing::Instrument;
use validator::Validate;
use crate::core::{Verifier, VerificationError};
use crate::models::{ErrorResponse, HealthResponse, VerificationFailure, VerifyRequest};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub verifier: Verifier,
}

/// Configure verification routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/verify", web::post().to(verify));
}

impl ResponseError for VerificationError {
    fn status_code(&self) -> StatusCode {
        match self {
            VerificationError::AddressNotFound => StatusCode::BAD_REQUEST,
            VerificationError::ParcelNotFound(_) => StatusCode::NOT_FOUND,
            VerificationError::RegistryUnavailable(_) | VerificationError::UnexpectedFailure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(VerificationFailure {
            verdict: false,
            kind: self.kind().to_string(),
            error: self.to_string(),
        })
    }
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Verify ownership endpoint
///
/// POST /api/v1/verify
///
/// Request body:
/// ```json
/// {
///   "title": "<base64 deed image>",
///   "id": "<base64 ID image>"
/// }
/// ```
///
/// Both images travel base64-encoded in one JSON body. The legacy upload
/// sent them as multipart file fields `title` and `id`; those clients must
/// re-encode before calling this endpoint.
async fn verify(state: web::Data<AppState>, req: web::Json<VerifyRequest>) -> HttpResponse {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let (deed, id) = match req.decode() {
        Ok(images) => images,
        Err(e) => {
            tracing::info!("Rejected verify request with undecodable image: {}", e);
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid image encoding".to_string(),
                message: format!("Images must be base64 encoded: {}", e),
                status_code: 400,
            });
        }
    };

    let span = tracing::info_span!("verify", request_id = %uuid::Uuid::new_v4());

    async move {
        tracing::info!("Verifying deed ({} bytes) against ID ({} bytes)", deed.len(), id.len());

        match state.verifier.verify(&deed, &id).await {
            Ok(result) => HttpResponse::Ok().json(result),
            Err(e) => {
                tracing::warn!("Verification failed ({}): {}", e.kind(), e);
                e.error_response()
            }
        }
    }
    .instrument(span)
    .await
}
