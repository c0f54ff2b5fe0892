use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use deedcheck::config::Settings;
use deedcheck::routes::{self, verify::AppState};
use deedcheck::services::{NerServiceClient, RegridClient, TesseractExtractor};
use deedcheck::{Collaborators, Verifier};
use std::sync::Arc;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

/// Default request body limit: two scanned pages, base64-inflated
const DEFAULT_MAX_PAYLOAD_BYTES: usize = 20 * 1024 * 1024;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    let status_code = match err {
        error::JsonPayloadError::Overflow { .. } | error::JsonPayloadError::OverflowKnownLength { .. } => 413,
        _ => 400,
    };
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }

    info!("Starting deedcheck verification service...");

    // Load configuration
    let settings = Settings::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    info!("Configuration loaded successfully");

    // Initialize collaborators
    let text = TesseractExtractor::new(&settings.extraction.tesseract_path)
        .with_language(&settings.extraction.ocr_language);

    let entities = NerServiceClient::new(
        settings.extraction.ner_endpoint.clone(),
        settings.extraction.ner_timeout(),
    )
    .map_err(|e| {
        error!("Failed to create NER client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e)
    })?;

    let registry = RegridClient::new(
        settings.registry.endpoint.clone(),
        settings.registry.api_key.clone(),
        settings.registry.timeout(),
    )
    .map_err(|e| {
        error!("Failed to create registry client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e)
    })?;

    info!(
        "Collaborators initialized (tesseract: {}, ner: {}, registry: {})",
        settings.extraction.tesseract_path, settings.extraction.ner_endpoint, settings.registry.endpoint
    );

    let collaborators = Collaborators {
        text: Arc::new(text),
        entities: Arc::new(entities),
        registry: Arc::new(registry),
    };

    // Initialize verifier with configured matching policy
    let policy = settings.matching.policy();
    let verifier = Verifier::new(collaborators, &policy, settings.registry.jurisdiction_path.clone())
        .map_err(|e| {
            error!("Invalid matching configuration: {}", e);
            std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
        })?;

    info!(
        "Verifier initialized for {} (fuzzy threshold: {}, address tokens: {}/5)",
        verifier.jurisdiction(),
        policy.fuzzy_threshold,
        policy.min_address_tokens
    );

    // Build application state
    let app_state = AppState { verifier };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);
    let max_payload = settings.server.max_payload_bytes.unwrap_or(DEFAULT_MAX_PAYLOAD_BYTES);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(
                web::JsonConfig::default()
                    .limit(max_payload)
                    .error_handler(handle_json_payload_error),
            )
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
