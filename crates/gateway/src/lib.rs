//! HTTP API gateway for HelpDoc.
//!
//! Exposes the chat endpoint, manual and scheduled document sync, sync
//! status, and a health check. The scheduler itself lives outside the
//! process; `/api/cron/sync-docs` only receives its trigger.
//!
//! Built on Axum for high performance async HTTP.

use axum::extract::DefaultBodyLimit;
use axum::extract::rejection::JsonRejection;
use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{error, info, warn};

use helpdoc_config::AppConfig;
use helpdoc_core::answer::{ChatAnswer, SyncStatus};
use helpdoc_core::error::{Error, ErrorKind};
use helpdoc_core::store::KnowledgeStore;
use helpdoc_knowledge::{InMemoryStore, RetrievalPipeline};
use helpdoc_providers::Adapters;

/// Shown when a sync fails because the document is private.
pub const SHARE_GUIDANCE: &str = "The Google Doc must be shared publicly. Go to Share → Change to \"Anyone with the link\" → Viewer";

/// Shared application state for the gateway.
pub struct GatewayState {
    pub pipeline: RetrievalPipeline,
    pub cron_secret: Option<String>,
    pub allowed_origins: Vec<String>,
}

type SharedState = Arc<GatewayState>;

/// Wire a retrieval pipeline from configuration.
pub fn build_pipeline(
    config: &AppConfig,
    store: Arc<dyn KnowledgeStore>,
    adapters: Adapters,
) -> RetrievalPipeline {
    let mut pipeline = RetrievalPipeline::new(store, adapters.source, adapters.generator)
        .with_fetch_on_miss(config.document.fetch_on_miss)
        .with_max_sections(config.retrieval.max_sections);

    if let Some(document_id) = &config.document.document_id {
        pipeline = pipeline.with_document_id(document_id);
    }
    if let Some(max_chars) = config.retrieval.max_context_chars {
        pipeline = pipeline.with_context_budget(max_chars);
    }
    if let Some(instruction) = &config.retrieval.system_prompt_override {
        pipeline = pipeline.with_system_instruction(instruction);
    }
    pipeline
}

/// Build the Axum router with all gateway routes.
///
/// Layers applied:
/// - CORS limited to the configured origins (same-origin only when empty)
/// - Request body size limit (1 MB)
/// - HTTP trace logging
pub fn build_router(state: SharedState) -> Router {
    let cors = cors_layer(&state.allowed_origins);

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/sync", post(sync_handler).get(sync_status_handler))
        .route("/api/cron/sync-docs", get(cron_sync_handler))
        .with_state(state)
        .layer(DefaultBodyLimit::max(1024 * 1024)) // 1 MB body limit
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<axum::http::HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<axum::http::HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
        ])
        .max_age(std::time::Duration::from_secs(3600))
}

/// Start the gateway HTTP server.
///
/// The knowledge store starts empty; the first chat request fetches the
/// document on demand, or an external scheduler calls the sync endpoint.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let store: Arc<dyn KnowledgeStore> = Arc::new(InMemoryStore::new());
    let adapters = helpdoc_providers::build_from_config(&config);
    let pipeline = build_pipeline(&config, store, adapters);

    if pipeline.document_id().is_none() {
        warn!("No document configured; set GOOGLE_DOC_ID before syncing");
    }

    let state = Arc::new(GatewayState {
        pipeline,
        cron_secret: config.sync.cron_secret.clone(),
        allowed_origins: config.gateway.allowed_origins.clone(),
    });

    let app = build_router(state);

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    generator: &'static str,
}

async fn health_handler(State(state): State<SharedState>) -> Json<HealthResponse> {
    let generator = if state.pipeline.generator_ready().await {
        "ready"
    } else {
        "unconfigured"
    };
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        generator,
    })
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

#[derive(Deserialize)]
struct ChatRequest {
    #[serde(default)]
    message: Option<String>,
}

async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatAnswer>, ApiError> {
    let message = match payload {
        Ok(Json(ChatRequest {
            message: Some(message),
        })) if !message.trim().is_empty() => message,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return Err(api_error(
                StatusCode::PAYLOAD_TOO_LARGE,
                "Request body too large",
            ));
        }
        _ => return Err(api_error(StatusCode::BAD_REQUEST, "Message is required")),
    };

    info!(message_len = message.len(), "Chat request");

    match state.pipeline.answer(&message).await {
        Ok(answer) => Ok(Json(answer)),
        Err(e) => {
            error!(error = %e, "Chat request failed");
            Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "An error occurred while processing your request",
            ))
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SyncResponse {
    success: bool,
    message: String,
    sections_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
struct SyncFailure {
    success: bool,
    error: &'static str,
    message: String,
    details: String,
}

/// User guidance for a failed sync.
fn sync_error_details(err: &Error) -> String {
    match err.kind() {
        ErrorKind::AccessDenied => SHARE_GUIDANCE.to_string(),
        _ => err.to_string(),
    }
}

/// Sync the configured document and render the outcome.
async fn run_sync(state: &GatewayState, stamp: bool) -> (StatusCode, axum::response::Response) {
    use axum::response::IntoResponse;

    match state.pipeline.sync_configured().await {
        Ok(report) if report.sections_count == 0 => (
            StatusCode::OK,
            Json(SyncResponse {
                success: false,
                message: "No sections found in the document. Check that it has content and is shared publicly.".into(),
                sections_count: 0,
                timestamp: None,
            })
            .into_response(),
        ),
        Ok(report) => (
            StatusCode::OK,
            Json(SyncResponse {
                success: true,
                message: "Document synced successfully".into(),
                sections_count: report.sections_count,
                timestamp: stamp.then(Utc::now),
            })
            .into_response(),
        ),
        Err(e) if e.kind() == ErrorKind::Config => {
            error!(error = %e, "Sync requested without a configured document");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "GOOGLE_DOC_ID not configured".into(),
                })
                .into_response(),
            )
        }
        Err(e) => {
            error!(error = %e, "Sync failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SyncFailure {
                    success: false,
                    error: "Failed to sync document",
                    message: e.to_string(),
                    details: sync_error_details(&e),
                })
                .into_response(),
            )
        }
    }
}

async fn sync_handler(State(state): State<SharedState>) -> (StatusCode, axum::response::Response) {
    run_sync(&state, false).await
}

async fn sync_status_handler(State(state): State<SharedState>) -> Json<SyncStatus> {
    Json(state.pipeline.status())
}

/// Scheduled sync. Requires `Authorization: Bearer <cron_secret>` when a
/// secret is configured.
async fn cron_sync_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<(StatusCode, axum::response::Response), ApiError> {
    if let Some(secret) = state.cron_secret.as_deref() {
        let provided = headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));

        if provided != Some(secret) {
            warn!("Unauthorized cron sync request");
            return Err(api_error(StatusCode::UNAUTHORIZED, "Unauthorized"));
        }
    }

    info!("Scheduled sync triggered");
    Ok(run_sync(&state, true).await)
}
