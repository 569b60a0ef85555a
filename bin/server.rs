// Resale Price Estimator - Web Server
// JSON API over the estimation engine, plus the selection-cascade
// endpoints the page uses to offer only valid choices.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use resale_estimator::{estimate, Dataset, Estimation, Query};

/// Shared application state. The dataset is an immutable snapshot, so it
/// is shared read-only across requests with no locking.
#[derive(Clone)]
struct AppState {
    dataset: Arc<Dataset>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

/// Estimate response: the engine outcome plus display messaging for the
/// two negative cases.
#[derive(Serialize)]
struct EstimateResponse {
    #[serde(flatten)]
    estimation: Estimation,
    #[serde(skip_serializing_if = "String::is_empty")]
    message: String,
}

impl From<Estimation> for EstimateResponse {
    fn from(estimation: Estimation) -> Self {
        let message = estimation.message().to_string();
        Self { estimation, message }
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/streets - All street names in the dataset
async fn get_streets(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.dataset.streets()))
}

/// GET /api/blocks/:street - Blocks on a street
async fn get_blocks(
    State(state): State<AppState>,
    Path(street): Path<String>,
) -> impl IntoResponse {
    let street = decode_segment(&street);
    Json(ApiResponse::ok(state.dataset.blocks_on_street(&street)))
}

/// GET /api/flat-types/:street/:block - Flat types at a street/block
async fn get_flat_types(
    State(state): State<AppState>,
    Path((street, block)): Path<(String, String)>,
) -> impl IntoResponse {
    let street = decode_segment(&street);
    let block = decode_segment(&block);
    Json(ApiResponse::ok(state.dataset.flat_types(&street, &block)))
}

/// GET /api/floors/:street/:block - Floor numbers observed at a block
async fn get_floors(
    State(state): State<AppState>,
    Path((street, block)): Path<(String, String)>,
) -> impl IntoResponse {
    let street = decode_segment(&street);
    let block = decode_segment(&block);
    Json(ApiResponse::ok(
        state.dataset.floors_for_block(&street, &block),
    ))
}

/// POST /api/estimate - Run one estimation query
async fn post_estimate(
    State(state): State<AppState>,
    Json(query): Json<Query>,
) -> impl IntoResponse {
    let outcome = estimate(&state.dataset, &query);
    (
        StatusCode::OK,
        Json(ApiResponse::ok(EstimateResponse::from(outcome))),
    )
}

/// Decode a URL-encoded path segment (street names contain spaces).
fn decode_segment(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}

/// GET / - Serve the single-page UI
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() {
    println!("🏠 Resale Price Estimator - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let data_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "hdb_data.gz".to_string());

    let dataset = match Dataset::load(&data_path) {
        Ok(dataset) => dataset,
        Err(e) => {
            eprintln!("❌ Failed to load dataset from {}: {:#}", data_path, e);
            eprintln!("   Pass the data file path as the first argument.");
            std::process::exit(1);
        }
    };
    println!("✓ Loaded {} transactions from {}", dataset.len(), data_path);

    let state = AppState {
        dataset: Arc::new(dataset),
    };

    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/streets", get(get_streets))
        .route("/blocks/:street", get(get_blocks))
        .route("/flat-types/:street/:block", get(get_flat_types))
        .route("/floors/:street/:block", get(get_floors))
        .route("/estimate", post(post_estimate))
        .with_state(state);

    // Build main router
    let app = Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive());

    // Start server
    let addr = "0.0.0.0:3000";
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    println!("\n🚀 Server running on http://localhost:3000");
    println!("   API: http://localhost:3000/api/streets");
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
