//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::error::{Error, ErrorKind};
use crate::geo::GeoBackend;
use crate::location::{Coordinates, Location};
use crate::position::PositionProvider;
use crate::server::state::AppState;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Create the API router
pub fn create_router<B, P>(state: Arc<AppState<B, P>>) -> Router
where
    B: GeoBackend + 'static,
    P: PositionProvider + 'static,
{
    Router::new()
        .route("/api/search", get(search_handler::<B, P>))
        .route("/api/reverse", get(reverse_handler::<B, P>))
        .route("/api/initial", get(initial_handler::<B, P>))
        .route("/api/locate", post(locate_handler::<B, P>))
        .route(
            "/api/history",
            get(history_handler::<B, P>)
                .post(select_handler::<B, P>)
                .delete(clear_history_handler::<B, P>),
        )
        .route("/api/status", get(status_handler::<B, P>))
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: ErrorKind,
}

/// HTTP status for an error kind
fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidCoordinates => StatusCode::BAD_REQUEST,
        ErrorKind::PermissionDenied | ErrorKind::PermissionDeniedForever => StatusCode::FORBIDDEN,
        ErrorKind::ServicesDisabled => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
        ErrorKind::NoConnection
        | ErrorKind::ServerError
        | ErrorKind::MalformedResponse
        | ErrorKind::ProviderError
        | ErrorKind::MissingCoordinates => StatusCode::BAD_GATEWAY,
        ErrorKind::Config | ErrorKind::Io | ErrorKind::Server => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (status_for(self.code), Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError {
            code: err.kind(),
            error: err.to_string(),
        }
    }
}

/// Search query parameters
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Search response
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<Location>,
    /// A newer search replaced this one; ignore the empty results
    pub superseded: bool,
}

/// Debounced place search
///
/// GET /api/search?q=
async fn search_handler<B: GeoBackend, P: PositionProvider>(
    State(state): State<Arc<AppState<B, P>>>,
    Query(query): Query<SearchQuery>,
) -> Json<SearchResponse> {
    let outcome = state.coordinator.search(&query.q).await;
    Json(SearchResponse {
        query: query.q,
        superseded: outcome.is_none(),
        results: outcome.unwrap_or_default(),
    })
}

/// Reverse geocoding query parameters
#[derive(Debug, Deserialize)]
pub struct ReverseQuery {
    pub lat: f64,
    #[serde(alias = "lng")]
    pub lon: f64,
}

/// Place at a coordinate, or null
///
/// GET /api/reverse?lat=&lon=
async fn reverse_handler<B: GeoBackend, P: PositionProvider>(
    State(state): State<Arc<AppState<B, P>>>,
    Query(query): Query<ReverseQuery>,
) -> Result<Json<Option<Location>>, ApiError> {
    let coords = Coordinates::new(query.lat, query.lon);
    coords.validate()?;
    let location = state.coordinator.backend().reverse(coords).await?;
    Ok(Json(location))
}

/// Initial location from the fallback chain, or null
///
/// GET /api/initial
async fn initial_handler<B: GeoBackend, P: PositionProvider>(
    State(state): State<Arc<AppState<B, P>>>,
) -> Result<Json<Option<Location>>, ApiError> {
    Ok(Json(state.resolver.resolve_initial(None).await?))
}

/// Current device location
///
/// POST /api/locate
async fn locate_handler<B: GeoBackend, P: PositionProvider>(
    State(state): State<Arc<AppState<B, P>>>,
) -> Result<Json<Location>, ApiError> {
    Ok(Json(state.resolver.current_location().await?))
}

/// History list response
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub entries: Vec<Location>,
    pub count: usize,
}

impl HistoryResponse {
    fn new(entries: Vec<Location>) -> Self {
        Self {
            count: entries.len(),
            entries,
        }
    }
}

/// Get history list
///
/// GET /api/history
async fn history_handler<B: GeoBackend, P: PositionProvider>(
    State(state): State<Arc<AppState<B, P>>>,
) -> Json<HistoryResponse> {
    Json(HistoryResponse::new(state.coordinator.history()))
}

/// Record a selected location
///
/// POST /api/history
async fn select_handler<B: GeoBackend, P: PositionProvider>(
    State(state): State<Arc<AppState<B, P>>>,
    Json(location): Json<Location>,
) -> Result<Json<HistoryResponse>, ApiError> {
    location.validate()?;
    state.coordinator.select_result(location);
    Ok(Json(HistoryResponse::new(state.coordinator.history())))
}

/// Clear history
///
/// DELETE /api/history
async fn clear_history_handler<B: GeoBackend, P: PositionProvider>(
    State(state): State<Arc<AppState<B, P>>>,
) -> StatusCode {
    state.coordinator.clear_history();
    StatusCode::NO_CONTENT
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Geocoding provider base URL
    pub provider: String,
    /// Language sent to the provider
    pub language: String,
    /// Region used for the country fallback
    pub region: Option<String>,
    /// Entries in the selection history
    pub history_count: usize,
    /// Uptime in seconds
    pub uptime_secs: u64,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler<B: GeoBackend, P: PositionProvider>(
    State(state): State<Arc<AppState<B, P>>>,
) -> Json<StatusResponse> {
    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        provider: state.config.provider.url.clone(),
        language: state.locale.language.clone(),
        region: state.locale.region.clone(),
        history_count: state.coordinator.history().len(),
        uptime_secs: state.uptime_secs(),
    })
}
