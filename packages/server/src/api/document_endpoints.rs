//! Whole-document endpoints
//!
//! # Endpoints
//!
//! - `GET /health` - Liveness check
//! - `GET /api/data` - Working document
//! - `POST /api/save-data` - Replace and persist the document (multipart `data` field or raw JSON)
//! - `POST /api/validate` - Validation report for a posted document, nothing stored
//! - `GET /api/stats?nodeId=` - Subtree statistics (whole chart by default)
//! - `GET /api/search?q=` - Filtered tree, `null` when nothing matches
//! - `POST /api/reset` - Return to the last loaded document
//! - `GET /api/export?format=json|csv|text&includeStats=` - Download rendering

use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Query, Request, State},
    http::header,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use orgchart_core::services::export::{export, export_json};
use orgchart_core::services::normalizer::unwrap_document;
use orgchart_core::services::statistics::{aggregate, descendant_stats, level_breakdown};
use orgchart_core::services::validator::validate;
use orgchart_core::{ExportFormat, LevelSummary, OrgNode, SubtreeStats, ValidationReport};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::{AppState, HttpError};

/// Multipart field carrying the document, as sent by the uploader
const DATA_FIELD: &str = "data";

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub time: DateTime<Utc>,
    pub version: String,
}

async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        time: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn get_data(State(state): State<AppState>) -> Result<Json<OrgNode>, HttpError> {
    state.read(|doc| Ok(Json(doc.root().clone()))).await
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub node_count: usize,
    pub warnings: Vec<String>,
}

/// Save a whole document
///
/// Accepts either `multipart/form-data` with the JSON in a `data` field or a
/// raw JSON body. The document goes through validation and normalization; on
/// blocking errors nothing is stored and the working document is kept.
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:3001/api/save-data \
///   -F 'data=@organization.json;type=application/json'
/// ```
async fn save_data(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<SaveResponse>, HttpError> {
    let bytes = read_document_body(request, state.max_upload_bytes).await?;
    let accepted = state.service.parse_upload(&bytes)?;
    let node_count = accepted.report.stats.total_nodes;

    let receipt = {
        let _write = state.write_lock.lock().await;
        let receipt = state.service.save(&accepted.document).await?;
        *state.document.write().await = Some(accepted.document);
        receipt
    };

    Ok(Json(SaveResponse {
        success: true,
        message: format!("Saved {} nodes to {}", node_count, receipt.location),
        timestamp: receipt.timestamp,
        node_count,
        warnings: accepted.report.warnings,
    }))
}

async fn read_document_body(request: Request, limit: usize) -> Result<Bytes, HttpError> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    if !is_multipart {
        return axum::body::to_bytes(request.into_body(), limit)
            .await
            .map_err(|e| HttpError::invalid_input(format!("Could not read request body: {}", e)));
    }

    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|e| HttpError::invalid_input(e.body_text()))?;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| HttpError::invalid_input(e.body_text()))?
    {
        if field.name() == Some(DATA_FIELD) {
            return field
                .bytes()
                .await
                .map_err(|e| HttpError::invalid_input(e.body_text()));
        }
    }
    Err(HttpError::invalid_input(format!(
        "Multipart body has no \"{}\" field",
        DATA_FIELD
    )))
}

async fn validate_document(
    State(state): State<AppState>,
    Json(document): Json<Value>,
) -> Json<ValidationReport> {
    Json(validate(unwrap_document(&document), state.service.limits()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsQuery {
    node_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub node_id: String,
    pub label: String,
    /// The node and everything below it
    pub stats: SubtreeStats,
    /// Everything below the node
    pub descendants: SubtreeStats,
    /// Levels relative to the node
    pub levels: Vec<LevelSummary>,
}

async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<StatsResponse>, HttpError> {
    state
        .read(|doc| {
            let node = match query.node_id.as_deref().filter(|id| !id.is_empty()) {
                Some(id) => doc.find_by_id(id).ok_or_else(|| HttpError::node_not_found(id))?,
                None => doc.root(),
            };
            Ok(Json(StatsResponse {
                node_id: node.id.clone(),
                label: node.label.clone(),
                stats: aggregate(node),
                descendants: descendant_stats(node),
                levels: level_breakdown(node),
            }))
        })
        .await
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    q: String,
}

async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Option<OrgNode>>, HttpError> {
    state.read(|doc| Ok(Json(doc.filter(&query.q)))).await
}

async fn reset(State(state): State<AppState>) -> Result<Json<OrgNode>, HttpError> {
    let snapshot = state.service.reset().await?;
    let root = snapshot.root().clone();
    state.replace(snapshot).await;
    Ok(Json(root))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportQuery {
    format: Option<String>,
    include_stats: Option<bool>,
}

async fn export_document(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, HttpError> {
    let format: ExportFormat = query.format.as_deref().unwrap_or("json").parse()?;
    let body = state
        .read(|doc| {
            let rendered = match format {
                ExportFormat::Json => export_json(doc.root(), query.include_stats.unwrap_or(true)),
                other => export(doc.root(), other),
            };
            Ok(rendered?)
        })
        .await?;

    let disposition = format!(
        "attachment; filename=\"organization.{}\"",
        format.file_extension()
    );
    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/data", get(get_data))
        .route("/api/save-data", post(save_data))
        .route("/api/validate", post(validate_document))
        .route("/api/stats", get(get_stats))
        .route("/api/search", get(search))
        .route("/api/reset", post(reset))
        .route("/api/export", get(export_document))
        .with_state(state)
}
