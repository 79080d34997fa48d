//! Node Endpoints
//!
//! Per-node reads for chart focus and breadcrumbs, and the editor's
//! insert/update/delete. Each mutation is persisted before it becomes the
//! working document.
//!
//! # Endpoints
//!
//! - `GET /api/nodes/:id` - Deep link target (falls back to the root)
//! - `GET /api/nodes/:id/path` - Breadcrumb from the root
//! - `GET /api/levels/:level` - Nodes at one depth (root is level 0)
//! - `POST /api/nodes` - Insert under `parentId`
//! - `PATCH /api/nodes/:id` - Update label, name or employment type
//! - `DELETE /api/nodes/:id` - Delete a node and its subtree

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use orgchart_core::services::statistics::aggregate;
use orgchart_core::{NewNode, NodeUpdate, OrgNode, SubtreeStats};
use serde::{Deserialize, Serialize};

use crate::api::{AppState, HttpError};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathEntry {
    pub id: String,
    pub label: String,
}

impl From<&OrgNode> for PathEntry {
    fn from(node: &OrgNode) -> Self {
        Self {
            id: node.id.clone(),
            label: node.label.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeepLinkResponse {
    /// `false` when the requested id was unknown and the root is returned
    pub resolved: bool,
    /// Level of `node` below the root (root is level 0)
    pub level: usize,
    pub node: OrgNode,
    pub path: Vec<PathEntry>,
    pub stats: SubtreeStats,
}

/// Resolve a deep link
///
/// # Example
///
/// ```bash
/// curl http://localhost:3001/api/nodes/finance
/// ```
async fn get_node(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeepLinkResponse>, HttpError> {
    state
        .read(|doc| {
            let node = doc.resolve_deep_link(Some(id.as_str()));
            Ok(Json(DeepLinkResponse {
                resolved: node.id == id,
                level: doc.depth(&node.id).unwrap_or_default(),
                path: doc.find_path(&node.id).into_iter().map(PathEntry::from).collect(),
                stats: aggregate(node),
                node: node.clone(),
            }))
        })
        .await
}

async fn get_path(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<PathEntry>>, HttpError> {
    state
        .read(|doc| {
            let path = doc.find_path(&id);
            if path.is_empty() {
                return Err(HttpError::node_not_found(&id));
            }
            Ok(Json(path.into_iter().map(PathEntry::from).collect()))
        })
        .await
}

/// Nodes at one level, without their children.
async fn get_level(
    State(state): State<AppState>,
    Path(level): Path<usize>,
) -> Result<Json<Vec<OrgNode>>, HttpError> {
    state
        .read(|doc| {
            Ok(Json(
                doc.list_at_level(level)
                    .into_iter()
                    .map(OrgNode::detached)
                    .collect(),
            ))
        })
        .await
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNodeInput {
    pub parent_id: String,
    #[serde(flatten)]
    pub node: NewNode,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedNode {
    pub id: String,
    pub parent_id: String,
}

/// Insert a node
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:3001/api/nodes \
///   -H "Content-Type: application/json" \
///   -d '{"parentId": "board", "label": "Audit", "employmentType": "employee"}'
/// ```
async fn create_node(
    State(state): State<AppState>,
    Json(input): Json<CreateNodeInput>,
) -> Result<(StatusCode, Json<CreatedNode>), HttpError> {
    let parent_id = input.parent_id;
    let payload = input.node;
    let id = state
        .commit(|doc| Ok(doc.insert(&parent_id, payload)?))
        .await?;

    tracing::debug!("Created node {} under {}", id, parent_id);
    Ok((StatusCode::CREATED, Json(CreatedNode { id, parent_id })))
}

async fn update_node(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<NodeUpdate>,
) -> Result<Json<OrgNode>, HttpError> {
    let node = state
        .commit(|doc| {
            let next = doc.update(&id, &update)?;
            let node = next
                .find_by_id(&id)
                .map(OrgNode::detached)
                .ok_or_else(|| HttpError::node_not_found(&id))?;
            Ok((next, node))
        })
        .await?;

    tracing::debug!("Updated node {}", id);
    Ok(Json(node))
}

async fn delete_node(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, HttpError> {
    state
        .commit(|doc| Ok((doc.delete(&id)?, ())))
        .await?;

    tracing::debug!("Deleted node {}", id);
    Ok(StatusCode::NO_CONTENT)
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/nodes", post(create_node))
        .route(
            "/api/nodes/:id",
            get(get_node).patch(update_node).delete(delete_node),
        )
        .route("/api/nodes/:id/path", get(get_path))
        .route("/api/levels/:level", get(get_level))
        .with_state(state)
}
