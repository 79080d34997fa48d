//! HTTP API for the organization chart
//!
//! Serves the working document to the chart, list and editor views and
//! accepts whole-document saves from the uploader.
//!
//! # Architecture
//!
//! The endpoints are split by concern:
//! - `document_endpoints`: health, load/save/validate, stats, search, reset, export
//! - `node_endpoints`: deep links, paths, level listings, insert/update/delete
//!
//! The working document lives in [`AppState`]. Reads share it; every write
//! holds `write_lock` for the whole mutate → persist → swap sequence, so
//! there is at most one outstanding save and edits are last-write-wins.

use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    Router,
};
use orgchart_core::{DocumentService, JsonFileStore, OrgDocument};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::{CorsOrigins, ServerConfig};

mod document_endpoints;
mod http_error;
mod node_endpoints;

pub use http_error::HttpError;

/// Application state shared across all endpoints
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<DocumentService<JsonFileStore>>,
    /// `None` until a document is loaded or saved
    pub document: Arc<RwLock<Option<OrgDocument>>>,
    /// Serializes mutations and saves
    pub write_lock: Arc<Mutex<()>>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(
        service: Arc<DocumentService<JsonFileStore>>,
        document: Option<OrgDocument>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            service,
            document: Arc::new(RwLock::new(document)),
            write_lock: Arc::new(Mutex::new(())),
            max_upload_bytes,
        }
    }

    /// Run a read-only query against the working document.
    pub async fn read<T>(
        &self,
        query: impl FnOnce(&OrgDocument) -> Result<T, HttpError>,
    ) -> Result<T, HttpError> {
        let guard = self.document.read().await;
        let document = guard.as_ref().ok_or_else(HttpError::no_document)?;
        query(document)
    }

    /// Derive a new document from the working one, persist it, then swap it in.
    ///
    /// Nothing is replaced when the mutation or the save fails.
    pub async fn commit<T>(
        &self,
        mutation: impl FnOnce(&OrgDocument) -> Result<(OrgDocument, T), HttpError>,
    ) -> Result<T, HttpError> {
        let _write = self.write_lock.lock().await;
        let (next, value) = {
            let guard = self.document.read().await;
            let current = guard.as_ref().ok_or_else(HttpError::no_document)?;
            mutation(current)?
        };

        self.service.save(&next).await?;
        *self.document.write().await = Some(next);
        Ok(value)
    }

    /// Replace the working document without persisting it.
    pub async fn replace(&self, document: OrgDocument) {
        let _write = self.write_lock.lock().await;
        *self.document.write().await = Some(document);
    }
}

/// Create the application router with all endpoint modules
pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .merge(document_endpoints::routes(state.clone()))
        .merge(node_endpoints::routes(state.clone()))
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(false);

    match origins {
        CorsOrigins::Any => layer.allow_origin(Any),
        CorsOrigins::List(list) => layer.allow_origin(list.clone()),
    }
}

/// Start the HTTP server
///
/// # Errors
///
/// Returns error if the server fails to bind or stops abnormally.
pub async fn start_server(
    config: ServerConfig,
    service: Arc<DocumentService<JsonFileStore>>,
    document: Option<OrgDocument>,
) -> anyhow::Result<()> {
    let state = AppState::new(service, document, config.max_upload_bytes);
    let app = create_router(state, &config);

    let addr = config.bind_address();
    tracing::info!("Organization chart server listening on http://{}", addr);
    tracing::info!("Data file: {}", config.data_file.display());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
