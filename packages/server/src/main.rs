//! OrgChart Server Binary
//!
//! # Usage
//!
//! ```bash
//! # Defaults: 127.0.0.1:3001, public/data.json
//! cargo run --bin orgchart-server
//!
//! # Custom port and data file
//! ORGCHART_PORT=8080 ORGCHART_DATA_FILE=/srv/chart/data.json cargo run --bin orgchart-server
//! ```
//!
//! # Environment Variables
//!
//! See [`orgchart_server::config`]; `RUST_LOG` sets the log level.

use std::sync::Arc;

use orgchart_core::{DocumentService, DocumentServiceError, JsonFileStore};
use orgchart_server::{start_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let store = Arc::new(JsonFileStore::new(config.data_file.clone()));
    let service = Arc::new(DocumentService::new(store));

    // A missing file is normal on first start; the first save creates it.
    let document = match service.load().await {
        Ok(accepted) => {
            for warning in &accepted.report.warnings {
                tracing::warn!("{}", warning);
            }
            Some(accepted.document)
        }
        Err(DocumentServiceError::Store(e)) if e.is_not_found() => {
            tracing::warn!("{}; starting without a document", e);
            None
        }
        Err(e) => {
            tracing::error!("Could not load {}: {}", config.data_file.display(), e);
            None
        }
    };

    start_server(config, service, document).await
}
