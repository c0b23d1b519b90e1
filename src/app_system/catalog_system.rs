use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::catalog::CatalogService;
use crate::clients::CatalogClient;
use crate::error::RemoteError;
use crate::remote::HttpProductApi;

use super::config::AppConfig;

/// Startup and shutdown coordinator: builds the HTTP adapter from
/// config, spawns the catalog service, and hands out its client.
pub struct CatalogSystem {
    pub catalog_client: CatalogClient,
    handle: tokio::task::JoinHandle<()>,
}

impl CatalogSystem {
    #[instrument(name = "catalog_system", skip(config))]
    pub fn new(config: &AppConfig) -> Result<Self, RemoteError> {
        info!(api_url = %config.base_url, "Starting catalog system");

        let api = HttpProductApi::new(config.base_url.clone(), config.request_timeout)?;
        let (service, catalog_client) = CatalogService::new(32, Arc::new(api));
        let handle = tokio::spawn(service.run());

        info!("Catalog system started");

        Ok(Self {
            catalog_client,
            handle,
        })
    }

    /// Gracefully stop the catalog service and wait for its task.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down catalog system");

        let _ = self.catalog_client.shutdown().await;

        if let Err(e) = self.handle.await {
            error!(error = ?e, "Catalog service task failed");
            return Err(format!("Catalog service task failed: {e:?}"));
        }

        info!("Catalog system shutdown complete");
        Ok(())
    }
}
