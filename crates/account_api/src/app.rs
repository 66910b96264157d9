//! Main application structure and lifecycle management

use crate::{
    api::ApiServer,
    store::{AccountStore, InMemoryAccountStore},
};
use anyhow::{Context, Result};
use config::Config;
use std::{future::Future, sync::Arc};
use tracing::info;

/// Shared state handed to every request handler
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn AccountStore>,
}

impl AppState {
    /// Create state backed by a fresh in-memory store
    pub fn new(config: Config) -> Self {
        Self::with_store(config, Arc::new(InMemoryAccountStore::new()))
    }

    /// Create state around an existing store
    pub fn with_store(config: Config, store: Arc<dyn AccountStore>) -> Self {
        Self { config, store }
    }
}

/// Main application that coordinates all components
pub struct Application {
    state: Arc<AppState>,
    api_server: ApiServer,
}

impl Application {
    /// Create a new application instance
    pub async fn new(config: Config) -> Result<Self> {
        info!("Initializing application components...");

        let state = Arc::new(AppState::new(config));

        let api_server = ApiServer::new(state.clone())
            .context("Failed to create API server")?;

        info!("Application components initialized successfully");

        Ok(Self { state, api_server })
    }

    /// Run the application until `shutdown` resolves and the API server has drained
    pub async fn run<F>(&mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!(
            "Starting API server on {}",
            self.state.config.server.bind_address()
        );

        self.api_server.run(shutdown).await.context("API server error")
    }

    /// Shutdown the application gracefully
    pub async fn shutdown(&mut self) -> Result<()> {
        info!("Shutting down application...");

        // In-memory accounts are dropped with the process
        if !self.state.store.is_empty().await {
            let accounts = self.state.store.len().await;
            info!(accounts, "Discarding in-memory accounts");
        }

        info!("Application shutdown complete");
        Ok(())
    }
}
