use crate::api::{create_router, AppState};
use crate::config::ServerConfig;
use axum::Router;
use changelog_core::{ContentGenerator, Storage, TemplateGenerator};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub struct ChangelogServer {
    storage: Arc<Mutex<Storage>>,
    generator: Arc<dyn ContentGenerator>,
}

impl ChangelogServer {
    pub fn new(config: &ServerConfig) -> anyhow::Result<Self> {
        if let Some(parent) = config.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        info!("Database: {:?}", config.db_path);
        Ok(Self::with_storage(Storage::new(&config.db_path)?))
    }

    pub fn in_memory() -> anyhow::Result<Self> {
        Ok(Self::with_storage(Storage::in_memory()?))
    }

    fn with_storage(storage: Storage) -> Self {
        Self {
            storage: Arc::new(Mutex::new(storage)),
            generator: Arc::new(TemplateGenerator),
        }
    }

    pub fn with_generator(mut self, generator: Arc<dyn ContentGenerator>) -> Self {
        self.generator = generator;
        self
    }

    pub fn router(&self) -> Router {
        let state = AppState {
            storage: Arc::clone(&self.storage),
            generator: Arc::clone(&self.generator),
        };

        create_router(state)
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
    }

    pub async fn serve(self, addr: SocketAddr) -> anyhow::Result<()> {
        let listener = TcpListener::bind(addr).await?;
        self.serve_until(listener, CancellationToken::new()).await
    }

    /// Serves on an already-bound listener until `shutdown` is cancelled.
    pub async fn serve_until(
        self,
        listener: TcpListener,
        shutdown: CancellationToken,
    ) -> anyhow::Result<()> {
        let app = self.router();

        info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await?;

        info!("Server stopped");
        Ok(())
    }
}
