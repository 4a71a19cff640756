//! Reusable store service runtime.
//!
//! Provides [`ServerHandle`] that encapsulates the full server lifecycle:
//! backend selection, database init, migrations, REST API and graceful
//! shutdown.

use std::sync::Arc;
use std::time::Instant;

use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};

use crate::application::{AccountService, CategoryService, StoreService};
use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::interfaces::http::modules::health::HealthState;
use crate::interfaces::http::AppState;
use crate::shared::shutdown::{listen_for_shutdown_signals, ShutdownSignal};
use crate::{
    create_api_router, init_database, run_migrations, DatabaseConfig, InMemoryRepositoryProvider,
    SeaOrmRepositoryProvider,
};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the store service.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Keep everything in process memory instead of the database.
    pub in_memory: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            in_memory: false,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running store service.
///
/// ```rust,no_run
/// use storehub::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     // ... wait for shutdown signal ...
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Repository provider for data access.
    pub repos: Arc<dyn RepositoryProvider>,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the REST API is bound to.
    pub local_addr: std::net::SocketAddr,

    db: Option<DatabaseConnection>,
    shutdown: ShutdownSignal,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the store service with the given options.
    ///
    /// 1. Pick the backend (SeaORM or in-memory) and migrate if asked
    /// 2. Build the services with the configured per-call deadline
    /// 3. Bind and serve the REST API
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;
        info!("Starting store service...");

        // ── Backend ────────────────────────────────────────────
        let (repos, db): (Arc<dyn RepositoryProvider>, Option<DatabaseConnection>) =
            if opts.in_memory {
                info!("Using in-memory storage, data is lost on exit");
                (Arc::new(InMemoryRepositoryProvider::new()), None)
            } else {
                let db_config = DatabaseConfig {
                    url: app_cfg.database.url.clone(),
                };
                let db = init_database(&db_config).await?;
                if opts.auto_migrate {
                    info!("Running database migrations...");
                    run_migrations(&db).await?;
                }
                (Arc::new(SeaOrmRepositoryProvider::new(db.clone())), Some(db))
            };

        // ── Services ───────────────────────────────────────────
        let timeout = app_cfg.timeout();
        info!(timeout_secs = timeout.as_secs(), "Use case deadline configured");

        let state = AppState {
            stores: Arc::new(StoreService::new(repos.clone(), timeout)),
            categories: Arc::new(CategoryService::new(repos.clone(), timeout)),
            accounts: Arc::new(AccountService::new(repos.clone(), timeout)),
            health: HealthState {
                db: db.clone(),
                started_at: Arc::new(Instant::now()),
            },
        };

        // ── REST API server ────────────────────────────────────
        let shutdown = ShutdownSignal::new();
        let api_addr = app_cfg.server.address();
        let listener = tokio::net::TcpListener::bind(&api_addr).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);

        let api_shutdown = shutdown.clone();
        let api_server = axum::serve(listener, create_api_router(state)).with_graceful_shutdown(
            async move {
                api_shutdown.wait().await;
                info!("REST API server received shutdown signal");
            },
        );

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            repos,
            config: app_cfg,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.clone()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        tokio::spawn(listen_for_shutdown_signals(self.shutdown.clone()));
    }

    /// Trigger graceful shutdown (non-blocking). Call [`wait`](Self::wait)
    /// to block until the API has drained.
    pub fn trigger_shutdown(&self) {
        self.shutdown.trigger();
    }

    /// Wait for the server to fully stop after shutdown has been triggered.
    pub async fn wait(self) {
        match self.api_task.await {
            Ok(()) => info!("REST API server stopped"),
            Err(e) => error!("REST API server task panicked: {}", e),
        }

        if let Some(db) = self.db {
            if let Err(e) = db.close().await {
                warn!("Error closing database connection: {}", e);
            } else {
                info!("Database connection closed");
            }
        }

        info!("Store service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down store service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup (before [`ServerHandle::start`]).
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn in_memory_opts() -> ServerOptions {
        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 0;
        ServerOptions {
            config,
            auto_migrate: false,
            in_memory: true,
        }
    }

    #[tokio::test]
    async fn in_memory_server_starts_and_stops() {
        let handle = ServerHandle::start(in_memory_opts()).await.unwrap();
        assert!(handle.is_running());
        assert_ne!(handle.local_addr.port(), 0);

        tokio::time::timeout(Duration::from_secs(2), handle.shutdown())
            .await
            .expect("shutdown timed out");
    }
}
