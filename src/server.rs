//! HTTP server initialization and runtime setup.
//!
//! Handles link store setup, access-log worker spawning, and Axum server lifecycle.

use crate::application::policy::RedirectPolicy;
use crate::config::Config;
use crate::domain::access_worker::run_access_log_worker;
use crate::domain::repositories::{AccessLogSink, LinkStore};
use crate::infrastructure::access_log::{QueuedAccessLog, RedisAccessSink, TracingAccessSink};
use crate::infrastructure::qr::QrCodeEncoder;
use crate::infrastructure::store::{MemoryLinkStore, RedisLinkStore};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;

/// Collaborators built from configuration.
pub struct Backends {
    pub store: Option<Arc<dyn LinkStore>>,
    pub access_sink: Arc<dyn AccessLogSink>,
}

/// Builds the link store and access-log sink.
///
/// - `REDIS_URL` set: Redis store; access records go to the same Redis
/// - `LINKS_FILE` set: in-memory store seeded from the file; access records
///   are written as log lines
/// - neither: no store, every slug is unmatched
///
/// # Errors
///
/// Returns an error if Redis is configured but unreachable, or the links file
/// cannot be read or parsed.
pub async fn build_backends(config: &Config) -> Result<Backends> {
    if let Some(redis_url) = &config.redis_url {
        let store = RedisLinkStore::connect(redis_url)
            .await
            .context("Failed to connect link store")?;
        let sink = RedisAccessSink::new(store.connection());
        tracing::info!("Link store: Redis, access log: Redis list");

        return Ok(Backends {
            store: Some(Arc::new(store)),
            access_sink: Arc::new(sink),
        });
    }

    let store: Option<Arc<dyn LinkStore>> = match &config.links_file {
        Some(path) => {
            let store = MemoryLinkStore::from_json_file(path)
                .await
                .with_context(|| format!("Failed to load links from {}", path))?;
            tracing::info!("Link store: in-memory, {} links loaded", store.len());
            Some(Arc::new(store))
        }
        None => {
            tracing::warn!("No link store configured; every slug will be unmatched");
            None
        }
    };

    Ok(Backends {
        store,
        access_sink: Arc::new(TracingAccessSink::new()),
    })
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Redirect policy (slug pattern, status code)
/// - Link store and access-log sink
/// - Background access-log worker
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - The policy cannot be compiled
/// - A configured backend cannot be reached
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let policy = RedirectPolicy::from_config(&config)?;
    let backends = build_backends(&config).await?;

    let (access_log, access_rx) = QueuedAccessLog::channel(config.access_log_queue_capacity);
    let worker = tokio::spawn(run_access_log_worker(access_rx, backends.access_sink));
    tracing::info!("Access log worker started");

    let state = AppState::new(
        backends.store,
        policy,
        Arc::new(QrCodeEncoder::new()),
        Arc::new(access_log),
        config.behind_proxy,
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    // Dropping the router closed the queue; let the worker drain what is left.
    if let Err(e) = worker.await {
        tracing::error!("Access log worker panicked: {}", e);
    }

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => tracing::error!("Failed to listen for shutdown signal: {}", e),
    }
}
