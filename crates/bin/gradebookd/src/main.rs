//! # gradebookd — gradebook daemon
//!
//! Composition root that wires the adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load `.env`, then configuration (config file, env vars)
//! - Initialize logging
//! - Open the configured store (Redis connection manager or SQL pool) and
//!   run migrations
//! - Construct the repository and inject it into the grade service
//! - Build the axum router, injecting the service
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT) and release the store
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use gradebook_adapter_http_axum::router;
use gradebook_adapter_http_axum::state::AppState;
use gradebook_adapter_storage_redis::RedisGradeRepository;
use gradebook_adapter_storage_sqlx::{Database, PgGradeRepository, SqliteGradeRepository};
use gradebook_app::ports::GradeRepository;
use gradebook_app::services::grade_service::GradeService;

use crate::config::{Config, StorageBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is not an error.
    dotenvy::dotenv().ok();

    let config = Config::load().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind to {bind_addr}"))?;
    tracing::info!(
        addr = %bind_addr,
        backend = %config.storage.backend,
        "gradebookd listening"
    );

    match config.storage.backend {
        StorageBackend::Redis => {
            let connection = gradebook_adapter_storage_redis::Config {
                redis_url: config.storage.url,
            }
            .build()
            .await
            .context("failed to connect to redis")?;
            serve(listener, RedisGradeRepository::new(connection.manager().clone())).await?;
        }
        StorageBackend::Postgres | StorageBackend::Sqlite => {
            let db = gradebook_adapter_storage_sqlx::Config {
                database_url: config.storage.url,
            }
            .build()
            .await
            .context("failed to open database")?;
            let result = match &db {
                Database::Postgres(pool) => {
                    serve(listener, PgGradeRepository::new(pool.clone())).await
                }
                Database::Sqlite(pool) => {
                    serve(listener, SqliteGradeRepository::new(pool.clone())).await
                }
            };
            db.close().await;
            result?;
        }
    }

    tracing::info!("gradebookd stopped");
    Ok(())
}

/// Serve the API on `listener` until a shutdown signal arrives.
async fn serve<R>(listener: TcpListener, repo: R) -> anyhow::Result<()>
where
    R: GradeRepository + Send + Sync + 'static,
{
    let state = AppState::new(GradeService::new(repo));
    let app = router::build(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

/// Resolve on Ctrl-C, or on SIGTERM where available.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received, draining connections");
}
