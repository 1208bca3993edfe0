//! HTTP server initialization and runtime setup.
//!
//! Handles storage selection, migrations, state wiring, and Axum server lifecycle.

use crate::config::Config;
use crate::domain::entities::Capabilities;
use crate::domain::repositories::{TokenRepository, UrlRepository};
use crate::infrastructure::persistence::{
    InMemoryTokenRepository, InMemoryUrlRepository, PgTokenRepository, PgUrlRepository,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

type Repositories = (Arc<dyn UrlRepository>, Arc<dyn TokenRepository>);

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations, or the in-memory store
/// - Admin token seeding (in-memory store only)
/// - Axum HTTP server with graceful shutdown on Ctrl-C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let (url_repository, token_repository) = match config.database_url {
        Some(ref database_url) => connect_postgres(&config, database_url).await?,
        None => {
            tracing::warn!("DATABASE_URL not set, urls are kept in memory only");
            (
                Arc::new(InMemoryUrlRepository::new()) as Arc<dyn UrlRepository>,
                Arc::new(InMemoryTokenRepository::new()) as Arc<dyn TokenRepository>,
            )
        }
    };

    let state = AppState::new(
        url_repository,
        token_repository,
        config.origin()?,
        config.token_signing_secret.clone(),
        config.not_found_path.clone(),
    );

    if let Some(ref admin_token) = config.admin_token {
        if config.is_database_enabled() {
            tracing::warn!("ADMIN_TOKEN ignored with PostgreSQL storage; use the admin CLI");
        } else {
            state
                .auth_service
                .issue_token("admin", admin_token, &Capabilities::all())
                .await
                .context("Failed to seed admin token")?;
            tracing::info!("Admin token seeded");
        }
    }

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn connect_postgres(config: &Config, database_url: &str) -> Result<Repositories> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    migrate(&pool).await?;

    let pool = Arc::new(pool);

    Ok((
        Arc::new(PgUrlRepository::new(pool.clone())) as Arc<dyn UrlRepository>,
        Arc::new(PgTokenRepository::new(pool)) as Arc<dyn TokenRepository>,
    ))
}

/// Applies embedded migrations from `migrations/`.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to migrate")?;
    tracing::info!("Migrations applied");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
