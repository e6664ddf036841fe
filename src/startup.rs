//! Application Startup
//!
//! Application building and server initialization.

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;

use crate::application::services::{BrandPerformanceSnapshot, CreatorScriptServiceImpl};
use crate::config::Settings;
use crate::domain::{BrandPerformanceSource, BrandRepository, CreatorScriptRepository, MetricsRepository};
use crate::infrastructure::database;
use crate::infrastructure::repositories::{
    PgBrandPerformanceSource, PgBrandRepository, PgCreatorScriptRepository, PgMetricsRepository,
};
use crate::presentation::http::{handlers, routes};
use crate::presentation::middleware::{cors, logging};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub settings: Arc<Settings>,
    pub brands: Arc<dyn BrandRepository>,
    pub scripts: Arc<dyn CreatorScriptRepository>,
    pub metrics: Arc<dyn MetricsRepository>,
    pub performance: Arc<dyn BrandPerformanceSource>,
}

impl AppState {
    /// State backed by the PostgreSQL repositories
    pub fn from_pool(db: PgPool, settings: Settings) -> Self {
        Self {
            brands: Arc::new(PgBrandRepository::new(db.clone())),
            scripts: Arc::new(PgCreatorScriptRepository::new(db.clone())),
            metrics: Arc::new(PgMetricsRepository::new(db.clone())),
            performance: Arc::new(PgBrandPerformanceSource::new(db.clone())),
            settings: Arc::new(settings),
            db,
        }
    }

    pub fn creator_script_service(&self) -> CreatorScriptServiceImpl {
        CreatorScriptServiceImpl::new(self.brands.clone(), self.scripts.clone())
    }

    pub fn performance_snapshot(&self) -> BrandPerformanceSnapshot {
        BrandPerformanceSnapshot::new(
            self.brands.clone(),
            self.metrics.clone(),
            self.performance.clone(),
        )
        .with_chunk_size(self.settings.snapshot.chunk_size)
    }
}

/// Build the router with the middleware stack
pub fn build_router(state: AppState) -> Router {
    let cors = cors::create_cors_layer(&state.settings.cors);
    routes::create_router(state)
        .layer(logging::create_trace_layer())
        .layer(cors)
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        // Create database pool
        let db = database::create_pool(&settings.database).await?;
        tracing::info!("Database connection pool created");

        if settings.database.run_migrations {
            database::run_migrations(&db).await?;
            tracing::info!("Database migrations applied");
        }

        handlers::health::init_server_start();

        let addr = settings.server_addr();
        let router = build_router(AppState::from_pool(db, settings));

        // Bind to address
        let listener = TcpListener::bind(&addr).await?;
        tracing::info!("Listening on {}", addr);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
