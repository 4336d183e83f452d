//! Application startup and lifecycle management.

use crate::config::{HospitalConfig, StoreBackend};
use crate::handlers;
use crate::services::{EntityStore, MongoStore, OpScope};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{metrics_middleware, request_id_middleware};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: HospitalConfig,
    pub store: EntityStore,
}

impl AppState {
    pub fn new(config: HospitalConfig, store: EntityStore) -> Self {
        Self { config, store }
    }

    /// Fresh time budget for the store calls of one request.
    pub fn op_scope(&self) -> OpScope {
        OpScope::new(self.config.timeouts.request)
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/users",
            post(handlers::create_user).fallback(handlers::method_not_allowed),
        )
        .route(
            "/users/list",
            get(handlers::list_users).fallback(handlers::method_not_allowed),
        )
        .route(
            "/patients",
            post(handlers::create_patient).fallback(handlers::method_not_allowed),
        )
        .route(
            "/patients/list",
            get(handlers::list_patients).fallback(handlers::method_not_allowed),
        )
        .route(
            "/doctors",
            post(handlers::create_doctor).fallback(handlers::method_not_allowed),
        )
        .route(
            "/appointments",
            post(handlers::create_appointment).fallback(handlers::method_not_allowed),
        )
        .route(
            "/departments",
            post(handlers::create_department).fallback(handlers::method_not_allowed),
        )
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Open the configured store, prepare its indexes and bind the listener.
    pub async fn build(config: HospitalConfig) -> Result<Self, AppError> {
        let store = match config.store.backend {
            StoreBackend::Mongo => {
                let scope = OpScope::new(config.timeouts.startup);
                let mongo = MongoStore::connect(&config.mongodb, &scope).await?;
                mongo.initialize_indexes(&scope).await.map_err(|e| {
                    tracing::error!("Failed to initialize database indexes: {}", e);
                    e
                })?;
                EntityStore::mongo(mongo)
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory store; records are lost on shutdown");
                EntityStore::in_memory()
            }
        };

        Self::with_store(config, store).await
    }

    /// Bind the listener around an already opened store.
    pub async fn with_store(config: HospitalConfig, store: EntityStore) -> Result<Self, AppError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        Ok(Self {
            port,
            listener,
            state: AppState::new(config, store),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn store(&self) -> &EntityStore {
        &self.state.store
    }

    /// Serve until SIGINT/SIGTERM, drain in-flight requests, then release
    /// the store.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let store = self.state.store.clone();
        let router = build_router(self.state);

        let result = axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await;

        store.shutdown().await;
        result
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
