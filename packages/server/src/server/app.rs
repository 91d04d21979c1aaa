//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, patch, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::routes::{
    admin_suppliers_handler, health_handler, ingest_supplier_handler, register_supplier_handler,
    search_suppliers_handler, verify_document_handler, vetting_action_handler,
    vetting_history_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub deps: Arc<ServerDeps>,
}

/// Build the Axum application router.
///
/// Handlers reach stores and external clients through `ServerDeps`, so
/// tests can build the same router over in-memory stores and mocks.
pub fn build_app(pool: PgPool, deps: Arc<ServerDeps>) -> Router {
    let app_state = AppState {
        db_pool: pool,
        deps,
    };

    // CORS: the public directory is read by browser clients
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/api/ingest-supplier", post(ingest_supplier_handler))
        .route("/api/register-supplier", post(register_supplier_handler))
        .route("/api/suppliers", get(search_suppliers_handler))
        .route("/api/verify-document", post(verify_document_handler))
        .route("/api/admin/suppliers", get(admin_suppliers_handler))
        .route(
            "/api/admin/vetting",
            patch(vetting_action_handler).get(vetting_history_handler),
        )
        .route("/health", get(health_handler))
        .layer(Extension(app_state))
        .layer(TimeoutLayer::new(Duration::from_secs(120)))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
