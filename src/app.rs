//! Assemble the store, state and router from an [`AppConfig`].

use crate::config::AppConfig;
use crate::error::AppError;
use crate::routes::{catalog_routes, common_routes_with_ready};
use crate::service::auth::ensure_staff_user;
use crate::state::AppState;
use crate::store::{ensure_database_exists, CatalogStore, MemoryStore, PgStore};
use axum::Router;
use std::sync::Arc;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Connect to PostgreSQL when `database_url` is set (creating the database and
/// tables if needed), otherwise fall back to an in-memory store.
pub async fn build_store(config: &AppConfig) -> Result<Arc<dyn CatalogStore>, AppError> {
    let store: Arc<dyn CatalogStore> = match &config.database_url {
        Some(url) => {
            ensure_database_exists(url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(url)
                .await?;
            let store = PgStore::new(pool);
            store.ensure_tables().await?;
            Arc::new(store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory store, data is lost on exit");
            Arc::new(MemoryStore::new())
        }
    };
    if let Some(seed) = &config.staff_seed {
        ensure_staff_user(store.as_ref(), &seed.username, &seed.password).await?;
    }
    Ok(store)
}

pub async fn build_state(config: &AppConfig) -> Result<AppState, AppError> {
    let store = build_store(config).await?;
    Ok(AppState::new(store, config.mode, config.auth_realm.as_str()))
}

/// Catalog and common routes with a body size cap and request tracing.
pub fn build_app(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .merge(catalog_routes(state))
        .layer(RequestBodyLimitLayer::new(body_limit_bytes))
        .layer(TraceLayer::new_for_http())
}
