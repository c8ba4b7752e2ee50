//! Somemart: a small catalog REST service. Items, reviews, and an optional
//! staff-only gate on item creation.

pub mod app;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use app::{build_app, build_state, build_store};
pub use config::{ApiMode, AppConfig};
pub use error::{AppError, ConfigError};
pub use model::{Item, ItemDetail, NewItem, NewReview, Review, User};
pub use routes::{catalog_routes, common_routes_with_ready};
pub use service::CatalogService;
pub use state::AppState;
pub use store::{ensure_database_exists, CatalogStore, MemoryStore, PgStore, RECENT_REVIEWS_LIMIT};
