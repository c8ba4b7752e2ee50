//! Catalog routes. Every path is served with and without a trailing slash.
//! In staff mode only item creation sits behind `require_staff`.

use crate::handlers::{add_item, get_item, post_review};
use crate::middleware::require_staff;
use crate::state::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};

pub fn catalog_routes(state: AppState) -> Router {
    let add = if state.mode.requires_staff_for_items() {
        post(add_item).route_layer(middleware::from_fn_with_state(state.clone(), require_staff))
    } else {
        post(add_item)
    };
    Router::new()
        .route("/items/", add.clone())
        .route("/items", add)
        .route("/items/:item_id/", get(get_item))
        .route("/items/:item_id", get(get_item))
        .route("/items/:item_id/reviews/", post(post_review))
        .route("/items/:item_id/reviews", post(post_review))
        .with_state(state)
}
