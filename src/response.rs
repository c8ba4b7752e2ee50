//! Response bodies shared by the catalog handlers.

use axum::{http::StatusCode, Json};
use serde::Serialize;

/// Body returned by the create endpoints: `{"id": n}`.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct CreatedId {
    pub id: i64,
}

pub fn created(id: i64) -> (StatusCode, Json<CreatedId>) {
    (StatusCode::CREATED, Json(CreatedId { id }))
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}
