//! Item handlers: create and read.

use crate::error::AppError;
use crate::extractors::{ItemId, ValidatedJson};
use crate::middleware::StaffUser;
use crate::model::NewItem;
use crate::response::{created, ok};
use crate::service::CatalogService;
use crate::state::AppState;
use axum::{
    extract::State,
    response::IntoResponse,
    Extension,
};

pub async fn add_item(
    State(state): State<AppState>,
    staff: Option<Extension<StaffUser>>,
    ValidatedJson(item): ValidatedJson<NewItem>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(Extension(user)) = &staff {
        tracing::debug!(staff_user = %user.username, "adding item");
    }
    let id = CatalogService::add_item(state.store.as_ref(), &item).await?;
    Ok(created(id))
}

pub async fn get_item(
    State(state): State<AppState>,
    ItemId(item_id): ItemId,
) -> Result<impl IntoResponse, AppError> {
    let detail = CatalogService::get_item(state.store.as_ref(), item_id).await?;
    Ok(ok(detail))
}
