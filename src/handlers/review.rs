use crate::error::AppError;
use crate::extractors::{ItemId, ValidatedJson};
use crate::model::NewReview;
use crate::response::created;
use crate::service::CatalogService;
use crate::state::AppState;
use axum::{
    extract::State,
    response::IntoResponse,
};

pub async fn post_review(
    State(state): State<AppState>,
    ItemId(item_id): ItemId,
    ValidatedJson(review): ValidatedJson<NewReview>,
) -> Result<impl IntoResponse, AppError> {
    let id = CatalogService::post_review(state.store.as_ref(), item_id, &review).await?;
    Ok(created(id))
}
