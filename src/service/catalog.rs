//! Catalog operations composed over a [`CatalogStore`].

use crate::error::AppError;
use crate::model::{ItemDetail, NewItem, NewReview};
use crate::store::{CatalogStore, RECENT_REVIEWS_LIMIT};

pub struct CatalogService;

impl CatalogService {
    /// Insert a validated item. Returns the new id.
    pub async fn add_item(store: &dyn CatalogStore, item: &NewItem) -> Result<i64, AppError> {
        let id = store.create_item(item).await?;
        tracing::info!(item_id = id, "item created");
        Ok(id)
    }

    /// Attach a review to an existing item. Unknown items are rejected and nothing is written.
    pub async fn post_review(store: &dyn CatalogStore, item_id: i64, review: &NewReview) -> Result<i64, AppError> {
        let id = store
            .create_review(item_id, review)
            .await?
            .ok_or_else(|| item_not_found(item_id))?;
        tracing::info!(item_id, review_id = id, "review created");
        Ok(id)
    }

    /// Item with its latest reviews, newest first.
    pub async fn get_item(store: &dyn CatalogStore, item_id: i64) -> Result<ItemDetail, AppError> {
        let item = store.find_item(item_id).await?.ok_or_else(|| item_not_found(item_id))?;
        let reviews = store.recent_reviews(item_id, RECENT_REVIEWS_LIMIT).await?;
        Ok(ItemDetail::new(item, reviews))
    }
}

pub fn item_not_found(item_id: impl std::fmt::Display) -> AppError {
    AppError::NotFound(format!("item {} does not exist", item_id))
}
