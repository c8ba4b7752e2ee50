//! Persistence for items, reviews and users.
//!
//! [`CatalogStore`] is the seam between handlers and storage: [`PgStore`] backs
//! production deployments, [`MemoryStore`] backs tests and database-less runs.

mod memory;
mod pg;

pub use memory::MemoryStore;
pub use pg::{ensure_database_exists, PgStore};

use crate::error::AppError;
use crate::model::{Item, NewItem, NewReview, Review, User};
use async_trait::async_trait;

/// Number of reviews embedded in an item read.
pub const RECENT_REVIEWS_LIMIT: u32 = 5;

#[async_trait]
pub trait CatalogStore: Send + Sync + 'static {
    fn backend_tag(&self) -> &'static str;

    /// Insert an item and return its id.
    async fn create_item(&self, item: &NewItem) -> Result<i64, AppError>;

    async fn find_item(&self, id: i64) -> Result<Option<Item>, AppError>;

    /// Insert a review for `item_id`. Returns `None`, writing nothing, when the item does not exist.
    async fn create_review(&self, item_id: i64, review: &NewReview) -> Result<Option<i64>, AppError>;

    /// Reviews of `item_id`, highest id first, at most `limit`.
    async fn recent_reviews(&self, item_id: i64, limit: u32) -> Result<Vec<Review>, AppError>;

    async fn find_user(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Create the account or replace its password hash and staff flag. Returns the user id.
    async fn upsert_user(&self, username: &str, password_hash: &str, is_staff: bool) -> Result<i64, AppError>;

    /// Cheap connectivity check for readiness.
    async fn ping(&self) -> Result<(), AppError>;
}
