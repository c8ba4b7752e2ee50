use super::CatalogStore;
use crate::error::AppError;
use crate::model::{Item, NewItem, NewReview, Review, User};
use async_trait::async_trait;
use tokio::sync::Mutex;

#[derive(Clone, Debug)]
struct StoredReview {
    item_id: i64,
    review: Review,
}

#[derive(Default)]
struct Tables {
    items: Vec<Item>,
    reviews: Vec<StoredReview>,
    users: Vec<User>,
    next_item_id: i64,
    next_review_id: i64,
    next_user_id: i64,
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

/// In-process store. Ids start at 1 and increase monotonically per table, like a
/// fresh `BIGSERIAL` column.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn item_count(&self) -> usize {
        self.tables.lock().await.items.len()
    }

    pub async fn review_count(&self) -> usize {
        self.tables.lock().await.reviews.len()
    }

    /// Flip `is_active` on an existing account; returns false when the user is unknown.
    pub async fn set_user_active(&self, username: &str, active: bool) -> bool {
        let mut tables = self.tables.lock().await;
        match tables.users.iter_mut().find(|u| u.username == username) {
            Some(user) => {
                user.is_active = active;
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn create_item(&self, item: &NewItem) -> Result<i64, AppError> {
        let mut tables = self.tables.lock().await;
        let id = next_id(&mut tables.next_item_id);
        tables.items.push(Item {
            id,
            title: item.title.clone(),
            description: item.description.clone(),
            price: item.price,
        });
        Ok(id)
    }

    async fn find_item(&self, id: i64) -> Result<Option<Item>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables.items.iter().find(|i| i.id == id).cloned())
    }

    async fn create_review(&self, item_id: i64, review: &NewReview) -> Result<Option<i64>, AppError> {
        let mut tables = self.tables.lock().await;
        if !tables.items.iter().any(|i| i.id == item_id) {
            return Ok(None);
        }
        let id = next_id(&mut tables.next_review_id);
        tables.reviews.push(StoredReview {
            item_id,
            review: Review {
                id,
                text: review.text.clone(),
                grade: review.grade,
            },
        });
        Ok(Some(id))
    }

    async fn recent_reviews(&self, item_id: i64, limit: u32) -> Result<Vec<Review>, AppError> {
        let tables = self.tables.lock().await;
        let mut reviews: Vec<Review> = tables
            .reviews
            .iter()
            .filter(|r| r.item_id == item_id)
            .map(|r| r.review.clone())
            .collect();
        reviews.sort_by(|a, b| b.id.cmp(&a.id));
        reviews.truncate(limit as usize);
        Ok(reviews)
    }

    async fn find_user(&self, username: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn upsert_user(&self, username: &str, password_hash: &str, is_staff: bool) -> Result<i64, AppError> {
        let mut tables = self.tables.lock().await;
        if let Some(user) = tables.users.iter_mut().find(|u| u.username == username) {
            user.password_hash = password_hash.to_string();
            user.is_staff = is_staff;
            return Ok(user.id);
        }
        let id = next_id(&mut tables.next_user_id);
        tables.users.push(User {
            id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            is_staff,
            is_active: true,
        });
        Ok(id)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
