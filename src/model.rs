//! Catalog records: items, their reviews, and the accounts allowed to add items.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Item {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct NewItem {
    pub title: String,
    pub description: String,
    pub price: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Review {
    pub id: i64,
    pub text: String,
    pub grade: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct NewReview {
    pub text: String,
    pub grade: i32,
}

/// Item as returned by `GET /items/{id}/`: the record plus its latest reviews, newest first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ItemDetail {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: i32,
    pub reviews: Vec<Review>,
}

impl ItemDetail {
    pub fn new(item: Item, reviews: Vec<Review>) -> Self {
        Self {
            id: item.id,
            title: item.title,
            description: item.description,
            price: item.price,
            reviews,
        }
    }
}

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    pub is_staff: bool,
    pub is_active: bool,
}
