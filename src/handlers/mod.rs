//! HTTP handlers for items and reviews.

pub mod item;
pub mod review;
pub use item::*;
pub use review::*;
