//! Catalog operations, request validation and staff authentication.

pub mod auth;
mod catalog;
mod validation;
pub use catalog::{item_not_found, CatalogService};
pub use validation::{FieldKind, FieldRule, RequestValidator, Schema, ITEM_SCHEMA, REVIEW_SCHEMA};
