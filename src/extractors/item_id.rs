//! Extract the `:item_id` path segment as a numeric item id.

use crate::error::AppError;
use crate::service::item_not_found;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// Item id from the path. Anything but plain decimal digits names no item and
/// is rejected with 404 before the request body is read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemId(pub i64);

pub fn parse_item_id(raw: &str) -> Result<i64, AppError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(item_not_found(raw));
    }
    raw.parse().map_err(|_| item_not_found(raw))
}

#[async_trait]
impl<S> FromRequestParts<S> for ItemId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::NotFound(e.body_text()))?;
        parse_item_id(&raw).map(ItemId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_ids_are_digits_only() {
        assert_eq!(parse_item_id("17").unwrap(), 17);
        for bad in ["", "-1", "+3", "abc", "1.5", "99999999999999999999"] {
            assert!(matches!(parse_item_id(bad), Err(AppError::NotFound(_))), "{}", bad);
        }
    }
}
