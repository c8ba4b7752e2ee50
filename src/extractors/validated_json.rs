//! JSON body extractor that validates against a [`Schema`] before deserializing.

use crate::error::AppError;
use crate::model::{NewItem, NewReview};
use crate::service::{RequestValidator, Schema, ITEM_SCHEMA, REVIEW_SCHEMA};
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Request payload type with a field schema.
pub trait SchemaBound: DeserializeOwned {
    const SCHEMA: Schema;
}

impl SchemaBound for NewItem {
    const SCHEMA: Schema = ITEM_SCHEMA;
}

impl SchemaBound for NewReview {
    const SCHEMA: Schema = REVIEW_SCHEMA;
}

/// Body is parsed regardless of `Content-Type`. Invalid JSON maps to
/// [`AppError::MalformedJson`], schema violations to [`AppError::Validation`].
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T: SchemaBound> ValidatedJson<T> {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AppError> {
        let mut document: Value = serde_json::from_slice(bytes).map_err(|_| AppError::MalformedJson)?;
        RequestValidator::validate(&mut document, &T::SCHEMA)?;
        let value = serde_json::from_value(document).map_err(|e| AppError::Validation(e.to_string()))?;
        Ok(ValidatedJson(value))
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: SchemaBound,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(IntoResponse::into_response)?;
        Self::from_bytes(&bytes).map_err(IntoResponse::into_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_item() {
        let ValidatedJson(item) =
            ValidatedJson::<NewItem>::from_bytes(br#"{"title":"Mug","description":"Ceramic mug","price":500}"#).unwrap();
        assert_eq!(
            item,
            NewItem {
                title: "Mug".into(),
                description: "Ceramic mug".into(),
                price: 500
            }
        );
    }

    #[test]
    fn coerced_grade_deserializes() {
        let ValidatedJson(review) = ValidatedJson::<NewReview>::from_bytes(br#"{"text":"fine","grade":"7"}"#).unwrap();
        assert_eq!(review.grade, 7);
        let ValidatedJson(review) = ValidatedJson::<NewReview>::from_bytes(br#"{"text":"fine","grade":7.0}"#).unwrap();
        assert_eq!(review.grade, 7);
    }

    #[test]
    fn syntax_errors_are_malformed() {
        assert!(matches!(
            ValidatedJson::<NewReview>::from_bytes(b"{\"text\": "),
            Err(AppError::MalformedJson)
        ));
        assert!(matches!(ValidatedJson::<NewReview>::from_bytes(b""), Err(AppError::MalformedJson)));
    }

    #[test]
    fn schema_errors_are_validation() {
        assert!(matches!(
            ValidatedJson::<NewReview>::from_bytes(br#"{"text":"fine","grade":0}"#),
            Err(AppError::Validation(_))
        ));
    }
}
