//! Request extractors that reject with the JSON error contract

use crate::error::{ApiError, ErrorResponse, validate_query};
use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::{StatusCode, request::Parts},
    response::Json,
};
use serde::de::DeserializeOwned;
use tracing::warn;
use validator::Validate;

/// Query string that is deserialized and then validated
///
/// Malformed values (`limit=abc`, `limit=-1`) and failed validation rules
/// both reject with `400 INVALID_PARAMETERS`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                let reason = rejection.body_text();
                warn!("Malformed query string: {}", reason);
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: "Invalid query parameters".to_string(),
                        code: "INVALID_PARAMETERS".to_string(),
                        details: Some(serde_json::json!({ "reason": reason })),
                    }),
                )
            })?;

        validate_query(&query)?;
        Ok(Self(query))
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::Request;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Paging {
        #[validate(range(min = 1, max = 10))]
        limit: Option<u32>,
    }

    async fn extract(uri: &str) -> Result<ValidatedQuery<Paging>, ApiError> {
        let (mut parts, ()) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        ValidatedQuery::<Paging>::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_well_formed_query_is_extracted() {
        let ValidatedQuery(paging) = extract("/?limit=5").await.unwrap();
        assert_eq!(paging.limit, Some(5));
    }

    #[tokio::test]
    async fn test_unparseable_value_is_json_rejection() {
        let (status, Json(body)) = extract("/?limit=abc").await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "INVALID_PARAMETERS");
        assert!(body.details.unwrap()["reason"].is_string());
    }

    #[tokio::test]
    async fn test_validation_failure_is_json_rejection() {
        let (status, Json(body)) = extract("/?limit=11").await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "INVALID_PARAMETERS");
        assert!(body.details.unwrap()["limit"].is_array());
    }
}
