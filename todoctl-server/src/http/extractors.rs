//! Custom Axum extractors

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;

/// Extract a todo id from path.
///
/// A segment that is not an integer cannot name a todo, so it is
/// rejected as not found rather than as a bad request.
pub struct TodoId(pub i64);

impl<S> FromRequestParts<S> for TodoId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound {
                resource: "todo",
                id: String::new(),
            })?;

        let id = raw.parse::<i64>().map_err(|_| ApiError::NotFound {
            resource: "todo",
            id: raw.clone(),
        })?;

        Ok(Self(id))
    }
}

/// JSON object body whose rejections render as [`ApiError`] instead of
/// plain text.
///
/// Only an object is accepted: serde would otherwise fill struct fields
/// from a JSON array by position.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state).await?;

        if !value.is_object() {
            return Err(ApiError::InvalidBody {
                reason: "request body must be a JSON object".to_string(),
            });
        }

        let body = serde_json::from_value(value).map_err(|e| ApiError::InvalidBody {
            reason: format!("Failed to deserialize the JSON body: {e}"),
        })?;
        Ok(Self(body))
    }
}
