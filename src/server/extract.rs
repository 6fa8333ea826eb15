//! Axum extractors that validate their payload
//!
//! Each wrapper deserializes with the matching axum extractor, then runs the
//! `validator` rules of `T`. Both kinds of failure are reported as
//! [`ShopError::InvalidInput`] so every malformed request gets the same 422
//! error body.

use crate::core::error::ShopError;
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

fn validated<T: Validate>(value: T) -> Result<T, ShopError> {
    value
        .validate()
        .map_err(|e| ShopError::from_validation(&e))?;
    Ok(value)
}

/// Path parameters checked against their `validator` rules
pub struct ValidatedPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidatedPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = ShopError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ShopError::invalid_input("path", e.body_text()))?;
        Ok(Self(validated(value)?))
    }
}

/// Query string checked against its `validator` rules
pub struct ValidatedQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = ShopError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ShopError::invalid_input("query", e.body_text()))?;
        Ok(Self(validated(value)?))
    }
}

/// JSON body checked against its `validator` rules
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = ShopError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ShopError::invalid_input("body", e.body_text()))?;
        Ok(Self(validated(value)?))
    }
}
