//! Request extractors.
//!
//! - `AuthCaller` - runs the `Authorization` header through the state's relay
//! - `ValidatedJson` - JSON body whose rejections use the API error envelope

use std::sync::Arc;

use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::Json;
use serde::de::DeserializeOwned;

use shopflow_core::Caller;

use crate::error::ApiError;
use crate::state::RelayState;

/// Raw `Authorization` header value, if present and valid UTF-8.
#[must_use]
pub fn authorization_header(headers: &HeaderMap) -> Option<&str> {
    headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok())
}

/// An authenticated caller.
#[derive(Debug, Clone)]
pub struct AuthCaller(pub Caller);

#[axum::async_trait]
impl<S> FromRequestParts<Arc<S>> for AuthCaller
where
    S: RelayState,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<S>) -> Result<Self, ApiError> {
        let header = authorization_header(&parts.headers);
        let caller = state.relay().authenticate(header).await?;
        Ok(Self(caller))
    }
}

/// JSON body extractor that answers malformed input with `400 bad_request`.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, ApiError> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
        }
    }
}
