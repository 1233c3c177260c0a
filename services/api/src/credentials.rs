//! HTTP Basic credentials extraction

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Basic};

use crate::error::ApiError;

/// Username and password decoded from an `Authorization: Basic` header
///
/// The decoded value is split on the first colon, so passwords may contain
/// colons and may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl BasicCredentials {
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, ApiError> {
        match headers.typed_try_get::<Authorization<Basic>>() {
            Ok(Some(Authorization(basic))) => Ok(Self {
                username: basic.username().to_string(),
                password: basic.password().to_string(),
            }),
            Ok(None) => Err(ApiError::BadRequest(
                "Missing authorization header".to_string(),
            )),
            Err(_) => Err(ApiError::BadRequest(
                "Invalid authorization header".to_string(),
            )),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for BasicCredentials
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_headers(&parts.headers)
    }
}
