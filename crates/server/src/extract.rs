//! Request extractors: validated JSON bodies, path parameters and the
//! authenticated caller.

use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::{header, request::Parts, HeaderMap, StatusCode};
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::de::DeserializeOwned;
use tracing::warn;

use service::auth::domain::AuthUser;
use service::validation::Validate;

use crate::errors::JsonApiError;
use crate::state::ServerState;

pub const AUTH_COOKIE: &str = "auth_token";

/// JSON body that has passed its [`Validate`] rules.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Path parameters whose parse failures are reported as JSON errors.
pub struct PathParam<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

/// Caller identified by `Authorization: Bearer <token>`, falling back to the
/// `auth_token` cookie set at signin.
pub struct CurrentUser(pub AuthUser);

fn token_from_headers(headers: &HeaderMap) -> Result<String, JsonApiError> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        let raw = value.to_str().unwrap_or_default();
        return match raw.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
            _ => {
                warn!("invalid Authorization format (expect Bearer)");
                Err(JsonApiError::new(StatusCode::UNAUTHORIZED, "expected a bearer token"))
            }
        };
    }
    match CookieJar::from_headers(headers).get(AUTH_COOKIE) {
        Some(c) if !c.value().is_empty() => Ok(c.value().to_string()),
        _ => Err(JsonApiError::new(StatusCode::UNAUTHORIZED, "missing credentials")),
    }
}

#[async_trait]
impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = JsonApiError;

    async fn from_request_parts(parts: &mut Parts, state: &ServerState) -> Result<Self, Self::Rejection> {
        let token = token_from_headers(&parts.headers)?;
        let user = state.auth.verify_token(&token).map_err(|e| {
            warn!(path = %parts.uri.path(), "token validation failed");
            JsonApiError::from(e)
        })?;
        Ok(CurrentUser(user))
    }
}
