use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use models::user::UserType;
use service::auth::domain::{AuthToken, AuthUser, GenerateProductKeyInput, ProductKey, SigninInput, SignupInput};
use service::validation::{require_one_of, ValidationErrors};

use crate::errors::JsonApiError;
use crate::extract::{CurrentUser, PathParam, ValidatedJson, AUTH_COOKIE};
use crate::state::ServerState;

fn parse_user_type(raw: &str) -> Result<UserType, JsonApiError> {
    require_one_of(raw, &UserType::ALL, "userType").map_err(|v| ValidationErrors::from(v).into())
}

fn session_cookie(token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(AUTH_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

#[utoipa::path(
    post, path = "/auth/signup/{userType}", tag = "auth",
    params(("userType" = String, Path, description = "BUYER, REALTOR or ADMIN")),
    request_body = crate::openapi::SignupRequest,
    responses(
        (status = 201, description = "Registered", body = crate::openapi::TokenResponse),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponse),
        (status = 401, description = "Missing or invalid product key"),
        (status = 409, description = "Email already registered"),
    )
)]
pub async fn signup(
    State(state): State<ServerState>,
    PathParam(user_type): PathParam<String>,
    ValidatedJson(input): ValidatedJson<SignupInput>,
) -> Result<(StatusCode, Json<AuthToken>), JsonApiError> {
    let user_type = parse_user_type(&user_type)?;
    let token = state.auth.signup(user_type, input).await?;
    Ok((StatusCode::CREATED, Json(token)))
}

#[utoipa::path(
    post, path = "/auth/signin", tag = "auth",
    request_body = crate::openapi::SigninRequest,
    responses(
        (status = 200, description = "Signed in; also sets the auth_token cookie", body = crate::openapi::TokenResponse),
        (status = 401, description = "Unauthorized"),
    )
)]
pub async fn signin(
    State(state): State<ServerState>,
    jar: CookieJar,
    ValidatedJson(input): ValidatedJson<SigninInput>,
) -> Result<(CookieJar, Json<AuthToken>), JsonApiError> {
    let token = state.auth.signin(input).await?;
    let jar = jar.add(session_cookie(token.token.clone()));
    Ok((jar, Json(token)))
}

#[utoipa::path(post, path = "/auth/signout", tag = "auth", responses((status = 204, description = "Cookie cleared")))]
pub async fn signout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let jar = jar.remove(Cookie::build(AUTH_COOKIE).path("/"));
    (jar, StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post, path = "/auth/key", tag = "auth",
    request_body = crate::openapi::ProductKeyRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Product key", body = crate::openapi::ProductKeyResponse),
        (status = 403, description = "Caller is not an admin"),
    )
)]
pub async fn generate_product_key(
    State(state): State<ServerState>,
    CurrentUser(caller): CurrentUser,
    ValidatedJson(input): ValidatedJson<GenerateProductKeyInput>,
) -> Result<Json<ProductKey>, JsonApiError> {
    Ok(Json(state.auth.generate_product_key(&caller, input).await?))
}

#[utoipa::path(
    get, path = "/auth/me", tag = "auth",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Current user", body = crate::openapi::MeResponse),
        (status = 401, description = "Unauthorized"),
    )
)]
pub async fn me(CurrentUser(caller): CurrentUser) -> Json<AuthUser> {
    Json(caller)
}
