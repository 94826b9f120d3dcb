use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use service::home::domain::{CreateHomeInput, HomeDetail, HomeQuery, HomeResponse, UpdateHomeInput};

use crate::errors::JsonApiError;
use crate::extract::{CurrentUser, PathParam, ValidatedJson};
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/home", tag = "home",
    params(
        ("city" = Option<String>, Query, description = "Exact city match"),
        ("minPrice" = Option<f64>, Query, description = "Inclusive lower price bound"),
        ("maxPrice" = Option<f64>, Query, description = "Inclusive upper price bound"),
        ("propertyType" = Option<String>, Query, description = "RESIDENTIAL or CONDO"),
    ),
    responses(
        (status = 200, description = "Matching homes", body = [crate::openapi::HomeResponseDoc]),
        (status = 400, description = "Invalid filter", body = crate::openapi::ErrorResponse),
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<HomeQuery>,
) -> Result<Json<Vec<HomeResponse>>, JsonApiError> {
    Ok(Json(state.homes.list(&query).await?))
}

#[utoipa::path(
    get, path = "/home/{id}", tag = "home",
    params(("id" = i32, Path, description = "Home id")),
    responses(
        (status = 200, description = "Home detail", body = crate::openapi::HomeDetailDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse),
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    PathParam(id): PathParam<i32>,
) -> Result<Json<HomeDetail>, JsonApiError> {
    Ok(Json(state.homes.get(id).await?))
}

#[utoipa::path(
    post, path = "/home", tag = "home",
    request_body = crate::openapi::CreateHomeRequest,
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Created", body = crate::openapi::HomeResponseDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not a realtor"),
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    CurrentUser(caller): CurrentUser,
    ValidatedJson(input): ValidatedJson<CreateHomeInput>,
) -> Result<(StatusCode, Json<HomeResponse>), JsonApiError> {
    let created = state.homes.create(&caller, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/home/{id}", tag = "home",
    params(("id" = i32, Path, description = "Home id")),
    request_body = crate::openapi::UpdateHomeRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Updated", body = crate::openapi::HomeResponseDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponse),
        (status = 403, description = "Not the owning realtor"),
        (status = 404, description = "Not Found"),
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    CurrentUser(caller): CurrentUser,
    PathParam(id): PathParam<i32>,
    ValidatedJson(input): ValidatedJson<UpdateHomeInput>,
) -> Result<Json<HomeResponse>, JsonApiError> {
    Ok(Json(state.homes.update(&caller, id, input).await?))
}

#[utoipa::path(
    delete, path = "/home/{id}", tag = "home",
    params(("id" = i32, Path, description = "Home id")),
    security(("bearer" = [])),
    responses(
        (status = 204, description = "Deleted"),
        (status = 403, description = "Not the owning realtor"),
        (status = 404, description = "Not Found"),
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    CurrentUser(caller): CurrentUser,
    PathParam(id): PathParam<i32>,
) -> Result<StatusCode, JsonApiError> {
    state.homes.delete(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
