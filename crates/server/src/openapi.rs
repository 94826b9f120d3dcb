use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct HomeResponseDoc {
    pub id: i32,
    pub address: String,
    pub city: String,
    pub price: f64,
    pub land_size: f64,
    pub number_of_bedrooms: i32,
    pub number_of_bathrooms: f64,
    #[schema(example = "CONDO")]
    pub property_type: String,
    pub listed_date: String,
    /// First image URL, omitted when the home has none
    pub image: Option<String>,
}

#[derive(ToSchema)]
pub struct RealtorDoc { pub id: i32, pub name: String, pub email: String, pub phone: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct HomeDetailDoc {
    pub id: i32,
    pub address: String,
    pub city: String,
    pub price: f64,
    pub land_size: f64,
    pub number_of_bedrooms: i32,
    pub number_of_bathrooms: f64,
    pub property_type: String,
    pub listed_date: String,
    pub image: Option<String>,
    pub images: Vec<String>,
    pub realtor: Option<RealtorDoc>,
}

#[derive(ToSchema)]
pub struct ImageDoc { pub url: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CreateHomeRequest {
    pub address: String,
    pub number_of_bedrooms: i32,
    pub number_of_bathrooms: f64,
    pub city: String,
    pub price: f64,
    pub land_size: f64,
    #[schema(example = "RESIDENTIAL")]
    pub property_type: String,
    pub images: Option<Vec<ImageDoc>>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct UpdateHomeRequest {
    pub address: Option<String>,
    pub number_of_bedrooms: Option<i32>,
    pub number_of_bathrooms: Option<f64>,
    pub city: Option<String>,
    pub price: Option<f64>,
    pub land_size: Option<f64>,
    pub property_type: Option<String>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    pub product_key: Option<String>,
}

#[derive(ToSchema)]
pub struct SigninRequest { pub email: String, pub password: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ProductKeyRequest {
    pub email: String,
    #[schema(example = "REALTOR")]
    pub user_type: String,
}

#[derive(ToSchema)]
pub struct TokenResponse { pub token: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ProductKeyResponse { pub product_key: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct MeResponse { pub id: i32, pub name: String, pub user_type: String }

#[derive(ToSchema)]
pub struct ViolationDoc { pub field: String, pub message: String }

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: Option<String>,
    pub violations: Option<Vec<ViolationDoc>>,
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::home::list,
        crate::routes::home::get,
        crate::routes::home::create,
        crate::routes::home::update,
        crate::routes::home::delete,
        crate::routes::auth::signup,
        crate::routes::auth::signin,
        crate::routes::auth::signout,
        crate::routes::auth::generate_product_key,
        crate::routes::auth::me,
    ),
    components(
        schemas(
            HealthResponse,
            HomeResponseDoc,
            RealtorDoc,
            HomeDetailDoc,
            ImageDoc,
            CreateHomeRequest,
            UpdateHomeRequest,
            SignupRequest,
            SigninRequest,
            ProductKeyRequest,
            TokenResponse,
            ProductKeyResponse,
            MeResponse,
            ViolationDoc,
            ErrorResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "home"),
        (name = "auth")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for p in ["/health", "/home", "/home/{id}", "/auth/signup/{userType}", "/auth/signin", "/auth/key", "/auth/me"] {
            assert!(paths.contains(&p), "missing {p} in {paths:?}");
        }
    }
}
