#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use migration::MigratorTrait;
use serde_json::Value;
use tower::ServiceExt;

use models::user::UserType;
use server::routes;
use server::state::ServerState;

pub fn auth_config() -> configs::AuthConfig {
    configs::AuthConfig {
        jwt_secret: "test-secret".into(),
        product_key_secret: "test-product-secret".into(),
        token_ttl_hours: 1,
        bootstrap_admin_email: None,
    }
}

/// Router over a private in-memory database with migrations applied.
pub async fn build_app() -> anyhow::Result<(Router, ServerState)> {
    let db = models::db::connect_in_memory().await?;
    migration::Migrator::up(&db, None).await?;
    let state = ServerState::new(db, &auth_config());
    let app = routes::build_router(state.clone(), tower_http::cors::CorsLayer::very_permissive());
    Ok((app, state))
}

pub async fn send(app: &Router, req: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, body))
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> anyhow::Result<Request<Body>> {
    let mut builder = Request::builder().method(method).uri(uri).header("content-type", "application/json");
    if let Some(t) = token {
        builder = builder.header("authorization", format!("Bearer {t}"));
    }
    Ok(builder.body(Body::from(serde_json::to_vec(body)?))?)
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> anyhow::Result<Request<Body>> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        builder = builder.header("authorization", format!("Bearer {t}"));
    }
    Ok(builder.body(Body::empty())?)
}

/// Sign up an account of any type, minting the product key directly.
pub async fn signup(app: &Router, state: &ServerState, email: &str, user_type: UserType) -> anyhow::Result<String> {
    let product_key = if user_type.requires_product_key() {
        Some(state.auth.product_key(email, user_type)?)
    } else {
        None
    };
    let body = serde_json::json!({
        "name": "Laith",
        "phone": "555 555 5555",
        "email": email,
        "password": "secret1",
        "productKey": product_key,
    });
    let (status, resp) = send(app, json_request("POST", &format!("/auth/signup/{user_type}"), None, &body)?).await?;
    assert_eq!(status, StatusCode::CREATED, "signup failed: {resp}");
    let token = resp["token"].as_str().ok_or_else(|| anyhow::anyhow!("no token in {resp}"))?;
    Ok(token.to_string())
}

pub fn home_body(city: &str, price: f64, images: &[&str]) -> Value {
    serde_json::json!({
        "address": "2345 William Str",
        "numberOfBedrooms": 3,
        "numberOfBathrooms": 2.5,
        "city": city,
        "price": price,
        "landSize": 4444,
        "propertyType": "RESIDENTIAL",
        "images": images.iter().map(|u| serde_json::json!({"url": u})).collect::<Vec<_>>(),
    })
}
