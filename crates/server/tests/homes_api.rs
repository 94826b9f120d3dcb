mod support;

use axum::http::StatusCode;
use models::user::UserType;
use serde_json::json;

use support::{build_app, empty_request, home_body, json_request, send, signup};

#[tokio::test]
async fn test_create_list_get_flow() -> anyhow::Result<()> {
    let (app, state) = build_app().await?;
    let realtor = signup(&app, &state, "realtor@example.com", UserType::Realtor).await?;

    let (status, created) = send(
        &app,
        json_request("POST", "/home", Some(&realtor), &home_body("Toronto", 1_500_000.0, &["https://img/1", "https://img/2"]))?,
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["image"], json!("https://img/1"));
    let id = created["id"].as_i64().unwrap();

    let (status, _) = send(&app, json_request("POST", "/home", Some(&realtor), &home_body("Ottawa", 300_000.0, &[]))?).await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, list) = send(&app, empty_request("GET", "/home", None)?).await?;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["image"], json!("https://img/1"));
    assert!(list[0].get("images").is_none());
    assert!(list[1].get("image").is_none());

    let (status, filtered) = send(&app, empty_request("GET", "/home?city=Toronto&minPrice=1000000", None)?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(filtered.as_array().unwrap().len(), 1);

    let (status, filtered) = send(&app, empty_request("GET", "/home?maxPrice=100&propertyType=CONDO", None)?).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(filtered.as_array().unwrap().is_empty());

    let (status, detail) = send(&app, empty_request("GET", &format!("/home/{id}"), None)?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["images"], json!(["https://img/1", "https://img/2"]));
    assert_eq!(detail["realtor"]["email"], json!("realtor@example.com"));
    assert!(detail["realtor"].get("password").is_none());
    Ok(())
}

#[tokio::test]
async fn test_bad_filter_is_rejected() -> anyhow::Result<()> {
    let (app, _) = build_app().await?;
    let (status, body) = send(&app, empty_request("GET", "/home?minPrice=abc&propertyType=CASTLE", None)?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Validation Error"));
    let fields: Vec<&str> = body["violations"].as_array().unwrap().iter().map(|v| v["field"].as_str().unwrap()).collect();
    assert_eq!(fields, vec!["minPrice", "propertyType"]);
    Ok(())
}

#[tokio::test]
async fn test_create_requires_realtor() -> anyhow::Result<()> {
    let (app, state) = build_app().await?;
    let (status, _) = send(&app, json_request("POST", "/home", None, &home_body("Toronto", 1.0, &[]))?).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let buyer = signup(&app, &state, "buyer@example.com", UserType::Buyer).await?;
    let (status, _) = send(&app, json_request("POST", "/home", Some(&buyer), &home_body("Toronto", 1.0, &[]))?).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn test_create_validation_errors() -> anyhow::Result<()> {
    let (app, state) = build_app().await?;
    let realtor = signup(&app, &state, "realtor@example.com", UserType::Realtor).await?;
    let mut body = home_body("", -5.0, &[""]);
    body["address"] = json!("");
    let (status, resp) = send(&app, json_request("POST", "/home", Some(&realtor), &body)?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = resp["violations"].as_array().unwrap().iter().map(|v| v["field"].as_str().unwrap()).collect();
    assert_eq!(fields, vec!["address", "city", "price", "images[0].url"]);

    let (status, resp) = send(&app, json_request("POST", "/home", Some(&realtor), &json!({"address": 1}))?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{resp}");
    Ok(())
}

#[tokio::test]
async fn test_update_and_delete_ownership() -> anyhow::Result<()> {
    let (app, state) = build_app().await?;
    let owner = signup(&app, &state, "owner@example.com", UserType::Realtor).await?;
    let other = signup(&app, &state, "other@example.com", UserType::Realtor).await?;

    let (_, created) = send(&app, json_request("POST", "/home", Some(&owner), &home_body("Toronto", 100.0, &["https://img/a"]))?).await?;
    let id = created["id"].as_i64().unwrap();

    let (status, _) = send(&app, json_request("PUT", "/home/9999", Some(&owner), &json!({"price": 5}))?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, json_request("PUT", &format!("/home/{id}"), Some(&other), &json!({"price": 5}))?).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, updated) = send(&app, json_request("PUT", &format!("/home/{id}"), Some(&owner), &json!({"price": 250}))?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"], json!(250.0));
    assert_eq!(updated["city"], json!("Toronto"));

    let (status, _) = send(&app, empty_request("DELETE", &format!("/home/{id}"), Some(&other))?).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, empty_request("DELETE", &format!("/home/{id}"), Some(&owner))?).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, empty_request("GET", &format!("/home/{id}"), None)?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("Not Found"));

    let (status, _) = send(&app, empty_request("DELETE", &format!("/home/{id}"), Some(&owner))?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_health_and_openapi() -> anyhow::Result<()> {
    let (app, _) = build_app().await?;
    let (status, body) = send(&app, empty_request("GET", "/health", None)?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, doc) = send(&app, empty_request("GET", "/api-docs/openapi.json", None)?).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"].get("/home/{id}").is_some());
    Ok(())
}

#[tokio::test]
async fn test_non_numeric_id_is_a_json_error() -> anyhow::Result<()> {
    let (app, state) = build_app().await?;
    let (status, body) = send(&app, empty_request("GET", "/home/abc", None)?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Bad Request"));
    assert!(body["message"].is_string(), "{body}");

    let realtor = signup(&app, &state, "realtor@example.com", UserType::Realtor).await?;
    let (status, body) = send(&app, empty_request("DELETE", "/home/1.5", Some(&realtor))?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Bad Request"));
    Ok(())
}

#[tokio::test]
async fn test_unknown_property_type_on_create_is_a_violation() -> anyhow::Result<()> {
    let (app, state) = build_app().await?;
    let realtor = signup(&app, &state, "realtor@example.com", UserType::Realtor).await?;
    let mut body = home_body("Toronto", 100.0, &[]);
    body["propertyType"] = json!("CASTLE");
    let (status, resp) = send(&app, json_request("POST", "/home", Some(&realtor), &body)?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["error"], json!("Validation Error"));
    assert_eq!(resp["violations"][0]["field"], json!("propertyType"));
    Ok(())
}
