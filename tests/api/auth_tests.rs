//! Authentication API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_case::test_case;

use crate::common::{TestApp, PASSWORD};
use fleet_server::domain::{User, UserType};

#[tokio::test]
async fn test_token_pair_can_be_refreshed() {
    let app = TestApp::new();
    app.seed_user("mech", UserType::Mechanic, false).await;

    let pair = app.token_pair("mech").await;
    assert!(pair["access"].is_string());
    assert!(pair["refresh"].is_string());

    let response = app
        .server
        .post("/token/refresh/")
        .json(&json!({ "refresh": pair["refresh"] }))
        .await;
    response.assert_status_ok();

    let access = response.json::<Value>()["access"].as_str().unwrap().to_owned();
    app.get("/current-user/", &access).await.assert_status_ok();
}

#[tokio::test]
async fn test_invalid_credentials_get_no_token() {
    let app = TestApp::new();
    app.seed_user("mech", UserType::Mechanic, false).await;

    let response = app
        .server
        .post("/token/request/")
        .json(&json!({ "username": "mech", "password": "wrong-password" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body = response.json::<Value>();
    assert!(body.get("access").is_none());
    assert_eq!(
        body["message"],
        "No active account found with the given credentials"
    );
}

#[tokio::test]
async fn test_unknown_user_gets_the_same_error() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/token/request/")
        .json(&json!({ "username": "ghost", "password": PASSWORD }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_inactive_user_cannot_log_in() {
    let app = TestApp::new();
    let mut user: User = app.seed_user("retired", UserType::Owner, false).await;
    user.is_active = false;
    app.repos.users.update(&user).await.unwrap();

    let response = app
        .server
        .post("/token/request/")
        .json(&json!({ "username": "retired", "password": PASSWORD }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_missing_password_is_a_field_error() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/token/request/")
        .json(&json!({ "username": "mech" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["errors"][0]["field"], "password");
}

#[tokio::test]
async fn test_access_token_is_not_a_refresh_token() {
    let app = TestApp::new();
    app.seed_user("mech", UserType::Mechanic, false).await;
    let access = app.login("mech").await;

    let response = app
        .server
        .post("/token/refresh/")
        .json(&json!({ "refresh": access }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["message"], "Token is invalid or expired");
}

#[tokio::test]
async fn test_refresh_token_is_not_an_access_token() {
    let app = TestApp::new();
    app.seed_user("mech", UserType::Mechanic, false).await;
    let pair = app.token_pair("mech").await;

    app.get("/vehicle/", pair["refresh"].as_str().unwrap())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_deleted_user_token_stops_working() {
    let app = TestApp::new();
    let user = app.seed_user("mech", UserType::Mechanic, false).await;
    let access = app.login("mech").await;

    app.repos.users.delete(user.id).await.unwrap();

    app.get("/current-user/", &access)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[test_case("/user/" ; "users")]
#[test_case("/current-user/" ; "current user")]
#[test_case("/vehicle/" ; "vehicles")]
#[test_case("/vehicle-part/" ; "vehicle parts")]
#[test_case("/service-type/" ; "service types")]
#[test_case("/sub-service/" ; "sub services")]
#[test_case("/vehicle-service/" ; "vehicle services")]
#[test_case("/pdf-report/" ; "pdf report")]
#[tokio::test]
async fn test_protected_endpoints_require_a_token(path: &str) {
    let app = TestApp::new();

    let response = app.server.get(path).await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.json::<Value>()["message"],
        "Authentication credentials were not provided."
    );
}

#[tokio::test]
async fn test_garbage_token_is_rejected() {
    let app = TestApp::new();

    app.get("/vehicle/", "not-a-jwt")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
