//! User API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{error_fields, ids, TestApp};
use fleet_server::domain::UserType;

#[tokio::test]
async fn test_regular_user_only_sees_themself() {
    let app = TestApp::new();
    let me = app.seed_user("owner", UserType::Owner, false).await;
    app.seed_user("someone", UserType::Mechanic, false).await;
    let token = app.login("owner").await;

    let response = app.get("/user/", &token).await;

    response.assert_status_ok();
    assert_eq!(ids(&response.json::<Value>()), vec![me.id]);
}

#[tokio::test]
async fn test_superuser_sees_every_user() {
    let app = TestApp::new();
    let admin = app.seed_user("admin", UserType::Owner, true).await;
    let other = app.seed_user("someone", UserType::Mechanic, false).await;
    let token = app.login("admin").await;

    let response = app.get("/user/", &token).await;

    assert_eq!(ids(&response.json::<Value>()), vec![admin.id, other.id]);
}

#[tokio::test]
async fn test_other_users_record_is_not_found() {
    let app = TestApp::new();
    app.seed_user("owner", UserType::Owner, false).await;
    let other = app.seed_user("someone", UserType::Mechanic, false).await;
    let token = app.login("owner").await;

    let path = format!("/user/{}/", other.id);
    app.get(&path, &token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app.delete(&path, &token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app.patch(&path, &token, json!({ "first_name": "Hacked" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_password_hash_is_never_serialized() {
    let app = TestApp::new();
    let me = app.seed_user("owner", UserType::Owner, false).await;
    let token = app.login("owner").await;

    let body = app
        .get(&format!("/user/{}/", me.id), &token)
        .await
        .json::<Value>();

    assert_eq!(body["username"], "owner");
    assert_eq!(body["user_type"], "owner");
    assert!(body.get("password_hash").is_none());
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_non_superuser_cannot_grant_superuser() {
    let app = TestApp::new();
    app.seed_user("owner", UserType::Owner, false).await;
    let token = app.login("owner").await;

    let response = app
        .post(
            "/user/",
            &token,
            json!({ "username": "sneaky", "password": "pw-123456", "is_superuser": true }),
        )
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&response.json::<Value>()), vec!["is_superuser"]);
}

#[tokio::test]
async fn test_created_user_can_log_in() {
    let app = TestApp::new();
    app.seed_user("admin", UserType::Owner, true).await;
    let token = app.login("admin").await;

    let response = app
        .post(
            "/user/",
            &token,
            json!({
                "username": "newmech",
                "password": "fresh-password",
                "email": "newmech@example.com",
                "user_type": "mechanic"
            }),
        )
        .await;
    response.assert_status(StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["user_type"], "mechanic");
    assert_eq!(body["is_active"], true);
    assert_eq!(body["is_superuser"], false);

    app.server
        .post("/token/request/")
        .json(&json!({ "username": "newmech", "password": "fresh-password" }))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_create_user_validates_fields() {
    let app = TestApp::new();
    app.seed_user("admin", UserType::Owner, true).await;
    let token = app.login("admin").await;

    let response = app
        .post("/user/", &token, json!({ "email": "not-an-email" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        error_fields(&response.json::<Value>()),
        vec!["email", "password", "username"]
    );
}

#[tokio::test]
async fn test_duplicate_username_is_a_field_error() {
    let app = TestApp::new();
    app.seed_user("admin", UserType::Owner, true).await;
    let token = app.login("admin").await;

    let response = app
        .post("/user/", &token, json!({ "username": "admin", "password": "whatever-1" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&response.json::<Value>()), vec!["username"]);
}

#[tokio::test]
async fn test_patch_rehashes_password() {
    let app = TestApp::new();
    let me = app.seed_user("owner", UserType::Owner, false).await;
    let token = app.login("owner").await;

    app.patch(
        &format!("/user/{}/", me.id),
        &token,
        json!({ "password": "brand-new-secret" }),
    )
    .await
    .assert_status_ok();

    app.server
        .post("/token/request/")
        .json(&json!({ "username": "owner", "password": "brand-new-secret" }))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_user_can_delete_own_account() {
    let app = TestApp::new();
    let me = app.seed_user("owner", UserType::Owner, false).await;
    let token = app.login("owner").await;

    app.delete(&format!("/user/{}/", me.id), &token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    assert!(app.repos.users.find_by_id(me.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_current_user_is_self_only_even_for_superusers() {
    let app = TestApp::new();
    let admin = app.seed_user("admin", UserType::Owner, true).await;
    let other = app.seed_user("someone", UserType::Mechanic, false).await;
    let token = app.login("admin").await;

    let list = app.get("/current-user/", &token).await.json::<Value>();
    assert_eq!(ids(&list), vec![admin.id]);

    app.get(&format!("/current-user/{}/", admin.id), &token)
        .await
        .assert_status_ok();
    app.get(&format!("/current-user/{}/", other.id), &token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_current_user_is_read_only() {
    let app = TestApp::new();
    let me = app.seed_user("owner", UserType::Owner, false).await;
    let token = app.login("owner").await;

    app.delete(&format!("/current-user/{}/", me.id), &token)
        .await
        .assert_status(StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_non_numeric_id_is_not_found() {
    let app = TestApp::new();
    app.seed_user("owner", UserType::Owner, false).await;
    let token = app.login("owner").await;

    app.get("/user/abc/", &token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_overlong_email_is_a_field_error() {
    let app = TestApp::new();
    let me = app.seed_user("owner", UserType::Owner, false).await;
    let token = app.login("owner").await;
    let label = "b".repeat(63);
    let email = format!("{}@{label}.{label}.{label}.com", "a".repeat(64));

    let response = app
        .patch(&format!("/user/{}/", me.id), &token, json!({ "email": email }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&response.json::<Value>()), vec!["email"]);
}
