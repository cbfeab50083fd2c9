//! Service Catalogue and Service Record API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{error_fields, ids, TestApp};
use fleet_server::domain::UserType;

async fn app_with_owner() -> (TestApp, String) {
    let app = TestApp::new();
    app.seed_user("owner", UserType::Owner, false).await;
    let token = app.login("owner").await;
    (app, token)
}

async fn create(app: &TestApp, token: &str, path: &str, body: Value) -> i64 {
    let response = app.post(path, token, body).await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_sub_service_with_unknown_service_type_persists_nothing() {
    let (app, token) = app_with_owner().await;

    let response = app
        .post(
            "/sub-service/",
            &token,
            json!({ "service_type": 404, "name": "Oil change" }),
        )
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(error_fields(&body), vec!["service_type"]);
    assert_eq!(
        body["errors"][0]["message"],
        "Invalid pk \"404\" - object does not exist."
    );
    assert_eq!(app.get("/sub-service/", &token).await.json::<Value>(), json!([]));
}

#[tokio::test]
async fn test_catalogue_is_shared_by_every_user() {
    let (app, token) = app_with_owner().await;
    app.seed_user("mech", UserType::Mechanic, false).await;
    let other = app.login("mech").await;

    let engine = create(
        &app,
        &token,
        "/service-type/",
        json!({ "name": "Engine", "description": "Engine work" }),
    )
    .await;
    create(
        &app,
        &other,
        "/sub-service/",
        json!({ "service_type": engine, "name": "Oil change" }),
    )
    .await;

    assert_eq!(ids(&app.get("/service-type/", &other).await.json::<Value>()), vec![engine]);
    assert_eq!(app.get("/sub-service/", &token).await.json::<Value>().as_array().unwrap().len(), 1);

    app.delete(&format!("/service-type/{engine}/"), &other)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    assert_eq!(app.get("/sub-service/", &token).await.json::<Value>(), json!([]));
}

#[tokio::test]
async fn test_service_type_update_and_replace() {
    let (app, token) = app_with_owner().await;
    let id = create(
        &app,
        &token,
        "/service-type/",
        json!({ "name": "Brakes", "description": "Pads and discs" }),
    )
    .await;
    let path = format!("/service-type/{id}/");

    let patched = app.patch(&path, &token, json!({ "name": "Braking" })).await;
    patched.assert_status_ok();
    let body = patched.json::<Value>();
    assert_eq!(body["name"], "Braking");
    assert_eq!(body["description"], "Pads and discs");

    let replaced = app.put(&path, &token, json!({ "name": "Brake system" })).await;
    replaced.assert_status_ok();
    assert_eq!(replaced.json::<Value>()["description"], Value::Null);

    app.get("/service-type/999/", &token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_json_is_a_bad_request() {
    let (app, token) = app_with_owner().await;

    let response = app
        .server
        .post("/service-type/")
        .authorization_bearer(&token)
        .content_type("application/json")
        .bytes("{\"name\": ".into())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_service_record_lifecycle() {
    let (app, token) = app_with_owner().await;
    let owner = app.repos.users.find_by_username("owner").await.unwrap().unwrap();
    let mech = app.seed_user("mech", UserType::Mechanic, false).await;
    let vehicle = app.seed_vehicle("KAB 100X", &owner, &mech).await;
    let engine = create(&app, &token, "/service-type/", json!({ "name": "Engine" })).await;
    let oil = create(
        &app,
        &token,
        "/sub-service/",
        json!({ "service_type": engine, "name": "Oil change" }),
    )
    .await;

    let record = app
        .post(
            "/vehicle-service/",
            &token,
            json!({
                "vehicle": vehicle.id,
                "service_type": engine,
                "sub_service": oil,
                "service_date": "2024-06-01"
            }),
        )
        .await;
    record.assert_status(StatusCode::CREATED);
    let body = record.json::<Value>();
    assert_eq!(body["status"], "pending");
    assert_eq!(body["service_date"], "2024-06-01");
    let record_id = body["id"].as_i64().unwrap();
    let path = format!("/vehicle-service/{record_id}/");

    let updated = app
        .patch(&path, &token, json!({ "status": "completed" }))
        .await;
    updated.assert_status_ok();
    assert_eq!(updated.json::<Value>()["status"], "completed");

    // Deleting the sub-service keeps the record but clears the link
    app.delete(&format!("/sub-service/{oil}/"), &token)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    let kept = app.get(&path, &token).await;
    kept.assert_status_ok();
    assert_eq!(kept.json::<Value>()["sub_service"], Value::Null);

    app.delete(&path, &token)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    assert_eq!(app.get("/vehicle-service/", &token).await.json::<Value>(), json!([]));
}

#[tokio::test]
async fn test_sub_service_must_match_service_type() {
    let (app, token) = app_with_owner().await;
    let owner = app.repos.users.find_by_username("owner").await.unwrap().unwrap();
    let vehicle = app.seed_vehicle("KAB 200Y", &owner, &owner).await;
    let engine = create(&app, &token, "/service-type/", json!({ "name": "Engine" })).await;
    let brakes = create(&app, &token, "/service-type/", json!({ "name": "Brakes" })).await;
    let pads = create(
        &app,
        &token,
        "/sub-service/",
        json!({ "service_type": brakes, "name": "Pads" }),
    )
    .await;

    let response = app
        .post(
            "/vehicle-service/",
            &token,
            json!({
                "vehicle": vehicle.id,
                "service_type": engine,
                "sub_service": pads,
                "service_date": "2024-06-01"
            }),
        )
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&response.json::<Value>()), vec!["sub_service"]);
}

#[tokio::test]
async fn test_service_record_requires_a_valid_date() {
    let (app, token) = app_with_owner().await;

    let response = app
        .post(
            "/vehicle-service/",
            &token,
            json!({ "vehicle": 1, "service_type": 1, "service_date": "01/06/2024" }),
        )
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_sub_service_in_use_cannot_change_service_type() {
    let (app, token) = app_with_owner().await;
    let owner = app.repos.users.find_by_username("owner").await.unwrap().unwrap();
    let vehicle = app.seed_vehicle("KAB 300Z", &owner, &owner).await;
    let engine = create(&app, &token, "/service-type/", json!({ "name": "Engine" })).await;
    let brakes = create(&app, &token, "/service-type/", json!({ "name": "Brakes" })).await;
    let oil = create(
        &app,
        &token,
        "/sub-service/",
        json!({ "service_type": engine, "name": "Oil change" }),
    )
    .await;
    let spare = create(
        &app,
        &token,
        "/sub-service/",
        json!({ "service_type": engine, "name": "Timing belt" }),
    )
    .await;
    let record = create(
        &app,
        &token,
        "/vehicle-service/",
        json!({
            "vehicle": vehicle.id,
            "service_type": engine,
            "sub_service": oil,
            "service_date": "2024-06-01"
        }),
    )
    .await;
    let oil_path = format!("/sub-service/{oil}/");

    let moved = app
        .patch(&oil_path, &token, json!({ "service_type": brakes }))
        .await;
    moved.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&moved.json::<Value>()), vec!["service_type"]);

    let stored = app.get(&oil_path, &token).await.json::<Value>();
    assert_eq!(stored["service_type"], engine);
    let record = app
        .get(&format!("/vehicle-service/{record}/"), &token)
        .await
        .json::<Value>();
    assert_eq!(record["service_type"], engine);
    assert_eq!(record["sub_service"], oil);

    // Renaming is fine, and so is moving a sub-service nobody uses
    app.patch(&oil_path, &token, json!({ "name": "Oil and filter" }))
        .await
        .assert_status_ok();
    let spare_moved = app
        .patch(
            &format!("/sub-service/{spare}/"),
            &token,
            json!({ "service_type": brakes }),
        )
        .await;
    spare_moved.assert_status_ok();
    assert_eq!(spare_moved.json::<Value>()["service_type"], brakes);
}
