//! Vehicle and Vehicle Part API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{error_fields, ids, TestApp};
use fleet_server::domain::{NewVehiclePart, Scope, User, UserType};

struct Fleet {
    app: TestApp,
    mech_a: User,
    mech_b: User,
    owner: User,
}

/// Two mechanics with two vehicles each, all owned by one owner.
async fn fleet() -> Fleet {
    let app = TestApp::new();
    app.seed_user("admin", UserType::Owner, true).await;
    let mech_a = app.seed_user("mech_a", UserType::Mechanic, false).await;
    let mech_b = app.seed_user("mech_b", UserType::Mechanic, false).await;
    let owner = app.seed_user("owner", UserType::Owner, false).await;

    for (plate, mechanic) in [
        ("KAA 001A", &mech_a),
        ("KAA 002A", &mech_a),
        ("KBB 001B", &mech_b),
        ("KBB 002B", &mech_b),
    ] {
        let vehicle = app.seed_vehicle(plate, &owner, mechanic).await;
        app.repos
            .vehicle_parts
            .create(&NewVehiclePart {
                vehicle_id: vehicle.id,
                mechanic_id: mechanic.id,
                part_name: "Brake pad".into(),
                part_condition: "Worn".into(),
                part_status: "Ordered".into(),
                notes: None,
            })
            .await
            .unwrap();
    }

    Fleet {
        app,
        mech_a,
        mech_b,
        owner,
    }
}

fn vehicle_body(plate: &str, owner: &User, mechanic: &User) -> Value {
    json!({
        "vehicle_plate_number": plate,
        "vehicle_type": "Pickup",
        "vehicle_model": "Toyota Hilux",
        "vehicle_engine_number": "2GD-0042",
        "vehicle_color": "Red",
        "vehicle_general_condition": "Excellent",
        "vehicle_owner": owner.id,
        "mechanic": mechanic.id
    })
}

#[tokio::test]
async fn test_mechanic_sees_only_assigned_vehicles() {
    let f = fleet().await;
    let token = f.app.login("mech_a").await;

    let vehicles = f.app.get("/vehicle/", &token).await.json::<Value>();

    let rows = vehicles.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|v| v["mechanic"] == f.mech_a.id));
}

#[tokio::test]
async fn test_mechanic_sees_only_assigned_parts() {
    let f = fleet().await;
    let token = f.app.login("mech_b").await;

    let parts = f.app.get("/vehicle-part/", &token).await.json::<Value>();

    let rows = parts.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|p| p["mechanic"] == f.mech_b.id));
}

#[tokio::test]
async fn test_non_mechanic_sees_nothing() {
    let f = fleet().await;
    let token = f.app.login("owner").await;

    for path in ["/vehicle/", "/vehicle-part/"] {
        let response = f.app.get(path, &token).await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), json!([]));
    }
}

#[tokio::test]
async fn test_superuser_sees_every_vehicle() {
    let f = fleet().await;
    let token = f.app.login("admin").await;

    let vehicles = f.app.get("/vehicle/", &token).await.json::<Value>();
    let all = f.app.repos.vehicles.list(Scope::All).await.unwrap();

    assert_eq!(
        ids(&vehicles),
        all.iter().map(|v| v.id).collect::<Vec<_>>()
    );
    assert_eq!(all.len(), 4);
}

#[tokio::test]
async fn test_other_mechanics_vehicle_is_not_found() {
    let f = fleet().await;
    let token = f.app.login("mech_a").await;
    let theirs = f.app.get("/vehicle/", &f.app.login("mech_b").await).await.json::<Value>();
    let id = ids(&theirs)[0];
    let path = format!("/vehicle/{id}/");

    f.app.get(&path, &token).await.assert_status(StatusCode::NOT_FOUND);
    f.app
        .patch(&path, &token, json!({ "vehicle_color": "Black" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    f.app.delete(&path, &token).await.assert_status(StatusCode::NOT_FOUND);

    assert!(f.app.repos.vehicles.find_by_id(id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_any_user_can_create_a_vehicle() {
    let f = fleet().await;
    let token = f.app.login("owner").await;

    let response = f
        .app
        .post("/vehicle/", &token, vehicle_body("KCC 123C", &f.owner, &f.mech_a))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["vehicle_plate_number"], "KCC 123C");
    assert_eq!(body["vehicle_owner"], f.owner.id);
    assert_eq!(body["mechanic"], f.mech_a.id);

    // Created, but outside the owner's own scope
    assert_eq!(f.app.get("/vehicle/", &token).await.json::<Value>(), json!([]));
}

#[tokio::test]
async fn test_duplicate_plate_is_a_field_error() {
    let f = fleet().await;
    let token = f.app.login("admin").await;

    let response = f
        .app
        .post("/vehicle/", &token, vehicle_body("KAA 001A", &f.owner, &f.mech_a))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        error_fields(&response.json::<Value>()),
        vec!["vehicle_plate_number"]
    );
}

#[tokio::test]
async fn test_missing_fields_are_listed() {
    let f = fleet().await;
    let token = f.app.login("admin").await;

    let response = f
        .app
        .post("/vehicle/", &token, json!({ "vehicle_plate_number": "KDD 1" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        error_fields(&response.json::<Value>()),
        vec![
            "mechanic",
            "vehicle_color",
            "vehicle_engine_number",
            "vehicle_general_condition",
            "vehicle_model",
            "vehicle_owner",
            "vehicle_type",
        ]
    );
}

#[tokio::test]
async fn test_unknown_mechanic_is_rejected() {
    let f = fleet().await;
    let token = f.app.login("admin").await;
    let mut body = vehicle_body("KEE 555E", &f.owner, &f.mech_a);
    body["mechanic"] = json!(9999);

    let response = f.app.post("/vehicle/", &token, body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&response.json::<Value>()), vec!["mechanic"]);
}

#[tokio::test]
async fn test_put_requires_every_field_and_patch_does_not() {
    let f = fleet().await;
    let token = f.app.login("mech_a").await;
    let id = ids(&f.app.get("/vehicle/", &token).await.json::<Value>())[0];
    let path = format!("/vehicle/{id}/");

    f.app
        .put(&path, &token, json!({ "vehicle_color": "Green" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let patched = f
        .app
        .patch(&path, &token, json!({ "vehicle_color": "Green" }))
        .await;
    patched.assert_status_ok();
    assert_eq!(patched.json::<Value>()["vehicle_color"], "Green");

    let replaced = f
        .app
        .put(&path, &token, vehicle_body("KAA 009Z", &f.owner, &f.mech_a))
        .await;
    replaced.assert_status_ok();
    assert_eq!(replaced.json::<Value>()["vehicle_plate_number"], "KAA 009Z");
}

#[tokio::test]
async fn test_reassigned_vehicle_leaves_mechanic_scope() {
    let f = fleet().await;
    let token = f.app.login("mech_a").await;
    let id = ids(&f.app.get("/vehicle/", &token).await.json::<Value>())[0];

    f.app
        .patch(&format!("/vehicle/{id}/"), &token, json!({ "mechanic": f.mech_b.id }))
        .await
        .assert_status_ok();

    let remaining = ids(&f.app.get("/vehicle/", &token).await.json::<Value>());
    assert!(!remaining.contains(&id));
}

#[tokio::test]
async fn test_deleting_vehicle_removes_its_parts() {
    let f = fleet().await;
    let token = f.app.login("admin").await;
    let vehicle_id = ids(&f.app.get("/vehicle/", &token).await.json::<Value>())[0];

    f.app
        .delete(&format!("/vehicle/{vehicle_id}/"), &token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let parts = f.app.get("/vehicle-part/", &token).await.json::<Value>();
    assert!(parts
        .as_array()
        .unwrap()
        .iter()
        .all(|p| p["vehicle"] != vehicle_id));
    assert_eq!(parts.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_part_crud() {
    let f = fleet().await;
    let token = f.app.login("mech_a").await;
    let vehicle_id = ids(&f.app.get("/vehicle/", &token).await.json::<Value>())[0];

    let created = f
        .app
        .post(
            "/vehicle-part/",
            &token,
            json!({
                "vehicle": vehicle_id,
                "mechanic": f.mech_a.id,
                "part_name": "Radiator",
                "part_condition": "Leaking",
                "part_status": "Replaced",
                "notes": "OEM part"
            }),
        )
        .await;
    created.assert_status(StatusCode::CREATED);
    let part_id = created.json::<Value>()["id"].as_i64().unwrap();
    let path = format!("/vehicle-part/{part_id}/");

    let cleared = f.app.patch(&path, &token, json!({ "notes": null })).await;
    cleared.assert_status_ok();
    assert_eq!(cleared.json::<Value>()["notes"], Value::Null);

    f.app.delete(&path, &token).await.assert_status(StatusCode::NO_CONTENT);
    f.app.get(&path, &token).await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_part_for_unknown_vehicle_is_rejected() {
    let f = fleet().await;
    let token = f.app.login("admin").await;

    let response = f
        .app
        .post(
            "/vehicle-part/",
            &token,
            json!({
                "vehicle": 777,
                "mechanic": f.mech_a.id,
                "part_name": "Clutch",
                "part_condition": "New",
                "part_status": "Fitted"
            }),
        )
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&response.json::<Value>()), vec!["vehicle"]);
}

#[tokio::test]
async fn test_wrongly_typed_reference_is_a_field_error() {
    let f = fleet().await;
    let token = f.app.login("admin").await;
    let mut body = vehicle_body("KFF 666F", &f.owner, &f.mech_a);
    body["mechanic"] = json!("abc");

    let response = f.app.post("/vehicle/", &token, body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&response.json::<Value>()), vec!["mechanic"]);
}
