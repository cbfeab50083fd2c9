//! PDF Report API Tests

use axum::http::{header, StatusCode};
use pretty_assertions::assert_eq;
use test_case::test_case;

use crate::common::TestApp;
use fleet_server::domain::{NewVehiclePart, UserType};

/// Bottom margin of every report page, in points.
const MARGIN: f32 = 36.0;

/// An owner (no vehicle visibility) and `count` vehicles serviced by a mechanic.
async fn app_with_vehicles(count: usize) -> (TestApp, String) {
    let app = TestApp::new();
    let owner = app.seed_user("owner", UserType::Owner, false).await;
    let mech = app.seed_user("mech", UserType::Mechanic, false).await;
    for n in 0..count {
        app.seed_vehicle(&format!("KRP {n:03}R"), &owner, &mech).await;
    }
    let token = app.login("owner").await;
    (app, token)
}

fn page_count(bytes: &[u8]) -> usize {
    lopdf::Document::load_mem(bytes)
        .expect("response is not a readable PDF")
        .get_pages()
        .len()
}

/// Every string drawn, with its page number and baseline, in drawing order.
fn drawn_text(bytes: &[u8]) -> Vec<(u32, f32, String)> {
    let doc = lopdf::Document::load_mem(bytes).expect("response is not a readable PDF");
    let mut drawn = Vec::new();
    for (page, id) in doc.get_pages() {
        let content = doc
            .get_and_decode_page_content(id)
            .expect("page content is not decodable");
        let mut baseline = f32::NAN;
        for op in content.operations {
            match op.operator.as_str() {
                "Td" => baseline = op.operands[1].as_float().unwrap(),
                "Tj" => {
                    let text = String::from_utf8_lossy(op.operands[0].as_str().unwrap());
                    drawn.push((page, baseline, text.into_owned()));
                }
                _ => {}
            }
        }
    }
    drawn
}

#[tokio::test]
async fn test_table_report_is_a_pdf_attachment() {
    let (app, token) = app_with_vehicles(3).await;

    let response = app.get("/pdf-report/", &token).await;

    response.assert_status_ok();
    assert_eq!(response.header(header::CONTENT_TYPE), "application/pdf");
    assert_eq!(
        response.header(header::CONTENT_DISPOSITION),
        "attachment; filename=\"vehicle_details.pdf\""
    );
    let bytes = response.as_bytes();
    assert!(bytes.starts_with(b"%PDF-"));
    assert_eq!(page_count(bytes), 1);
}

#[tokio::test]
async fn test_report_ignores_caller_scope() {
    // The owner sees no vehicles through the API, yet the report covers all 45,
    // which no longer fit on one page.
    let (app, token) = app_with_vehicles(45).await;

    let response = app.get("/pdf-report/?layout=table", &token).await;

    response.assert_status_ok();
    assert_eq!(page_count(response.as_bytes()), 2);
}

#[tokio::test]
async fn test_narrative_report() {
    let (app, token) = app_with_vehicles(2).await;

    let response = app.get("/pdf-report/?layout=narrative", &token).await;

    response.assert_status_ok();
    assert_eq!(
        response.header(header::CONTENT_DISPOSITION),
        "attachment; filename=\"vehicle_report.pdf\""
    );
    assert_eq!(page_count(response.as_bytes()), 1);
}

#[test_case(0 ; "empty fleet")]
#[test_case(1 ; "single vehicle")]
#[tokio::test]
async fn test_small_fleets_render(count: usize) {
    let (app, token) = app_with_vehicles(count).await;

    let response = app.get("/pdf-report/", &token).await;

    response.assert_status_ok();
    assert_eq!(page_count(response.as_bytes()), 1);
}

#[tokio::test]
async fn test_unknown_layout_is_a_bad_request() {
    let (app, token) = app_with_vehicles(0).await;

    app.get("/pdf-report/?layout=landscape", &token)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test_case(3 ; "single page")]
#[test_case(45 ; "two pages")]
#[tokio::test]
async fn test_table_has_header_then_one_row_per_vehicle(count: usize) {
    let (app, token) = app_with_vehicles(count).await;

    let response = app.get("/pdf-report/", &token).await;

    response.assert_status_ok();
    let text: Vec<String> = drawn_text(response.as_bytes())
        .into_iter()
        .map(|(_, _, text)| text)
        .collect();
    assert_eq!(
        &text[..6],
        &["Plate Number", "Vehicle Status", "Type", "Model", "Engine Number", "Color"]
    );
    assert_eq!(text.iter().filter(|t| *t == "Plate Number").count(), 1);

    // Six cells per row: header plus one row per vehicle
    assert_eq!(text.len(), 6 * (count + 1));
    let plates: Vec<&str> = text[6..].iter().step_by(6).map(String::as_str).collect();
    let expected: Vec<String> = (0..count).map(|n| format!("KRP {n:03}R")).collect();
    assert_eq!(plates, expected);
}

#[tokio::test]
async fn test_long_parts_list_stays_above_the_bottom_margin() {
    let (app, token) = app_with_vehicles(1).await;
    let vehicle = app.repos.vehicles.find_by_id(1).await.unwrap().unwrap();
    for n in 1..=150 {
        app.repos
            .vehicle_parts
            .create(&NewVehiclePart {
                vehicle_id: vehicle.id,
                mechanic_id: vehicle.mechanic_id,
                part_name: format!("Part {n}"),
                part_condition: "Worn".into(),
                part_status: "Ordered".into(),
                notes: None,
            })
            .await
            .unwrap();
    }

    let response = app.get("/pdf-report/?layout=narrative", &token).await;

    response.assert_status_ok();
    let drawn = drawn_text(response.as_bytes());
    assert!(page_count(response.as_bytes()) > 1);
    for (page, y, text) in &drawn {
        assert!(*y >= MARGIN, "{text:?} on page {page} drawn at y={y}");
    }
    let joined: Vec<&str> = drawn.iter().map(|(_, _, text)| text.as_str()).collect();
    assert!(joined.join(" ").ends_with("Part 150 (Worn, Ordered)"));
}
