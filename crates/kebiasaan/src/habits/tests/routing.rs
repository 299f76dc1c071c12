use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use super::common::*;
use crate::habits::router::recap_router;
use crate::habits::service::MonthlyRecapService;

fn router() -> axum::Router {
    recap_router(Arc::new(recap_service(seeded_repository())))
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request builds")
}

#[tokio::test]
async fn export_route_streams_csv_attachment() {
    let response = router()
        .oneshot(get("/api/v1/rekap/export?bulan=2025-03&kelas=7A"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/csv"));
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(disposition.contains("penilaian_akhir_"));

    let body = String::from_utf8(read_body(response).await).expect("utf-8 body");
    let lines: Vec<&str> = body.split("\r\n").filter(|line| !line.is_empty()).collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("No,NISN,Nama,Kelas,"));
    assert!(lines[2].contains("\"Budi, S.\""));
}

#[tokio::test]
async fn export_route_requires_month() {
    let response = router()
        .oneshot(get("/api/v1/rekap/export"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap_or_default()
        .contains("bulan"));
}

#[tokio::test]
async fn export_route_rejects_malformed_month() {
    let response = router()
        .oneshot(get("/api/v1/rekap/export?bulan=2025-13"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn category_route_returns_raw_entries() {
    let response = router()
        .oneshot(get("/api/v1/rekap/kategori/bangun-pagi?bulan=2025-03&walas=Bu%20Sari"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let students = body.as_array().expect("array payload");
    assert_eq!(students.len(), 2);
    let budi = students
        .iter()
        .find(|student| student["nisn"] == "002")
        .expect("budi present");
    assert_eq!(budi["entries"][0]["tanggal"], "2025-03-01");
    assert_eq!(budi["entries"][0]["jam"], "06:45");
    assert_eq!(budi["entries"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn category_route_rejects_unknown_category() {
    let response = router()
        .oneshot(get("/api/v1/rekap/kategori/menyanyi"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert_eq!(
        body["error"],
        "invalid category: unknown habit category 'menyanyi'"
    );
}

#[tokio::test]
async fn student_route_returns_indicators() {
    let response = router()
        .oneshot(get("/api/v1/siswa/001/indikator?bulan=2025-03"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["bulan"], "2025-03");
    assert_eq!(body["label"], "Maret 2025");
    assert_eq!(body["indikator"]["beribadah"]["components"][0]["key"], "sholatFajar");
    assert_eq!(body["indikator"]["tidur"]["rating"], 1);
}

#[tokio::test]
async fn student_route_returns_not_found_for_unknown_nisn() {
    let response = router()
        .oneshot(get("/api/v1/siswa/999/indikator?bulan=2025-03"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], "student 999 not found");
}

#[tokio::test]
async fn repository_outage_maps_to_internal_error() {
    let service = MonthlyRecapService::new(Arc::new(UnavailableRepository), rubric());
    let response = recap_router(Arc::new(service))
        .oneshot(get("/api/v1/rekap/kategori/tidur"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
