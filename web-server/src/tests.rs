use std::path::Path;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::config::Config;
use crate::{create_router, AppState};

const BOUNDARY: &str = "anomalia-test-boundary";

const TRAFFIC_CSV: &str = "f1,f2,f3,elapsed\n1,0,0,100\n2,0,0,110\n30,0,0,400\n4,0,0,105\n";

/// Place the ONNX fixture (flags rows with `f1 > 25`) and its manifest in `dir`
fn install_model(dir: &Path) {
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("../core-service/tests/fixtures");
    std::fs::copy(fixtures.join("threshold_model.onnx"), dir.join("model_anomalia.onnx")).unwrap();
    std::fs::copy(fixtures.join("threshold_model.json"), dir.join("model_anomalia.json")).unwrap();
}

fn app(models_dir: &Path) -> Router {
    create_router(AppState {
        config: Config {
            models_dir: models_dir.to_path_buf(),
            ..Default::default()
        },
    })
}

fn multipart_request(uri: &str, csv: Option<&str>, threshold: Option<&str>) -> Request<Body> {
    let mut body = String::new();
    if let Some(csv) = csv {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"data.csv\"\r\nContent-Type: text/csv\r\n\r\n{csv}\r\n"
        ));
    }
    if let Some(threshold) = threshold {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"threshold\"\r\n\r\n{threshold}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_reports_missing_model() {
    let dir = tempfile::tempdir().unwrap();
    let response = app(dir.path())
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["model_ready"], false);
}

#[tokio::test]
async fn test_status_tracks_model_and_baseline_files() {
    let dir = tempfile::tempdir().unwrap();

    let response = app(dir.path())
        .oneshot(Request::get("/api/status").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["model_exists"], false);
    assert_eq!(body["baseline_exists"], false);
    assert_eq!(body["default_threshold"], 5.0);

    std::fs::write(dir.path().join("model_anomalia.onnx"), b"stub").unwrap();
    std::fs::write(dir.path().join("baseline.csv"), "elapsed\n100\n").unwrap();

    let response = app(dir.path())
        .oneshot(Request::get("/api/status").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["model_exists"], true);
    assert_eq!(body["baseline_exists"], true);
}

#[tokio::test]
async fn test_api_classify_without_model() {
    let dir = tempfile::tempdir().unwrap();
    let response = app(dir.path())
        .oneshot(multipart_request("/api/classify", Some("f1\n1\n2\n"), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body, serde_json::json!({ "error": "model not found" }));
}

#[tokio::test]
async fn test_upload_without_model_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let response = app(dir.path())
        .oneshot(multipart_request("/upload", Some("f1\n1\n2\n"), Some("10")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().starts_with("Model file not found"));
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn test_upload_rejects_malformed_csv() {
    let dir = tempfile::tempdir().unwrap();
    let response = app(dir.path())
        .oneshot(multipart_request("/upload", Some("a,b\n1,2\n3\n"), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().starts_with("Could not read CSV"));
}

#[tokio::test]
async fn test_upload_requires_file() {
    let dir = tempfile::tempdir().unwrap();
    let response = app(dir.path())
        .oneshot(multipart_request("/upload", None, Some("5")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "No file uploaded");
}

#[tokio::test]
async fn test_upload_rejects_bad_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let response = app(dir.path())
        .oneshot(multipart_request("/upload", Some("f1\n1\n"), Some("lots")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cors_allows_frontend_origin() {
    let dir = tempfile::tempdir().unwrap();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/classify")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app(dir.path()).oneshot(request).await.unwrap();

    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:3000"
    );
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );
}

#[tokio::test]
async fn test_upload_reports_classification() {
    let dir = tempfile::tempdir().unwrap();
    install_model(dir.path());
    std::fs::write(dir.path().join("baseline.csv"), "elapsed\n98\n102\n").unwrap();

    let response = app(dir.path())
        .oneshot(multipart_request("/upload", Some(TRAFFIC_CSV), Some("10")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;

    assert_eq!(body["rows"], 4);
    assert_eq!(body["anomalies"], 1);
    assert_eq!(body["pct_anom"], "25.00");
    assert_eq!(body["anomaly_rate"], 25.0);
    assert_eq!(body["threshold"], 10.0);
    assert_eq!(body["alert"], true);
    assert_eq!(body["strategy"], "discrete_labeler");
    assert_eq!(body["features"]["columns"], serde_json::json!(["f1", "f2", "f3"]));
    assert_eq!(body["features"]["fallback"], false);

    let sample = body["sample"].as_array().unwrap();
    assert_eq!(sample.len(), 4);
    assert_eq!(sample[0]["f1"], 1.0);
    assert_eq!(sample[0]["_is_anomaly"], false);
    assert_eq!(sample[0]["_label"], "Normal");
    assert_eq!(sample[2]["_is_anomaly"], true);
    assert_eq!(sample[2]["_label"], "Anomalia");

    assert_eq!(body["latency_col"], "elapsed");
    assert_eq!(body["current_series"], serde_json::json!([100.0, 110.0, 400.0, 105.0]));
    assert_eq!(body["baseline_series"], serde_json::json!([98.0, 102.0]));
}

#[tokio::test]
async fn test_upload_below_threshold_does_not_alert() {
    let dir = tempfile::tempdir().unwrap();
    install_model(dir.path());

    let response = app(dir.path())
        .oneshot(multipart_request("/upload", Some(TRAFFIC_CSV), Some("25")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["alert"], false);
    assert_eq!(body["latency_col"], "elapsed");
    assert!(body["baseline_series"].is_null());
}

#[tokio::test]
async fn test_api_classify_returns_labels() {
    let dir = tempfile::tempdir().unwrap();
    install_model(dir.path());

    let response = app(dir.path())
        .oneshot(multipart_request("/api/classify", Some(TRAFFIC_CSV), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;

    assert_eq!(body["n_rows"], 4);
    assert_eq!(body["pct_anom"], 25.0);
    assert_eq!(
        body["labels"],
        serde_json::json!(["Normal", "Normal", "Anomalia", "Normal"])
    );
    assert_eq!(body["latency_col"], "elapsed");
    assert!(body["baseline_series"].is_null());

    let sample = body["sample"].as_array().unwrap();
    assert_eq!(sample.len(), 4);
    assert_eq!(sample[3]["elapsed"], 105.0);
    assert!(sample[3].get("_label").is_none());
}

#[tokio::test]
async fn test_upload_rejects_missing_feature_values() {
    let dir = tempfile::tempdir().unwrap();
    install_model(dir.path());

    let response = app(dir.path())
        .oneshot(multipart_request("/upload", Some("f1,f2,f3\n1,0,0\n,0,0\n50,0,0\n"), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["kind"], "missing_feature_values");
    assert_eq!(body["status"], 422);
}
