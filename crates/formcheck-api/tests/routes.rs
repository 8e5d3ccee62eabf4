//! Router tests driven through `tower::ServiceExt::oneshot`.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use formcheck_api::{create_router, ApiConfig, AppState};
use formcheck_models::{Joint, JointSample, PoseFrame};

fn app() -> Router {
    app_with(ApiConfig::default())
}

fn app_with(config: ApiConfig) -> Router {
    create_router(AppState::new(config), None)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value, axum::http::HeaderMap) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body, headers)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn pose(shoulder: (f64, f64), hip: (f64, f64), knee: (f64, f64), ear: (f64, f64)) -> PoseFrame {
    let s = |(x, y): (f64, f64)| JointSample::new(x, y, 0.0, 0.9);
    PoseFrame::empty()
        .with_joint(Joint::LeftEar, s(ear))
        .with_joint(Joint::LeftShoulder, s(shoulder))
        .with_joint(Joint::LeftHip, s(hip))
        .with_joint(Joint::LeftKnee, s(knee))
        .with_joint(Joint::LeftAnkle, s((0.50, 0.90)))
        .with_joint(Joint::LeftFootIndex, s((0.58, 0.91)))
}

/// Stand, sit to a hip angle well below parallel, stand.
fn squat_frames() -> Value {
    let standing = pose((0.50, 0.20), (0.50, 0.50), (0.52, 0.70), (0.50, 0.12));
    let bottom = pose((0.60, 0.47), (0.42, 0.70), (0.56, 0.68), (0.645, 0.405));
    serde_json::to_value(vec![standing.clone(), bottom, standing]).unwrap()
}

#[tokio::test]
async fn root_reports_running() {
    let (status, body, _) = send(app(), get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
}

#[tokio::test]
async fn health_is_healthy() {
    let (status, body, _) = send(app(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn exercises_are_listed() {
    let (status, body, _) = send(app(), get("/api/exercises")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "exercises": ["squat", "deadlift"] }));
}

#[tokio::test]
async fn metrics_route_absent_without_recorder() {
    let (status, _, _) = send(app(), get("/metrics")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn analyze_form_returns_report() {
    let request = json!({
        "exerciseType": "squat",
        "durationSeconds": 2.0,
        "frames": squat_frames(),
    });
    let (status, body, _) = send(app(), post_json("/api/analyze-form", &request)).await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["exerciseType"], "squat");
    assert!(body["timestamp"].is_string());

    let report = &body["report"];
    assert_eq!(report["frameCount"], 3);
    assert_eq!(report["duration"], "2.0s");
    assert_eq!(report["keyPositions"]["setup"]["frame"], 0);
    assert_eq!(report["keyPositions"]["bottomPosition"]["frame"], 1);
    assert_eq!(report["keyPositions"]["completion"]["frame"], 2);
    assert!(report["keyPositions"]["bottomPosition"]["hipAngle"].is_number());
    assert!(report["temporalAnalysis"]["riseRateRatio"].is_number());
    assert_eq!(report["riskFlags"], json!([]));
    assert!(report.get("allFramesData").is_none());
}

#[tokio::test]
async fn analyze_form_can_include_frames() {
    let request = json!({
        "exerciseType": "SQUAT",
        "durationSeconds": 2.0,
        "frames": squat_frames(),
        "sampleCount": 2,
        "includeFrames": true,
    });
    let (status, body, _) = send(app(), post_json("/api/analyze-form", &request)).await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["exerciseType"], "squat");
    assert_eq!(body["report"]["frameCount"], 2);
    assert_eq!(body["report"]["allFramesData"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn unsupported_exercise_is_bad_request() {
    let request = json!({
        "exerciseType": "bench-press",
        "durationSeconds": 2.0,
        "frames": squat_frames(),
    });
    let (status, body, _) = send(app(), post_json("/api/analyze-form", &request)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains("bench-press"));
    assert!(detail.contains("squat, deadlift"));
}

#[tokio::test]
async fn undetected_body_is_unprocessable() {
    let empty = vec![Value::Null; 33];
    let request = json!({
        "exerciseType": "deadlift",
        "durationSeconds": 1.0,
        "frames": [empty.clone(), empty],
    });
    let (status, body, _) = send(app(), post_json("/api/analyze-form", &request)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("whole body"));
    assert_eq!(body["code"], "metrics_extraction");
}

#[tokio::test]
async fn malformed_frame_is_bad_request() {
    let request = json!({
        "exerciseType": "squat",
        "durationSeconds": 1.0,
        "frames": [vec![Value::Null; 32]],
    });
    let (status, body, _) = send(app(), post_json("/api/analyze-form", &request)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("33"));
}

#[tokio::test]
async fn frame_cap_is_enforced() {
    let config = ApiConfig {
        max_frames: 2,
        ..ApiConfig::default()
    };
    let request = json!({
        "exerciseType": "squat",
        "durationSeconds": 2.0,
        "frames": squat_frames(),
    });
    let (status, body, _) = send(app_with(config), post_json("/api/analyze-form", &request)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("at most 2"));
}

#[tokio::test]
async fn sample_count_above_frames_is_rejected() {
    for samples in [4u64, 2_000_000, 4_294_967_295] {
        let request = json!({
            "exerciseType": "squat",
            "durationSeconds": 2.0,
            "frames": squat_frames(),
            "sampleCount": samples,
        });
        let (status, body, _) = send(app(), post_json("/api/analyze-form", &request)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "sampleCount {samples}");
        assert!(body["detail"].as_str().unwrap().contains("sampleCount"));
    }
}

#[tokio::test]
async fn sample_count_equal_to_frames_is_accepted() {
    let request = json!({
        "exerciseType": "squat",
        "durationSeconds": 2.0,
        "frames": squat_frames(),
        "sampleCount": 3,
    });
    let (status, body, _) = send(app(), post_json("/api/analyze-form", &request)).await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["report"]["frameCount"], 3);
    assert_eq!(body["report"]["keyPositions"]["bottomPosition"]["frame"], 1);
}

#[tokio::test]
async fn empty_frames_fail_validation() {
    let request = json!({
        "exerciseType": "squat",
        "durationSeconds": 2.0,
        "frames": [],
    });
    let (status, _, _) = send(app(), post_json("/api/analyze-form", &request)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let config = ApiConfig {
        max_body_size: 64,
        ..ApiConfig::default()
    };
    let request = json!({
        "exerciseType": "squat",
        "durationSeconds": 2.0,
        "frames": squat_frames(),
    });
    let (status, _, _) = send(app_with(config), post_json("/api/analyze-form", &request)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn request_id_is_echoed() {
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "lift-42")
        .body(Body::empty())
        .unwrap();
    let (_, _, headers) = send(app(), request).await;
    assert_eq!(headers["x-request-id"], "lift-42");

    let (_, _, headers) = send(app(), get("/health")).await;
    assert!(!headers["x-request-id"].is_empty());
}

#[tokio::test]
async fn cors_preflight_allows_dev_origin() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/analyze-form")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();

    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:5173"
    );
}
