//! In-process API tests driving the router with `tower::ServiceExt::oneshot`.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use zeroize::Zeroizing;

use lesson_guard::{
    config::Config,
    crypto::guard::IdentifierGuard,
    models::lesson::LessonRecord,
    repositories::lesson::LessonStore,
    routes,
    state::AppState,
};

const SECRET: &str = "api-test-secret";

fn lesson(id: i64, video_id: &str) -> LessonRecord {
    LessonRecord {
        id,
        title: format!("Lesson {id}"),
        description: "Integration lesson".to_string(),
        duration: "15:30".to_string(),
        video_id: video_id.to_string(),
        thumbnail: format!("https://img.youtube.com/vi/{video_id}/maxresdefault.jpg"),
    }
}

fn app() -> Router {
    let config = Config {
        encryption_secret: Zeroizing::new(SECRET.to_string()),
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        lessons_file: None,
        cors_allowed_origins: Vec::new(),
        decrypt_rate_limit: None,
    };
    let catalog = LessonStore::new(vec![lesson(1, "abc123"), lesson(2, "xyz789")]).unwrap();
    let state = AppState::from_parts(config, catalog, IdentifierGuard::from_secret(SECRET));
    routes::build_router(state).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

async fn issue_token(app: &Router, lesson_id: i64) -> String {
    let (status, body) = get(app, &format!("/lessons/{lesson_id}/video")).await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn test_list_lessons_hides_video_ids() {
    let app = app();
    let (status, body) = get(&app, "/lessons").await;
    assert_eq!(status, StatusCode::OK);

    let lessons = body.as_array().unwrap();
    assert_eq!(lessons.len(), 2);
    assert_eq!(lessons[0]["id"], 1);
    assert_eq!(lessons[1]["id"], 2);
    for lesson in lessons {
        let fields = lesson.as_object().unwrap();
        assert!(!fields.contains_key("videoId"));
        assert!(fields.contains_key("thumbnail"));
        assert!(fields.contains_key("duration"));
    }
}

#[tokio::test]
async fn test_video_descriptor_shape() {
    let app = app();
    let (status, body) = get(&app, "/lessons/1/video").await;
    assert_eq!(status, StatusCode::OK);

    let token = body["token"].as_str().unwrap();
    assert_eq!(body["encryptedVideoId"], token);
    assert!(token.contains(':'));
    assert!(!token.contains("abc123"));
    assert!(body["timestamp"].as_i64().unwrap() > 0);
    assert_eq!(body["checksum"].as_str().unwrap().len(), 64);
}

#[tokio::test]
async fn test_unknown_lesson_is_not_found() {
    let app = app();
    for uri in [
        "/lessons/99/video",
        "/lessons/abc/video",
        "/api/lessons/0/video",
        "/lessons/+1/video",
        "/lessons/%201/video",
        "/lessons/1%20/video",
    ] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["error"], "Lesson not found");
    }
}

#[tokio::test]
async fn test_end_to_end_resolution() {
    let app = app();
    let token = issue_token(&app, 1).await;

    let (status, body) = post_json(&app, "/decrypt", json!({ "token": token })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "videoId": "abc123" }));

    // Tokens are not single use.
    let (status, _) = post_json(&app, "/decrypt", json!({ "token": token })).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_garbage_token_is_bad_request() {
    let app = app();
    let (status, body) = post_json(&app, "/decrypt", json!({ "token": "garbage" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid token");
}

#[tokio::test]
async fn test_missing_token_is_bad_request() {
    let app = app();
    for payload in [json!({}), json!({ "token": "" }), json!({ "token": null }), json!({ "token": 5 })] {
        let (status, body) = post_json(&app, "/decrypt", payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing token");
    }

    let (status, body) = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/decrypt")
            .body(Body::from("not json"))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing token");
}

#[tokio::test]
async fn test_unknown_video_is_forbidden() {
    let app = app();
    let token = IdentifierGuard::from_secret(SECRET).encrypt("unknown-id").unwrap();
    let (status, body) = post_json(&app, "/decrypt", json!({ "token": token })).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Token does not correspond to a known video");
}

#[tokio::test]
async fn test_tampered_token_is_rejected() {
    let app = app();
    let token = issue_token(&app, 2).await;
    let last = token.chars().last().unwrap();
    let replacement = if last == '0' { '1' } else { '0' };
    let tampered = format!("{}{}", &token[..token.len() - 1], replacement);

    let (status, _) = post_json(&app, "/decrypt", json!({ "token": tampered })).await;
    assert!(status == StatusCode::BAD_REQUEST || status == StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_api_prefix_and_legacy_field_name() {
    let app = app();
    let (status, body) = get(&app, "/api/lessons").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = get(&app, "/api/lessons/2/video").await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap();

    let (status, body) =
        post_json(&app, "/api/decrypt", json!({ "encryptedVideoId": token })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["videoId"], "xyz789");
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let app = app();
    let huge = "a".repeat(routes::MAX_BODY_BYTES + 1);
    let (status, _) = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/decrypt")
            .body(Body::from(format!(r#"{{"token":"{huge}"}}"#)))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_legacy_client_flow() {
    let app = app();

    let (status, lessons) = get(&app, "/api/lessons").await;
    assert_eq!(status, StatusCode::OK);
    let lesson_id = lessons[0]["id"].as_i64().unwrap();

    let (status, descriptor) = get(&app, &format!("/api/lessons/{lesson_id}/video")).await;
    assert_eq!(status, StatusCode::OK);
    let encrypted = descriptor["encryptedVideoId"].as_str().unwrap().to_string();

    let (status, body) =
        post_json(&app, "/api/decrypt", json!({ "encryptedVideoId": encrypted })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "videoId": "abc123" }));
}

#[tokio::test]
async fn test_whitespace_padded_token_is_invalid() {
    let app = app();
    let token = issue_token(&app, 1).await;

    let (status, body) =
        post_json(&app, "/decrypt", json!({ "token": format!("  {token}\n") })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid token");
}
