//! Functional tests for the HTTP surface

use affiliate_studio::{api::routes::create_router, config::Settings, generation::GeminiClient, AppState};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BOUNDARY: &str = "studio-test-boundary";

fn create_test_app(server: &MockServer) -> Router {
    let mut settings = Settings::default();
    settings.gemini.api_key = "test-api-key".to_string();
    settings.gemini.base_url = server.uri();

    let client = GeminiClient::new(&settings.gemini).unwrap();
    create_router(Arc::new(AppState::new(settings, Arc::new(client))))
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn multipart_request(
    method: Method,
    uri: &str,
    fields: &[(&str, &str)],
    file: Option<(&str, &[u8])>,
) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((content_type, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"product.png\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    (status, headers, body)
}

async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, _, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

async fn fill_form(app: &Router) {
    let (status, _) = send_json(
        app,
        json_request(
            Method::PUT,
            "/api/session/description",
            json!({ "description": "A matte black wireless headphone with gold trim" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send_json(
        app,
        json_request(Method::PUT, "/api/session/model", json!({ "id": "male-caucasian" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, session) = send_json(
        app,
        json_request(Method::PUT, "/api/session/vibe", json!({ "id": "luxury" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["complete"], json!(true));
}

#[tokio::test]
async fn test_health() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);

    let (status, body) = send_json(&app, empty_request(Method::GET, "/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_options_listing() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);

    let (status, body) = send_json(&app, empty_request(Method::GET, "/api/options")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["models"].as_array().unwrap().len(), 5);
    assert_eq!(body["vibes"][4]["id"], "luxury");
}

#[tokio::test]
async fn test_generate_incomplete_form_makes_no_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    let app = create_test_app(&server);

    let (status, body) = send_json(&app, empty_request(Method::POST, "/api/generate")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "incomplete_form");
    assert_eq!(
        body["error"]["message"],
        "Please complete all steps before generating images."
    );

    let (_, session) = send_json(&app, empty_request(Method::GET, "/api/session")).await;
    assert_eq!(
        session["error"],
        "Please complete all steps before generating images."
    );
}

#[tokio::test]
async fn test_unknown_option_rejected() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);

    let (status, body) = send_json(
        &app,
        json_request(Method::PUT, "/api/session/model", json!({ "id": "luxury" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "invalid_request_error");
}

#[tokio::test]
async fn test_text_flow_generate_download_reset() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/imagen-4.0-generate-001:predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predictions": [
                { "bytesBase64Encoded": "SU1BR0U=", "mimeType": "image/jpeg" },
                { "bytesBase64Encoded": "SU1BR0U=", "mimeType": "image/jpeg" },
                { "bytesBase64Encoded": "SU1BR0U=", "mimeType": "image/jpeg" }
            ]
        })))
        .expect(2)
        .mount(&server)
        .await;
    let app = create_test_app(&server);
    fill_form(&app).await;

    let (status, body) = send_json(&app, empty_request(Method::POST, "/api/generate")).await;
    assert_eq!(status, StatusCode::OK);
    let images = body["images"].as_array().unwrap();
    assert_eq!(images.len(), 6);
    assert_eq!(images[0], "data:image/jpeg;base64,SU1BR0U=");

    let (status, headers, bytes) =
        send(&app, empty_request(Method::GET, "/images/1/download")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "image/jpeg");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"affiliate-image-1.jpeg\""
    );
    assert_eq!(bytes, b"IMAGE");

    let (status, _, _) = send(&app, empty_request(Method::GET, "/images/7/download")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _, _) = send(&app, empty_request(Method::GET, "/images/0/download")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, session) = send_json(&app, empty_request(Method::POST, "/api/reset")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["description"], "");
    assert!(session["model"].is_null());
    assert!(session["vibe"].is_null());
    assert!(session["error"].is_null());
    assert_eq!(session["loading"], json!(false));
    assert_eq!(session["images"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_failed_generation_reports_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/imagen-4.0-generate-001:predict"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "code": 429, "message": "Quota exceeded.", "status": "RESOURCE_EXHAUSTED" }
        })))
        .mount(&server)
        .await;
    let app = create_test_app(&server);
    fill_form(&app).await;

    let (status, body) = send_json(&app, empty_request(Method::POST, "/api/generate")).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["message"], "API Error: Quota exceeded.");
    assert_eq!(body["error"]["code"], "api_error");

    let (_, session) = send_json(&app, empty_request(Method::GET, "/api/session")).await;
    assert_eq!(session["error"], "API Error: Quota exceeded.");
    assert_eq!(session["images"].as_array().unwrap().len(), 0);
    assert_eq!(session["loading"], json!(false));
}

#[tokio::test]
async fn test_reference_image_flow() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash-image-preview:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "inlineData": { "mimeType": "image/png", "data": "U0NFTkU=" } }] }
            }]
        })))
        .expect(6)
        .mount(&server)
        .await;
    let app = create_test_app(&server);

    let (status, session) = send_json(
        &app,
        multipart_request(Method::PUT, "/api/session/image", &[], Some(("image/png", &b"PRODUCT"[..]))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["image"]["preview"], "data:image/png;base64,UFJPRFVDVA==");
    assert_eq!(session["image"]["file_name"], "product.png");

    fill_form(&app).await;

    let (status, body) = send_json(&app, empty_request(Method::POST, "/api/generate")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["images"].as_array().unwrap().len(), 6);

    let (status, session) =
        send_json(&app, empty_request(Method::DELETE, "/api/session/image")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(session["image"].is_null());
}

#[tokio::test]
async fn test_upload_without_file_rejected() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);

    let (status, _) = send_json(
        &app,
        multipart_request(Method::PUT, "/api/session/image", &[("other", "x")], None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_page_submission_updates_form() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);

    let (status, _, body) = send(&app, empty_request(Method::GET, "/")).await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("Step 1: Describe Your Product"));

    let (status, headers, _) = send(
        &app,
        multipart_request(
            Method::POST,
            "/form",
            &[
                ("description", "A linen tote bag with leather handles"),
                ("model", "female-black"),
                ("vibe", "vintage"),
                ("action", "save"),
            ],
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], "/");

    let (_, _, body) = send(&app, empty_request(Method::GET, "/")).await;
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains(r#"value="female-black" checked"#));
    assert!(html.contains(r#"value="vintage" checked"#));
    assert!(html.contains(r#"value="generate">Generate 6 Images"#));

    let (status, _, _) = send(&app, empty_request(Method::POST, "/reset")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let (_, session) = send_json(&app, empty_request(Method::GET, "/api/session")).await;
    assert_eq!(session["description"], "");
}

#[tokio::test]
async fn test_dropped_generate_request_still_finishes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/imagen-4.0-generate-001:predict"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "predictions": [
                        { "bytesBase64Encoded": "SU1BR0U=", "mimeType": "image/jpeg" },
                        { "bytesBase64Encoded": "SU1BR0U=", "mimeType": "image/jpeg" },
                        { "bytesBase64Encoded": "SU1BR0U=", "mimeType": "image/jpeg" }
                    ]
                }))
                .set_delay(Duration::from_millis(500)),
        )
        .expect(4)
        .mount(&server)
        .await;
    let app = create_test_app(&server);
    fill_form(&app).await;

    // The client goes away long before the API answers.
    let dropped = tokio::time::timeout(
        Duration::from_millis(100),
        send(&app, empty_request(Method::POST, "/api/generate")),
    )
    .await;
    assert!(dropped.is_err());

    let (_, _, body) = send(&app, empty_request(Method::GET, "/")).await;
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("Generating Your Content..."));
    assert!(html.contains(r#"<form method="post" action="/reset"><button type="submit">Start Over</button></form>"#));

    let mut session = Value::Null;
    for _ in 0..50 {
        session = send_json(&app, empty_request(Method::GET, "/api/session")).await.1;
        if session["loading"] == json!(false) {
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    assert_eq!(session["loading"], json!(false));
    assert!(session["error"].is_null());
    assert_eq!(session["images"].as_array().unwrap().len(), 6);

    let (status, body) = send_json(&app, empty_request(Method::POST, "/api/generate")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["images"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_page_submission_with_unknown_option_changes_nothing() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);
    fill_form(&app).await;

    let (status, _, _) = send(
        &app,
        multipart_request(
            Method::POST,
            "/form",
            &[
                ("description", "A completely different product description"),
                ("model", "no-such-model"),
                ("vibe", "vintage"),
                ("action", "save"),
            ],
            Some(("image/png", &b"PRODUCT"[..])),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, session) = send_json(&app, empty_request(Method::GET, "/api/session")).await;
    assert_eq!(
        session["description"],
        "A matte black wireless headphone with gold trim"
    );
    assert_eq!(session["model"]["id"], "male-caucasian");
    assert_eq!(session["vibe"]["id"], "luxury");
    assert!(session["image"].is_null());
}
