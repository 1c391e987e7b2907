//! Every route rejects requests without a valid bearer token.

use crate::http::helpers::{TestApp, read};
use reqwest::Method;
use rstest::rstest;
use serde_json::json;

const SOME_ID: &str = "7f0b8a8e-4c55-4f57-9a53-2c1f0a6f2b11";

#[rstest]
#[case(Method::GET, "/api/pipelines")]
#[case(Method::POST, "/api/pipelines")]
#[case(Method::GET, "/api/pipelines/7f0b8a8e-4c55-4f57-9a53-2c1f0a6f2b11")]
#[case(Method::GET, "/api/stages")]
#[case(Method::POST, "/api/stages")]
#[case(Method::GET, "/api/tasks")]
#[case(Method::POST, "/api/tasks")]
#[case(Method::GET, "/api/tasks/7f0b8a8e-4c55-4f57-9a53-2c1f0a6f2b11")]
#[case(Method::PUT, "/api/tasks/7f0b8a8e-4c55-4f57-9a53-2c1f0a6f2b11")]
#[case(Method::DELETE, "/api/tasks/7f0b8a8e-4c55-4f57-9a53-2c1f0a6f2b11")]
#[tokio::test(flavor = "multi_thread")]
async fn routes_require_a_token(#[case] method: Method, #[case] path: &str) {
    let app = TestApp::spawn().await.expect("spawn app");
    let response = app
        .client
        .request(method, app.url(path))
        .json(&json!({ "name": "ignored" }))
        .send()
        .await
        .expect("send request");

    let (status, body) = read(response).await.expect("read response");
    assert_eq!(status, 401);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Unauthenticated."));
}

#[rstest]
#[case("Bearer not-the-token")]
#[case("Basic dXNlcjpwYXNz")]
#[case("Bearer ")]
#[tokio::test(flavor = "multi_thread")]
async fn rejects_unknown_or_malformed_credentials(#[case] header: &str) {
    let app = TestApp::spawn().await.expect("spawn app");
    let response = app
        .client
        .get(app.url("/api/pipelines"))
        .header(reqwest::header::AUTHORIZATION, header)
        .send()
        .await
        .expect("send request");

    let (status, _) = read(response).await.expect("read response");
    assert_eq!(status, 401);
}

#[tokio::test(flavor = "multi_thread")]
async fn accepts_a_lowercase_scheme() {
    let app = TestApp::spawn().await.expect("spawn app");
    let response = app
        .client
        .get(app.url(&format!("/api/tasks/{SOME_ID}")))
        .header(reqwest::header::AUTHORIZATION, "bearer user-api-token")
        .send()
        .await
        .expect("send request");

    let (status, body) = read(response).await.expect("read response");
    assert_eq!(status, 404, "authenticated lookup of a missing task: {body}");
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_routes_are_json_not_found() {
    let app = TestApp::spawn().await.expect("spawn app");
    let (status, body) = app.get("/api/nowhere").await.expect("request");

    assert_eq!(status, 404);
    assert_eq!(body["success"], json!(false));
}
