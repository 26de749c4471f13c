use axum::http::Method;
use axum::http::StatusCode;
use axum::http::header::ACCESS_CONTROL_ALLOW_ORIGIN;

use crate::tests::helper;

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let mut app = helper::setup_test_app().await;

    let (status_code, headers) = helper::headers_of(
        &mut app,
        Method::GET,
        "/notes/1",
        &[("origin", "https://app.example.com")],
    )
    .await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!("*", headers[ACCESS_CONTROL_ALLOW_ORIGIN]);
}

#[tokio::test]
async fn test_cors_preflight() {
    let mut app = helper::setup_test_app().await;

    let (status_code, headers) = helper::headers_of(
        &mut app,
        Method::OPTIONS,
        "/tasks/update",
        &[
            ("origin", "https://app.example.com"),
            ("access-control-request-method", "PUT"),
        ],
    )
    .await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!("*", headers[ACCESS_CONTROL_ALLOW_ORIGIN]);
}

#[tokio::test]
async fn test_unknown_route() {
    let mut app = helper::setup_test_app().await;

    let (status_code, _) = helper::headers_of(&mut app, Method::GET, "/projects", &[]).await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
}
