use axum::http::StatusCode;

use crate::tests::helper;

#[tokio::test]
async fn test_single_user() {
    let mut app = helper::setup_test_app().await;

    let user_id = helper::signup_and_login(&mut app, "ada@example.com").await;

    let (status_code, user, error) = helper::single_user(&mut app, &user_id.to_string()).await;
    assert_eq!(StatusCode::OK, status_code);
    assert!(error.is_none());
    let user = user.unwrap();
    assert_eq!(user_id, user.id);
    assert_eq!("Ada Lovelace".to_string(), user.full_name);
    assert_eq!("ada@example.com".to_string(), user.email);
    assert!(!user.has_password); // never exposed
}

#[tokio::test]
async fn test_single_user_not_found() {
    let mut app = helper::setup_test_app().await;

    let (status_code, user, error) = helper::single_user(&mut app, "42").await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
    assert!(user.is_none());
    assert_eq!(Some("User not found".to_string()), error);
}

#[tokio::test]
async fn test_single_user_invalid_id() {
    let mut app = helper::setup_test_app().await;

    let (status_code, user, error) = helper::single_user(&mut app, "some-id").await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert!(user.is_none());
    assert_eq!(Some("Invalid path parameter".to_string()), error);
}
