use axum::http::StatusCode;

use crate::tests::helper;

#[tokio::test]
async fn test_login() {
    let mut app = helper::setup_test_app().await;

    helper::maybe_signup(&mut app, "Ada Lovelace", "ada@example.com", "verysecret").await;
    helper::maybe_signup(&mut app, "Grace Hopper", "grace@example.com", "othersecret").await;

    let (status_code, ada) = helper::login(&mut app, "ada@example.com", "verysecret").await;
    assert_eq!(StatusCode::OK, status_code);
    assert!(ada.success);
    assert!(ada.message.is_none());

    let (status_code, grace) = helper::login(&mut app, "grace@example.com", "othersecret").await;
    assert_eq!(StatusCode::OK, status_code);
    assert!(grace.success);

    // every user gets its own ID
    assert!(ada.user_id.is_some());
    assert!(grace.user_id.is_some());
    assert_ne!(ada.user_id, grace.user_id);

    let (status_code, user, _) =
        helper::single_user(&mut app, &ada.user_id.unwrap().to_string()).await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!("ada@example.com".to_string(), user.unwrap().email);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let mut app = helper::setup_test_app().await;

    helper::maybe_signup(&mut app, "Ada Lovelace", "ada@example.com", "verysecret").await;

    // failure is in the body, not in the status code
    let (status_code, login) = helper::login(&mut app, "ada@example.com", "wrongpassword").await;
    assert_eq!(StatusCode::OK, status_code);
    assert!(!login.success);
    assert!(login.user_id.is_none());
    assert_eq!(Some("Wrong password".to_string()), login.message);
}

#[tokio::test]
async fn test_login_unknown_email() {
    let mut app = helper::setup_test_app().await;

    let (status_code, login) = helper::login(&mut app, "nobody@example.com", "verysecret").await;
    assert_eq!(StatusCode::OK, status_code);
    assert!(!login.success);
    assert!(login.user_id.is_none());
    assert_eq!(Some("User not found".to_string()), login.message);
}
