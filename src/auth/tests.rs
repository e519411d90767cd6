//! Unit tests for the session-token collaborator

use actix_web::cookie::Cookie;
use actix_web::test::TestRequest;
use uuid::Uuid;

use crate::auth::jwt::{generate_session_token, validate_token};
use crate::auth::middleware::validate_request_token;

#[test]
fn test_generate_and_validate_session_token() {
    let user_id = Uuid::new_v4().to_string();

    let token = generate_session_token(&user_id).expect("Failed to generate session token");
    let claims = validate_token(&token).expect("Failed to validate token");

    assert_eq!(claims.sub, user_id);
    assert!(claims.exp > claims.iat);
}

#[test]
fn test_garbage_token_is_rejected() {
    assert!(validate_token("not-a-jwt").is_err());
}

#[actix_web::test]
async fn test_token_extracted_from_cookie() {
    let user_id = "user-1";
    let token = generate_session_token(user_id).expect("Failed to generate token");

    let req = TestRequest::default()
        .cookie(Cookie::new("token", token))
        .to_http_request();

    let claims = validate_request_token(&req).expect("cookie token should validate");
    assert_eq!(claims.sub, user_id);
}

#[actix_web::test]
async fn test_token_extracted_from_bearer_header() {
    let user_id = "user-2";
    let token = generate_session_token(user_id).expect("Failed to generate token");

    let req = TestRequest::default()
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_http_request();

    let claims = validate_request_token(&req).expect("bearer token should validate");
    assert_eq!(claims.sub, user_id);
}

#[actix_web::test]
async fn test_missing_token_is_unauthorized() {
    let req = TestRequest::default().to_http_request();
    assert!(validate_request_token(&req).is_err());
}
