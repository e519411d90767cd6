use actix_web::error::ErrorUnauthorized;
use actix_web::{Error, HttpRequest};

use super::jwt::validate_token;
use super::model::Claims;

/// Extract the session token from the `token` cookie (how the authoring
/// UI sends it) or from an Authorization Bearer header.
fn extract_token(req: &HttpRequest) -> Option<String> {
    if let Some(cookie) = req.cookie("token") {
        return Some(cookie.value().to_string());
    }
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer ").map(str::to_string))
}

/// Validate the token carried by a request and return its claims.
pub fn validate_request_token(req: &HttpRequest) -> Result<Claims, Error> {
    let token = extract_token(req).ok_or_else(|| ErrorUnauthorized("Missing session token"))?;

    let claims = validate_token(&token).map_err(|e| {
        log::warn!("Token validation failed: {:?}", e);
        ErrorUnauthorized("Invalid or expired session token")
    })?;

    Ok(claims)
}
