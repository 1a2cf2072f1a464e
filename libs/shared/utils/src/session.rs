use axum::http::HeaderMap;
use tracing::debug;

use shared_config::AppConfig;
use shared_models::auth::SessionSnapshot;

use crate::jwt::validate_token;

/// Resolve the caller's session from request headers.
///
/// A missing or invalid bearer token yields an anonymous snapshot rather
/// than an error: the booking path answers with a login redirect, never a
/// bare 401.
pub fn resolve_session(headers: &HeaderMap, config: &AppConfig) -> SessionSnapshot {
    let token = match bearer_token(headers) {
        Some(token) => token,
        None => return SessionSnapshot::anonymous(),
    };

    match validate_token(token, &config.session_jwt_secret) {
        Ok(user) => SessionSnapshot::resolved(&user),
        Err(reason) => {
            debug!("Session token rejected: {}", reason);
            SessionSnapshot::anonymous()
        }
    }
}

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get("Authorization")?.to_str().ok()?;
    value.strip_prefix("Bearer ")
}
