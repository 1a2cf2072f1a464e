use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub exp: Option<u64>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub iat: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Platform roles. The backend emits SCREAMING_SNAKE role claims; older
/// tokens carry lowercase variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    #[serde(alias = "patient")]
    Patient,
    #[serde(alias = "doctor")]
    Doctor,
    #[serde(alias = "admin")]
    Admin,
    #[serde(alias = "super_admin")]
    SuperAdmin,
}

impl UserRole {
    /// Tolerant parse: unknown role strings resolve to None rather than an
    /// error, since an unrecognized role is still a valid session.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_uppercase().as_str() {
            "PATIENT" => Some(UserRole::Patient),
            "DOCTOR" => Some(UserRole::Doctor),
            "ADMIN" => Some(UserRole::Admin),
            "SUPER_ADMIN" => Some(UserRole::SuperAdmin),
            _ => None,
        }
    }
}

/// Read-only snapshot of the caller's session: who they are, whether the
/// session is resolved yet. Mirrors what the UI layer polls before allowing
/// a booking submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub is_authenticated: bool,
    pub role: Option<UserRole>,
    pub is_loading: bool,
}

impl SessionSnapshot {
    pub fn resolved(user: &User) -> Self {
        Self {
            is_authenticated: true,
            role: user.role,
            is_loading: false,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            is_authenticated: false,
            role: None,
            is_loading: false,
        }
    }

    pub fn loading() -> Self {
        Self {
            is_authenticated: false,
            role: None,
            is_loading: true,
        }
    }
}
