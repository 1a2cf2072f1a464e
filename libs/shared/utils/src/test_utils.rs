use std::sync::Arc;

use base64::{engine::general_purpose, Engine as _};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::{User, UserRole};

pub struct TestConfig {
    pub jwt_secret: String,
    pub platform_api_url: String,
    pub platform_api_key: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
            platform_api_url: "http://localhost:5050".to_string(),
            platform_api_key: "test-api-key".to_string(),
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            platform_api_url: self.platform_api_url.clone(),
            platform_api_key: self.platform_api_key.clone(),
            session_jwt_secret: self.jwt_secret.clone(),
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct TestUser {
    pub id: String,
    pub email: String,
    pub role: String,
}

impl Default for TestUser {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: "test@example.com".to_string(),
            role: "PATIENT".to_string(),
        }
    }
}

impl TestUser {
    pub fn new(email: &str, role: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            role: role.to_string(),
        }
    }

    pub fn patient(email: &str) -> Self {
        Self::new(email, "PATIENT")
    }

    pub fn doctor(email: &str) -> Self {
        Self::new(email, "DOCTOR")
    }

    pub fn admin(email: &str) -> Self {
        Self::new(email, "ADMIN")
    }

    pub fn super_admin(email: &str) -> Self {
        Self::new(email, "SUPER_ADMIN")
    }

    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            email: Some(self.email.clone()),
            role: UserRole::parse(&self.role),
            created_at: Some(Utc::now()),
        }
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(user: &TestUser, secret: &str, exp_hours: Option<i64>) -> String {
        let now = Utc::now();
        let exp = now + Duration::hours(exp_hours.unwrap_or(24));

        let header = json!({
            "alg": "HS256",
            "typ": "JWT"
        });

        let payload = json!({
            "sub": user.id,
            "email": user.email,
            "role": user.role,
            "iat": now.timestamp(),
            "exp": exp.timestamp()
        });

        let header_encoded = general_purpose::URL_SAFE_NO_PAD.encode(header.to_string());
        let payload_encoded = general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string());

        let signing_input = format!("{}.{}", header_encoded, payload_encoded);

        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();
        let signature_encoded = general_purpose::URL_SAFE_NO_PAD.encode(signature);

        format!("{}.{}", signing_input, signature_encoded)
    }

    pub fn create_expired_token(user: &TestUser, secret: &str) -> String {
        Self::create_test_token(user, secret, Some(-1))
    }

    pub fn create_invalid_signature_token(user: &TestUser) -> String {
        Self::create_test_token(user, "wrong-secret", Some(24))
    }

    pub fn create_malformed_token() -> String {
        "invalid.token.format".to_string()
    }
}

/// Canned platform payloads in the backend's camelCase wire shape.
pub struct MockPlatformResponses;

impl MockPlatformResponses {
    pub fn specialty_response(id: &str, title: &str) -> serde_json::Value {
        json!({
            "id": id,
            "title": title,
            "icon": format!("/icons/{}.svg", title.to_lowercase())
        })
    }

    pub fn doctor_response(doctor_id: &str, name: &str, specialty_title: &str) -> serde_json::Value {
        json!({
            "id": doctor_id,
            "name": name,
            "designation": "Consultant",
            "profilePhoto": "https://cdn.example.com/photo.jpg",
            "appointmentFee": 1500,
            "averageRating": 4.6,
            "specialties": [
                {
                    "specialtyId": Uuid::new_v4().to_string(),
                    "specialty": Self::specialty_response(&Uuid::new_v4().to_string(), specialty_title)
                }
            ]
        })
    }

    /// Same doctor shape but with the legacy association key spelling.
    pub fn doctor_response_legacy_key(
        doctor_id: &str,
        name: &str,
        specialty_title: &str,
    ) -> serde_json::Value {
        json!({
            "id": doctor_id,
            "name": name,
            "designation": "Consultant",
            "profilePhoto": null,
            "appointmentFee": 1200,
            "averageRating": 4.1,
            "specialties": [
                {
                    "specialitiesId": Uuid::new_v4().to_string(),
                    "specialty": Self::specialty_response(&Uuid::new_v4().to_string(), specialty_title)
                }
            ]
        })
    }

    pub fn doctor_schedule_response(
        doctor_id: &str,
        start: &str,
        end: &str,
        is_booked: bool,
    ) -> serde_json::Value {
        json!({
            "scheduleId": Uuid::new_v4().to_string(),
            "doctorId": doctor_id,
            "isBooked": is_booked,
            "schedule": {
                "id": Uuid::new_v4().to_string(),
                "startDateTime": start,
                "endDateTime": end
            }
        })
    }

    pub fn appointment_envelope(payment_url: Option<&str>) -> serde_json::Value {
        json!({
            "success": true,
            "message": "Appointment created",
            "data": {
                "id": Uuid::new_v4().to_string(),
                "status": "SCHEDULED",
                "paymentStatus": "UNPAID",
                "paymentUrl": payment_url
            }
        })
    }

    pub fn failed_envelope(message: &str) -> serde_json::Value {
        json!({
            "success": false,
            "message": message,
            "data": null
        })
    }

    pub fn suggestion_response() -> serde_json::Value {
        json!({
            "urgencyLevel": "medium",
            "suggestedSpecialties": ["Cardiology", "Internal Medicine"],
            "suggestedDoctors": ["Dr. Ayesha Rahman"],
            "recommendations": "Monitor blood pressure daily and consult a cardiologist this week."
        })
    }
}
