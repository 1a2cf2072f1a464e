use reqwest::Method;
use serde_json::json;
use tracing::{info, warn};

use shared_config::AppConfig;
use shared_models::auth::{SessionSnapshot, UserRole};
use shared_platform::{ApiEnvelope, PlatformClient};

use crate::models::{BookingConfirmation, BookingOutcome, CreateBookingRequest};

pub const BOOKING_PAGE: &str = "/booking";
pub const GENERIC_BOOKING_ERROR: &str = "Failed to book the appointment";
pub const MISSING_PAYMENT_ERROR: &str = "Failed to start payment session";

pub fn login_redirect() -> String {
    format!("/login?redirect={}", BOOKING_PAGE)
}

/// Dashboard home for a signed-in non-patient role.
pub fn dashboard_home(role: Option<UserRole>) -> &'static str {
    match role {
        Some(UserRole::Admin) | Some(UserRole::SuperAdmin) => "/dashboard/admin",
        Some(UserRole::Doctor) => "/dashboard/doctor",
        _ => "/",
    }
}

pub struct BookingSubmissionService {
    platform: PlatformClient,
}

impl BookingSubmissionService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            platform: PlatformClient::new(config),
        }
    }

    /// Submit a booking. Preconditions are checked in order and the first
    /// unmet one decides the outcome; the platform is only called once all
    /// four hold.
    pub async fn submit(
        &self,
        session: &SessionSnapshot,
        request: &CreateBookingRequest,
        auth_token: Option<&str>,
    ) -> BookingOutcome {
        let (doctor_id, schedule_id) = match (
            request.doctor_id.as_deref(),
            request.schedule_id.as_deref(),
        ) {
            (Some(doctor_id), Some(schedule_id))
                if !doctor_id.is_empty() && !schedule_id.is_empty() =>
            {
                (doctor_id, schedule_id)
            }
            _ => return BookingOutcome::Incomplete,
        };

        if session.is_loading {
            return BookingOutcome::Deferred;
        }

        if !session.is_authenticated {
            warn!("Booking attempted without a session");
            return BookingOutcome::LoginRedirect {
                login_url: login_redirect(),
            };
        }

        match session.role {
            Some(UserRole::Patient) => {}
            other => {
                warn!("Booking attempted with non-patient role {:?}", other);
                return BookingOutcome::DashboardRedirect {
                    home: dashboard_home(other).to_string(),
                };
            }
        }

        info!(
            "Booking appointment for doctor {} schedule {}",
            doctor_id, schedule_id
        );

        let body = json!({
            "doctorId": doctor_id,
            "scheduleId": schedule_id
        });

        let result: Result<ApiEnvelope<BookingConfirmation>, _> = self
            .platform
            .request(Method::POST, "/appointments", auth_token, Some(body))
            .await;

        match result {
            Ok(envelope) if !envelope.success => BookingOutcome::Failed {
                message: envelope
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| GENERIC_BOOKING_ERROR.to_string()),
            },
            Ok(envelope) => {
                let payment_url = envelope
                    .data
                    .and_then(|confirmation| confirmation.payment_url)
                    .filter(|url| !url.is_empty());

                match payment_url {
                    Some(payment_url) => BookingOutcome::PaymentRedirect { payment_url },
                    None => {
                        // A successful booking is expected to always carry a
                        // payment URL; its absence is an anomaly, not a
                        // normal failure path.
                        warn!("Booking succeeded without a payment URL");
                        BookingOutcome::Failed {
                            message: MISSING_PAYMENT_ERROR.to_string(),
                        }
                    }
                }
            }
            Err(e) => BookingOutcome::Failed {
                message: e.to_string(),
            },
        }
    }
}
