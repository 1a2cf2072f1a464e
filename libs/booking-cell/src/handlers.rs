use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Deserialize;

use shared_config::AppConfig;
use shared_models::error::AppError;
use shared_utils::session::{bearer_token, resolve_session};

use crate::models::{BookingOutcome, CreateBookingRequest, FlowTurn, WizardEvent, WizardState};
use crate::services::flow::{BookingFlowService, FlowError};
use crate::services::submission::BookingSubmissionService;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartFlowRequest {
    #[serde(default)]
    pub doctor_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvanceFlowRequest {
    pub state: WizardState,
    pub event: WizardEvent,
}

fn map_flow_error(e: FlowError) -> AppError {
    match e {
        FlowError::Wizard(err) => AppError::BadRequest(err.to_string()),
        FlowError::DoctorNotFound => AppError::NotFound("Doctor not found".to_string()),
    }
}

#[axum::debug_handler]
pub async fn start_flow(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<StartFlowRequest>,
) -> Result<Json<FlowTurn>, AppError> {
    let flow = BookingFlowService::new(&state);

    let turn = flow
        .start(request.doctor_id.as_deref())
        .await
        .map_err(map_flow_error)?;

    Ok(Json(turn))
}

#[axum::debug_handler]
pub async fn advance_flow(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<AdvanceFlowRequest>,
) -> Result<Json<FlowTurn>, AppError> {
    let flow = BookingFlowService::new(&state);

    let turn = flow
        .advance(request.state, request.event)
        .await
        .map_err(map_flow_error)?;

    Ok(Json(turn))
}

/// The confirm step's submit. Redirect outcomes answer with 303 so the UI
/// performs a full navigation; failures keep the confirm state retryable.
#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<AppConfig>>,
    headers: HeaderMap,
    Json(request): Json<CreateBookingRequest>,
) -> Response {
    let session = resolve_session(&headers, &state);
    let token = bearer_token(&headers);

    let service = BookingSubmissionService::new(&state);
    let outcome = service.submit(&session, &request, token).await;

    match outcome {
        BookingOutcome::Incomplete => {
            AppError::BadRequest("Doctor and schedule must be selected".to_string())
                .into_response()
        }
        BookingOutcome::Deferred => StatusCode::NO_CONTENT.into_response(),
        BookingOutcome::LoginRedirect { login_url } => Redirect::to(&login_url).into_response(),
        BookingOutcome::DashboardRedirect { home } => Redirect::to(&home).into_response(),
        BookingOutcome::PaymentRedirect { payment_url } => {
            Redirect::to(&payment_url).into_response()
        }
        BookingOutcome::Failed { message } => AppError::ExternalService(message).into_response(),
    }
}
