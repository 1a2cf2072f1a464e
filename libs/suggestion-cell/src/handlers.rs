use std::sync::Arc;

use axum::{extract::State, Json};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{AiSuggestion, SuggestionError, SuggestionRequest};
use crate::services::suggest::SuggestionService;

/// Errors here are the panel's response body, not a transient notification;
/// the UI renders them inline.
#[axum::debug_handler]
pub async fn create_suggestion(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<SuggestionRequest>,
) -> Result<Json<AiSuggestion>, AppError> {
    let service = SuggestionService::new(&state);

    match service.suggest(&request.symptoms).await {
        Ok(suggestion) => Ok(Json(suggestion)),
        Err(e @ SuggestionError::SymptomsTooShort) => {
            Err(AppError::ValidationError(e.to_string()))
        }
        Err(SuggestionError::Upstream(message)) => Err(AppError::ExternalService(message)),
    }
}
