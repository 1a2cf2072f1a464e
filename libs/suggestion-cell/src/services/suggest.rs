use reqwest::Method;
use serde_json::json;
use tracing::debug;

use shared_config::AppConfig;
use shared_platform::PlatformClient;

use crate::models::{AiSuggestion, SuggestionError, MIN_SYMPTOM_LEN};

pub struct SuggestionService {
    platform: PlatformClient,
}

impl SuggestionService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            platform: PlatformClient::new(config),
        }
    }

    /// Ask the platform for a triage suggestion. Symptoms shorter than the
    /// minimum are rejected before any request goes out.
    pub async fn suggest(&self, symptoms: &str) -> Result<AiSuggestion, SuggestionError> {
        let trimmed = symptoms.trim();
        if trimmed.chars().count() < MIN_SYMPTOM_LEN {
            return Err(SuggestionError::SymptomsTooShort);
        }

        debug!("Requesting AI suggestion for {} chars of symptoms", trimmed.len());

        let body = json!({ "symptoms": trimmed });

        self.platform
            .request(Method::POST, "/ai/doctor-suggestion", None, Some(body))
            .await
            .map_err(|e| SuggestionError::Upstream(e.to_string()))
    }
}
