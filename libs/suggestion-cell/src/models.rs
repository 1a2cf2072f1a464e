use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const MIN_SYMPTOM_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    #[serde(alias = "HIGH", alias = "High")]
    High,
    #[serde(alias = "MEDIUM", alias = "Medium")]
    Medium,
    #[serde(alias = "LOW", alias = "Low")]
    Low,
}

impl UrgencyLevel {
    /// Presentation tone for the urgency badge.
    pub fn tone(&self) -> &'static str {
        match self {
            UrgencyLevel::High => "destructive",
            UrgencyLevel::Medium => "warning",
            UrgencyLevel::Low => "success",
        }
    }
}

/// AI triage suggestion, normalized at the boundary: the list fields are
/// always arrays even when the backend sends null, nothing, or a bare
/// string. Advisory only; it never feeds the wizard's selections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSuggestion {
    #[serde(default)]
    pub urgency_level: Option<UrgencyLevel>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub suggested_specialties: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub suggested_doctors: Vec<String>,
    #[serde(default)]
    pub recommendations: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionRequest {
    pub symptoms: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SuggestionError {
    #[error("Please describe your symptoms in at least {MIN_SYMPTOM_LEN} characters")]
    SymptomsTooShort,

    #[error("{0}")]
    Upstream(String),
}

/// Accept an array of strings, a bare string, null, or junk for a field
/// the backend types loosely.
fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;

    Ok(match raw {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(s)) => vec![s],
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        Some(_) => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn loose_list_fields_normalize_to_arrays() {
        let suggestion: AiSuggestion = serde_json::from_value(json!({
            "urgencyLevel": "HIGH",
            "suggestedSpecialties": null,
            "suggestedDoctors": "Dr. Ayesha Rahman",
            "recommendations": "See a cardiologist."
        }))
        .unwrap();

        assert_eq!(suggestion.urgency_level, Some(UrgencyLevel::High));
        assert!(suggestion.suggested_specialties.is_empty());
        assert_eq!(suggestion.suggested_doctors, vec!["Dr. Ayesha Rahman"]);
    }

    #[test]
    fn missing_fields_default() {
        let suggestion: AiSuggestion = serde_json::from_value(json!({
            "recommendations": "Rest and hydrate."
        }))
        .unwrap();

        assert!(suggestion.urgency_level.is_none());
        assert!(suggestion.suggested_specialties.is_empty());
        assert!(suggestion.suggested_doctors.is_empty());
    }

    #[test]
    fn urgency_tones() {
        assert_eq!(UrgencyLevel::High.tone(), "destructive");
        assert_eq!(UrgencyLevel::Medium.tone(), "warning");
        assert_eq!(UrgencyLevel::Low.tone(), "success");
    }
}
