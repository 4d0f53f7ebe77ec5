use thiserror::Error;

use crate::llm_client::ProviderError;
use crate::tailoring::validation::MissingFields;

/// Shown alongside provider and unclassified failures.
pub const CREDENTIAL_HINT: &str = "Make sure your API key is valid and you have credits available";

/// Every way a tailoring or analysis action can fail. The orchestrator turns
/// all failures into one of these; nothing escapes as a panic or raw error.
#[derive(Debug, Error)]
pub enum TailorError {
    #[error("Please enter your API key")]
    MissingCredential,

    #[error("Please provide both your resume and the job description")]
    MissingInputs(MissingFields),

    #[error("Error: {0}")]
    Provider(ProviderError),

    #[error("Error: {0}")]
    Unknown(String),
}

impl TailorError {
    /// Stable machine-readable tag.
    pub fn code(&self) -> &'static str {
        match self {
            TailorError::MissingCredential => "MISSING_CREDENTIAL",
            TailorError::MissingInputs(_) => "MISSING_INPUTS",
            TailorError::Provider(_) => "PROVIDER_ERROR",
            TailorError::Unknown(_) => "UNKNOWN_ERROR",
        }
    }

    /// The failure detail without the user-facing prefix. An API rejection
    /// yields the provider's message exactly as sent; its status is reported
    /// separately by [`TailorError::provider_status`].
    pub fn detail(&self) -> String {
        match self {
            TailorError::Provider(ProviderError::Api { message, .. }) => message.clone(),
            TailorError::Provider(e) => e.to_string(),
            TailorError::Unknown(detail) => detail.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status the provider answered with, when it answered at all.
    pub fn provider_status(&self) -> Option<u16> {
        match self {
            TailorError::Provider(ProviderError::Api { status, .. }) => Some(*status),
            _ => None,
        }
    }

    pub fn hint(&self) -> Option<&'static str> {
        match self {
            TailorError::Provider(_) | TailorError::Unknown(_) => Some(CREDENTIAL_HINT),
            TailorError::MissingCredential | TailorError::MissingInputs(_) => None,
        }
    }

    /// Sorts a completion failure into `Provider` or `Unknown`.
    pub fn from_completion(err: anyhow::Error) -> Self {
        match err.downcast::<ProviderError>() {
            Ok(provider) => TailorError::Provider(provider),
            Err(other) => TailorError::Unknown(format!("{other:#}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::*;
    use crate::tailoring::validation::InputField;

    #[test]
    fn test_provider_failure_is_classified_as_provider() {
        let err: anyhow::Error = ProviderError::Api {
            status: 429,
            message: "You exceeded your current quota".to_string(),
        }
        .into();

        let classified = TailorError::from_completion(err);
        assert_eq!(classified.code(), "PROVIDER_ERROR");
        assert_eq!(classified.detail(), "You exceeded your current quota");
        assert_eq!(classified.provider_status(), Some(429));
        assert_eq!(
            classified.to_string(),
            "Error: API error (status 429): You exceeded your current quota"
        );
    }

    #[test]
    fn test_other_failure_is_classified_as_unknown() {
        let classified = TailorError::from_completion(anyhow!("socket closed"));
        assert_eq!(classified.code(), "UNKNOWN_ERROR");
        assert_eq!(classified.detail(), "socket closed");
        assert_eq!(classified.provider_status(), None);
    }

    #[test]
    fn test_non_api_provider_failure_keeps_its_own_text() {
        let classified = TailorError::from_completion(ProviderError::Timeout { secs: 5 }.into());
        assert_eq!(classified.code(), "PROVIDER_ERROR");
        assert_eq!(classified.detail(), "Completion did not finish within 5s");
        assert_eq!(classified.provider_status(), None);
    }

    #[test]
    fn test_hint_only_for_provider_and_unknown() {
        assert!(TailorError::MissingCredential.hint().is_none());
        let missing: MissingFields = [InputField::Resume].into_iter().collect();
        assert!(TailorError::MissingInputs(missing).hint().is_none());
        assert_eq!(
            TailorError::Unknown("x".to_string()).hint(),
            Some(CREDENTIAL_HINT)
        );
        assert_eq!(
            TailorError::Provider(ProviderError::EmptyContent).hint(),
            Some(CREDENTIAL_HINT)
        );
    }

    #[test]
    fn test_missing_inputs_message_is_combined() {
        let only_job: MissingFields = [InputField::JobDescription].into_iter().collect();
        let only_resume: MissingFields = [InputField::Resume].into_iter().collect();
        assert_eq!(
            TailorError::MissingInputs(only_job).to_string(),
            TailorError::MissingInputs(only_resume).to_string()
        );
    }
}
