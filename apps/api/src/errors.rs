use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::tailoring::error::TailorError;
use crate::tailoring::validation::MissingFields;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Malformed request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Tailor(#[from] TailorError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// `Json` extractor whose rejections render as `AppError`, so a body that
/// does not deserialize still gets the `{ "error": ... }` shape.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// The `error` object of every failure response. Also embedded in successful
/// tailoring responses when the optional analysis fails.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_fields: Option<MissingFields>,
}

impl ErrorBody {
    fn plain(code: &'static str, message: String) -> Self {
        ErrorBody {
            code,
            message,
            detail: None,
            provider_status: None,
            hint: None,
            missing_fields: None,
        }
    }
}

impl From<&TailorError> for ErrorBody {
    fn from(err: &TailorError) -> Self {
        let (detail, missing_fields) = match err {
            TailorError::Provider(_) | TailorError::Unknown(_) => (Some(err.detail()), None),
            TailorError::MissingInputs(missing) => (None, Some(missing.clone())),
            TailorError::MissingCredential => (None, None),
        };
        ErrorBody {
            code: err.code(),
            message: err.to_string(),
            detail,
            provider_status: err.provider_status(),
            hint: err.hint(),
            missing_fields,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::plain("VALIDATION_ERROR", msg.clone()),
            ),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::plain("BAD_REQUEST", msg.clone()),
            ),
            AppError::Tailor(err) => {
                let status = match err {
                    TailorError::MissingCredential | TailorError::MissingInputs(_) => {
                        StatusCode::BAD_REQUEST
                    }
                    TailorError::Provider(e) => {
                        tracing::error!("Provider error: {e}");
                        StatusCode::BAD_GATEWAY
                    }
                    TailorError::Unknown(detail) => {
                        tracing::error!("Unclassified tailoring error: {detail}");
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                (status, ErrorBody::from(err))
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::plain(
                        "INTERNAL_ERROR",
                        "An internal server error occurred".to_string(),
                    ),
                )
            }
        };

        (status, Json(json!({ "error": body }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::ProviderError;
    use crate::tailoring::validation::InputField;

    #[test]
    fn test_missing_credential_maps_to_bad_request() {
        let response = AppError::from(TailorError::MissingCredential).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_provider_error_maps_to_bad_gateway() {
        let err = TailorError::Provider(ProviderError::EmptyContent);
        let response = AppError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_unknown_error_maps_to_internal() {
        let response = AppError::from(TailorError::Unknown("x".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_body_carries_detail_and_hint_for_provider() {
        let err = TailorError::Provider(ProviderError::Api {
            status: 401,
            message: "Incorrect API key provided".to_string(),
        });
        let body = serde_json::to_value(ErrorBody::from(&err)).unwrap();

        assert_eq!(body["code"], "PROVIDER_ERROR");
        assert_eq!(body["detail"], "Incorrect API key provided");
        assert_eq!(body["provider_status"], 401);
        assert_eq!(
            body["hint"],
            "Make sure your API key is valid and you have credits available"
        );
        assert!(body.get("missing_fields").is_none());
    }

    #[test]
    fn test_anyhow_error_maps_to_internal() {
        let response =
            AppError::from(anyhow::anyhow!("tls handshake with sk-secret failed")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_body_omits_status_for_non_api_failures() {
        let err = TailorError::Provider(ProviderError::EmptyContent);
        let body = serde_json::to_value(ErrorBody::from(&err)).unwrap();
        assert_eq!(body["detail"], "LLM returned empty content");
        assert!(body.get("provider_status").is_none());
    }

    #[test]
    fn test_error_body_lists_missing_fields() {
        let missing: MissingFields = [InputField::Resume].into_iter().collect();
        let body = serde_json::to_value(ErrorBody::from(&TailorError::MissingInputs(missing)))
            .unwrap();

        assert_eq!(body["code"], "MISSING_INPUTS");
        assert_eq!(
            body["message"],
            "Please provide both your resume and the job description"
        );
        assert_eq!(body["missing_fields"], serde_json::json!(["resume"]));
        assert!(body.get("hint").is_none());
    }
}
