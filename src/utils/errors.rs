use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the gateway
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Model '{0}' not found in available models")]
    NotFound(String),

    #[error("{status} - {body}")]
    RequestRejected { status: u16, body: String },

    #[error("{0}")]
    ProviderUnavailable(String),

    #[error("Unexpected response format - {0}")]
    UnexpectedResponseShape(String),

    #[error("No chat data to summarize")]
    NoData,

    #[error("No provider credentials configured")]
    Unconfigured,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GatewayError {
    /// Stable machine-readable name of the failure class
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::RequestRejected { .. } => "request_rejected",
            Self::ProviderUnavailable(_) => "provider_unavailable",
            Self::UnexpectedResponseShape(_) => "unexpected_response_shape",
            Self::NoData => "no_data",
            Self::Unconfigured => "unconfigured",
            Self::Config(_) => "config",
        }
    }

    /// The degrade reason a caller sees when this error is papered over with text.
    /// `NoData` and `Config` are never degraded; they surface as errors.
    pub fn degrade_reason(&self) -> Option<DegradeReason> {
        match self {
            Self::NotFound(_) => Some(DegradeReason::ModelNotFound),
            Self::RequestRejected { .. } => Some(DegradeReason::RequestRejected),
            Self::ProviderUnavailable(_) => Some(DegradeReason::ProviderUnavailable),
            Self::UnexpectedResponseShape(_) => Some(DegradeReason::UnexpectedResponseShape),
            Self::Unconfigured => Some(DegradeReason::Unconfigured),
            Self::NoData | Self::Config(_) => None,
        }
    }
}

/// Why a usable-but-degraded response was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradeReason {
    ModelNotFound,
    RequestRejected,
    ProviderUnavailable,
    UnexpectedResponseShape,
    Unconfigured,
}

impl DegradeReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ModelNotFound => "model_not_found",
            Self::RequestRejected => "request_rejected",
            Self::ProviderUnavailable => "provider_unavailable",
            Self::UnexpectedResponseShape => "unexpected_response_shape",
            Self::Unconfigured => "unconfigured",
        }
    }
}

impl std::fmt::Display for DegradeReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GatewayError::RequestRejected {
            status: 401,
            body: "{\"error\":\"bad key\"}".to_string(),
        };
        assert_eq!(err.to_string(), "401 - {\"error\":\"bad key\"}");
        assert_eq!(
            GatewayError::NotFound("gpt-9".to_string()).to_string(),
            "Model 'gpt-9' not found in available models"
        );
        assert_eq!(GatewayError::NoData.to_string(), "No chat data to summarize");
    }

    #[test]
    fn test_degrade_reason_mapping() {
        assert_eq!(
            GatewayError::ProviderUnavailable("down".to_string()).degrade_reason(),
            Some(DegradeReason::ProviderUnavailable)
        );
        assert_eq!(GatewayError::NoData.degrade_reason(), None);
        assert_eq!(GatewayError::NoData.kind(), "no_data");
    }

    #[test]
    fn test_reason_serializes_snake_case() {
        let json = serde_json::to_string(&DegradeReason::UnexpectedResponseShape).unwrap();
        assert_eq!(json, "\"unexpected_response_shape\"");
        assert_eq!(DegradeReason::ModelNotFound.to_string(), "model_not_found");
    }
}
