use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::{DegradeReason, GatewayError};

/// A catalog entry identifying one invocable model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Provider-qualified id, e.g. "meta-llama/llama-3.3-70b-instruct:free"
    pub id: String,
    /// Human-facing name, also accepted as a lookup alias
    pub display_name: String,
    /// Vendor that trained the model
    pub provider: String,
    /// Repository name on the secondary provider, if the model can fall back there
    #[serde(default)]
    pub secondary_provider_ref: Option<String>,
    #[serde(default)]
    pub description: String,
}

impl ModelDescriptor {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            provider: provider.into(),
            secondary_provider_ref: None,
            description: String::new(),
        }
    }

    pub fn with_secondary(mut self, repo: impl Into<String>) -> Self {
        self.secondary_provider_ref = Some(repo.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// One past exchange from the conversation log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub user_message: String,
    pub ai_response: String,
    /// When the log stored it; not used for ordering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ChatTurn {
    pub fn new(user_message: impl Into<String>, ai_response: impl Into<String>) -> Self {
        Self {
            user_message: user_message.into(),
            ai_response: ai_response.into(),
            created_at: None,
        }
    }
}

/// Response language. Anything unrecognized is English.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("ar") {
            Self::Ar
        } else {
            Self::En
        }
    }
}

/// A single chat exchange request
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceRequest {
    pub model_id: String,
    pub message: String,
    pub language: Language,
}

/// Text delivered to the caller, tagged with whether a failure was papered over
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InferenceResult {
    Ok { text: String },
    Degraded { text: String, reason: DegradeReason },
}

impl InferenceResult {
    pub fn ok(text: impl Into<String>) -> Self {
        Self::Ok { text: text.into() }
    }

    /// Degrade from an error; the text is the error's human-readable message
    pub fn from_error(error: &GatewayError) -> Self {
        let reason = error
            .degrade_reason()
            .unwrap_or(DegradeReason::ProviderUnavailable);
        Self::Degraded {
            text: error.to_string(),
            reason,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Ok { text } | Self::Degraded { text, .. } => text,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    pub fn reason(&self) -> Option<DegradeReason> {
        match self {
            Self::Ok { .. } => None,
            Self::Degraded { reason, .. } => Some(*reason),
        }
    }
}
