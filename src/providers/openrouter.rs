use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error, warn};

use super::traits::{InferenceProvider, ProviderOutcome, ProviderRequest};
use super::transport::{HttpRequest, HttpTransport};
use crate::app::PrimaryProviderConfig;
use crate::constants::RETRIABLE_STATUS_CODES;
use crate::utils::GatewayError;

/// Primary provider speaking the chat-completion API (OpenRouter)
pub struct OpenRouterProvider {
    transport: Arc<dyn HttpTransport>,
    config: PrimaryProviderConfig,
    api_key: String,
}

impl OpenRouterProvider {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        config: PrimaryProviderConfig,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            config,
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn build_request(&self, request: &ProviderRequest<'_>) -> HttpRequest {
        let body = json!({
            "model": request.model.id,
            "messages": [
                { "role": "system", "content": request.system_prompt },
                { "role": "user", "content": request.message },
            ],
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_tokens,
        });

        HttpRequest::post_json(self.endpoint(), body, self.config.timeout())
            .bearer(&self.api_key)
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.title)
    }
}

#[async_trait]
impl InferenceProvider for OpenRouterProvider {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn attempt(&self, request: &ProviderRequest<'_>) -> ProviderOutcome {
        debug!(model = %request.model.id, "Sending chat completion to primary provider");

        let reply = match self.transport.send(self.build_request(request)).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(model = %request.model.id, "Primary provider unreachable: {}", e);
                return ProviderOutcome::Retriable(GatewayError::ProviderUnavailable(e.to_string()));
            }
        };

        if reply.is_success() {
            return parse_completion(&reply.body);
        }

        if RETRIABLE_STATUS_CODES.contains(&reply.status) {
            warn!(status = reply.status, "Primary provider temporarily unavailable");
            ProviderOutcome::Retriable(GatewayError::ProviderUnavailable(format!(
                "{} - {}",
                reply.status, reply.body
            )))
        } else {
            error!(status = reply.status, "Primary provider rejected request: {}", reply.body);
            ProviderOutcome::Fatal(GatewayError::RequestRejected {
                status: reply.status,
                body: reply.body,
            })
        }
    }
}

// Response structures (OpenAI chat-completion format)

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: Option<String>,
}

/// First choice's assistant content, untouched
fn parse_completion(body: &str) -> ProviderOutcome {
    let content = serde_json::from_str::<ChatCompletionResponse>(body)
        .ok()
        .and_then(|r| r.choices.into_iter().next())
        .and_then(|c| c.message.content)
        .filter(|c| !c.trim().is_empty());

    match content {
        Some(text) => ProviderOutcome::Success(text),
        None => {
            error!("Primary provider returned an unexpected body: {}", body);
            ProviderOutcome::Fatal(GatewayError::UnexpectedResponseShape(body.to_string()))
        }
    }
}
