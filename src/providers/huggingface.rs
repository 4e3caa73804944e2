use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, warn};

use super::traits::{InferenceProvider, ProviderOutcome, ProviderRequest};
use super::transport::{HttpRequest, HttpTransport};
use crate::app::SecondaryProviderConfig;
use crate::models::ModelDescriptor;
use crate::utils::GatewayError;

/// Secondary provider speaking the text-generation API (Hugging Face inference).
///
/// Takes a single flattened prompt rather than a message list, and only serves
/// models whose descriptor names a repository on this provider.
pub struct HuggingFaceProvider {
    transport: Arc<dyn HttpTransport>,
    config: SecondaryProviderConfig,
    api_key: String,
}

impl HuggingFaceProvider {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        config: SecondaryProviderConfig,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            config,
            api_key: api_key.into(),
        }
    }

    fn build_request(&self, repo: &str, request: &ProviderRequest<'_>) -> HttpRequest {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), repo);
        let body = json!({
            "inputs": flatten_prompt(request.system_prompt, request.message),
            "parameters": {
                "max_new_tokens": self.config.max_new_tokens,
                "temperature": self.config.temperature,
                "return_full_text": false,
            },
        });

        HttpRequest::post_json(url, body, self.config.timeout()).bearer(&self.api_key)
    }
}

#[async_trait]
impl InferenceProvider for HuggingFaceProvider {
    fn name(&self) -> &str {
        "huggingface"
    }

    fn supports(&self, model: &ModelDescriptor) -> bool {
        model.secondary_provider_ref.is_some()
    }

    async fn attempt(&self, request: &ProviderRequest<'_>) -> ProviderOutcome {
        let Some(repo) = request.model.secondary_provider_ref.as_deref() else {
            return ProviderOutcome::Retriable(GatewayError::ProviderUnavailable(format!(
                "Model '{}' has no secondary provider",
                request.model.id
            )));
        };
        debug!(model = %request.model.id, repo, "Sending text generation to secondary provider");

        // Every failure here means "unavailable"; there is nowhere left to go
        let reply = match self.transport.send(self.build_request(repo, request)).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(repo, "Secondary provider unreachable: {}", e);
                return ProviderOutcome::Retriable(GatewayError::ProviderUnavailable(e.to_string()));
            }
        };

        if !reply.is_success() {
            warn!(repo, status = reply.status, "Secondary provider failed");
            return ProviderOutcome::Retriable(GatewayError::ProviderUnavailable(format!(
                "{} - {}",
                reply.status, reply.body
            )));
        }

        let text = extract_generated_text(&reply.body);
        if text.trim().is_empty() {
            warn!(repo, "Secondary provider returned empty text");
            return ProviderOutcome::Retriable(GatewayError::ProviderUnavailable(
                "Secondary provider returned an empty response".to_string(),
            ));
        }
        ProviderOutcome::Success(text)
    }
}

/// System and user text in a single instruction-style prompt
pub fn flatten_prompt(system_prompt: &str, message: &str) -> String {
    format!("{}\n\nUser: {}\nAssistant:", system_prompt, message)
}

/// Accepts `[{"generated_text": ..}]`, `{"generated_text": ..}`, or anything
/// else rendered verbatim as a last resort.
fn extract_generated_text(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return body.to_string();
    };

    let generated = match &value {
        Value::Array(items) => {
            let texts: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("generated_text").and_then(Value::as_str))
                .collect();
            // first usable text; all-blank stays blank rather than raw JSON
            texts
                .iter()
                .find(|text| !text.trim().is_empty())
                .or(texts.first())
                .copied()
        }
        Value::Object(_) => value.get("generated_text").and_then(Value::as_str),
        _ => None,
    };

    match generated {
        Some(text) => text.to_string(),
        None => match &value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{HttpReply, MockHttpTransport, TransportError};
    use pretty_assertions::assert_eq;

    fn model() -> ModelDescriptor {
        ModelDescriptor::new("google/gemma-3-27b-it:free", "gemma-3-27b", "Google")
            .with_secondary("google/gemma-3-27b-it")
    }

    fn provider(transport: MockHttpTransport) -> HuggingFaceProvider {
        HuggingFaceProvider::new(
            Arc::new(transport),
            SecondaryProviderConfig::default(),
            "hf_test",
        )
    }

    async fn attempt_with(reply: Result<HttpReply, TransportError>) -> ProviderOutcome {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(move |_| reply.clone());
        let model = model();
        provider(transport)
            .attempt(&ProviderRequest {
                model: &model,
                system_prompt: "sys",
                message: "hi",
            })
            .await
    }

    #[test]
    fn test_extract_shapes() {
        assert_eq!(extract_generated_text(r#"[{"generated_text":"a"}]"#), "a");
        assert_eq!(extract_generated_text(r#"{"generated_text":"b"}"#), "b");
        assert_eq!(extract_generated_text(r#"{"other":1}"#), r#"{"other":1}"#);
        assert_eq!(extract_generated_text(r#""plain""#), "plain");
        assert_eq!(extract_generated_text("raw text"), "raw text");
    }

    #[test]
    fn test_extract_skips_blank_candidates() {
        assert_eq!(
            extract_generated_text(r#"[{"generated_text":""},{"generated_text":"real"}]"#),
            "real"
        );
        assert_eq!(extract_generated_text(r#"[{"generated_text":" "}]"#), " ");
    }

    #[test]
    fn test_supports_only_models_with_repo() {
        let provider = provider(MockHttpTransport::new());
        assert!(provider.supports(&model()));
        assert!(!provider.supports(&ModelDescriptor::new("a/b", "B", "A")));
    }

    #[tokio::test]
    async fn test_request_shape() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_send()
            .withf(|req| {
                let body = req.body.as_ref().unwrap();
                req.url == "https://api-inference.huggingface.co/models/google/gemma-3-27b-it"
                    && req.bearer.as_deref() == Some("hf_test")
                    && req.timeout.as_secs() == 60
                    && body["inputs"] == "sys\n\nUser: hi\nAssistant:"
                    && body["parameters"]["return_full_text"] == false
                    && body["parameters"]["max_new_tokens"] == 512
            })
            .times(1)
            .returning(|_| Ok(HttpReply::new(200, r#"[{"generated_text":" Hello!"}]"#)));

        let model = model();
        let outcome = provider(transport)
            .attempt(&ProviderRequest {
                model: &model,
                system_prompt: "sys",
                message: "hi",
            })
            .await;
        assert_eq!(outcome, ProviderOutcome::Success(" Hello!".to_string()));
    }

    #[tokio::test]
    async fn test_all_failures_are_unavailable() {
        let failures = vec![
            Err(TransportError::Connect("refused".to_string())),
            Ok(HttpReply::new(400, "bad")),
            Ok(HttpReply::new(503, "loading")),
            Ok(HttpReply::new(200, r#"[{"generated_text":"  "}]"#)),
        ];
        for reply in failures {
            let outcome = attempt_with(reply).await;
            assert!(
                matches!(
                    outcome,
                    ProviderOutcome::Retriable(GatewayError::ProviderUnavailable(_))
                ),
                "got {:?}",
                outcome
            );
        }
    }
}
