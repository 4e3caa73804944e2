use tracing::{debug, warn};

use super::inference::InferenceGateway;
use super::prompts::summary_prompt;
use crate::models::{ChatTurn, InferenceResult, Language};
use crate::utils::GatewayError;

/// Reduces recent chat history to a single prompt and routes it through the gateway
#[derive(Debug, Clone, Copy)]
pub struct SummaryGenerator {
    window: usize,
}

impl SummaryGenerator {
    /// A window of zero is treated as one
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// The last `window` turns, in the order given
    pub fn recent<'a>(&self, history: &'a [ChatTurn]) -> &'a [ChatTurn] {
        let start = history.len().saturating_sub(self.window);
        &history[start..]
    }

    /// "User: ..\nAI: .." per turn, newline-joined
    pub fn render_history(&self, history: &[ChatTurn]) -> String {
        self.recent(history)
            .iter()
            .map(|turn| format!("User: {}\nAI: {}", turn.user_message, turn.ai_response))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn build_prompt(
        &self,
        history: &[ChatTurn],
        language: Language,
    ) -> Result<String, GatewayError> {
        if history.is_empty() {
            return Err(GatewayError::NoData);
        }
        Ok(summary_prompt(&self.render_history(history), language))
    }

    /// Summarize with the catalog's default model. Empty history never reaches the gateway.
    pub async fn summarize(
        &self,
        gateway: &InferenceGateway,
        history: &[ChatTurn],
        language: Language,
    ) -> Result<InferenceResult, GatewayError> {
        let prompt = self.build_prompt(history, language)?;

        let Some(model) = gateway.catalog().default_model() else {
            warn!("Catalog is empty; cannot pick a summary model");
            return Ok(InferenceResult::from_error(&GatewayError::ProviderUnavailable(
                "No models available for summary generation".to_string(),
            )));
        };

        debug!(
            model = %model.id,
            turns = self.recent(history).len(),
            "Generating history summary"
        );
        Ok(gateway.complete(&model.id, &prompt, language).await)
    }
}

impl Default for SummaryGenerator {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_SUMMARY_WINDOW)
    }
}
