use async_trait::async_trait;

use crate::models::ModelDescriptor;
use crate::utils::GatewayError;

/// Everything a provider needs for one exchange
#[derive(Debug, Clone, Copy)]
pub struct ProviderRequest<'a> {
    pub model: &'a ModelDescriptor,
    pub system_prompt: &'a str,
    pub message: &'a str,
}

/// Result of one attempt against one provider
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderOutcome {
    /// Assistant text, exactly as extracted
    Success(String),
    /// Transient failure; the next provider may be tried
    Retriable(GatewayError),
    /// The request itself is bad; stop here
    Fatal(GatewayError),
}

/// Core trait that every inference backend implements
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &str;

    /// Whether this provider can serve the given model
    fn supports(&self, model: &ModelDescriptor) -> bool {
        let _ = model;
        true
    }

    /// Make a single attempt. Never retries internally.
    async fn attempt(&self, request: &ProviderRequest<'_>) -> ProviderOutcome;
}
