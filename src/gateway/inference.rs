use std::sync::Arc;
use tracing::{debug, info, warn};

use super::prompts::{demo_response, system_prompt};
use crate::app::{Config, Credentials};
use crate::models::{InferenceRequest, InferenceResult, Language, ModelCatalog};
use crate::providers::{
    HttpTransport, HuggingFaceProvider, InferenceProvider, OpenRouterProvider, ProviderOutcome,
    ProviderRequest,
};
use crate::utils::{DegradeReason, GatewayError};

/// Executes one exchange against a priority-ordered chain of providers.
///
/// The first `Success` or `Fatal` outcome ends the chain; `Retriable` moves on
/// to the next provider that supports the model. With no providers at all the
/// gateway answers with demo text and makes no calls.
pub struct InferenceGateway {
    catalog: Arc<ModelCatalog>,
    providers: Vec<Box<dyn InferenceProvider>>,
}

impl InferenceGateway {
    pub fn new(catalog: Arc<ModelCatalog>, providers: Vec<Box<dyn InferenceProvider>>) -> Self {
        Self { catalog, providers }
    }

    /// Primary then secondary, each only if its credential is present
    pub fn from_config(
        catalog: Arc<ModelCatalog>,
        transport: Arc<dyn HttpTransport>,
        config: &Config,
        credentials: &Credentials,
    ) -> Self {
        let mut providers: Vec<Box<dyn InferenceProvider>> = Vec::new();

        if let Some(key) = &credentials.primary {
            providers.push(Box::new(OpenRouterProvider::new(
                Arc::clone(&transport),
                config.primary.clone(),
                key.clone(),
            )));
        }
        if let Some(key) = &credentials.secondary {
            providers.push(Box::new(HuggingFaceProvider::new(
                Arc::clone(&transport),
                config.secondary.clone(),
                key.clone(),
            )));
        }

        Self::new(catalog, providers)
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    /// Names of the configured providers, in attempt order
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn is_configured(&self) -> bool {
        !self.providers.is_empty()
    }

    pub async fn execute(&self, request: &InferenceRequest) -> InferenceResult {
        self.complete(&request.model_id, &request.message, request.language)
            .await
    }

    /// One exchange. Always returns usable, non-empty text.
    pub async fn complete(
        &self,
        model_ref: &str,
        message: &str,
        language: Language,
    ) -> InferenceResult {
        if !self.is_configured() {
            info!(model = model_ref, "No provider configured; returning demo response");
            return InferenceResult::Degraded {
                text: demo_response(model_ref, message, language),
                reason: DegradeReason::Unconfigured,
            };
        }

        match self.try_complete(model_ref, message, language).await {
            Ok(text) => InferenceResult::ok(text),
            Err(e) => {
                warn!(model = model_ref, reason = e.kind(), "Degraded response: {}", e);
                InferenceResult::from_error(&e)
            }
        }
    }

    async fn try_complete(
        &self,
        model_ref: &str,
        message: &str,
        language: Language,
    ) -> Result<String, GatewayError> {
        let model = self.catalog.resolve(model_ref)?;
        let request = ProviderRequest {
            model,
            system_prompt: system_prompt(language),
            message,
        };

        let mut last_error = None;
        for provider in self.providers.iter().filter(|p| p.supports(model)) {
            debug!(provider = provider.name(), model = %model.id, "Attempting provider");
            match provider.attempt(&request).await {
                ProviderOutcome::Success(text) => return Ok(text),
                ProviderOutcome::Fatal(e) => return Err(e),
                ProviderOutcome::Retriable(e) => {
                    warn!(provider = provider.name(), "Provider failed, trying next: {}", e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            GatewayError::ProviderUnavailable(format!(
                "No configured provider can serve model '{}'",
                model.id
            ))
        }))
    }
}
