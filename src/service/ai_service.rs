use std::sync::Arc;
use tracing::info;

use crate::app::{Config, Credentials};
use crate::gateway::{render, render_outcome, InferenceGateway, SummaryGenerator};
use crate::models::{ChatTurn, InferenceResult, Language, ModelCatalog, ModelDescriptor};
use crate::providers::{HttpTransport, ReqwestTransport};
use crate::utils::{describe_secret, GatewayError};

/// Everything the rest of the application needs from the model layer.
///
/// Built once at startup and shared by reference; the catalog inside is
/// read-only after construction.
pub struct AiService {
    gateway: InferenceGateway,
    summarizer: SummaryGenerator,
}

impl AiService {
    pub fn new(gateway: InferenceGateway, summarizer: SummaryGenerator) -> Self {
        Self {
            gateway,
            summarizer,
        }
    }

    /// Production wiring: reqwest transport, keys from the environment
    pub async fn from_config(config: &Config) -> Result<Self, GatewayError> {
        let transport =
            ReqwestTransport::new().map_err(|e| GatewayError::Config(e.to_string()))?;
        let credentials = Credentials::from_env(config);
        Ok(Self::with_transport(config, &credentials, Arc::new(transport)).await)
    }

    pub async fn with_transport(
        config: &Config,
        credentials: &Credentials,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        info!(
            primary = describe_secret(credentials.primary.as_deref()),
            secondary = describe_secret(credentials.secondary.as_deref()),
            "Provider credentials"
        );

        let catalog = ModelCatalog::load(transport.as_ref(), config, credentials).await;
        info!(source = %catalog.source(), models = catalog.len(), "Model catalog ready");

        let gateway = InferenceGateway::from_config(
            Arc::new(catalog),
            transport,
            config,
            credentials,
        );
        Self::new(gateway, SummaryGenerator::new(config.summary.window))
    }

    pub fn gateway(&self) -> &InferenceGateway {
        &self.gateway
    }

    pub fn get_available_models(&self) -> &[ModelDescriptor] {
        self.gateway.catalog().list_models()
    }

    pub async fn complete(
        &self,
        model_ref: &str,
        message: &str,
        language: Language,
    ) -> InferenceResult {
        self.gateway.complete(model_ref, message, language).await
    }

    pub async fn summarize(
        &self,
        history: &[ChatTurn],
        language: Language,
    ) -> Result<InferenceResult, GatewayError> {
        self.summarizer
            .summarize(&self.gateway, history, language)
            .await
    }

    /// Legacy text form of [`AiService::complete`]
    pub async fn get_response(&self, model_ref: &str, message: &str, language: &str) -> String {
        render(
            &self
                .complete(model_ref, message, Language::parse(language))
                .await,
        )
    }

    /// Legacy text form of [`AiService::summarize`]
    pub async fn generate_summary(&self, history: &[ChatTurn], language: &str) -> String {
        render_outcome(&self.summarize(history, Language::parse(language)).await)
    }
}
