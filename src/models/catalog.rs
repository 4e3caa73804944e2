use serde::Deserialize;
use std::time::Duration;
use tracing::{info, warn};

use super::types::ModelDescriptor;
use crate::app::{Config, Credentials};
use crate::constants::CATALOG_FETCH_TIMEOUT_SECS;
use crate::providers::{HttpRequest, HttpTransport};
use crate::utils::GatewayError;

/// Where the loaded catalog came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    /// Primary provider's model listing, filtered by the allow-list
    Live,
    /// Built-in fallback list
    Static,
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Live => f.write_str("live"),
            Self::Static => f.write_str("static"),
        }
    }
}

/// The set of invocable models. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    models: Vec<ModelDescriptor>,
    source: CatalogSource,
}

impl ModelCatalog {
    /// Build a catalog from an explicit list, keeping its order
    pub fn new(models: Vec<ModelDescriptor>) -> Self {
        Self {
            models,
            source: CatalogSource::Static,
        }
    }

    /// The built-in catalog used whenever the live listing is unavailable
    pub fn builtin() -> Self {
        Self::new(builtin_models())
    }

    /// Load the catalog at startup.
    ///
    /// Tries the primary provider's listing when it is configured; any failure,
    /// or a listing with no allow-listed models, falls back to the built-in list.
    pub async fn load(
        transport: &dyn HttpTransport,
        config: &Config,
        credentials: &Credentials,
    ) -> Self {
        if !config.catalog.fetch_live {
            info!("Live model listing disabled; using built-in catalog");
            return Self::builtin();
        }
        let Some(api_key) = credentials.primary.as_deref() else {
            info!("Primary provider not configured; using built-in catalog");
            return Self::builtin();
        };

        let url = format!("{}/models", config.primary.base_url.trim_end_matches('/'));
        match fetch_live(transport, &url, api_key, &config.catalog.allow_list).await {
            Ok(models) if !models.is_empty() => {
                info!(count = models.len(), "Loaded model catalog from {}", url);
                Self {
                    models,
                    source: CatalogSource::Live,
                }
            }
            Ok(_) => {
                warn!("Model listing at {} had no allow-listed models; using built-in catalog", url);
                Self::builtin()
            }
            Err(e) => {
                warn!("Model listing at {} failed ({}); using built-in catalog", url, e);
                Self::builtin()
            }
        }
    }

    /// Models in load order
    pub fn list_models(&self) -> &[ModelDescriptor] {
        &self.models
    }

    /// Exact id first, then case-insensitive display name. First match wins.
    pub fn resolve(&self, model_ref: &str) -> Result<&ModelDescriptor, GatewayError> {
        self.models
            .iter()
            .find(|m| m.id == model_ref)
            .or_else(|| {
                let wanted = model_ref.to_lowercase();
                self.models
                    .iter()
                    .find(|m| m.display_name.to_lowercase() == wanted)
            })
            .ok_or_else(|| GatewayError::NotFound(model_ref.to_string()))
    }

    /// The model used when the caller has no preference (summaries)
    pub fn default_model(&self) -> Option<&ModelDescriptor> {
        self.models.first()
    }

    pub fn source(&self) -> CatalogSource {
        self.source
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct ModelsResponse {
    data: Vec<ListedModel>,
}

#[derive(Debug, Deserialize)]
struct ListedModel {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

async fn fetch_live(
    transport: &dyn HttpTransport,
    url: &str,
    api_key: &str,
    allow_list: &[String],
) -> Result<Vec<ModelDescriptor>, GatewayError> {
    let request = HttpRequest::get(url, Duration::from_secs(CATALOG_FETCH_TIMEOUT_SECS))
        .bearer(api_key);

    let reply = transport
        .send(request)
        .await
        .map_err(|e| GatewayError::ProviderUnavailable(e.to_string()))?;

    if !reply.is_success() {
        return Err(GatewayError::RequestRejected {
            status: reply.status,
            body: reply.body,
        });
    }

    let listing: ModelsResponse = serde_json::from_str(&reply.body)
        .map_err(|e| GatewayError::UnexpectedResponseShape(e.to_string()))?;

    Ok(filter_allowed(listing.data, allow_list))
}

/// Keep allow-listed models in allow-list order, enriching from the built-ins
fn filter_allowed(listed: Vec<ListedModel>, allow_list: &[String]) -> Vec<ModelDescriptor> {
    let builtins = builtin_models();

    allow_list
        .iter()
        .filter_map(|allowed| {
            let live = listed.iter().find(|m| &m.id == allowed)?;
            let descriptor = match builtins.iter().find(|b| &b.id == allowed) {
                Some(builtin) => builtin.clone(),
                None => ModelDescriptor::new(
                    live.id.clone(),
                    live.name.clone().unwrap_or_else(|| live.id.clone()),
                    vendor_from_id(&live.id),
                )
                .with_description(live.description.clone().unwrap_or_default()),
            };
            Some(descriptor)
        })
        .collect()
}

/// "mistralai/mistral-small" -> "mistralai"
fn vendor_from_id(id: &str) -> String {
    id.split('/').next().unwrap_or(id).to_string()
}

/// Ids exposed by default, in catalog order
pub fn default_allow_list() -> Vec<String> {
    builtin_models().into_iter().map(|m| m.id).collect()
}

/// Known-good free models, each with a text-generation fallback repository
pub fn builtin_models() -> Vec<ModelDescriptor> {
    vec![
        ModelDescriptor::new(
            "meta-llama/llama-3.3-70b-instruct:free",
            "LLaMA 3.3 70B Instruct",
            "Meta",
        )
        .with_secondary("meta-llama/Llama-3.3-70B-Instruct")
        .with_description("Powerful 70B parameter model with advanced reasoning capabilities"),
        ModelDescriptor::new("deepseek/deepseek-chat-v3.1:free", "DeepSeek V3.1", "DeepSeek")
            .with_secondary("deepseek-ai/DeepSeek-V3.1")
            .with_description("Advanced chat model with strong coding and reasoning abilities"),
        ModelDescriptor::new("google/gemma-3-27b-it:free", "gemma-3-27b", "Google")
            .with_secondary("google/gemma-3-27b-it")
            .with_description("Google's latest Gemma model with 27B parameters"),
        ModelDescriptor::new(
            "mistralai/mistral-small-3.2-24b-instruct:free",
            "mistral-small-3.2",
            "Mistral AI",
        )
        .with_secondary("mistralai/Mistral-Small-3.2-24B-Instruct-2506")
        .with_description("Efficient 24B model with multilingual support and fast responses"),
    ]
}
