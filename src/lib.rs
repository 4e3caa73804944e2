pub mod app;
pub mod cli;
pub mod constants;
pub mod gateway;
pub mod models;
pub mod providers;
pub mod service;
pub mod utils;

pub use app::{load_config, Config, Credentials};
pub use gateway::{InferenceGateway, SummaryGenerator};
pub use models::{ChatTurn, InferenceResult, Language, ModelCatalog, ModelDescriptor};
pub use providers::{HttpTransport, InferenceProvider, ProviderOutcome};
pub use service::AiService;
pub use utils::{DegradeReason, GatewayError};
