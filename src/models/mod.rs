// Gateway module for models - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod catalog;
mod types;

// Public re-exports - the ONLY way to access model functionality
pub use catalog::{builtin_models, default_allow_list, CatalogSource, ModelCatalog};
pub use types::{ChatTurn, InferenceRequest, InferenceResult, Language, ModelDescriptor};
