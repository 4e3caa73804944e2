// Gateway module for providers - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod huggingface;
mod openrouter;
mod traits;
mod transport;

// Public re-exports - the ONLY way to access provider functionality
pub use huggingface::{flatten_prompt, HuggingFaceProvider};
pub use openrouter::OpenRouterProvider;
pub use traits::{InferenceProvider, ProviderOutcome, ProviderRequest};
pub use transport::{
    HttpMethod, HttpReply, HttpRequest, HttpTransport, ReqwestTransport, TransportError,
};

#[cfg(test)]
pub use transport::MockHttpTransport;
