// Gateway module for inference - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod inference;
mod legacy;
mod prompts;
mod summary;

// Public re-exports - the ONLY way to access gateway functionality
pub use inference::InferenceGateway;
pub use legacy::{render, render_error, render_outcome};
pub use prompts::{demo_response, summary_prompt, system_prompt};
pub use summary::SummaryGenerator;
