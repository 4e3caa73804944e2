// Gateway module for service - follows the Train Station Pattern
// All external access must go through this gateway

mod ai_service;

pub use ai_service::AiService;
