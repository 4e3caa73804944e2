/// Constants module to avoid magic numbers in the codebase

// Primary provider (OpenRouter, chat-completion API)
pub const DEFAULT_PRIMARY_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_PRIMARY_API_KEY_ENV: &str = "OPENROUTER_API_KEY";
pub const DEFAULT_PRIMARY_REFERER: &str = "http://localhost:5173";
pub const DEFAULT_PRIMARY_TITLE: &str = "AI Chatbot";

// Secondary provider (Hugging Face, text-generation API)
pub const DEFAULT_SECONDARY_BASE_URL: &str = "https://api-inference.huggingface.co/models";
pub const DEFAULT_SECONDARY_API_KEY_ENV: &str = "HUGGINGFACE_API_KEY";

// Timeouts
pub const PRIMARY_TIMEOUT_SECS: u64 = 30;
pub const SECONDARY_TIMEOUT_SECS: u64 = 60; // cold text-generation endpoints are slow to wake
pub const CATALOG_FETCH_TIMEOUT_SECS: u64 = 10;

// Generation parameters
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: usize = 1000;
pub const DEFAULT_MAX_NEW_TOKENS: usize = 512;

// Status codes that mean "try somewhere else"
pub const RETRIABLE_STATUS_CODES: &[u16] = &[429, 500, 502, 503, 504];

// Summaries
pub const DEFAULT_SUMMARY_WINDOW: usize = 10;

// Legacy text contract
pub const LEGACY_ERROR_PREFIX: &str = "Error: ";
pub const NO_DATA_MESSAGE: &str = "No chat data to summarize";

// Environment
pub const ENV_PREFIX: &str = "CHATGATE_";
pub const APP_NAME: &str = "chatgate";
