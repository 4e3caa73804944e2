//! Plain-text rendering for callers that only understand strings.
//!
//! Failures become `"Error: <message>"`; demo replies and successful text pass
//! through untouched, so callers can still branch on the prefix.

use crate::constants::LEGACY_ERROR_PREFIX;
use crate::models::InferenceResult;
use crate::utils::{DegradeReason, GatewayError};

pub fn render(result: &InferenceResult) -> String {
    match result {
        InferenceResult::Ok { text } => text.clone(),
        InferenceResult::Degraded {
            text,
            reason: DegradeReason::Unconfigured,
        } => text.clone(),
        InferenceResult::Degraded { text, .. } => format!("{}{}", LEGACY_ERROR_PREFIX, text),
    }
}

pub fn render_error(error: &GatewayError) -> String {
    format!("{}{}", LEGACY_ERROR_PREFIX, error)
}

pub fn render_outcome(outcome: &Result<InferenceResult, GatewayError>) -> String {
    match outcome {
        Ok(result) => render(result),
        Err(e) => render_error(e),
    }
}
