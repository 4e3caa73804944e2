use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the logging system
///
/// `RUST_LOG` wins when set; otherwise `info`, or `debug` with `verbose`.
pub fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // try_init so repeated initialization (tests, embedding) is not a panic
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr) // keep stdout clean for command output
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .compact(),
        )
        .try_init();
}

/// Describe a credential for logs without revealing it
pub fn describe_secret(secret: Option<&str>) -> &'static str {
    match secret {
        Some(s) if !s.trim().is_empty() => "configured",
        _ => "not configured",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_secret() {
        assert_eq!(describe_secret(Some("sk-or-123")), "configured");
        assert_eq!(describe_secret(Some("  ")), "not configured");
        assert_eq!(describe_secret(None), "not configured");
    }
}
