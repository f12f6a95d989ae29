use std::time::Duration;

use partsdesk_domain::LoggingConfig;
use partsdesk_infra::api::{ApiError, ApiErrorCategory};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Logs go to stderr so stdout stays
/// parseable; `RUST_LOG` wins over `config.level`.
///
/// # Errors
/// Fails if a global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.with_target(false).try_init()
    };
    installed.map_err(|err| anyhow::anyhow!("failed to initialise logging: {err}"))
}

/// Log the outcome of a command execution with structured fields.
///
/// Callers must avoid forwarding sensitive values in `command`.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, success: bool) {
    let duration_ms = elapsed.as_millis() as u64;

    if success {
        info!(command, duration_ms, "command_execution_success");
    } else {
        warn!(command, duration_ms, "command_execution_failure");
    }
}

/// Stable label for an API error, for logs and JSON output.
#[inline]
pub fn error_label(error: &ApiError) -> &'static str {
    match error.category() {
        ApiErrorCategory::Authentication => "auth",
        ApiErrorCategory::RateLimit => "rate_limit",
        ApiErrorCategory::Server => "server",
        ApiErrorCategory::Client if matches!(error, ApiError::NotFound(_)) => "not_found",
        ApiErrorCategory::Client => "invalid_input",
        ApiErrorCategory::Network => "network",
        ApiErrorCategory::Config => "config",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        assert_eq!(error_label(&ApiError::NotFound("x".into())), "not_found");
        assert_eq!(error_label(&ApiError::Client("x".into())), "invalid_input");
        assert_eq!(error_label(&ApiError::Timeout(Duration::from_secs(1))), "network");
    }
}
