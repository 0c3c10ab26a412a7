use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Picks the filter directive: `RUST_LOG` wins over the configured level.
fn filter_directive(configured: &str, rust_log: Option<String>) -> String {
    rust_log
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| configured.to_string())
}

/// Logs go to stderr so they never mix with prompts on stdout.
pub fn init_logging(configured_level: &str) -> Result<()> {
    let directive = filter_directive(configured_level, std::env::var("RUST_LOG").ok());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_overrides_config() {
        assert_eq!(filter_directive("warn", Some("debug".to_string())), "debug");
    }

    #[test]
    fn blank_rust_log_falls_back_to_config() {
        assert_eq!(filter_directive("info", Some("  ".to_string())), "info");
        assert_eq!(filter_directive("info", None), "info");
    }
}
