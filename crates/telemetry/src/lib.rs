//! Tracing bootstrap shared by the SHELF binaries.

use std::env::VarError;

use anyhow::{anyhow, Context};
use shelf_kernel::{LogFormat, TelemetrySettings};
use tracing_subscriber::EnvFilter;

/// Build the event filter, preferring `RUST_LOG` over the configured directive.
///
/// A malformed `RUST_LOG` is an error rather than a silent fallback.
pub fn filter(settings: &TelemetrySettings) -> anyhow::Result<EnvFilter> {
    let from_env = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directive) => Some(directive),
        Err(VarError::NotPresent) => None,
        Err(err) => return Err(anyhow!("invalid {}: {err}", EnvFilter::DEFAULT_ENV)),
    };
    filter_from(from_env.as_deref(), settings)
}

/// Build the event filter from an explicit environment directive. An empty
/// directive counts as unset.
pub fn filter_from(env: Option<&str>, settings: &TelemetrySettings) -> anyhow::Result<EnvFilter> {
    match env.map(str::trim).filter(|directive| !directive.is_empty()) {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("invalid {} filter '{directive}'", EnvFilter::DEFAULT_ENV)),
        None => EnvFilter::try_new(&settings.filter)
            .with_context(|| format!("invalid log filter '{}'", settings.filter)),
    }
}

/// Install the global tracing subscriber, writing to stderr.
///
/// Fails if the filter directive is malformed or a subscriber is already
/// installed for this process.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let filter = filter(settings)?;

    let installed = match settings.log_format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .with_current_span(false)
            .try_init(),
    };
    installed.map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))?;

    tracing::debug!(
        target: "shelf-telemetry",
        format = ?settings.log_format,
        "telemetry initialized"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured(filter: &str) -> TelemetrySettings {
        TelemetrySettings {
            log_format: LogFormat::Pretty,
            filter: filter.to_string(),
        }
    }

    #[test]
    fn rejects_malformed_configured_filter() {
        let err = filter_from(None, &configured("shelf=loud")).unwrap_err();
        assert!(err.to_string().contains("invalid log filter 'shelf=loud'"));
    }

    #[test]
    fn rejects_malformed_env_filter() {
        let err = filter_from(Some("shelf=loud"), &TelemetrySettings::default()).unwrap_err();
        assert!(err.to_string().contains("invalid RUST_LOG filter 'shelf=loud'"));
    }

    #[test]
    fn env_filter_wins_over_configured_one() {
        assert!(filter_from(Some("shelf=debug"), &configured("shelf=loud")).is_ok());
    }

    #[test]
    fn empty_env_filter_falls_back_to_settings() {
        assert!(filter_from(Some("  "), &TelemetrySettings::default()).is_ok());
        assert!(filter_from(Some(""), &configured("shelf=loud")).is_err());
    }

    #[test]
    fn accepts_default_filter() {
        assert!(filter_from(None, &TelemetrySettings::default()).is_ok());
    }
}
