//! Tracing initialisation.
//!
//! Uses [`ObservabilityConfig`] for KASSIST_QUIET, KASSIST_LOG_LEVEL and KASSIST_LOG_JSON.

use tracing_subscriber::{prelude::*, EnvFilter};

use crate::config::ObservabilityConfig;

/// Tracing initialisation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracingMode {
    /// Configured level as-is.
    Default,
    /// Interactive chat: mute loop-internal INFO so turns stay readable.
    Chat,
}

/// Build the filter directive string for a mode.
pub fn filter_directive(cfg: &ObservabilityConfig, mode: TracingMode) -> String {
    let mut level = if cfg.quiet {
        "warn".to_string()
    } else {
        cfg.log_level.clone()
    };
    if mode == TracingMode::Chat {
        level.push_str(",kassist_agent::conversation=warn");
    }
    level
}

/// Initialise the global subscriber. `RUST_LOG` wins over the configured level.
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing(mode: TracingMode) {
    let cfg = ObservabilityConfig::from_env();
    let directive = filter_directive(cfg, mode);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directive));

    let _ = if cfg.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive_modes() {
        let cfg = ObservabilityConfig {
            quiet: false,
            log_level: "kassist=debug".to_string(),
            log_json: false,
        };
        assert_eq!(filter_directive(&cfg, TracingMode::Default), "kassist=debug");
        assert_eq!(
            filter_directive(&cfg, TracingMode::Chat),
            "kassist=debug,kassist_agent::conversation=warn"
        );

        let quiet = ObservabilityConfig { quiet: true, ..cfg };
        assert_eq!(filter_directive(&quiet, TracingMode::Default), "warn");
    }
}
