//! Logging initialization.

use tracing::*;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{
    fmt::layer,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter, Layer,
};

use super::types::LoggerConfig;

/// Initializes the logging subsystem with the provided config.
///
/// Fails if a global subscriber was already installed.
pub fn init(config: LoggerConfig) -> Result<(), TryInitError> {
    // Defaults to INFO, still overridable via RUST_LOG.
    let filt = || {
        EnvFilter::builder()
            .with_default_directive(Level::INFO.into())
            .from_env_lossy()
    };

    // Configure stdout logging with JSON or compact format
    let stdout_sub = if config.stdout_config.json_format {
        layer()
            .json()
            .with_span_events(config.stdout_config.fmt_span.clone())
            .with_filter(filt())
            .boxed()
    } else {
        layer()
            .compact()
            .with_span_events(config.stdout_config.fmt_span.clone())
            .with_filter(filt())
            .boxed()
    };

    // Build optional file logging layer
    let file_layer = config.file_logging_config.as_ref().map(|file_config| {
        let file_appender = RollingFileAppender::new(
            file_config.rotation.clone(),
            &file_config.directory,
            &file_config.file_name_prefix,
        );

        if file_config.json_format {
            layer()
                .json()
                .with_writer(file_appender)
                .with_ansi(false) // No color codes in files
                .with_filter(filt())
                .boxed()
        } else {
            layer()
                .compact()
                .with_writer(file_appender)
                .with_ansi(false) // No color codes in files
                .with_filter(filt())
                .boxed()
        }
    });

    tracing_subscriber::registry()
        .with(stdout_sub)
        .with(file_layer)
        .try_init()?;

    info!(
        service_name = %config.service_name,
        file_logging = %config.file_logging_config.is_some(),
        "logging initialized"
    );

    Ok(())
}
