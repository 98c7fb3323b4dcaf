//! Logging subsystem.

pub mod manager;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export main types and functions
pub use manager::init;
pub use types::{FileLoggingConfig, LoggerConfig, StdoutConfig};

// Re-export tracing-appender types for convenience
pub use tracing_appender::rolling::Rotation;

/// Environment variable holding the label appended to the service name.
pub const SVC_LABEL_ENV: &str = "OVERSEER_SVC_LABEL";

/// Formats a service name with an optional label suffix.
pub fn format_service_name(base: &str, label: Option<&str>) -> String {
    match label {
        Some(label) => format!("{base}%{label}"),
        None => base.to_owned(),
    }
}
