use thiserror::Error;

/// Error type for typed property access.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The key is not present in any loaded source.
    #[error("property '{0}' not found")]
    Missing(String),

    /// The key is present but its value does not parse as the requested type.
    #[error("property '{key}' value '{value}' does not parse as {target}: {details}")]
    Parse { key: String, value: String, target: &'static str, details: String },
}
