use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Presence
    #[error("environment variable {name} is not defined")]
    Missing { name: &'static str },

    // Parsing
    #[error("environment variable {name} is not a valid URL: {source}")]
    InvalidUrl {
        name: &'static str,
        #[source]
        source: url::ParseError,
    },

    #[error("environment variable {name} must be an absolute http(s) URL, got '{value}'")]
    UnsupportedScheme { name: &'static str, value: String },

    #[error("environment variable {name} must be a positive integer, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },

    #[error("environment variable {name} must be a valid TCP port, got '{value}'")]
    InvalidPort { name: &'static str, value: String },
}

impl ConfigError {
    /// Name of the environment variable that caused the error.
    pub fn variable(&self) -> &'static str {
        match self {
            Self::Missing { name }
            | Self::InvalidUrl { name, .. }
            | Self::UnsupportedScheme { name, .. }
            | Self::InvalidNumber { name, .. }
            | Self::InvalidPort { name, .. } => name,
        }
    }
}
