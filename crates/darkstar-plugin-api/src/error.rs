use thiserror::Error;

/// Plugin error types
///
/// Remote failures are never errors: they are captured as a
/// `ProviderOutcome`. These cover wiring and input problems only.
#[derive(Error, Debug)]
pub enum PluginError {
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type PluginResult<T> = Result<T, PluginError>;
