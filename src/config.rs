//! Startup configuration.
//!
//! Both settings come from the environment (or the equivalent flags). A
//! value that is absent, blank, or still carries the `REPLACE_WITH`
//! placeholder is rejected before any producer is created.

use clap::Parser;
use thiserror::Error;

/// Marker every placeholder value contains.
pub const PLACEHOLDER_MARKER: &str = "REPLACE_WITH";

pub const CONNECTION_STRING_PLACEHOLDER: &str = "<REPLACE_WITH_connection_string>";
pub const TARGET_NAME_PLACEHOLDER: &str = "<REPLACE_WITH_target_name>";

pub const CONNECTION_STRING_ENV: &str = "CONNECTION_STRING";
pub const TARGET_NAME_ENV: &str = "TARGET_NAME";

/// Raw settings as read from the environment.
#[derive(Parser, Clone, Debug)]
pub struct StreamOpts {
    /// Event Hubs connection string (Endpoint=sb://...;SharedAccessKeyName=...;SharedAccessKey=...)
    #[arg(
        long,
        env = "CONNECTION_STRING",
        default_value = CONNECTION_STRING_PLACEHOLDER,
        hide_env_values = true,
        hide_default_value = true
    )]
    pub connection_string: String,

    /// Name of the event hub that receives the transactions
    #[arg(long, env = "TARGET_NAME", default_value = TARGET_NAME_PLACEHOLDER)]
    pub target_name: String,
}

/// Configuration errors detected at startup.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set. Please set CONNECTION_STRING and TARGET_NAME first.")]
    Missing(&'static str),

    #[error("{0} still holds its placeholder value. Please set CONNECTION_STRING and TARGET_NAME first.")]
    Placeholder(&'static str),
}

/// Validated configuration passed into the stream.
#[derive(Clone, PartialEq, Eq)]
pub struct StreamConfig {
    pub connection_string: String,
    pub target_name: String,
}

impl StreamConfig {
    /// Validate both settings.
    pub fn new(connection_string: &str, target_name: &str) -> Result<Self, ConfigError> {
        let connection_string = validate(CONNECTION_STRING_ENV, connection_string)?;
        let target_name = validate(TARGET_NAME_ENV, target_name)?;

        Ok(Self {
            connection_string,
            target_name,
        })
    }
}

impl TryFrom<&StreamOpts> for StreamConfig {
    type Error = ConfigError;

    fn try_from(opts: &StreamOpts) -> Result<Self, Self::Error> {
        Self::new(&opts.connection_string, &opts.target_name)
    }
}

// Keep the credential out of debug logs.
impl std::fmt::Debug for StreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamConfig")
            .field("connection_string", &"<redacted>")
            .field("target_name", &self.target_name)
            .finish()
    }
}

/// Whether a value is still a `<REPLACE_WITH_...>` placeholder.
pub fn is_placeholder(value: &str) -> bool {
    value.contains(PLACEHOLDER_MARKER)
}

fn validate(name: &'static str, value: &str) -> Result<String, ConfigError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigError::Missing(name));
    }
    if is_placeholder(value) {
        return Err(ConfigError::Placeholder(name));
    }
    Ok(value.to_string())
}
