//! Event Hubs connection string parsing.
//!
//! A connection string is a `;`-separated list of `Key=Value` pairs:
//!
//! ```text
//! Endpoint=sb://<namespace>.servicebus.windows.net/;SharedAccessKeyName=<name>;SharedAccessKey=<key>[;EntityPath=<hub>]
//! ```
//!
//! Keys are matched case-insensitively. Values may themselves contain `=`
//! (base64 keys usually do), so each segment is split on its first `=` only.

use crate::error::ConnectionStringError;
use std::fmt;
use std::str::FromStr;

/// Port of the Kafka endpoint on an Event Hubs namespace.
pub const KAFKA_TLS_PORT: u16 = 9093;

/// Port of the Kafka endpoint on the local Event Hubs emulator.
pub const EMULATOR_KAFKA_PORT: u16 = 9092;

/// SASL username Event Hubs expects when authenticating with a connection string.
pub const SASL_CONNECTION_STRING_USERNAME: &str = "$ConnectionString";

/// A parsed Event Hubs connection string.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionString {
    raw: String,
    host: String,
    shared_access_key_name: String,
    entity_path: Option<String>,
    use_development_emulator: bool,
}

impl ConnectionString {
    pub fn parse(raw: &str) -> Result<Self, ConnectionStringError> {
        let mut endpoint = None;
        let mut key_name = None;
        let mut key = None;
        let mut entity_path = None;
        let mut use_development_emulator = false;

        for segment in raw.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            let (name, value) = segment
                .split_once('=')
                .ok_or_else(|| ConnectionStringError::MalformedSegment(segment.to_string()))?;
            let value = value.trim().to_string();

            match name.trim().to_ascii_lowercase().as_str() {
                "endpoint" => endpoint = Some(value),
                "sharedaccesskeyname" => key_name = Some(value),
                "sharedaccesskey" => key = Some(value),
                "entitypath" => entity_path = Some(value).filter(|v| !v.is_empty()),
                "usedevelopmentemulator" => {
                    use_development_emulator = value.eq_ignore_ascii_case("true")
                }
                other => tracing::debug!("Ignoring connection string key '{other}'"),
            }
        }

        let endpoint = endpoint
            .filter(|v| !v.is_empty())
            .ok_or(ConnectionStringError::MissingKey("Endpoint"))?;
        let shared_access_key_name = key_name
            .filter(|v| !v.is_empty())
            .ok_or(ConnectionStringError::MissingKey("SharedAccessKeyName"))?;
        // The key itself only travels inside the raw string used as the SASL password.
        key.filter(|v| !v.is_empty())
            .ok_or(ConnectionStringError::MissingKey("SharedAccessKey"))?;

        let host = parse_endpoint_host(&endpoint)?;

        Ok(Self {
            raw: raw.trim().to_string(),
            host,
            shared_access_key_name,
            entity_path,
            use_development_emulator,
        })
    }

    /// Namespace host name, e.g. `contoso.servicebus.windows.net`.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Event hub named inside the connection string, if any.
    pub fn entity_path(&self) -> Option<&str> {
        self.entity_path.as_deref()
    }

    pub fn use_development_emulator(&self) -> bool {
        self.use_development_emulator
    }

    /// The original connection string, used as the SASL password.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Check that an `EntityPath` in the connection string, when present,
    /// names the same event hub as `target_name`.
    pub fn check_target(&self, target_name: &str) -> Result<(), ConnectionStringError> {
        match &self.entity_path {
            Some(entity_path) if entity_path != target_name => {
                Err(ConnectionStringError::EntityPathMismatch {
                    entity_path: entity_path.clone(),
                    target_name: target_name.to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    /// `bootstrap.servers` value for the namespace's Kafka endpoint.
    pub fn kafka_bootstrap_servers(&self) -> String {
        let port = if self.use_development_emulator {
            EMULATOR_KAFKA_PORT
        } else {
            KAFKA_TLS_PORT
        };
        format!("{}:{port}", self.host)
    }

    /// `security.protocol` value for the namespace's Kafka endpoint.
    pub fn kafka_security_protocol(&self) -> &'static str {
        if self.use_development_emulator {
            "SASL_PLAINTEXT"
        } else {
            "SASL_SSL"
        }
    }
}

impl FromStr for ConnectionString {
    type Err = ConnectionStringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for ConnectionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionString")
            .field("host", &self.host)
            .field("shared_access_key_name", &self.shared_access_key_name)
            .field("entity_path", &self.entity_path)
            .field("use_development_emulator", &self.use_development_emulator)
            .finish()
    }
}

fn parse_endpoint_host(endpoint: &str) -> Result<String, ConnectionStringError> {
    let rest = endpoint
        .strip_prefix("sb://")
        .ok_or_else(|| ConnectionStringError::InvalidEndpoint(endpoint.to_string()))?;

    let authority = rest.split('/').next().unwrap_or_default();
    let host = authority.split(':').next().unwrap_or_default();

    if host.is_empty() {
        return Err(ConnectionStringError::InvalidEndpoint(endpoint.to_string()));
    }

    Ok(host.to_string())
}
