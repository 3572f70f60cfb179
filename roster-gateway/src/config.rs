//! Gateway configuration read from the environment.

use std::net::SocketAddr;

/// Port used when neither `ROSTER_LISTEN_ADDR` nor `PORT` is set.
pub const DEFAULT_PORT: u16 = 3000;

/// Default maximum request body size in bytes (100 KiB).
pub const DEFAULT_BODY_LIMIT: usize = 100 * 1024;

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// An environment variable held a value that could not be parsed.
    #[error("invalid value '{value}' for {var}: {reason}")]
    InvalidVar {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime settings for the HTTP gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct GatewayConfig {
    /// Socket address the server binds to.
    pub listen_addr: SocketAddr,
    /// Maximum accepted request body size in bytes.
    pub body_limit: usize,
}

impl GatewayConfig {
    /// Read configuration from the process environment.
    ///
    /// - `ROSTER_LISTEN_ADDR`: full socket address, overrides `PORT`
    /// - `PORT`: port on `0.0.0.0`, default `3000`
    /// - `ROSTER_BODY_LIMIT`: body size limit in bytes, default `102400`
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidVar`] if any variable is set but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidVar`] if any variable is set but malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr = match lookup("ROSTER_LISTEN_ADDR") {
            Some(addr) => parse_var("ROSTER_LISTEN_ADDR", addr)?,
            None => {
                let port = match lookup("PORT") {
                    Some(port) => parse_var("PORT", port)?,
                    None => DEFAULT_PORT,
                };
                SocketAddr::from(([0, 0, 0, 0], port))
            }
        };
        let body_limit = match lookup("ROSTER_BODY_LIMIT") {
            Some(limit) => parse_var("ROSTER_BODY_LIMIT", limit)?,
            None => DEFAULT_BODY_LIMIT,
        };
        Ok(Self { listen_addr, body_limit })
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

fn parse_var<T>(var: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidVar {
        var,
        reason: e.to_string(),
        value,
    })
}
