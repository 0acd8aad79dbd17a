//! Server settings read from the environment

use std::env;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 5000;

/// Settings for the HTTP server itself; store, mail and speech settings
/// live with their adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Port to bind on all interfaces
    pub port: u16,
    /// Directory holding `index.html` and `profile.html`
    pub templates_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            templates_dir: PathBuf::from("templates"),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, std::num::ParseIntError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// A `PORT` that is set but not a number is an error, not a silent default
    pub fn from_lookup<F>(lookup: F) -> Result<Self, std::num::ParseIntError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(port) => port.trim().parse::<u16>()?,
            None => DEFAULT_PORT,
        };

        let templates_dir = lookup("TEMPLATES_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("templates"));

        Ok(Self {
            port,
            templates_dir,
        })
    }
}
