//! Client settings: where the roster API lives.
//!
//! Loaded once by the host and injected into `ApiClient::new`; nothing in the
//! core reads the environment on its own.
//!
//! Sources, lowest precedence first:
//! 1. built-in defaults
//! 2. an optional `roster.toml` in the working directory
//! 3. `ROSTER_*` environment variables (`ROSTER_API_URL`)

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use crate::client::ApiClient;

pub const DEFAULT_API_URL: &str = "http://localhost:4567/api";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_url: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl ClientSettings {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("api_url", DEFAULT_API_URL)?
            .add_source(File::with_name("roster.toml").format(FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix("ROSTER"))
            .build()?
            .try_deserialize()
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.api_url)
    }
}
