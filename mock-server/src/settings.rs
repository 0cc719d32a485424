//! Server settings, read from defaults, an optional `mock-server.toml` and
//! `ROSTER_SERVER_*` environment variables (`ROSTER_SERVER_PORT`, ...).

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Directory holding `todos.json` / `users.json`; empty store if unset.
    pub seed_dir: Option<String>,
}

impl ServerSettings {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 4567)?
            .add_source(
                File::with_name("mock-server.toml")
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(Environment::with_prefix("ROSTER_SERVER"))
            .build()?
            .try_deserialize()
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
