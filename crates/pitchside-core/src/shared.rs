//! Shared configuration for the Pitchside service.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Global application configuration (gateway + knowledge source). Load from TOML or env.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Application identity shown in logs and the status endpoint.
    pub app_name: String,
    /// HTTP port for the gateway.
    pub port: u16,
    /// Path to the question/answer JSON document loaded at startup.
    pub knowledge_path: String,

    /// If true, the gateway serves the static chat widget from `frontend/`. (Config alias: `ui_enabled`)
    #[serde(default, alias = "ui_enabled")]
    pub frontend_enabled: bool,
    /// URL the keep-alive pinger hits on a timer. Pinger is disabled when unset.
    #[serde(default)]
    pub keepalive_url: Option<String>,
    /// Seconds between keep-alive pings.
    #[serde(default = "default_keepalive_interval_secs")]
    pub keepalive_interval_secs: u64,
}

fn default_keepalive_interval_secs() -> u64 {
    600
}

impl CoreConfig {
    /// Load config from file and environment. Precedence: env `PITCHSIDE_CONFIG` path > `config/gateway.toml` > defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("PITCHSIDE_CONFIG").unwrap_or_else(|_| "config/gateway".to_string());
        let builder = config::Config::builder()
            .set_default("app_name", "Pitchside")?
            .set_default("port", 8001_i64)?
            .set_default("knowledge_path", crate::DEFAULT_KNOWLEDGE_PATH)?
            .set_default("frontend_enabled", false)?
            .set_default("keepalive_interval_secs", 600_i64)?;

        let path = Path::new(&config_path);
        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        let built = builder
            .add_source(config::Environment::with_prefix("PITCHSIDE").separator("__"))
            .build()?;

        built.try_deserialize()
    }
}
