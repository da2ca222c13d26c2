use std::path::PathBuf;
use std::time::Duration;

use eyre::{eyre, Result};
use figment::{
    providers::{Env, Format, Json, Toml, Yaml},
    Figment,
};
use onetime_moka::MokaConfig;
use onetime_redis::RedisConfig;
use onetime_store::MAX_TTL;
use serde::Deserialize;

#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub nonce: NonceConfig,
    pub cache: Cache,
    pub logging: LoggingConfig,
}

#[derive(Clone, Deserialize)]
pub struct NonceConfig {
    /// TTL of newly created nonces, clamped to the backend's maximum.
    #[serde(deserialize_with = "onetime_store::duration::deserialize")]
    pub expires_in: Duration,
}

impl Default for NonceConfig {
    fn default() -> Self {
        Self {
            expires_in: MAX_TTL,
        }
    }
}

#[derive(Clone, Default, Deserialize)]
pub struct Cache {
    pub provider: Option<CacheProvider>,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheProvider {
    Redis(RedisConfig),
    Moka(MokaConfig),
}

#[derive(Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_dir = dirs::config_dir().ok_or(eyre!("Config directory not found"))?;

        let figment = Figment::new()
            .merge(Toml::file(config_dir.join("onetime.toml")))
            .merge(Json::file(config_dir.join("onetime.json")))
            .merge(Yaml::file(config_dir.join("onetime.yaml")));

        Self::extract(figment, path)
    }

    fn extract(mut figment: Figment, path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let extension = path
                .extension()
                .and_then(|ext| ext.to_str())
                .ok_or_else(|| eyre!("Invalid file extension"))?;

            match extension {
                "toml" => figment = figment.merge(Toml::file(path)),
                "json" => figment = figment.merge(Json::file(path)),
                "yaml" | "yml" => figment = figment.merge(Yaml::file(path)),
                _ => {
                    return Err(eyre!(
                        "Unsupported config file format. Supported formats are: toml, json, yaml"
                    ))
                }
            }
        }

        figment = figment.merge(Env::prefixed("ONETIME_").split("__"));

        let config: Config = figment.extract()?;

        Ok(config)
    }
}
