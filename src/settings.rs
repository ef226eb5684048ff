use std::env;

use anyhow::Context;
use serde::Deserialize;
use tracing::info;

#[derive(Clone, Deserialize, Debug)]
pub struct Config {
    #[serde(default = "default_env")]
    pub env: String, // file / server
    pub host: String,
    pub port: u16,
    pub prefix: Option<String>,
    pub database_url: String,
    pub redis_url: String,
    #[serde(default = "default_search_index")]
    pub search_index: String,
    #[serde(default = "default_event_topic")]
    pub event_topic: String,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

fn default_env() -> String {
    "file".to_string()
}

fn default_search_index() -> String {
    "permissions".to_string()
}

fn default_event_topic() -> String {
    "permissions-operations".to_string()
}

fn default_log_dir() -> String {
    "./logs".to_string()
}

pub fn get_config() -> anyhow::Result<Config> {
    let env_var = env::var("env").unwrap_or(default_env());
    if env_var == "file" {
        info!("using .env file as environment variable");
        let _ = dotenvy::dotenv();
    } else {
        info!("using server environment as environment variable");
    }
    envy::from_env::<Config>().context("read config from environment")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let vars = vec![
            ("HOST".to_string(), "127.0.0.1".to_string()),
            ("PORT".to_string(), "5057".to_string()),
            (
                "DATABASE_URL".to_string(),
                "postgres://localhost/permissions".to_string(),
            ),
            ("REDIS_URL".to_string(), "redis://127.0.0.1".to_string()),
        ];
        let config = envy::from_iter::<_, Config>(vars).unwrap();
        assert_eq!(config.env, "file");
        assert_eq!(config.port, 5057);
        assert_eq!(config.prefix, None);
        assert_eq!(config.search_index, "permissions");
        assert_eq!(config.event_topic, "permissions-operations");
        assert_eq!(config.log_dir, "./logs");
    }

    #[test]
    fn test_config_missing_database_url() {
        let vars = vec![
            ("HOST".to_string(), "127.0.0.1".to_string()),
            ("PORT".to_string(), "5057".to_string()),
            ("REDIS_URL".to_string(), "redis://127.0.0.1".to_string()),
        ];
        assert!(envy::from_iter::<_, Config>(vars).is_err());
    }
}
