use serde::{Deserialize, Serialize};

use std::{env, fs, path::Path};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// PostgreSQL connection string. Without one, notes are kept in memory.
    #[serde(default)]
    pub database_dsn: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_dsn: None,
        }
    }
}

impl Config {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Applies `HOST`, `PORT` and `PG_DSN` on top of `config`. Variables that are
/// set always win over values read from a file.
fn apply_env(
    mut config: Config,
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<Config, Box<dyn std::error::Error>> {
    if let Some(host) = lookup("HOST").filter(|host| !host.is_empty()) {
        config.host = host;
    }

    if let Some(port) = lookup("PORT").filter(|port| !port.is_empty()) {
        config.port = port
            .parse::<u16>()
            .map_err(|e| format!("Failed to parse PORT: {e}"))?;
    }

    if let Some(dsn) = lookup("PG_DSN").filter(|dsn| !dsn.is_empty()) {
        config.database_dsn = Some(dsn);
    }

    Ok(config)
}

fn load_from_file(path: &str) -> Result<Config, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    serde_yaml::from_str(&contents).map_err(Into::into)
}

fn load_base(config_path: &str) -> Result<Config, Box<dyn std::error::Error>> {
    // Try env path
    if Path::new(config_path).exists() {
        return load_from_file(config_path);
    }

    // Fallback to config.yaml
    if Path::new("config.yaml").exists() {
        tracing::warn!(
            "Config file '{}' not found, falling back to 'config.yaml'",
            config_path
        );
        return load_from_file("config.yaml");
    }

    // Fallback to config.example.yaml
    if Path::new("config.example.yaml").exists() {
        tracing::warn!(
            "Config file '{}' and 'config.yaml' not found, falling back to 'config.example.yaml'\
             \n This file should not be used and should be replaced with actual data",
            config_path
        );
        return load_from_file("config.example.yaml");
    }

    tracing::info!("No config file found, loading configuration from environment variables");
    Ok(Config::default())
}

fn load_config_with(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Config, Box<dyn std::error::Error>> {
    // Retrieve env variable
    let config_path = lookup("NOTES_API_CONFIG").unwrap_or_else(|| "config.yaml".to_string());

    let config = load_base(&config_path)?;
    apply_env(config, &lookup)
}

pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    load_config_with(|key| env::var(key).ok())
}
