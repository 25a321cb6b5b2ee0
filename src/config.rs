use serde::{Deserialize, Serialize};

use std::{env, fs, path::Path};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnershipPolicy {
    /// Notes are scoped to the authenticated caller who created them
    #[default]
    Enforced,
    /// Every caller sees and mutates every note, no credential required
    Disabled,
}

impl std::str::FromStr for OwnershipPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "enforced" => Ok(Self::Enforced),
            "disabled" => Ok(Self::Disabled),
            other => Err(format!(
                "unknown ownership policy '{other}', expected 'enforced' or 'disabled'"
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Falls back to the in-memory store when absent
    #[serde(default)]
    pub database_dsn: Option<String>,
    #[serde(default)]
    pub ownership: OwnershipPolicy,
    #[serde(default)]
    pub access_token_key: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    5000
}

impl Config {
    /// Parses a YAML document and checks the settings are usable together.
    ///
    /// # Errors
    ///
    /// Fails on malformed YAML or when ownership is enforced without an access token key.
    pub fn from_yaml(contents: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: Self = serde_yaml::from_str(contents)?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<(), String> {
        let has_key = self
            .access_token_key
            .as_deref()
            .is_some_and(|key| !key.is_empty());

        if self.ownership == OwnershipPolicy::Enforced && !has_key {
            return Err(
                "access_token_key is required when ownership is enforced".to_string(),
            );
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn load_from_env() -> Result<Config, Box<dyn std::error::Error>> {
    let host = env::var("HOST").unwrap_or_else(|_| default_host());

    let port = match env::var("PORT") {
        Ok(port) => port
            .parse::<u16>()
            .map_err(|e| format!("Failed to parse PORT: {e}"))?,
        Err(_) => default_port(),
    };

    let ownership = match env::var("OWNERSHIP") {
        Ok(policy) => policy.parse::<OwnershipPolicy>()?,
        Err(_) => OwnershipPolicy::default(),
    };

    let config = Config {
        host,
        port,
        database_dsn: env::var("PG_DSN").ok(),
        ownership,
        access_token_key: env::var("ACCESS_TOKEN_KEY").ok(),
    };
    config.check()?;

    Ok(config)
}

pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    // Retrieve env variable
    let config_path = env::var("NOTES_API_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());

    // Try env path
    if Path::new(&config_path).exists() {
        return Config::from_yaml(&fs::read_to_string(&config_path)?);
    }

    // Fallback to config.yaml
    if Path::new("config.yaml").exists() {
        tracing::warn!(
            "Config file '{}' not found, falling back to 'config.yaml'",
            config_path
        );
        return Config::from_yaml(&fs::read_to_string("config.yaml")?);
    }

    // Fallback to config.example.yaml
    if Path::new("config.example.yaml").exists() {
        tracing::warn!(
            "Config file '{}' and 'config.yaml' not found, falling back to 'config.example.yaml'\
             \n This file should not be used and should be replaced with actual data",
            config_path
        );
        return Config::from_yaml(&fs::read_to_string("config.example.yaml")?);
    }

    // Fallback to environment variables
    tracing::info!(
        "No config file found, attempting to load configuration from environment variables"
    );
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Successfully loaded configuration from environment variables");
            Ok(config)
        }
        Err(e) => Err(format!(
            "Config file not found and environment variables are incomplete. \
             Tried: '{config_path}', 'config.yaml', 'config.example.yaml', and environment variables. \
             Error: {e}"
        )
        .into()),
    }
}
