use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::CacheConfig;
use crate::weather::DEFAULT_API_URL;

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub server: Server,
    pub cache: CacheSettings,
    pub weather: WeatherSettings,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    pub default_ttl_minutes: u64,
    pub scavenge_delay_secs: u64,
    pub memory_pressure_ratio: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSettings {
    pub api_url: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: Server {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            cache: CacheSettings {
                default_ttl_minutes: 15,
                scavenge_delay_secs: 5,
                memory_pressure_ratio: 0.10,
            },
            weather: WeatherSettings {
                api_url: DEFAULT_API_URL.to_string(),
                api_key: String::new(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "json".to_string(),
            },
        }
    }
}

impl ServerConfig {
    /// Load configuration from YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: ServerConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Convert to CacheConfig
    pub fn to_cache_config(&self) -> CacheConfig {
        CacheConfig {
            default_ttl_minutes: self.cache.default_ttl_minutes,
            scavenge_delay_secs: self.cache.scavenge_delay_secs,
            memory_pressure_ratio: self.cache.memory_pressure_ratio,
        }
    }

    /// Get server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
