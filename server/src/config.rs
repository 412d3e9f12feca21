use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Absence disables caching; every lookup then goes to the model.
    #[serde(default)]
    pub redis_url: Option<String>,

    /// Ordered credential pool; empty disables all model calls.
    #[serde(default)]
    pub api_keys: Vec<String>,

    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_primary_model")]
    pub primary_model: String,

    #[serde(default = "default_fallback_model")]
    pub fallback_model: String,

    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_api_base() -> String {
    suggest::gemini::DEFAULT_API_BASE.to_string()
}

fn default_primary_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_fallback_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_cache_ttl_secs() -> u64 {
    3600
}

/// Splits a comma-separated credential list, dropping blank entries.
pub fn parse_key_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(String::from)
        .collect()
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("AUTOFILL_BIND_ADDRESS") {
            config.bind_address = addr;
        }
        if let Ok(port) = std::env::var("AUTOFILL_PORT") {
            if let Ok(p) = port.parse() {
                config.port = p;
            }
        }
        if let Ok(url) = std::env::var("REDIS_URL") {
            if !url.is_empty() {
                config.redis_url = Some(url);
            }
        }
        if let Ok(keys) = std::env::var("GEMINI_API_KEYS") {
            config.api_keys = parse_key_list(&keys);
        }
        if let Ok(base) = std::env::var("GEMINI_API_BASE") {
            config.api_base = base;
        }
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            config.primary_model = model;
        }
        if let Ok(model) = std::env::var("GEMINI_FALLBACK_MODEL") {
            config.fallback_model = model;
        }
        if let Ok(ttl) = std::env::var("AUTOFILL_CACHE_TTL_SECS") {
            if let Ok(t) = ttl.parse() {
                config.cache_ttl_secs = t;
            }
        }

        Ok(config)
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.bind_address, self.port).parse()?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            redis_url: None,
            api_keys: Vec::new(),
            api_base: default_api_base(),
            primary_model: default_primary_model(),
            fallback_model: default_fallback_model(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}
