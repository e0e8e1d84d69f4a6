use core_config::{
    ConfigError, FromEnv, env_optional, env_or_default, env_parse_or_default,
};

/// Qdrant REST connection configuration
#[derive(Debug, Clone, PartialEq)]
pub struct QdrantConfig {
    /// Host name, or a full `http(s)://` base URL
    pub host: String,
    pub port: u16,
    pub collection: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl QdrantConfig {
    pub fn new(host: impl Into<String>, port: u16, collection: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            collection: collection.into(),
            api_key: None,
            timeout_secs: 30,
        }
    }

    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.api_key = Some(api_key);
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Base URL of the REST API, without a trailing slash
    pub fn base_url(&self) -> String {
        let host = self.host.trim_end_matches('/');
        if host.starts_with("http://") || host.starts_with("https://") {
            format!("{}:{}", host, self.port)
        } else {
            format!("http://{}:{}", host, self.port)
        }
    }
}

impl Default for QdrantConfig {
    fn default() -> Self {
        Self::new("localhost", 6333, "items")
    }
}

impl FromEnv for QdrantConfig {
    /// QDRANT_HOST, QDRANT_PORT, QDRANT_COLLECTION, QDRANT_API_KEY, QDRANT_TIMEOUT_SECS
    fn from_env() -> Result<Self, ConfigError> {
        let collection = env_or_default("QDRANT_COLLECTION", "items");
        if collection.is_empty() {
            return Err(ConfigError::Invalid(
                "QDRANT_COLLECTION must not be empty".to_string(),
            ));
        }

        Ok(Self {
            host: env_or_default("QDRANT_HOST", "localhost"),
            port: env_parse_or_default("QDRANT_PORT", 6333)?,
            collection,
            api_key: env_optional("QDRANT_API_KEY"),
            timeout_secs: env_parse_or_default("QDRANT_TIMEOUT_SECS", 30)?,
        })
    }
}
