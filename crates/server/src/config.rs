use std::env;
use std::path::PathBuf;

/// Artifact path used when `MODEL_PATH` is unset.
pub const DEFAULT_MODEL_PATH: &str = "chess_model.pkl";

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub model_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup. Unparseable values fall back to defaults.
    pub fn from_source(get: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: get("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: get("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            model_path: get("MODEL_PATH")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH)),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
