use thiserror::Error;

#[derive(Debug, Error)]
pub enum SelfplayError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to (de)serialize report: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse match config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Config(#[from] checkers_core::ConfigError),
}
