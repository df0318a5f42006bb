use thiserror::Error;

#[derive(Error, Debug)]
pub enum FactCheckError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error: {0}")]
    Api(#[from] crate::client::ApiError),

    #[error("Other error: {0}")]
    Other(String),
}
