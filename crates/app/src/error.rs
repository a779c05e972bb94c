use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("state error: {0}")]
    Engine(#[from] engine::EngineError),
    #[error("logging setup failed: {0}")]
    Logging(String),
}
