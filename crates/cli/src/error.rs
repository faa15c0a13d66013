// crates/cli/src/error.rs
use eml_dater_engine::config::{ConfigBuilderError, WalkOptionsBuilderError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Engine(#[from] eml_dater_engine::error::EngineError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigBuilderError),

    #[error("Invalid walk options: {0}")]
    Walk(#[from] WalkOptionsBuilderError),
}

pub type Result<T> = std::result::Result<T, AppError>;
