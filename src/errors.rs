use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("at least one character category must be selected")]
    InvalidComposition,

    #[error("length must be at least the number of selected categories ({selected}), got {length}")]
    InsufficientLength { length: usize, selected: usize },

    #[error("length must be at most {max}, got {length}")]
    TooLong { length: usize, max: usize },

    #[error("length must be at least {min}, got {length}")]
    BelowMinimum { length: usize, min: usize },

    #[error("count must be at least 1")]
    ZeroCount,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("invalid config file {path}: {source}")]
    Json { path: PathBuf, source: serde_json::Error },

    #[error("min_length must be at least 1")]
    InvalidMinimum,
}

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("operation cancelled by user")]
    Cancelled,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("could not copy to clipboard: {0}")]
    Clipboard(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl AppError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AppError::Prompt(PromptError::Cancelled))
    }
}
