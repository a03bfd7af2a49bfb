use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenforgeError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Evolution produced no survivors: selection removed the entire generation")]
    NoSurvivors,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GenforgeError>;
