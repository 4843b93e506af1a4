use thiserror::Error;

/// Recoverable errors raised while building or driving a lake.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Malformed map: {0}")]
    MalformedMap(String),

    #[error("No valid map found after {attempts} attempts")]
    MapGenerationFailed { attempts: usize },

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
