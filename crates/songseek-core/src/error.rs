use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("payload decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
