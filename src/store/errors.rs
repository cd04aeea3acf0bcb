use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}
