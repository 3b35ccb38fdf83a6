use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache key encoding failed: {0}")]
    KeyEncoding(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CacheError>;
