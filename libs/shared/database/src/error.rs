use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Duplicate record in {collection}")]
    Duplicate { collection: String },

    #[error("Invalid document for {collection}: {reason}")]
    InvalidDocument { collection: String, reason: String },

    #[error("Store API error ({status}): {message}")]
    Http { status: u16, message: String },

    #[error("Store request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store configuration error: {0}")]
    Configuration(String),
}

impl StoreError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, StoreError::Duplicate { .. })
    }
}
