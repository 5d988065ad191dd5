use thiserror::Error;

#[derive(Debug, Error)]
pub enum HealthError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Critical field(s) missing: {}", fields.join(", "))]
    CriticalFieldMissing { fields: Vec<String> },

    #[error("Non-finite score in {context}")]
    NonFiniteScore { context: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Provider error for {ticker}: {reason}")]
    Provider { ticker: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for HealthError {
    fn from(e: serde_json::Error) -> Self {
        HealthError::SerializationError(e.to_string())
    }
}
