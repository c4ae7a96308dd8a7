use thiserror::Error;

/// Error taxonomy for the Veris trust network core.
#[derive(Debug, Error)]
pub enum VerisError {
    /// Claim confidence outside the [0, 1] range.
    #[error("Invalid confidence: {value} is outside [0.0, 1.0]")]
    InvalidConfidence { value: f64 },

    /// Claim statement (or a required identity field) failed validation.
    #[error("Invalid statement: {0}")]
    InvalidStatement(String),

    /// Malformed query options (negative depth, inverted confidence range).
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Proof generation input could not be canonically serialized.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Query aborted by the caller's cancellation signal.
    #[error("Query cancelled")]
    Cancelled,

    /// Referenced identity absent where presence is required.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Lifecycle transition not permitted from the current state.
    #[error("Invalid transition: event '{event}' from state '{from}'")]
    InvalidTransition { from: String, event: String },

    /// Persistence contract failure (load or store).
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<serde_json::Error> for VerisError {
    fn from(e: serde_json::Error) -> Self {
        VerisError::Encoding(e.to_string())
    }
}
