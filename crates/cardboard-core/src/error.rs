use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Mutation error: {0}")]
    Mutation(String),

    #[error("Trash failed for {} file(s)", failed.len())]
    TrashBatch { failed: Vec<String> },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for BoardError {
    fn from(err: serde_json::Error) -> Self {
        BoardError::Serialization(err.to_string())
    }
}
