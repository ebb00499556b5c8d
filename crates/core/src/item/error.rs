use thiserror::Error;

/// Errors that can occur when turning a request body into an [`Item`](super::Item).
#[derive(Debug, Error)]
pub enum ItemError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("Expected a JSON object, found {0}")]
    NotAnObject(&'static str),
}
