use thiserror::Error;

/// Errors that can occur when selecting a route for an inbound event.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("Unsupported route {0}")]
    UnsupportedRoute(String),
    #[error("Missing path parameter: {0}")]
    MissingPathParameter(&'static str),
    #[error("Missing query string parameter: {0}")]
    MissingQueryParameter(&'static str),
    #[error("Request body is required")]
    MissingBody,
}
