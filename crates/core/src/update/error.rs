use thiserror::Error;

/// Errors that can occur when building an update expression.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UpdateError {
    #[error("Update body must contain at least one attribute")]
    Empty,
    #[error("Attribute '{0}' cannot be updated")]
    ImmutableAttribute(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_error_display() {
        assert_eq!(
            UpdateError::Empty.to_string(),
            "Update body must contain at least one attribute"
        );
        assert_eq!(
            UpdateError::ImmutableAttribute("id").to_string(),
            "Attribute 'id' cannot be updated"
        );
    }
}
