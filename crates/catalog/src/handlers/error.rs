use catalog_core::event::{failure, Envelope, ResponseOptions};

/// Renders an operation error as the 500 envelope.
///
/// `errorMsg` is the top-level message; `errorStack` is the debug rendering,
/// which for `anyhow` includes every source in the chain.
pub fn failure_response(err: &anyhow::Error, options: &ResponseOptions) -> Envelope {
    tracing::error!(error = ?err, "Operation failed");
    failure(&err.to_string(), &format!("{err:?}"), options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use catalog_core::event::FAILURE_STATUS;

    #[test]
    fn test_failure_carries_message_and_chain() {
        let err = Err::<(), _>(std::io::Error::other("socket closed"))
            .context("Failed to scan table")
            .unwrap_err();

        let response = failure_response(&err, &ResponseOptions::default());
        let body = &response.body;

        assert_eq!(response.status_code, FAILURE_STATUS);
        assert_eq!(body["message"], "Failed to perform operation.");
        assert_eq!(body["errorMsg"], "Failed to scan table");
        let stack = body["errorStack"].as_str().unwrap();
        assert!(stack.contains("Failed to scan table"));
        assert!(stack.contains("socket closed"));
    }

    #[test]
    fn test_failure_redacted() {
        let err = anyhow::anyhow!("table products-prod not found");
        let options = ResponseOptions {
            expose_error_detail: false,
            ..ResponseOptions::default()
        };

        let body = failure_response(&err, &options).body;

        assert_eq!(body["errorMsg"], "Internal error");
        assert!(body.get("errorStack").is_none());
    }
}
