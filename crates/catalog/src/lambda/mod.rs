//! AWS Lambda runtime entry point.
//!
//! The payload is an API Gateway REST proxy event. It is taken as raw JSON so
//! that an event the typed model rejects still gets the failure envelope
//! instead of a runtime invocation error.

mod event;

use aws_lambda_events::apigw::ApiGatewayProxyResponse;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

use crate::{
    handlers::{failure_response, handle_request},
    state::AppState,
};

pub use event::{into_gateway_response, route_request, EventError};

/// Handles a single invocation.
///
/// Every failure, including an unreadable event, is rendered as the 500
/// envelope.
pub async fn handler(
    state: &AppState,
    event: LambdaEvent<Value>,
) -> Result<ApiGatewayProxyResponse, Error> {
    tracing::debug!(request_id = %event.context.request_id, "Received invocation");

    let envelope = match route_request(event.payload) {
        Ok(request) => handle_request(state, request).await,
        Err(err) => failure_response(&anyhow::Error::from(err), &state.options),
    };

    Ok(into_gateway_response(envelope))
}

/// Runs the Lambda event loop until the runtime shuts the process down.
pub async fn run(state: AppState) -> Result<(), Error> {
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let state = state.clone();
        async move { handler(&state, event).await }
    }))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_lambda_events::encodings::Body;
    use axum::http::header::CONTENT_TYPE;
    use catalog_core::event::{FAILURE_STATUS, SUCCESS_STATUS};
    use lambda_runtime::Context;
    use serde_json::json;

    async fn invoke(state: &AppState, payload: Value) -> (i64, Value) {
        let event = LambdaEvent::new(payload, Context::default());
        let response = handler(state, event).await.unwrap();

        assert_eq!(
            response
                .headers
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
        let body = match response.body {
            Some(Body::Text(text)) => serde_json::from_str(&text).unwrap(),
            other => panic!("unexpected body: {other:?}"),
        };
        (response.status_code, body)
    }

    #[tokio::test]
    async fn test_scan_event_returns_success_envelope() {
        let state = AppState::default();

        let (status, body) = invoke(&state, event::tests::gateway_event("GET")).await;

        assert_eq!(status, i64::from(SUCCESS_STATUS));
        assert_eq!(body["message"], "Successfully finished operation: \"GET\"");
        assert_eq!(body["body"], json!({}));
    }

    #[tokio::test]
    async fn test_event_without_method_returns_failure_envelope() {
        let state = AppState::default();

        for payload in [json!({}), json!({"httpMethod": null})] {
            let (status, body) = invoke(&state, payload).await;

            assert_eq!(status, i64::from(FAILURE_STATUS));
            assert_eq!(body["message"], "Failed to perform operation.");
            assert_eq!(body["errorMsg"], "Unsupported route <missing method>");
            assert!(body["errorStack"].is_string());
        }
    }

    #[tokio::test]
    async fn test_malformed_event_returns_failure_envelope() {
        let state = AppState::default();
        let mut payload = event::tests::gateway_event("GET");
        payload["pathParameters"] = json!("not a map");

        let (status, body) = invoke(&state, payload).await;

        assert_eq!(status, i64::from(FAILURE_STATUS));
        assert!(body["errorMsg"]
            .as_str()
            .unwrap()
            .starts_with("Malformed API Gateway event"));
    }

    #[tokio::test]
    async fn test_base64_create_is_stored() {
        let state = AppState::default();
        let mut payload = event::tests::gateway_event("POST");
        payload["body"] = json!("eyJuYW1lIjoiV2lkZ2V0In0="); // {"name":"Widget"}
        payload["isBase64Encoded"] = json!(true);

        let (status, body) = invoke(&state, payload).await;

        assert_eq!(status, i64::from(SUCCESS_STATUS));
        let id = body["body"]["id"].as_str().unwrap();
        let stored = state.repo.get_item(id).await.unwrap().unwrap();
        assert_eq!(stored.get("name"), Some(&json!("Widget")));
    }

    #[tokio::test]
    async fn test_invalid_base64_returns_failure_envelope() {
        let state = AppState::default();
        let mut payload = event::tests::gateway_event("POST");
        payload["body"] = json!("not base64!");
        payload["isBase64Encoded"] = json!(true);

        let (status, body) = invoke(&state, payload).await;

        assert_eq!(status, i64::from(FAILURE_STATUS));
        assert!(body["errorMsg"]
            .as_str()
            .unwrap()
            .starts_with("Invalid base64 request body"));
        assert!(state.repo.scan_items().await.unwrap().is_empty());
    }
}
