//! Conversion between API Gateway proxy events and the dispatcher's types.

use std::collections::HashMap;

use aws_lambda_events::{
    apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse},
    encodings::Body,
};
use axum::http::{header::CONTENT_TYPE, HeaderValue};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::Value;

use catalog_core::event::{Envelope, RouteRequest};

const METHOD_FIELD: &str = "httpMethod";

#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("Malformed API Gateway event: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Invalid base64 request body: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
    #[error("Request body is not valid UTF-8: {0}")]
    NonUtf8Body(#[from] std::string::FromUtf8Error),
}

/// Builds the route view of a raw proxy event.
///
/// An event with a missing or null `httpMethod` yields a view without a
/// method. Empty parameter maps are absent, and base64 bodies are decoded.
pub fn route_request(payload: Value) -> Result<RouteRequest, EventError> {
    if payload.get(METHOD_FIELD).is_none_or(Value::is_null) {
        return Ok(RouteRequest {
            path: text_field(&payload, "path"),
            resource: text_field(&payload, "resource"),
            ..RouteRequest::default()
        });
    }

    let event: ApiGatewayProxyRequest = serde_json::from_value(payload)?;

    let body = match event.body {
        Some(body) if event.is_base64_encoded => Some(String::from_utf8(STANDARD.decode(body)?)?),
        body => body,
    };

    let query_parameters = (!event.query_string_parameters.is_empty()).then(|| {
        event
            .query_string_parameters
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>()
    });

    Ok(RouteRequest {
        method: Some(event.http_method.as_str().to_string()),
        path: event.path,
        resource: event.resource,
        path_parameters: (!event.path_parameters.is_empty()).then_some(event.path_parameters),
        query_parameters,
        body,
    })
}

/// Frames an envelope as the proxy result API Gateway expects.
pub fn into_gateway_response(envelope: Envelope) -> ApiGatewayProxyResponse {
    let mut response = ApiGatewayProxyResponse::default();
    response.status_code = i64::from(envelope.status_code);
    response
        .headers
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response.body = Some(Body::Text(envelope.body.to_string()));
    response
}

fn text_field(payload: &Value, name: &str) -> Option<String> {
    payload.get(name).and_then(Value::as_str).map(str::to_string)
}
