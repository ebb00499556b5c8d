//! Local HTTP front end.
//!
//! Maps `/product` and `/product/{id}` onto the same request view the Lambda
//! adapter builds, so both surfaces share one dispatcher.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::Context;
use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use catalog_core::event::{Envelope, RouteRequest};
use catalog_core::item::ID_ATTRIBUTE;

use crate::{
    handlers::{failure_response, handle_request},
    state::AppState,
};

type QueryParameters = Result<Query<HashMap<String, String>>, QueryRejection>;

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/product", any(product_collection))
        .route("/product/{id}", any(product_item))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}

async fn product_collection(
    State(state): State<AppState>,
    method: Method,
    query: QueryParameters,
    body: Bytes,
) -> Response {
    respond(&state, to_route_request(method, "/product", None, query, body)).await
}

async fn product_item(
    State(state): State<AppState>,
    method: Method,
    Path(id): Path<String>,
    query: QueryParameters,
    body: Bytes,
) -> Response {
    let path = format!("/product/{id}");
    respond(&state, to_route_request(method, &path, Some(id), query, body)).await
}

/// Dispatches a request, or renders the failure envelope when the HTTP
/// request could not be read.
async fn respond(state: &AppState, request: anyhow::Result<RouteRequest>) -> Response {
    let envelope = match request {
        Ok(request) => handle_request(state, request).await,
        Err(err) => failure_response(&err, &state.options),
    };
    into_http_response(envelope)
}

/// Builds the request view API Gateway would produce for this request.
///
/// An empty query string and an empty body are absent, not empty.
fn to_route_request(
    method: Method,
    path: &str,
    id: Option<String>,
    query: QueryParameters,
    body: Bytes,
) -> anyhow::Result<RouteRequest> {
    let Query(query) = query.context("Invalid query string")?;
    let body = String::from_utf8(body.to_vec()).context("Request body is not valid UTF-8")?;

    let resource = if id.is_some() {
        "/product/{id}"
    } else {
        "/product"
    };

    Ok(RouteRequest {
        method: Some(method.as_str().to_string()),
        path: Some(path.to_string()),
        resource: Some(resource.to_string()),
        path_parameters: id.map(|id| HashMap::from([(ID_ATTRIBUTE.to_string(), id)])),
        query_parameters: (!query.is_empty()).then_some(query),
        body: (!body.is_empty()).then_some(body),
    })
}

fn into_http_response(envelope: Envelope) -> Response {
    let status =
        StatusCode::from_u16(envelope.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (status, Json(envelope.body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, Uri},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_scan_empty_table() {
        let app = create_app(AppState::default());

        let (status, body) = send(
            &app,
            Request::builder().uri("/product").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["body"], json!({}));
    }

    #[tokio::test]
    async fn test_create_get_and_query() {
        let app = create_app(AppState::default());

        let (status, body) = send(
            &app,
            Request::builder()
                .method("POST")
                .uri("/product")
                .header("Content-Type", "application/json")
                .body(Body::from(r#"{"name":"Widget","category":"tools"}"#))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Successfully finished operation: \"POST\"");
        let id = body["body"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            Request::builder()
                .uri(format!("/product/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["body"]["name"], "Widget");

        let (_, body) = send(
            &app,
            Request::builder()
                .uri(format!("/product/{id}?category=tools"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(body["body"].as_array().unwrap().len(), 1);

        let (_, body) = send(
            &app,
            Request::builder()
                .uri(format!("/product/{id}?category=nonexistent"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(body["body"], json!([]));
    }

    #[tokio::test]
    async fn test_unsupported_method_returns_failure_envelope() {
        let app = create_app(AppState::default());

        let (status, body) = send(
            &app,
            Request::builder()
                .method("PATCH")
                .uri("/product/abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["errorMsg"], "Unsupported route PATCH");
    }

    #[tokio::test]
    async fn test_non_utf8_body_returns_failure_envelope() {
        let state = AppState::default();
        let app = create_app(state.clone());

        let (status, body) = send(
            &app,
            Request::builder()
                .method("POST")
                .uri("/product")
                .body(Body::from(vec![0xff, 0xfe, 0xfd]))
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Failed to perform operation.");
        assert_eq!(body["errorMsg"], "Request body is not valid UTF-8");
        assert!(state.repo.scan_items().await.unwrap().is_empty());
    }

    #[test]
    fn test_query_rejection_becomes_error() {
        let uri: Uri = "/product?limit=ten".parse().unwrap();
        let rejection = Query::<HashMap<String, u32>>::try_from_uri(&uri).unwrap_err();

        let err = to_route_request(Method::GET, "/product", None, Err(rejection), Bytes::new())
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid query string");
    }

    #[test]
    fn test_empty_query_and_body_are_absent() {
        let request = to_route_request(
            Method::GET,
            "/product",
            None,
            Ok(Query(HashMap::new())),
            Bytes::new(),
        )
        .unwrap();

        assert!(request.path_parameters.is_none());
        assert!(request.query_parameters.is_none());
        assert!(request.body.is_none());
        assert_eq!(request.resource.as_deref(), Some("/product"));
    }
}
