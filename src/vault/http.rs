//! HTTP API for a vault
//!
//! `GET /` returns the stored counter, `POST /` with a decimal body stores it
//! and echoes the stored value. Every other path is a client error.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;

use crate::common::{
    invalid_path, parse_counter, reject_oversized_body, request_tracing_middleware, Error,
    MAX_BODY_BYTES,
};
use crate::vault::counter::VaultCounter;

#[derive(Clone)]
pub struct VaultState {
    pub counter: Arc<VaultCounter>,
}

pub fn create_router(state: VaultState) -> Router {
    Router::new()
        .route("/", get(get_counter).post(set_counter))
        .fallback(invalid_path)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(middleware::map_response(reject_oversized_body))
        .layer(middleware::from_fn(request_tracing_middleware))
        .with_state(state)
}

async fn get_counter(State(state): State<VaultState>) -> impl IntoResponse {
    let value = state.counter.get().await;
    (StatusCode::OK, value.to_string())
}

async fn set_counter(
    State(state): State<VaultState>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<String, Error> {
    let body = body.map_err(|rejection| {
        tracing::warn!("Could not read vault POST body: {}", rejection);
        Error::InvalidBody
    })?;
    let value = parse_counter(&body).inspect_err(|_| {
        tracing::warn!("Could not parse vault POST body {:?}", String::from_utf8_lossy(&body));
    })?;
    let stored = state.counter.set(value).await;
    Ok(stored.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn app() -> (Router, Arc<VaultCounter>) {
        let counter = Arc::new(VaultCounter::new("test"));
        let router = create_router(VaultState {
            counter: counter.clone(),
        });
        (router, counter)
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_get_initial_value() {
        let (app, _) = app();
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "0");
    }

    #[tokio::test]
    async fn test_post_stores_and_echoes() {
        let (app, counter) = app();
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .body(Body::from("42"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "42");
        assert_eq!(counter.get().await, 42);
    }

    #[tokio::test]
    async fn test_post_rejects_malformed_body() {
        let (app, counter) = app();
        for body in ["", "abc", "-4"] {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/")
                        .body(Body::from(body))
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {:?}", body);
            assert_eq!(body_string(response).await, "Invalid or missing POST body");
        }
        assert_eq!(counter.get().await, 0);
    }

    #[tokio::test]
    async fn test_post_rejects_oversized_body() {
        let (app, counter) = app();
        let body = "1".repeat(2000);

        let streamed = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(body.clone()))
            .unwrap();
        let declared = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-length", body.len())
            .body(Body::from(body))
            .unwrap();

        for request in [streamed, declared] {
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(body_string(response).await, "Invalid or missing POST body");
        }
        assert_eq!(counter.get().await, 0);
    }

    #[tokio::test]
    async fn test_post_lower_value_still_applies() {
        let (app, counter) = app();
        counter.set(9).await;
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .body(Body::from("2"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(counter.get().await, 2);
    }

    #[tokio::test]
    async fn test_non_root_path_is_rejected() {
        let (app, counter) = app();
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/counter")
                    .body(Body::from("5"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_string(response).await, "Invalid path: /counter");
        assert_eq!(counter.get().await, 0);
    }
}
