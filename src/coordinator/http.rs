//! HTTP API for the coordinator
//!
//! - `GET /`: consensus value across the vaults, or 500 with `-1`.
//! - `POST /` with a decimal body: write it to the vaults; 200 or 500 with
//!   `Sent updates to X/N vaults`, 400 for a bad body or a decreasing value.
//!
//! Every other path is a client error.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;

use crate::common::{
    invalid_path, parse_counter, reject_oversized_body, request_tracing_middleware, Error,
    MAX_BODY_BYTES,
};
use crate::coordinator::control::Control;
use crate::coordinator::vault_client::VaultClient;

pub struct CoordState<C> {
    pub control: Arc<Control<C>>,
}

impl<C> Clone for CoordState<C> {
    fn clone(&self) -> Self {
        Self {
            control: self.control.clone(),
        }
    }
}

pub fn create_router<C: VaultClient>(state: CoordState<C>) -> Router {
    Router::new()
        .route("/", get(get_value::<C>).post(post_value::<C>))
        .fallback(invalid_path)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(middleware::map_response(reject_oversized_body))
        .layer(middleware::from_fn(request_tracing_middleware))
        .with_state(state)
}

/// Reads the consensus value.
async fn get_value<C: VaultClient>(State(state): State<CoordState<C>>) -> Result<String, Error> {
    let value = state.control.read().await?;
    Ok(value.to_string())
}

/// Writes the posted value to the vaults.
async fn post_value<C: VaultClient>(
    State(state): State<CoordState<C>>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Response {
    let Ok(body) = body else {
        return Error::InvalidBody.into_response();
    };
    let value = match parse_counter(&body) {
        Ok(value) => value,
        Err(e) => return e.into_response(),
    };
    match state.control.write(value).await {
        Ok(report) => (StatusCode::OK, report.to_string()).into_response(),
        Err(e) => e.into_response(),
    }
}
