//! Error responses.
//!
//! Route failures map to 404 (missing or malformed route) or 500 (empty pool,
//! upstream failure). Upstream failures carry the forwarder's error text.

use axum::response::{IntoResponse, Response};

use crate::routing::RouteError;

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            RouteError::NotFound(_) => "Not found".to_string(),
            RouteError::InvalidDescriptor(_) => "Invalid service configuration".to_string(),
            RouteError::PoolMisconfigured(_) => "Internal server error".to_string(),
            RouteError::Forwarding(detail) => detail,
        };
        (status, body).into_response()
    }
}
