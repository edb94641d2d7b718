//! Upstream forwarding.
//!
//! # Responsibilities
//! - Rewrite the inbound request to the resolved target URL
//! - Strip hop-by-hop headers in both directions
//! - Stream request and response bodies without buffering
//!
//! # Design Decisions
//! - Single attempt: failures are reported, never retried
//! - The inbound Host header is dropped so the client sets the backend's

use axum::body::Body;
use axum::http::{header, uri::InvalidUri, HeaderMap, Request, Response, Uri, Version};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use thiserror::Error;

const HOP_BY_HOP: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-connection",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("invalid target URL {target}: {error}")]
    InvalidTarget {
        target: String,
        #[source]
        error: InvalidUri,
    },

    #[error("upstream request failed: {0}")]
    Upstream(#[from] hyper_util::client::legacy::Error),
}

/// Proxies requests to backend servers over HTTP.
#[derive(Clone, Debug)]
pub struct HttpForwarder {
    client: Client<HttpConnector, Body>,
}

impl HttpForwarder {
    pub fn new() -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self { client }
    }

    /// Send `request` to `target` and return the backend's response.
    pub async fn forward(
        &self,
        target: &str,
        request: Request<Body>,
    ) -> Result<Response<Body>, ForwardError> {
        let uri: Uri = target.parse().map_err(|error| ForwardError::InvalidTarget {
            target: target.to_string(),
            error,
        })?;

        let (mut parts, body) = request.into_parts();
        parts.uri = uri;
        parts.version = Version::HTTP_11;
        parts.headers.remove(header::HOST);
        strip_hop_by_hop(&mut parts.headers);

        let response = self.client.request(Request::from_parts(parts, body)).await?;

        let (mut parts, body) = response.into_parts();
        strip_hop_by_hop(&mut parts.headers);
        Ok(Response::from_parts(parts, Body::new(body)))
    }
}

impl Default for HttpForwarder {
    fn default() -> Self {
        Self::new()
    }
}

fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in HOP_BY_HOP {
        headers.remove(*name);
    }
}
