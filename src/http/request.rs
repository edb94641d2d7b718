//! Request inspection.
//!
//! # Responsibilities
//! - Extract the forwarded suffix from the inbound request target
//!
//! # Design Decisions
//! - The suffix is taken from the raw path, so percent-encoding is kept
//!   exactly as the client sent it
//! - The query string travels with the suffix

use axum::http::Uri;

/// Number of fixed segments (`/{path}/{version}/{service}`) before the suffix.
const ROUTE_SEGMENTS: usize = 3;

/// Everything after the three route segments, plus the query string.
pub fn forward_suffix(uri: &Uri) -> String {
    let path = uri.path().strip_prefix('/').unwrap_or(uri.path());
    let rest = path.splitn(ROUTE_SEGMENTS + 1, '/').nth(ROUTE_SEGMENTS).unwrap_or("");

    match uri.query() {
        Some(query) => format!("{}?{}", rest, query),
        None => rest.to_string(),
    }
}
