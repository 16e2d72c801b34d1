//! Access logging.

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::Request,
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;

/// Log client address, protocol, method and URI, then pass the request on.
pub async fn log_request(request: Request<Body>, next: Next) -> Response {
    let remote_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());

    tracing::info!(
        remote_addr = %remote_addr,
        version = ?request.version(),
        method = %request.method(),
        uri = %request.uri(),
        "Request"
    );

    next.run(request).await
}
