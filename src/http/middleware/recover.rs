//! Panic recovery.
//!
//! # Responsibilities
//! - Turn a panic inside the chain into a 500 for that request only
//! - Log the panic payload; the panic hook in `observability::logging`
//!   reports location and backtrace
//! - Close the connection after the response
//!
//! # Design Decisions
//! - Uses `tower_http::catch_panic`, which also catches panics raised while
//!   polling the inner future
//! - The 500 carries the security headers, since the inner step never got
//!   the chance to add them

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;

use crate::http::middleware::secure_headers;
use crate::observability::logging::panic_message;

/// The recovery layer, outermost in the chain.
pub fn layer() -> CatchPanicLayer<fn(Box<dyn Any + Send + 'static>) -> Response> {
    CatchPanicLayer::custom(handle_panic as fn(Box<dyn Any + Send + 'static>) -> Response)
}

pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!(panic = %panic_message(&*payload), "Request handler panicked");

    let mut response = (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error\n").into_response();
    let headers = response.headers_mut();
    headers.insert(header::CONNECTION, HeaderValue::from_static("close"));
    secure_headers::apply(headers);
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_response() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[header::CONNECTION], "close");
        assert_eq!(response.headers()[header::X_FRAME_OPTIONS], "deny");

        let response = handle_panic(Box::new(String::from("formatted boom")));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = handle_panic(Box::new(42u8));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
