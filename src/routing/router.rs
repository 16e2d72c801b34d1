//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store the fixed route table
//! - Pick the matching route for a request and invoke its handler
//! - Answer unmatched requests with 404
//!
//! # Design Decisions
//! - Immutable after construction (shared via `Arc`, no locks)
//! - O(n) scan, longest pattern wins (typical route counts are tiny)
//! - Implements `tower::Service` so middleware layers can wrap it

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
};
use futures_util::future::BoxFuture;
use std::convert::Infallible;
use std::future::Future;
use std::sync::Arc;
use std::task::{Context, Poll};

use crate::routing::matcher::{MatchRule, Matcher};

/// A type-erased async request handler.
pub type Handler = Arc<dyn Fn(Request<Body>) -> BoxFuture<'static, Response> + Send + Sync>;

/// Wrap an async function or closure into a [`Handler`].
pub fn handler_fn<F, Fut, R>(f: F) -> Handler
where
    F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse,
{
    Arc::new(move |req: Request<Body>| -> BoxFuture<'static, Response> {
        let fut = f(req);
        Box::pin(async move { fut.await.into_response() })
    })
}

/// A compiled route: match rule plus handler.
pub struct Route {
    matcher: Box<dyn Matcher>,
    handler: Handler,
}

impl Route {
    pub fn new(rule: MatchRule, handler: Handler) -> Self {
        Self {
            matcher: rule.into_matcher(),
            handler,
        }
    }

    /// Route matching exactly `path`.
    pub fn exact(path: impl Into<String>, handler: Handler) -> Self {
        Self::new(MatchRule::Exact(path.into()), handler)
    }

    /// Route matching everything below `prefix`.
    pub fn prefix(prefix: impl Into<String>, handler: Handler) -> Self {
        Self::new(MatchRule::Prefix(prefix.into()), handler)
    }

    pub fn pattern(&self) -> &str {
        self.matcher.pattern()
    }
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route").field("matcher", &self.matcher).finish()
    }
}

/// The application router.
#[derive(Clone, Debug)]
pub struct Router {
    routes: Arc<Vec<Route>>,
}

impl Router {
    /// Freeze a route table.
    pub fn from_routes(routes: Vec<Route>) -> Self {
        Self {
            routes: Arc::new(routes),
        }
    }

    /// Find the most specific route for a path.
    pub fn match_path(&self, path: &str) -> Option<&Route> {
        self.routes
            .iter()
            .filter(|route| route.matcher.matches(path))
            .max_by_key(|route| route.pattern().len())
    }

    /// Dispatch a request to its handler.
    pub fn dispatch(&self, request: Request<Body>) -> BoxFuture<'static, Response> {
        let path = request.uri().path();
        match self.match_path(path) {
            Some(route) => {
                tracing::debug!(path = %path, route = %route.pattern(), "Dispatching request");
                (route.handler)(request)
            }
            None => {
                tracing::debug!(path = %path, "No route matched");
                Box::pin(async { not_found() })
            }
        }
    }
}

impl tower::Service<Request<Body>> for Router {
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let fut = self.dispatch(request);
        Box::pin(async move { Ok(fut.await) })
    }
}

/// The default answer for anything without a route.
pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "404 page not found\n").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower::ServiceExt;

    fn named(name: &'static str) -> Handler {
        handler_fn(move |_req| async move { name })
    }

    fn router() -> Router {
        Router::from_routes(vec![
            Route::exact("/", named("home")),
            Route::prefix("/snippet", named("show")),
            Route::exact("/snippet/create", named("create")),
            Route::prefix("/static/", named("static")),
        ])
    }

    async fn body_of(router: Router, uri: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[test]
    fn test_longest_match_wins() {
        let router = router();
        assert_eq!(router.match_path("/snippet/create").unwrap().pattern(), "/snippet/create");
        assert_eq!(router.match_path("/snippet/create/").unwrap().pattern(), "/snippet");
        assert_eq!(router.match_path("/snippet/9").unwrap().pattern(), "/snippet");
        assert_eq!(router.match_path("/static/app.js").unwrap().pattern(), "/static/");
        assert!(router.match_path("/missing").is_none());
        assert!(router.match_path("/static").is_none());
    }

    #[tokio::test]
    async fn test_dispatch_to_handler() {
        assert_eq!(body_of(router(), "/").await, (StatusCode::OK, "home".to_string()));
        assert_eq!(body_of(router(), "/snippet/1").await, (StatusCode::OK, "show".to_string()));
        assert_eq!(body_of(router(), "/snippet/create").await, (StatusCode::OK, "create".to_string()));
    }

    #[tokio::test]
    async fn test_unmatched_is_not_found() {
        let (status, body) = body_of(router(), "/favicon.ico").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("404 page not found"));
    }
}
