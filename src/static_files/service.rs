//! Static asset handler.
//!
//! # Responsibilities
//! - Strip the mount prefix from the request path
//! - Gate the path through `NeuteredFileSystem` before anything is served
//! - Redirect directory requests that lack a trailing slash
//! - Hand the request to `ServeDir` for content type, ranges and caching
//!
//! # Design Decisions
//! - The gate only decides whether a path may be served; `ServeDir` re-resolves
//!   it and turns a directory into its `index.html`
//! - Open errors map to 404 / 403 / 500 and never expose filesystem details

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use percent_encoding::percent_decode_str;
use std::io;
use std::path::PathBuf;
use tower::ServiceExt;
use tower_http::services::ServeDir;

use crate::routing::router::not_found;
use crate::static_files::fs::{Dir, FileSystem, OpenFile};
use crate::static_files::neutered::NeuteredFileSystem;

/// Serves files below a root directory for requests under a URL prefix.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    prefix: String,
    fs: NeuteredFileSystem<Dir>,
    serve_dir: ServeDir,
}

impl StaticFiles {
    /// `prefix` is stripped from request paths, e.g. `/static`.
    pub fn new(prefix: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            prefix: prefix.into(),
            fs: NeuteredFileSystem::new(Dir::new(root.clone())),
            serve_dir: ServeDir::new(root),
        }
    }

    pub async fn serve(&self, request: Request<Body>) -> Response {
        let original_path = request.uri().path().to_string();
        let Some(rest) = original_path.strip_prefix(self.prefix.as_str()) else {
            return not_found();
        };

        let Ok(decoded) = percent_decode_str(rest).decode_utf8() else {
            return not_found();
        };

        let is_dir = match self.stat(&decoded).await {
            Ok(is_dir) => is_dir,
            Err(e) => return open_error_response(&e, &original_path),
        };

        if is_dir && !rest.ends_with('/') {
            let mut location = format!("{original_path}/");
            if let Some(query) = request.uri().query() {
                location.push('?');
                location.push_str(query);
            }
            return (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response();
        }

        let request = match strip_prefix(request, rest) {
            Ok(request) => request,
            Err(response) => return response,
        };

        match self.serve_dir.clone().oneshot(request).await {
            Ok(response) => response.map(Body::new),
            Err(never) => match never {},
        }
    }

    async fn stat(&self, path: &str) -> io::Result<bool> {
        let file = self.fs.open(path).await?;
        Ok(file.stat().await?.is_dir())
    }
}

/// Rewrite the request URI to the part below the mount prefix.
///
/// Assets are served whatever the method; anything but HEAD is read as GET.
fn strip_prefix(request: Request<Body>, rest: &str) -> Result<Request<Body>, Response> {
    let (mut parts, body) = request.into_parts();
    if parts.method != Method::HEAD {
        parts.method = Method::GET;
    }
    let mut path_and_query = if rest.is_empty() { "/".to_string() } else { rest.to_string() };
    if let Some(query) = parts.uri.query() {
        path_and_query.push('?');
        path_and_query.push_str(query);
    }

    parts.uri = path_and_query.parse::<Uri>().map_err(|e| {
        tracing::debug!(error = %e, "Unparseable static path");
        not_found()
    })?;
    Ok(Request::from_parts(parts, body))
}

fn open_error_response(err: &io::Error, path: &str) -> Response {
    match err.kind() {
        io::ErrorKind::NotFound => not_found(),
        io::ErrorKind::PermissionDenied => (StatusCode::FORBIDDEN, "403 Forbidden\n").into_response(),
        _ => {
            tracing::error!(path = %path, error = %err, "Failed to open static file");
            (StatusCode::INTERNAL_SERVER_ERROR, "500 Internal Server Error\n").into_response()
        }
    }
}
