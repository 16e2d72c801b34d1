//! Application handlers.
//!
//! Rendering is plain text; templating lives outside this crate.

use axum::{
    body::Body,
    extract::{Form, FromRequest},
    http::{header, Method, Request, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;
use std::fmt::Write;
use std::sync::Arc;
use std::time::Duration;

use crate::http::errors::AppError;
use crate::routing::id_from_path;
use crate::store::{NewSnippet, SnippetStore};

/// Path the show handler is mounted on.
pub const SNIPPET_PREFIX: &str = "/snippet";

const LATEST_LIMIT: usize = 10;
const MAX_TITLE_CHARS: usize = 100;
const ALLOWED_EXPIRY_DAYS: [u64; 3] = [1, 7, 365];

/// Liveness probe.
pub async fn ping(_request: Request<Body>) -> &'static str {
    "OK"
}

/// Latest snippets.
pub async fn home(
    store: Arc<dyn SnippetStore>,
    _request: Request<Body>,
) -> Result<impl IntoResponse, AppError> {
    let snippets = store.latest(LATEST_LIMIT)?;

    let mut body = String::from("Latest snippets\n");
    if snippets.is_empty() {
        body.push_str("There's nothing to see here yet!\n");
    }
    for snippet in &snippets {
        let _ = writeln!(body, "#{} {}", snippet.id, snippet.title);
    }

    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body))
}

/// A single snippet, addressed as `/snippet/<id>`.
pub async fn show_snippet(
    store: Arc<dyn SnippetStore>,
    request: Request<Body>,
) -> Result<impl IntoResponse, AppError> {
    let id = id_from_path(request.uri().path(), SNIPPET_PREFIX)?;
    let snippet = store.get(id)?.ok_or(AppError::NotFound)?;

    let body = format!("#{} {}\n\n{}\n", snippet.id, snippet.title, snippet.content);
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body))
}

#[derive(Debug, Deserialize)]
pub struct CreateSnippetForm {
    pub title: String,
    pub content: String,
    #[serde(default = "default_expires")]
    pub expires: u64,
}

fn default_expires() -> u64 {
    365
}

impl CreateSnippetForm {
    fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::BadRequest("title is empty".into()));
        }
        if self.title.chars().count() > MAX_TITLE_CHARS {
            return Err(AppError::BadRequest("title is too long".into()));
        }
        if self.content.trim().is_empty() {
            return Err(AppError::BadRequest("content is empty".into()));
        }
        if !ALLOWED_EXPIRY_DAYS.contains(&self.expires) {
            return Err(AppError::BadRequest(format!("unsupported expiry {}", self.expires)));
        }
        Ok(())
    }
}

/// Create a snippet from a urlencoded form and redirect to it.
pub async fn create_snippet(
    store: Arc<dyn SnippetStore>,
    request: Request<Body>,
) -> Result<impl IntoResponse, AppError> {
    if request.method() != Method::POST {
        return Err(AppError::MethodNotAllowed { allow: "POST" });
    }

    let Form(form) = Form::<CreateSnippetForm>::from_request(request, &())
        .await
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    form.validate()?;

    let id = store.insert(NewSnippet {
        title: form.title,
        content: form.content,
        ttl: Duration::from_secs(form.expires * 24 * 60 * 60),
    })?;

    tracing::info!(id = %id, "Snippet created");
    Ok((
        StatusCode::SEE_OTHER,
        [(header::LOCATION, format!("{SNIPPET_PREFIX}/{id}"))],
    ))
}
