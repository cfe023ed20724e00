//! Filesystem-backed method handlers.
//!
//! Each handler resolves the request path against
//! [`ServerContext::root_dir`](crate::http::registry::ServerContext) and maps
//! I/O outcomes onto status codes itself, so the connection never sees an
//! error from here.

pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tokio::sync::RwLock;
use tracing::warn;

use crate::http::mime;
use crate::http::registry::HandlerRegistry;
use crate::http::request::Method;
use crate::http::response::{Response, ResponseBuilder, StatusCode};

pub use delete::DeleteHandler;
pub use get::{GetHandler, HeadHandler};
pub use post::PostHandler;
pub use put::PutHandler;

/// File served when a request path names a directory.
pub const INDEX_FILE: &str = "index.html";

/// Shared by all file handlers: readers take it shared, writers exclusive,
/// so a GET never observes a half-written PUT.
#[derive(Debug, Clone, Default)]
pub struct FileLock(Arc<RwLock<()>>);

impl FileLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn inner(&self) -> &RwLock<()> {
        &self.0
    }
}

/// Registers GET, HEAD, POST, PUT and DELETE, all sharing one [`FileLock`].
pub fn register_defaults(registry: HandlerRegistry) -> HandlerRegistry {
    let lock = FileLock::new();

    registry
        .register(Method::GET, GetHandler::new(lock.clone()))
        .register(Method::HEAD, HeadHandler::new(lock.clone()))
        .register(Method::POST, PostHandler::new(lock.clone()))
        .register(Method::PUT, PutHandler::new(lock.clone()))
        .register(Method::DELETE, DeleteHandler::new(lock))
}

/// Maps a request path onto a file under `root`.
///
/// The query string and fragment are ignored. Paths that would leave the
/// root (`..`, absolute components) get a 403 response instead.
pub fn resolve(root: &Path, request_path: &str) -> Result<PathBuf, Response> {
    let path = request_path.split(['?', '#']).next().unwrap_or_default();
    let relative = Path::new(path.trim_start_matches('/'));

    let escapes = relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(Response::error(StatusCode::Forbidden));
    }

    Ok(root.join(relative))
}

/// 200 response carrying `contents`, typed after `path`.
pub fn file_response(path: &Path, contents: Vec<u8>) -> Response {
    ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", mime::content_type(path))
        .header("Connection", "close")
        .body(contents)
        .build()
}

/// Reads the file behind `path`, following a directory to its index file.
pub(crate) async fn load(path: PathBuf) -> Response {
    let path = match fs::metadata(&path).await {
        Ok(meta) if meta.is_dir() => path.join(INDEX_FILE),
        Ok(_) => path,
        Err(e) => return io_error_response(&path, &e),
    };

    match fs::read(&path).await {
        Ok(contents) => file_response(&path, contents),
        Err(e) => io_error_response(&path, &e),
    }
}

pub(crate) fn io_error_response(path: &Path, e: &io::Error) -> Response {
    match e.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory => Response::not_found(),
        io::ErrorKind::PermissionDenied | io::ErrorKind::IsADirectory => {
            Response::error(StatusCode::Forbidden)
        }
        _ => {
            warn!(path = %path.display(), error = %e, "File operation failed");
            Response::internal_error()
        }
    }
}
