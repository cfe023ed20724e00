use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use crate::http::request::{Method, Request};
use crate::http::response::{HTTP_VERSION, Response};

/// What a handler gets to know about the server it runs in.
#[derive(Debug, Clone)]
pub struct ServerContext {
    /// Directory every request path is resolved against
    pub root_dir: PathBuf,
    /// Version token requests must carry, compared ignoring case
    pub version: String,
}

impl ServerContext {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            version: HTTP_VERSION.to_string(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

/// A per-method request handler.
///
/// Handlers own their HTTP semantics: any failure (missing file, I/O error)
/// must already be turned into a [`Response`] when `handle` returns.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, request: &Request, ctx: &ServerContext) -> Response;
}

/// Method token → handler table.
///
/// Filled in once at startup, then shared read-only across connections
/// behind an `Arc`; there is no way to register through a shared reference.
#[derive(Default, Clone)]
pub struct HandlerRegistry {
    handlers: HashMap<Method, Arc<dyn Handler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `method`, replacing any previous one.
    pub fn register(mut self, method: Method, handler: impl Handler + 'static) -> Self {
        self.handlers.insert(method, Arc::new(handler));
        self
    }

    pub fn get(&self, method: &Method) -> Option<&Arc<dyn Handler>> {
        self.handlers.get(method)
    }

    pub fn contains(&self, method: &Method) -> bool {
        self.handlers.contains_key(method)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("methods", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}
