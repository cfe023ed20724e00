use async_trait::async_trait;

use crate::handlers::{FileLock, load, resolve};
use crate::http::registry::{Handler, ServerContext};
use crate::http::request::Request;
use crate::http::response::Response;

/// Serves file contents.
#[derive(Debug, Clone)]
pub struct GetHandler {
    lock: FileLock,
}

impl GetHandler {
    pub fn new(lock: FileLock) -> Self {
        Self { lock }
    }
}

#[async_trait]
impl Handler for GetHandler {
    async fn handle(&self, request: &Request, ctx: &ServerContext) -> Response {
        let path = match resolve(&ctx.root_dir, &request.path) {
            Ok(path) => path,
            Err(response) => return response,
        };

        let _guard = self.lock.inner().read().await;
        load(path).await
    }
}

/// Answers exactly like [`GetHandler`], minus the body.
#[derive(Debug, Clone)]
pub struct HeadHandler {
    get: GetHandler,
}

impl HeadHandler {
    pub fn new(lock: FileLock) -> Self {
        Self { get: GetHandler::new(lock) }
    }
}

#[async_trait]
impl Handler for HeadHandler {
    async fn handle(&self, request: &Request, ctx: &ServerContext) -> Response {
        self.get.handle(request, ctx).await.into_head()
    }
}
