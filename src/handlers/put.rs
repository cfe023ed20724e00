use async_trait::async_trait;
use tokio::fs;

use crate::handlers::{FileLock, file_response, io_error_response, resolve};
use crate::http::registry::{Handler, ServerContext};
use crate::http::request::Request;
use crate::http::response::Response;

/// Replaces a file's contents with the request body.
#[derive(Debug, Clone)]
pub struct PutHandler {
    lock: FileLock,
}

impl PutHandler {
    pub fn new(lock: FileLock) -> Self {
        Self { lock }
    }
}

#[async_trait]
impl Handler for PutHandler {
    async fn handle(&self, request: &Request, ctx: &ServerContext) -> Response {
        let path = match resolve(&ctx.root_dir, &request.path) {
            Ok(path) => path,
            Err(response) => return response,
        };

        let _guard = self.lock.inner().write().await;

        match fs::write(&path, &request.body).await {
            Ok(()) => file_response(&path, request.body.clone()),
            Err(e) => io_error_response(&path, &e),
        }
    }
}
