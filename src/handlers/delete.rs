use async_trait::async_trait;
use tokio::fs;
use tracing::info;

use crate::handlers::{FileLock, io_error_response, resolve};
use crate::http::registry::{Handler, ServerContext};
use crate::http::request::Request;
use crate::http::response::{Response, ResponseBuilder, StatusCode};

/// Removes a file. Directories are never removed.
#[derive(Debug, Clone)]
pub struct DeleteHandler {
    lock: FileLock,
}

impl DeleteHandler {
    pub fn new(lock: FileLock) -> Self {
        Self { lock }
    }
}

#[async_trait]
impl Handler for DeleteHandler {
    async fn handle(&self, request: &Request, ctx: &ServerContext) -> Response {
        let path = match resolve(&ctx.root_dir, &request.path) {
            Ok(path) => path,
            Err(response) => return response,
        };

        let _guard = self.lock.inner().write().await;

        match fs::remove_file(&path).await {
            Ok(()) => {
                info!(path = %path.display(), "File deleted");
                ResponseBuilder::new(StatusCode::Ok)
                    .header("Connection", "close")
                    .build()
            }
            Err(e) => io_error_response(&path, &e),
        }
    }
}
