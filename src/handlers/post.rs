use async_trait::async_trait;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::handlers::{FileLock, file_response, io_error_response, resolve};
use crate::http::registry::{Handler, ServerContext};
use crate::http::request::Request;
use crate::http::response::Response;

/// Appends the request body to a file, creating it when missing, and
/// answers with the file's resulting contents.
#[derive(Debug, Clone)]
pub struct PostHandler {
    lock: FileLock,
}

impl PostHandler {
    pub fn new(lock: FileLock) -> Self {
        Self { lock }
    }
}

#[async_trait]
impl Handler for PostHandler {
    async fn handle(&self, request: &Request, ctx: &ServerContext) -> Response {
        let path = match resolve(&ctx.root_dir, &request.path) {
            Ok(path) => path,
            Err(response) => return response,
        };

        let _guard = self.lock.inner().write().await;

        let appended = async {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .await?;
            file.write_all(&request.body).await?;
            file.flush().await?;
            let contents = fs::read(&path).await?;
            Ok::<_, std::io::Error>(contents)
        };

        match appended.await {
            Ok(contents) => file_response(&path, contents),
            Err(e) => io_error_response(&path, &e),
        }
    }
}
