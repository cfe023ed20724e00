//! End-to-end scenarios against a temporary document root.

mod common;

use std::fs;
use std::sync::Arc;

use docserve::handlers::{self, resolve};
use docserve::http::registry::{HandlerRegistry, ServerContext};
use docserve::http::response::StatusCode;
use tempfile::TempDir;

use common::{Reply, exchange};

struct Site {
    root: TempDir,
    registry: Arc<HandlerRegistry>,
}

impl Site {
    fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("get.txt"), "Got this file, fam").unwrap();
        fs::write(root.path().join("post.txt"), "post that good stuff here:").unwrap();
        fs::write(root.path().join("put.txt"), "replace me").unwrap();
        fs::write(root.path().join("delete.txt"), "delete me").unwrap();

        Self {
            root,
            registry: Arc::new(handlers::register_defaults(HandlerRegistry::new())),
        }
    }

    async fn send(&self, raw: &str) -> Reply {
        let ctx = ServerContext::new(self.root.path());
        exchange(Arc::clone(&self.registry), ctx, raw.as_bytes()).await
    }

    async fn send_body(&self, method: &str, path: &str, body: &str) -> Reply {
        self.send(&format!(
            "{method} {path} HTTP/1.1\r\nHost: localhost\r\nContent-Length: {}\r\n\r\n{body}",
            body.len()
        ))
        .await
    }

    fn read(&self, name: &str) -> String {
        fs::read_to_string(self.root.path().join(name)).unwrap()
    }
}

#[tokio::test]
async fn test_get_existing_file() {
    let site = Site::new();

    let reply = site.send("GET /get.txt HTTP/1.1\r\nHost: localhost\r\n\r\n").await;

    assert_eq!(reply.status, 200);
    assert_eq!(reply.body, b"Got this file, fam");
    assert_eq!(reply.header("Content-Length"), Some("18"));
    assert_eq!(reply.header("Content-Type"), Some("text/plain; charset=utf-8"));
}

#[tokio::test]
async fn test_get_missing_file() {
    let site = Site::new();

    let reply = site.send("GET /get.fakenews HTTP/1.1\r\n\r\n").await;

    assert_eq!(reply.status, 404);
}

#[tokio::test]
async fn test_get_directory_serves_index() {
    let site = Site::new();
    fs::write(site.root.path().join("index.html"), "<h1>hi</h1>").unwrap();

    let reply = site.send("GET / HTTP/1.1\r\n\r\n").await;

    assert_eq!(reply.status, 200);
    assert_eq!(reply.body, b"<h1>hi</h1>");
    assert_eq!(reply.header("Content-Type"), Some("text/html; charset=utf-8"));
}

#[tokio::test]
async fn test_get_directory_without_index() {
    let site = Site::new();
    fs::create_dir(site.root.path().join("empty")).unwrap();

    let reply = site.send("GET /empty HTTP/1.1\r\n\r\n").await;

    assert_eq!(reply.status, 404);
}

#[tokio::test]
async fn test_get_ignores_query_string() {
    let site = Site::new();

    let reply = site.send("GET /get.txt?download=1 HTTP/1.1\r\n\r\n").await;

    assert_eq!(reply.status, 200);
    assert_eq!(reply.body, b"Got this file, fam");
}

#[tokio::test]
async fn test_traversal_is_forbidden() {
    let site = Site::new();

    let reply = site.send("GET /../etc/passwd HTTP/1.1\r\n\r\n").await;

    assert_eq!(reply.status, 403);
}

#[tokio::test]
async fn test_head_matches_get_without_body() {
    let site = Site::new();

    let get = site.send("GET /get.txt HTTP/1.1\r\n\r\n").await;
    let head = site.send("HEAD /get.txt HTTP/1.1\r\n\r\n").await;

    assert_eq!(head.status, 200);
    assert!(head.body.is_empty());
    assert_eq!(head.headers, get.headers);
}

#[tokio::test]
async fn test_head_missing_file() {
    let site = Site::new();

    let reply = site.send("HEAD /get.fakenews HTTP/1.1\r\n\r\n").await;

    assert_eq!(reply.status, 404);
    assert!(reply.body.is_empty());
}

#[tokio::test]
async fn test_post_appends_to_existing_file() {
    let site = Site::new();

    let reply = site.send_body("POST", "/post.txt", "posted stuff").await;

    assert_eq!(reply.status, 200);
    assert_eq!(reply.body, b"post that good stuff here:posted stuff");
    assert_eq!(site.read("post.txt"), "post that good stuff here:posted stuff");
}

#[tokio::test]
async fn test_post_creates_missing_file() {
    let site = Site::new();

    let reply = site.send_body("POST", "/post.fakenews", "posted stuff").await;

    assert_eq!(reply.status, 200);
    assert_eq!(reply.body, b"posted stuff");
    assert_eq!(site.read("post.fakenews"), "posted stuff");
}

#[tokio::test]
async fn test_put_replaces_contents() {
    let site = Site::new();

    let replaced = site.send_body("PUT", "/put.txt", "put stuff").await;
    let created = site.send_body("PUT", "/put.fakenews", "put stuff").await;

    assert_eq!(replaced.status, 200);
    assert_eq!(replaced.body, b"put stuff");
    assert_eq!(site.read("put.txt"), "put stuff");
    assert_eq!(created.status, 200);
    assert_eq!(site.read("put.fakenews"), "put stuff");
}

#[tokio::test]
async fn test_delete_then_get() {
    let site = Site::new();

    let before = site.send("GET /delete.txt HTTP/1.1\r\n\r\n").await;
    let deleted = site.send("DELETE /delete.txt HTTP/1.1\r\n\r\n").await;
    let after = site.send("GET /delete.txt HTTP/1.1\r\n\r\n").await;
    let again = site.send("DELETE /delete.fakenews HTTP/1.1\r\n\r\n").await;

    assert_eq!(before.body, b"delete me");
    assert_eq!(deleted.status, 200);
    assert_eq!(deleted.header("Content-Length"), Some("0"));
    assert_eq!(after.status, 404);
    assert_eq!(again.status, 404);
}

#[tokio::test]
async fn test_delete_directory_is_refused() {
    let site = Site::new();
    fs::create_dir(site.root.path().join("dir")).unwrap();

    let reply = site.send("DELETE /dir HTTP/1.1\r\n\r\n").await;

    assert_ne!(reply.status, 200);
    assert!(site.root.path().join("dir").is_dir());
}

#[tokio::test]
async fn test_concurrent_posts_all_land() {
    let site = Arc::new(Site::new());

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let site = Arc::clone(&site);
            tokio::spawn(async move { site.send_body("POST", "/log.txt", "x").await })
        })
        .collect();
    for task in tasks {
        assert_eq!(task.await.unwrap().status, 200);
    }

    assert_eq!(site.read("log.txt"), "xxxxxxxx");
}

#[test]
fn test_resolve() {
    let root = std::path::Path::new("/srv/www");

    assert_eq!(resolve(root, "/a/b.txt").unwrap(), root.join("a/b.txt"));
    assert_eq!(resolve(root, "/").unwrap(), root.join(""));
    assert_eq!(
        resolve(root, "/a/../../secret").unwrap_err().status,
        StatusCode::Forbidden
    );
}
