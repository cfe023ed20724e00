//! docserve - a single-request-per-connection HTTP/1.x file server
//!
//! Maps GET, HEAD, POST, PUT and DELETE onto files under a document root.

pub mod config;
pub mod handlers;
pub mod http;
pub mod server;
