//! HTTP protocol implementation.
//!
//! A deliberately small HTTP/1.x server core: every accepted connection
//! carries exactly one request and is closed after the response.
//!
//! # Architecture
//!
//! - **`reader`**: Pulls CRLF lines and fixed-size bodies off the stream
//! - **`parser`**: Builds a [`Request`](request::Request) or fails with a [`ProtocolError`](error::ProtocolError)
//! - **`request`** / **`response`** / **`headers`**: Message types and builders
//! - **`writer`**: Serializes and writes responses
//! - **`registry`**: Method → handler table and the handler trait
//! - **`connection`**: The per-connection state machine
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ── malformed ──────────────┐
//!        └──────┬──────┘                            │
//!               ▼                                   ▼
//!        ┌─────────────┐                     ┌────────────┐
//!        │   Parsed    │ ── version ───────▶ │   Failed   │
//!        └──────┬──────┘    mismatch         └─────┬──────┘
//!               ▼                                  │
//!        ┌─────────────┐                           │
//!        │ Dispatching │ ── no handler ────────────┤
//!        └──────┬──────┘                           │
//!               ▼                                  │
//!        ┌─────────────┐                           │
//!        │   Writing   │ ◀─────── error response ──┘
//!        └──────┬──────┘
//!               ▼
//!        ┌─────────────┐
//!        │   Closed    │
//!        └─────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use docserve::http::connection::Connection;
//! use docserve::http::registry::{HandlerRegistry, ServerContext};
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let registry = Arc::new(docserve::handlers::register_defaults(HandlerRegistry::new()));
//!     let context = Arc::new(ServerContext::new("web"));
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let mut conn = Connection::new(socket, registry.clone(), context.clone());
//!         tokio::spawn(async move { conn.run().await });
//!     }
//! }
//! ```

pub mod connection;
pub mod error;
pub mod headers;
pub mod mime;
pub mod parser;
pub mod reader;
pub mod registry;
pub mod request;
pub mod response;
pub mod writer;
