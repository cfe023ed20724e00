//! Helpers shared by the connection-level tests.

#![allow(dead_code)]

use std::sync::Arc;

use docserve::http::connection::Connection;
use docserve::http::registry::{HandlerRegistry, ServerContext};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// A response as seen by a client.
#[derive(Debug)]
pub struct Reply {
    pub status: u16,
    pub status_line: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    pub raw: Vec<u8>,
}

impl Reply {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Sends `raw` over an in-memory connection and collects everything the
/// server writes before closing.
pub async fn exchange(registry: Arc<HandlerRegistry>, context: ServerContext, raw: &[u8]) -> Reply {
    exchange_with(registry, context, raw, false).await
}

/// Like [`exchange`], optionally closing the client's write side after
/// sending so the server sees end of stream.
pub async fn exchange_with(
    registry: Arc<HandlerRegistry>,
    context: ServerContext,
    raw: &[u8],
    close_after_send: bool,
) -> Reply {
    let (mut client, server) = tokio::io::duplex(64 * 1024);
    let mut conn = Connection::new(server, registry, Arc::new(context));
    let task = tokio::spawn(async move { conn.run().await });

    client.write_all(raw).await.unwrap();
    if close_after_send {
        client.shutdown().await.unwrap();
    }

    let mut out = Vec::new();
    client.read_to_end(&mut out).await.unwrap();
    task.await.unwrap().unwrap();

    parse_reply(out)
}

pub fn parse_reply(raw: Vec<u8>) -> Reply {
    let split = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response has no header terminator");
    let head = String::from_utf8(raw[..split].to_vec()).unwrap();
    let body = raw[split + 4..].to_vec();

    let mut lines = head.split("\r\n");
    let status_line = lines.next().unwrap().to_string();
    let status = status_line.split(' ').nth(1).unwrap().parse().unwrap();
    let headers = lines
        .map(|l| {
            let (k, v) = l.split_once(": ").unwrap();
            (k.to_string(), v.to_string())
        })
        .collect();

    Reply {
        status,
        status_line,
        headers,
        body,
        raw,
    }
}
