use bytes::{BufMut, Bytes, BytesMut};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

/// Serializes a response into its exact wire bytes.
///
/// When a body is present, `Content-Length` always carries its real length:
/// a stored value is rewritten in place and a missing one is appended after
/// the other headers.
pub fn serialize_response(resp: &Response) -> Bytes {
    let mut buf = BytesMut::with_capacity(128 + resp.body_bytes().len());

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        resp.version,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.put_slice(status_line.as_bytes());

    // Headers
    let body_len = resp.body.as_ref().map(|body| body.len().to_string());
    let mut length_written = false;
    for (k, v) in resp.headers.iter() {
        let value = match &body_len {
            Some(len) if k.eq_ignore_ascii_case("Content-Length") => {
                if length_written {
                    continue;
                }
                length_written = true;
                len.as_str()
            }
            _ => v,
        };
        put_header(&mut buf, k, value);
    }
    if let (Some(len), false) = (&body_len, length_written) {
        put_header(&mut buf, "Content-Length", len);
    }

    // Header/body separator
    buf.put_slice(b"\r\n");

    if let Some(body) = &resp.body {
        buf.put_slice(body);
    }

    buf.freeze()
}

fn put_header(buf: &mut BytesMut, name: &str, value: &str) {
    buf.put_slice(name.as_bytes());
    buf.put_slice(b": ");
    buf.put_slice(value.as_bytes());
    buf.put_slice(b"\r\n");
}

#[derive(Debug)]
pub struct ResponseWriter {
    buffer: Bytes,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response),
            written: 0,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}
