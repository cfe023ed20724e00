use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::http::error::ProtocolError;

/// Longest line accepted, terminator included.
pub const MAX_LINE_LENGTH: usize = 8 * 1024;

const READ_CHUNK: usize = 1024;

/// Pulls protocol units (lines, fixed-size runs) out of a byte stream.
///
/// Bytes read from the stream but not yet asked for stay in the internal
/// buffer and are returned by the next call, so a body that arrives in the
/// same segment as the headers is never lost.
#[derive(Debug)]
pub struct WireReader<R> {
    inner: R,
    buffer: BytesMut,
}

impl<R: AsyncRead + Unpin> WireReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buffer: BytesMut::with_capacity(READ_CHUNK),
        }
    }

    /// Reads one CRLF-terminated line and returns it without the terminator.
    pub async fn read_line(&mut self) -> Result<String, ProtocolError> {
        let mut scanned = 0;

        loop {
            if let Some(pos) = find_crlf(&self.buffer[scanned..]) {
                let end = scanned + pos;
                let line = self.buffer.split_to(end);
                self.buffer.advance(2);

                return String::from_utf8(line.to_vec())
                    .map_err(|_| ProtocolError::malformed("line is not valid utf-8"));
            }

            if self.buffer.len() >= MAX_LINE_LENGTH {
                return Err(ProtocolError::malformed(format!(
                    "line exceeds {MAX_LINE_LENGTH} bytes"
                )));
            }

            // a CR at the very end may be followed by its LF in the next read
            scanned = self.buffer.len().saturating_sub(1);

            if self.fill().await? == 0 {
                return Err(ProtocolError::malformed(
                    "connection closed before end of line",
                ));
            }
        }
    }

    /// Reads exactly `n` bytes.
    pub async fn read_exactly(&mut self, n: usize) -> Result<Vec<u8>, ProtocolError> {
        while self.buffer.len() < n {
            if self.fill().await? == 0 {
                return Err(ProtocolError::malformed(format!(
                    "connection closed after {} of {} body bytes",
                    self.buffer.len(),
                    n
                )));
            }
        }

        Ok(self.buffer.split_to(n).to_vec())
    }

    /// Bytes buffered but not yet handed out.
    pub fn buffered(&self) -> &[u8] {
        &self.buffer
    }

    async fn fill(&mut self) -> Result<usize, ProtocolError> {
        self.buffer.reserve(READ_CHUNK);
        self.inner
            .read_buf(&mut self.buffer)
            .await
            .map_err(|e| ProtocolError::malformed(format!("read failed: {e}")))
    }
}

fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == b"\r\n")
}
