use tokio::io::AsyncRead;

use crate::http::error::ProtocolError;
use crate::http::headers::Headers;
use crate::http::reader::WireReader;
use crate::http::request::{Method, Request, RequestBuilder};

/// Reads one request off the wire.
///
/// Every failure is reported as [`ProtocolError::Malformed`]; the version
/// token is taken as-is and checked by the connection, not here.
pub async fn parse_request<R>(reader: &mut WireReader<R>) -> Result<Request, ProtocolError>
where
    R: AsyncRead + Unpin,
{
    let request_line = reader.read_line().await?;
    let (method, path, version) = parse_request_line(&request_line)?;

    let mut headers = Headers::new();
    loop {
        let line = reader.read_line().await?;
        if line.is_empty() {
            break;
        }

        let (name, value) = parse_header_line(&line)?;
        headers.insert(name, value);
    }

    let body = match headers.get("Content-Length") {
        Some(raw) => {
            let len = parse_content_length(raw)?;
            reader.read_exactly(len).await?
        }
        None => Vec::new(),
    };

    RequestBuilder::new()
        .method(method)
        .path(path)
        .version(version)
        .headers(headers)
        .body(body)
        .build()
}

/// Splits `METHOD SP PATH SP VERSION` into its three tokens.
pub fn parse_request_line(line: &str) -> Result<(Method, &str, &str), ProtocolError> {
    let parts: Vec<&str> = line.split(' ').collect();

    let &[method, path, version] = parts.as_slice() else {
        return Err(ProtocolError::malformed(format!(
            "request line has {} tokens, expected 3",
            parts.len()
        )));
    };

    if method.is_empty() || path.is_empty() || version.is_empty() {
        return Err(ProtocolError::malformed("empty token in request line"));
    }

    Ok((Method::from_token(method), path, version))
}

/// Splits a `Name: value` line, trimming both sides.
pub fn parse_header_line(line: &str) -> Result<(&str, &str), ProtocolError> {
    let (name, value) = line
        .split_once(':')
        .ok_or_else(|| ProtocolError::malformed(format!("header without colon: {line:?}")))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(ProtocolError::malformed("empty header name"));
    }

    Ok((name, value.trim()))
}

fn parse_content_length(raw: &str) -> Result<usize, ProtocolError> {
    raw.parse::<usize>()
        .map_err(|_| ProtocolError::malformed(format!("invalid content-length: {raw:?}")))
}
