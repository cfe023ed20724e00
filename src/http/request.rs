use std::fmt;

use crate::http::error::ProtocolError;
use crate::http::headers::Headers;

/// HTTP request methods.
///
/// The well-known methods get their own variant. Any other token from the
/// request line is kept as-is in `Extension`, so that an unknown method
/// still parses and is only rejected later, when no handler is registered
/// for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Append to a resource
    POST,
    /// PUT - Replace a resource
    PUT,
    /// DELETE - Delete a resource
    DELETE,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// OPTIONS - Describe communication options
    OPTIONS,
    /// PATCH - Partial modification of a resource
    PATCH,
    /// Any other method token, verbatim
    Extension(String),
}

impl Method {
    /// Maps a request-line token onto a method.
    ///
    /// Matching is case-sensitive: `"get"` is an extension method, not `GET`.
    ///
    /// ```
    /// # use docserve::http::request::Method;
    /// assert_eq!(Method::from_token("GET"), Method::GET);
    /// assert_eq!(Method::from_token("get"), Method::Extension("get".into()));
    /// ```
    pub fn from_token(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            "HEAD" => Method::HEAD,
            "OPTIONS" => Method::OPTIONS,
            "PATCH" => Method::PATCH,
            other => Method::Extension(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
            Method::PATCH => "PATCH",
            Method::Extension(token) => token,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed HTTP request.
///
/// Only [`RequestBuilder::build`] and the parser create these, and both
/// refuse to produce a request with an empty method, path or version.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET, POST, etc.)
    pub method: Method,
    /// The request target as sent, e.g. "/index.html"
    pub path: String,
    /// HTTP version token, e.g. "HTTP/1.1"
    pub version: String,
    pub headers: Headers,
    /// Exactly `Content-Length` bytes, or empty
    pub body: Vec<u8>,
}

/// Builder for constructing Request objects.
#[derive(Debug, Default)]
pub struct RequestBuilder {
    method: Option<Method>,
    path: Option<String>,
    version: Option<String>,
    headers: Headers,
    body: Vec<u8>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key, value);
        self
    }

    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Builds the request, failing with [`ProtocolError::Malformed`] when
    /// any of method, path or version is missing or empty.
    pub fn build(self) -> Result<Request, ProtocolError> {
        let method = self
            .method
            .filter(|m| !m.as_str().is_empty())
            .ok_or_else(|| ProtocolError::malformed("method missing"))?;
        let path = self
            .path
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ProtocolError::malformed("path missing"))?;
        let version = self
            .version
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ProtocolError::malformed("version missing"))?;

        Ok(Request {
            method,
            path,
            version,
            headers: self.headers,
            body: self.body,
        })
    }
}

impl Request {
    /// Retrieves a header value by name, ignoring case.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key)
    }
}
