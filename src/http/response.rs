use crate::http::headers::Headers;

/// Version written on the status line unless a response says otherwise.
pub const HTTP_VERSION: &str = "HTTP/1.1";

/// HTTP status codes.
///
/// The named variants are the codes the server and its file handlers
/// produce; any other code a handler needs goes through `Other`.
///
/// - `Ok` (200): Request successful
/// - `BadRequest` (400): Malformed request
/// - `Forbidden` (403): Path escapes the document root
/// - `NotFound` (404): Resource or method handler not found
/// - `InternalServerError` (500): Handler failed
/// - `HttpVersionNotSupported` (505): Request version differs from the server's
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 403 Forbidden
    Forbidden,
    /// 404 Not Found
    NotFound,
    /// 500 Internal Server Error
    InternalServerError,
    /// 505 HTTP Version Not Supported
    HttpVersionNotSupported,
    /// Any other code, with its reason phrase
    Other { code: u16, reason: &'static str },
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// ```
    /// # use docserve::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::HttpVersionNotSupported.as_u16(), 505);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
            StatusCode::HttpVersionNotSupported => 505,
            StatusCode::Other { code, .. } => *code,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
            StatusCode::HttpVersionNotSupported => "HTTP Version Not Supported",
            StatusCode::Other { reason, .. } => reason,
        }
    }
}

/// A complete HTTP response ready to be sent to a client.
///
/// `body` is `None` for HEAD-style responses: the headers describe the
/// representation but no body bytes go on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub version: String,
    pub status: StatusCode,
    pub headers: Headers,
    pub body: Option<Vec<u8>>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "application/json")
///     .body(b"{}".to_vec())
///     .build();
/// ```
#[derive(Debug)]
pub struct ResponseBuilder {
    version: String,
    status: StatusCode,
    headers: Headers,
    body: Option<Vec<u8>>,
}

impl ResponseBuilder {
    /// Creates a new builder with an empty body.
    pub fn new(status: StatusCode) -> Self {
        Self {
            version: HTTP_VERSION.to_string(),
            status,
            headers: Headers::new(),
            body: Some(Vec::new()),
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Adds or replaces a header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key, value);
        self
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Drops the body; headers are written as-is.
    pub fn no_body(mut self) -> Self {
        self.body = None;
        self
    }

    /// Builds the final Response.
    ///
    /// When a body is present, `Content-Length` is set to its exact length,
    /// replacing any value given through [`header`](Self::header).
    pub fn build(mut self) -> Response {
        if let Some(body) = &self.body {
            self.headers.insert("Content-Length", body.len().to_string());
        }

        Response {
            version: self.version,
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// Creates a simple 200 OK response with the given body.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .body(body.into())
            .build()
    }

    /// Creates a plain-text response whose body is the status line's reason,
    /// closing the connection afterwards.
    pub fn error(status: StatusCode) -> Self {
        ResponseBuilder::new(status)
            .header("Content-Type", "text/plain")
            .header("Connection", "close")
            .body(format!("{} {}", status.as_u16(), status.reason_phrase()).into_bytes())
            .build()
    }

    /// Creates a 400 Bad Request response.
    pub fn bad_request() -> Self {
        Self::error(StatusCode::BadRequest)
    }

    /// Creates a 404 Not Found response.
    pub fn not_found() -> Self {
        Self::error(StatusCode::NotFound)
    }

    /// Creates a 500 Internal Server Error response.
    pub fn internal_error() -> Self {
        Self::error(StatusCode::InternalServerError)
    }

    /// Turns this into its HEAD counterpart: same status and headers,
    /// including the `Content-Length` of the body that is dropped.
    pub fn into_head(mut self) -> Self {
        self.body = None;
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key)
    }

    /// Body bytes, empty when the response has none.
    pub fn body_bytes(&self) -> &[u8] {
        self.body.as_deref().unwrap_or_default()
    }
}
