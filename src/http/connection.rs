use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, info, warn};

use crate::http::error::{ProtocolError, Rejection};
use crate::http::parser::parse_request;
use crate::http::reader::WireReader;
use crate::http::registry::{HandlerRegistry, ServerContext};
use crate::http::request::{Method, Request};
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;

/// One accepted connection, driven through exactly one request/response.
pub struct Connection<S = TcpStream> {
    stream: S,
    registry: Arc<HandlerRegistry>,
    context: Arc<ServerContext>,
    state: ConnectionState,
    // set once the request line is parsed; error responses then drop their body
    head_request: bool,
}

#[derive(Debug)]
pub enum ConnectionState {
    Reading,
    Parsed(Request),
    Dispatching(Request),
    Failed(Rejection),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, registry: Arc<HandlerRegistry>, context: Arc<ServerContext>) -> Self {
        Self {
            stream,
            registry,
            context,
            state: ConnectionState::Reading,
            head_request: false,
        }
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    /// Runs the connection to completion.
    ///
    /// The stream is shut down once the response has been written, or the
    /// write has failed; the write error, if any, is returned.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let mut outcome = Ok(());

        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await {
                        Ok(req) => ConnectionState::Parsed(req),
                        Err(e) => ConnectionState::Failed(e.into()),
                    };
                }

                ConnectionState::Parsed(req) => {
                    self.head_request = req.method == Method::HEAD;
                    self.state = if req.version.eq_ignore_ascii_case(&self.context.version) {
                        ConnectionState::Dispatching(req)
                    } else {
                        ConnectionState::Failed(ProtocolError::unsupported_version(req.version).into())
                    };
                }

                ConnectionState::Dispatching(req) => {
                    let Some(handler) = self.registry.get(&req.method).cloned() else {
                        self.state = ConnectionState::Failed(Rejection::NoHandler(req.method));
                        continue;
                    };

                    let response = handler.handle(&req, &self.context).await;
                    info!(
                        method = %req.method,
                        path = %req.path,
                        status = response.status.as_u16(),
                        "Request handled"
                    );
                    self.state = ConnectionState::Writing(ResponseWriter::new(&response));
                }

                ConnectionState::Failed(rejection) => {
                    let status = rejection.status();
                    debug!(error = %rejection, status = status.as_u16(), "Rejecting request");
                    let mut response = Response::error(status);
                    if self.head_request {
                        response = response.into_head();
                    }
                    self.state = ConnectionState::Writing(ResponseWriter::new(&response));
                }

                ConnectionState::Writing(mut writer) => {
                    outcome = writer.write_to_stream(&mut self.stream).await;

                    if let Err(e) = self.stream.shutdown().await {
                        warn!(error = %e, "Failed to shut down connection");
                    }
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        outcome
    }

    async fn read_request(&mut self) -> Result<Request, ProtocolError> {
        let mut reader = WireReader::new(&mut self.stream);
        parse_request(&mut reader).await
    }
}
