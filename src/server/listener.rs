use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::http::registry::HandlerRegistry;

/// Accepts connections forever, one task per connection.
///
/// `registry` is frozen before the first accept and only read afterwards.
pub async fn run(cfg: &Config, registry: HandlerRegistry) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr).await?;
    info!(
        "Listening on {}, serving {}",
        cfg.server.listen_addr,
        cfg.server.root_dir.display()
    );

    serve(listener, Arc::new(registry), cfg).await
}

pub async fn serve(
    listener: TcpListener,
    registry: Arc<HandlerRegistry>,
    cfg: &Config,
) -> anyhow::Result<()> {
    let context = Arc::new(cfg.server_context());

    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                // nothing to answer on, the socket is just dropped
                warn!("Failed to accept connection: {}", e);
                continue;
            }
        };
        debug!("Accepted connection from {}", peer);

        let mut conn = Connection::new(socket, Arc::clone(&registry), Arc::clone(&context));
        tokio::spawn(async move {
            if let Err(e) = conn.run().await {
                error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
