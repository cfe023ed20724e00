use docserve::config::Config;
use docserve::handlers;
use docserve::http::registry::HandlerRegistry;
use docserve::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;
    let registry = handlers::register_defaults(HandlerRegistry::new());

    tokio::select! {
        res = server::listener::run(&cfg, registry) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
