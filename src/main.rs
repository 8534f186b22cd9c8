use tracing::{error, info};

fn fatal(what: &str, e: anyhow::Error) -> ! {
    error!("{what}: {e:#}");
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    homepro::telemetry::init();
    let cfg = homepro::config::Config::load().unwrap_or_else(|e| fatal("configuration error", e));
    let (app, port) = homepro::build_app(cfg).await.unwrap_or_else(|e| fatal("startup error", e));

    let addr = std::net::SocketAddr::from(([0,0,0,0], port));
    info!(%addr, "server starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
