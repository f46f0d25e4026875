use std::sync::Arc;

use tokio::sync::Notify;

use pkgserve::config::{AppState, Config};
use pkgserve::logger;
use pkgserve::server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    logger::init(&cfg)?;

    let addr = cfg.socket_addr()?;
    // Root resolution and listener bind are fatal: the service never
    // starts serving without both.
    let state = Arc::new(AppState::new(cfg)?);
    let listener = server::bind_listener(addr)?;

    logger::log_server_start(&addr, &state);

    let shutdown = Arc::new(Notify::new());
    server::signal::start_signal_handler(Arc::clone(&shutdown));
    server::run_accept_loop(listener, state, shutdown).await;

    Ok(())
}
