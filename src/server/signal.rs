// Signal handling module
//
// SIGTERM and SIGINT stop the accept loop. In-flight transfers finish in
// their own tasks; there is no reload signal, configuration is fixed for
// the process lifetime.

use std::sync::Arc;

use tokio::sync::Notify;

use crate::logger;

/// Start the shutdown signal listener (Unix)
#[cfg(unix)]
pub fn start_signal_handler(shutdown: Arc<Notify>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let (Ok(mut sigterm), Ok(mut sigint)) = (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) else {
            logger::log_error("Failed to register signal handlers");
            return;
        };

        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }

        shutdown.notify_waiters();
    });
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(shutdown: Arc<Notify>) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown.notify_waiters();
        } else {
            logger::log_error("Failed to register Ctrl+C handler");
        }
    });
}
