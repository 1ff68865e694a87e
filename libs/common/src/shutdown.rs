//! Graceful shutdown utilities

use std::fmt;
use tracing::{info, warn};

/// Which signal ended the serve loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    CtrlC,
    Terminate,
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownSignal::CtrlC => write!(f, "Ctrl+C"),
            ShutdownSignal::Terminate => write!(f, "SIGTERM"),
        }
    }
}

/// Resolve once Ctrl+C (or SIGTERM on Unix) arrives
///
/// A failed SIGTERM registration degrades to Ctrl+C only.
pub async fn shutdown_signal() -> ShutdownSignal {
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            },
            Err(e) => {
                warn!("SIGTERM handler unavailable ({}), only Ctrl+C will stop the service", e);
                std::future::pending::<()>().await;
            },
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let received = tokio::select! {
        _ = tokio::signal::ctrl_c() => ShutdownSignal::CtrlC,
        _ = terminate => ShutdownSignal::Terminate,
    };
    info!("Shutdown signal received: {}", received);
    received
}

/// Unit-returning wrapper for `with_graceful_shutdown`
///
/// ```ignore
/// axum::serve(listener, app)
///     .with_graceful_shutdown(common::shutdown::wait_for_shutdown())
///     .await?;
/// ```
pub async fn wait_for_shutdown() {
    shutdown_signal().await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_display() {
        assert_eq!(ShutdownSignal::CtrlC.to_string(), "Ctrl+C");
        assert_eq!(ShutdownSignal::Terminate.to_string(), "SIGTERM");
    }
}
