//! Server lifecycle with a bounded graceful shutdown

use std::{future::Future, time::Duration};

use axum::Router;
use tokio::{net::TcpListener, sync::oneshot};
use tracing::{info, warn};

/// How the server stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// Every in-flight request finished before the deadline
    Drained,
    /// The deadline passed and remaining connections were dropped
    TimedOut,
}

/// Serve `app` until `signal` resolves, then drain for at most `deadline`
///
/// Requests still running when the deadline passes are abandoned.
pub async fn serve_with_deadline<F>(
    listener: TcpListener,
    app: Router,
    signal: F,
    deadline: Duration,
) -> std::io::Result<ShutdownOutcome>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (signalled_tx, signalled_rx) = oneshot::channel::<()>();

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            signal.await;
            let _ = signalled_tx.send(());
        })
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => return result.map(|()| ShutdownOutcome::Drained),
        _ = signalled_rx => {},
    }

    info!("Waiting up to {:?} for connections to close...", deadline);

    match tokio::time::timeout(deadline, server).await {
        Ok(result) => result.map(|()| ShutdownOutcome::Drained),
        Err(_) => {
            warn!(
                timeout_secs = deadline.as_secs_f64(),
                "Shutdown timeout elapsed, dropping open connections"
            );
            Ok(ShutdownOutcome::TimedOut)
        },
    }
}
