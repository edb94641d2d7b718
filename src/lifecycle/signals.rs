//! OS signal handling.
//!
//! # Responsibilities
//! - Register signal handlers (SIGTERM, SIGINT, SIGHUP)
//! - SIGTERM/SIGINT trigger graceful shutdown
//! - SIGHUP requests a config reload through the watcher's channel
//!
//! # Design Decisions
//! - Failing to install handlers is logged, not fatal: the proxy keeps
//!   serving and can still be stopped by other means

use std::future::Future;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::lifecycle::Shutdown;

/// Why the signal listener returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exit {
    /// SIGINT or SIGTERM arrived.
    Terminate,
    /// Shutdown was triggered elsewhere.
    Stopped,
}

/// Spawn the signal listener task.
pub fn spawn(shutdown: Shutdown, reload: mpsc::UnboundedSender<()>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let listener = listen(shutdown.clone(), reload);
        supervise(listener, &shutdown).await;
    })
}

async fn supervise<F>(listener: F, shutdown: &Shutdown)
where
    F: Future<Output = std::io::Result<Exit>>,
{
    match listener.await {
        Ok(Exit::Terminate) => shutdown.trigger(),
        Ok(Exit::Stopped) => {}
        Err(e) => tracing::error!(error = %e, "Failed to install signal handlers"),
    }
}

#[cfg(unix)]
async fn listen(shutdown: Shutdown, reload: mpsc::UnboundedSender<()>) -> std::io::Result<Exit> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate())?;
    let mut hangup = signal(SignalKind::hangup())?;
    let mut stopped = shutdown.subscribe();

    loop {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                result?;
                tracing::info!("SIGINT received");
                return Ok(Exit::Terminate);
            }
            _ = terminate.recv() => {
                tracing::info!("SIGTERM received");
                return Ok(Exit::Terminate);
            }
            _ = hangup.recv() => {
                tracing::info!("SIGHUP received, reloading configuration");
                let _ = reload.send(());
            }
            _ = stopped.recv() => return Ok(Exit::Stopped),
        }
    }
}

#[cfg(not(unix))]
async fn listen(shutdown: Shutdown, _reload: mpsc::UnboundedSender<()>) -> std::io::Result<Exit> {
    let mut stopped = shutdown.subscribe();
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result?;
            tracing::info!("Ctrl+C received");
            Ok(Exit::Terminate)
        }
        _ = stopped.recv() => Ok(Exit::Stopped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_handler_install_failure_keeps_serving() {
        let shutdown = Shutdown::new();
        let failed = async {
            Err::<Exit, _>(std::io::Error::new(std::io::ErrorKind::Other, "no signals"))
        };
        supervise(failed, &shutdown).await;

        let mut signal = shutdown.subscribe();
        assert!(tokio::time::timeout(Duration::from_millis(50), signal.recv())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_terminate_triggers_shutdown() {
        let shutdown = Shutdown::new();
        supervise(async { Ok(Exit::Terminate) }, &shutdown).await;

        let mut signal = shutdown.subscribe();
        tokio::time::timeout(Duration::from_secs(1), signal.recv())
            .await
            .expect("shutdown should be triggered");
    }

    #[tokio::test]
    async fn test_listener_task_ends_on_external_shutdown() {
        let shutdown = Shutdown::new();
        let (reload, _rx) = mpsc::unbounded_channel();
        let task = spawn(shutdown.clone(), reload);

        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(2), task)
            .await
            .expect("signal task should stop")
            .unwrap();
    }
}
