//! Graceful shutdown handling.

use log::warn;
use tokio_util::sync::CancellationToken;

/// Logged when Ctrl-C cancels the run.
const INTERRUPT_NOTICE: &str = "Interrupted, stopping verifications and writing completed results";

/// Cancels `run` on the first Ctrl-C; exits quietly once `shutdown` fires.
///
/// Canceling the umbrella token stops the producer, interrupts every
/// in-flight stage and lets the pool return the records completed so far.
pub fn spawn_interrupt_handler(
    run: CancellationToken,
    shutdown: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            _ = shutdown.cancelled() => {}
            res = tokio::signal::ctrl_c() => match res {
                Ok(()) => {
                    warn!("{INTERRUPT_NOTICE}");
                    run.cancel();
                }
                Err(e) => warn!("Failed to listen for Ctrl-C: {e}"),
            },
        }
    })
}

/// Signals the background tasks to stop and waits for them to exit.
pub async fn shutdown_gracefully(
    shutdown: CancellationToken,
    tasks: impl IntoIterator<Item = tokio::task::JoinHandle<()>>,
) {
    shutdown.cancel();
    for task in tasks {
        let _ = task.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_shutdown_stops_handler_without_canceling_run() {
        let run = CancellationToken::new();
        let shutdown = CancellationToken::new();
        let handler = spawn_interrupt_handler(run.clone(), shutdown.clone());

        shutdown_gracefully(shutdown, [handler]).await;

        assert!(!run.is_cancelled());
    }

    #[test]
    fn test_interrupt_notice_describes_early_stop() {
        assert!(INTERRUPT_NOTICE.contains("stopping verifications"));
        assert!(INTERRUPT_NOTICE.contains("completed results"));
        assert!(!INTERRUPT_NOTICE.contains("finishing"));
    }
}
