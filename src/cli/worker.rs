//! Foreground worker entrypoint.

use tokio::signal;
use tracing::info;

use crate::app::Services;
use crate::config::Config;
use crate::error::Result;

/// Ctrl-C aborts the select, which can cancel the loop at an await
/// point mid-tick (oracle call, backoff sleep). The store transaction
/// is synchronous, so a cancelled tick cannot leave a partial commit;
/// at worst the in-flight delivery is lost, the same window as a crash
/// between dequeue and requeue.
pub async fn run(config: &Config, services: &Services) -> Result<()> {
    let worker = services.worker(config);

    tokio::select! {
        _ = worker.run() => {}
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("Worker stopped");
    Ok(())
}
