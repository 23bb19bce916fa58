//! Retrying Probe Gate

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio::time;
use tracing::{info, warn};

/// Run `probe` until it succeeds, waiting `delay` between attempts.
///
/// A probe failure is never fatal here: each one is logged with its
/// classification and retried after the fixed delay, with no attempt
/// bound and no backoff. Readiness is signaled exactly once, by
/// returning the first success value; anything sequenced after the call
/// starts only when the probed dependency is actually reachable.
pub async fn ensure_ready<T, E, F, Fut>(mut probe: F, delay: Duration) -> T
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut attempt: u64 = 1;
    loop {
        match probe().await {
            Ok(value) => {
                if attempt > 1 {
                    info!(attempt, "probe succeeded after retries");
                }
                return value;
            }
            Err(err) => {
                warn!(
                    attempt,
                    error = %err,
                    retry_in_secs = delay.as_secs(),
                    "probe failed, will retry"
                );
                time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
