use std::future::Future;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_ATTEMPTS: u32 = 3;
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(300);

/// Retries a connection-establishment call a bounded number of times with
/// doubling delay, returning the last error once the attempts are spent.
///
/// Callers treat a still-failed connection as "service temporarily
/// unavailable" and degrade instead of crashing.
pub async fn connect_with_retry<T, E, F, Fut>(
    target: &str,
    attempts: u32,
    base_delay: Duration,
    connect: F,
) -> std::result::Result<T, E>
where
    E: std::fmt::Display,
    F: Fn() -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
{
    let attempts = attempts.max(1);
    let mut delay = base_delay;

    for attempt in 1..=attempts {
        match connect().await {
            Ok(conn) => return Ok(conn),
            Err(err) if attempt < attempts => {
                warn!(
                    target,
                    attempt,
                    attempts,
                    error = %err,
                    "connection failed, retrying in {:?}",
                    delay
                );
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
            Err(err) => return Err(err),
        }
    }
    unreachable!("loop returns on the final attempt")
}
