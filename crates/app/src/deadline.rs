//! Per-call deadlines for remote lookups.

use std::future::Future;
use std::time::Duration;

use iotfleet_domain::error::{IotFleetError, TimeoutError};

/// Default deadline applied to each remote call made by the services.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(10);

/// Await `call`, failing with [`IotFleetError::Timeout`] once `limit`
/// elapses.
///
/// # Errors
///
/// Returns the error of `call`, or a timeout error naming `operation`.
pub async fn within<T, F>(limit: Duration, operation: &'static str, call: F) -> Result<T, IotFleetError>
where
    F: Future<Output = Result<T, IotFleetError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(TimeoutError {
            operation,
            after_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
        }
        .into()),
    }
}
