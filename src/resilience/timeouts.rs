//! Timeout enforcement.
//!
//! Every call to a host is bound to a deadline. A call that misses it is
//! dropped, which aborts the in-flight request, and is reported as
//! [`AttemptError::Timeout`] so the pool treats it like a transport failure.

use std::future::Future;
use std::time::Duration;
use tokio::time;

use crate::error::AttemptError;

/// Run `fut` to completion or fail with [`AttemptError::Timeout`] after `deadline`.
pub async fn with_deadline<F, T>(deadline: Duration, fut: F) -> Result<T, AttemptError>
where
    F: Future<Output = Result<T, AttemptError>>,
{
    match time::timeout(deadline, fut).await {
        Ok(result) => result,
        Err(_) => Err(AttemptError::Timeout(deadline)),
    }
}
