//! Timeout wrapper for page operations
//!
//! Every browser wait carries an explicit budget so no call can hang a run.

use std::future::Future;
use std::time::Duration;

use super::accessor::PageError;

/// Run `operation` with a hard `budget`, mapping expiry to [`PageError::Timeout`]
pub async fn with_page_timeout<F, T>(
    operation: F,
    budget: Duration,
    operation_name: &str,
) -> Result<T, PageError>
where
    F: Future<Output = Result<T, PageError>>,
{
    match tokio::time::timeout(budget, operation).await {
        Ok(result) => result,
        Err(_) => Err(PageError::Timeout {
            operation: operation_name.to_string(),
            after: budget,
        }),
    }
}
