use super::StoreError;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Deadline used when `now + budget` is not representable.
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// Time budget shared by every store call made on behalf of one request (or
/// one startup phase).
///
/// Operations run under [`OpScope::run`] are raced against the scope's
/// deadline and dropped when it passes, so an overrun call is abandoned
/// rather than left running.
#[derive(Debug, Clone, Copy)]
pub struct OpScope {
    budget: Duration,
    deadline: Instant,
}

impl OpScope {
    pub fn new(budget: Duration) -> Self {
        let now = Instant::now();
        Self {
            budget,
            deadline: now
                .checked_add(budget)
                .unwrap_or_else(|| now + FAR_FUTURE),
        }
    }

    pub async fn run<T, F>(&self, operation: &'static str, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match tokio::time::timeout_at(self.deadline, fut).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    operation = operation,
                    budget_ms = self.budget.as_millis() as u64,
                    "Store operation abandoned at deadline"
                );
                Err(StoreError::Unavailable(format!(
                    "{} did not complete within {}ms",
                    operation,
                    self.budget.as_millis()
                )))
            }
        }
    }
}
