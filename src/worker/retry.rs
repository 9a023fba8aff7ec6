use std::time::Duration;

/// What to do with a transiently failed delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryStep {
    /// Re-append to the tail with the attempt count incremented.
    Requeue,
    /// Retries exhausted; park in the dead-letter store.
    Bury,
}

/// Fixed-delay retry with a bounded attempt count.
///
/// The backoff is observed by the loop after every failed tick.
/// Permanent failures never consult this policy; they bury immediately.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub backoff: Duration,
    pub max_attempts: u32,
}

impl RetryPolicy {
    pub fn new(backoff: Duration, max_attempts: u32) -> Self {
        Self {
            backoff,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Decide the next step given how many deliveries this payload has
    /// had so far (including the one that just failed).
    pub fn next_step(&self, attempts: u32) -> RetryStep {
        if attempts >= self.max_attempts {
            RetryStep::Bury
        } else {
            RetryStep::Requeue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requeues_until_attempts_exhausted() {
        let policy = RetryPolicy::new(Duration::from_secs(1), 3);
        assert_eq!(policy.next_step(1), RetryStep::Requeue);
        assert_eq!(policy.next_step(2), RetryStep::Requeue);
        assert_eq!(policy.next_step(3), RetryStep::Bury);
        assert_eq!(policy.next_step(4), RetryStep::Bury);
    }

    #[test]
    fn max_attempts_is_at_least_one() {
        let policy = RetryPolicy::new(Duration::from_millis(10), 0);
        assert_eq!(policy.next_step(1), RetryStep::Bury);
    }
}
