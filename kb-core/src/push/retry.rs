use std::future::Future;
use std::time::Duration;

use tracing::*;

use crate::errors::*;
use crate::prelude::*;

/// Fixed-delay, bounded retry: `max_retries + 1` attempts in total, with the same `delay` between
/// each pair of attempts.  No backoff, no jitter.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, delay: Duration) -> RetryPolicy {
        RetryPolicy { max_retries, delay }
    }

    pub fn attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::new(DEFAULT_PUSH_RETRY_COUNT, Duration::from_secs(DEFAULT_PUSH_RETRY_DELAY_SECONDS))
    }
}

#[derive(Debug, Error)]
pub enum PushError {
    // The source is the error from the final attempt, untouched
    #[error("push failed after {attempts} attempt(s)")]
    Exhausted {
        attempts: u32,
        #[source]
        source: anyhow::Error,
    },

    #[error("push cancelled after {attempts} attempt(s)")]
    Cancelled {
        attempts: u32,
        #[source]
        source: anyhow::Error,
    },
}

impl PushError {
    pub fn attempts(&self) -> u32 {
        match self {
            PushError::Exhausted { attempts, .. } | PushError::Cancelled { attempts, .. } => *attempts,
        }
    }

    pub fn last_error(&self) -> &anyhow::Error {
        match self {
            PushError::Exhausted { source, .. } | PushError::Cancelled { source, .. } => source,
        }
    }

    pub fn into_last_error(self) -> anyhow::Error {
        match self {
            PushError::Exhausted { source, .. } | PushError::Cancelled { source, .. } => source,
        }
    }
}

pub async fn push_with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    cancel: &CancellationToken,
    mut push_fn: F,
) -> Result<T, PushError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    let total = policy.attempts();
    let mut attempt = 1;
    loop {
        let err = match push_fn().await {
            Ok(res) => return Ok(res),
            Err(err) => err,
        };

        if attempt >= total {
            return Err(PushError::Exhausted { attempts: attempt, source: err });
        }

        warn!("push attempt {attempt}/{total} failed, will retry in {:?}: {err:#}", policy.delay);
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(PushError::Cancelled { attempts: attempt, source: err }),
            _ = tokio::time::sleep(policy.delay) => (),
        }
        attempt += 1;
    }
}
