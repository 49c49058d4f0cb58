//! Bounded retry for one-off startup calls.
//!
//! The poll loop has its own unbounded feed retry; this helper is for calls
//! where the caller must eventually get an answer, such as geocoding the
//! home address. Exhaustion is reported as [`RetryError`] and the caller
//! decides whether that is fatal.

use std::fmt::Display;
use std::time::Duration;

use thiserror::Error;
use tracing::warn;

use crate::shutdown::Sleeper;

/// How a call handles transient failures.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum RetryPolicy {
    /// Single attempt.
    #[default]
    None,

    /// Fixed number of attempts with a constant delay between them.
    Fixed {
        /// Maximum number of attempts (including the initial attempt).
        max_attempts: u32,
        /// Delay between attempts.
        delay: Duration,
    },
}

impl RetryPolicy {
    /// Creates a fixed retry policy.
    ///
    /// # Arguments
    ///
    /// * `max_attempts` - Maximum number of attempts (including initial)
    /// * `delay` - Fixed delay between attempts
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self::Fixed {
            max_attempts,
            delay,
        }
    }

    /// Delay before the retry following failed attempt number `attempt` (1-based).
    ///
    /// `None` once no attempts remain.
    pub fn delay_after(&self, attempt: u32) -> Option<Duration> {
        match self {
            Self::None => None,
            Self::Fixed {
                max_attempts,
                delay,
            } => (attempt < *max_attempts).then_some(*delay),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        match self {
            Self::None => 1,
            Self::Fixed { max_attempts, .. } => (*max_attempts).max(1),
        }
    }
}

/// A retried call that never succeeded.
#[derive(Debug, Error)]
pub enum RetryError<E> {
    /// Every allowed attempt failed.
    #[error("gave up after {attempts} attempt(s): {last}")]
    Exhausted { attempts: u32, last: E },

    /// Shutdown was requested while waiting to retry.
    #[error("interrupted after {attempts} attempt(s): {last}")]
    Interrupted { attempts: u32, last: E },
}

impl<E> RetryError<E> {
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Exhausted { attempts, .. } | Self::Interrupted { attempts, .. } => *attempts,
        }
    }

    /// The error from the final attempt.
    pub fn into_last(self) -> E {
        match self {
            Self::Exhausted { last, .. } | Self::Interrupted { last, .. } => last,
        }
    }
}

/// Run `op` until it succeeds or `policy` runs out of attempts.
///
/// `op` receives the 1-based attempt number. Waits go through `sleeper`, so
/// a shutdown request stops retrying with [`RetryError::Interrupted`].
pub fn retry_with_backoff<T, E, S, F>(
    policy: &RetryPolicy,
    sleeper: &S,
    mut op: F,
) -> Result<T, RetryError<E>>
where
    E: Display,
    S: Sleeper + ?Sized,
    F: FnMut(u32) -> Result<T, E>,
{
    let mut attempt = 1;
    loop {
        let last = match op(attempt) {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };

        let Some(delay) = policy.delay_after(attempt) else {
            return Err(RetryError::Exhausted {
                attempts: attempt,
                last,
            });
        };

        warn!(
            attempt,
            max_attempts = policy.max_attempts(),
            delay_secs = delay.as_secs_f64(),
            error = %last,
            "Attempt failed, retrying"
        );

        if !sleeper.sleep(delay) {
            return Err(RetryError::Interrupted {
                attempts: attempt,
                last,
            });
        }
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shutdown::tests::RecordingSleeper;

    #[test]
    fn test_policy_delays() {
        let policy = RetryPolicy::fixed(3, Duration::from_secs(2));
        assert_eq!(policy.delay_after(1), Some(Duration::from_secs(2)));
        assert_eq!(policy.delay_after(2), Some(Duration::from_secs(2)));
        assert_eq!(policy.delay_after(3), None);
        assert_eq!(policy.max_attempts(), 3);

        assert_eq!(RetryPolicy::None.delay_after(1), None);
        assert_eq!(RetryPolicy::default().max_attempts(), 1);
    }

    #[test]
    fn test_first_success_does_not_sleep() {
        let sleeper = RecordingSleeper::new();
        let policy = RetryPolicy::fixed(3, Duration::from_secs(2));

        let result: Result<u32, RetryError<String>> =
            retry_with_backoff(&policy, &sleeper, |attempt| Ok(attempt));

        assert_eq!(result.unwrap(), 1);
        assert!(sleeper.sleeps().is_empty());
    }

    #[test]
    fn test_succeeds_on_last_attempt() {
        let sleeper = RecordingSleeper::new();
        let policy = RetryPolicy::fixed(3, Duration::from_secs(2));

        let result = retry_with_backoff(&policy, &sleeper, |attempt| {
            if attempt < 3 {
                Err(format!("failure {}", attempt))
            } else {
                Ok("done")
            }
        });

        assert_eq!(result.unwrap(), "done");
        assert_eq!(sleeper.sleeps(), vec![Duration::from_secs(2); 2]);
    }

    #[test]
    fn test_exhausted_carries_last_error() {
        let sleeper = RecordingSleeper::new();
        let policy = RetryPolicy::fixed(3, Duration::from_secs(2));
        let mut calls = 0;

        let result: Result<(), _> = retry_with_backoff(&policy, &sleeper, |attempt| {
            calls += 1;
            Err(format!("failure {}", attempt))
        });

        let err = result.unwrap_err();
        assert!(matches!(err, RetryError::Exhausted { .. }));
        assert_eq!(err.attempts(), 3);
        assert_eq!(err.to_string(), "gave up after 3 attempt(s): failure 3");
        assert_eq!(err.into_last(), "failure 3");
        assert_eq!(calls, 3);
        assert_eq!(sleeper.sleeps().len(), 2);
    }

    #[test]
    fn test_shutdown_interrupts_retry() {
        let sleeper = RecordingSleeper::shutdown_after(1);
        let policy = RetryPolicy::fixed(5, Duration::from_secs(2));
        let mut calls = 0;

        let result: Result<(), _> = retry_with_backoff(&policy, &sleeper, |_| {
            calls += 1;
            Err("down")
        });

        let err = result.unwrap_err();
        assert!(matches!(err, RetryError::Interrupted { attempts: 1, .. }));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_no_retry_policy_tries_once() {
        let sleeper = RecordingSleeper::new();
        let result: Result<(), _> = retry_with_backoff(&RetryPolicy::None, &sleeper, |_| Err("no"));

        assert_eq!(result.unwrap_err().attempts(), 1);
        assert!(sleeper.sleeps().is_empty());
    }
}
