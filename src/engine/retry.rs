//! engine::retry
//!
//! Bounded retry for transient repository failures.
//!
//! A [`RetryPolicy`] holds the attempt budget, the pause between attempts
//! and a predicate picking which errors are worth another attempt. The
//! decision ([`RetryPolicy::delay_after`]) is separate from the sleeping, so
//! a caller with its own timer can drive the policy itself. [`RetryPolicy::run`]
//! blocks with `std::thread::sleep`; [`RetryPolicy::run_with`] takes the sleep
//! function as an argument.
//!
//! # Example
//!
//! ```
//! use repolens::engine::retry::RetryPolicy;
//! use repolens::git::GitError;
//! use std::time::Duration;
//!
//! let policy = RetryPolicy::on_lock(3, Duration::from_millis(500));
//! let mut pauses = Vec::new();
//!
//! let result = policy.run_with(
//!     |d| pauses.push(d),
//!     |attempt| {
//!         if attempt < 2 {
//!             Err(GitError::Locked { message: "index.lock".into() })
//!         } else {
//!             Ok(attempt)
//!         }
//!     },
//! );
//!
//! assert_eq!(result.unwrap(), 2);
//! assert_eq!(pauses, vec![Duration::from_millis(500)]);
//! ```

use std::fmt;
use std::time::Duration;

use crate::core::config::Config;
use crate::git::GitError;

/// The error that ended a retried operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryError<E> {
    /// Attempts made, including the failing one
    pub attempts: u32,
    /// Error of the last attempt
    pub source: E,
}

/// Bounded retry with a fixed interval.
pub struct RetryPolicy<E> {
    max_attempts: u32,
    interval: Duration,
    retryable: fn(&E) -> bool,
}

impl<E> RetryPolicy<E> {
    /// A policy making at most `max_attempts` attempts (at least one).
    pub fn new(max_attempts: u32, interval: Duration, retryable: fn(&E) -> bool) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            interval,
            retryable,
        }
    }

    /// A policy that makes exactly one attempt.
    pub fn never() -> Self {
        Self::new(1, Duration::ZERO, |_| false)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Pause before the next attempt, or `None` to stop.
    ///
    /// `attempt` is the 1-based number of the attempt that just failed.
    pub fn delay_after(&self, attempt: u32, err: &E) -> Option<Duration> {
        (attempt < self.max_attempts && (self.retryable)(err)).then_some(self.interval)
    }

    /// Run `op` under this policy, sleeping on the current thread.
    pub fn run<T>(&self, op: impl FnMut(u32) -> Result<T, E>) -> Result<T, RetryError<E>> {
        self.run_with(std::thread::sleep, op)
    }

    /// Run `op` under this policy, pausing through `sleep`.
    ///
    /// `op` receives the 1-based attempt number.
    pub fn run_with<T>(
        &self,
        mut sleep: impl FnMut(Duration),
        mut op: impl FnMut(u32) -> Result<T, E>,
    ) -> Result<T, RetryError<E>> {
        let mut attempt = 1;
        loop {
            match op(attempt) {
                Ok(value) => return Ok(value),
                Err(err) => match self.delay_after(attempt, &err) {
                    Some(delay) => {
                        sleep(delay);
                        attempt += 1;
                    }
                    None => {
                        return Err(RetryError {
                            attempts: attempt,
                            source: err,
                        })
                    }
                },
            }
        }
    }
}

impl RetryPolicy<GitError> {
    /// Retry only while the repository is locked.
    pub fn on_lock(max_attempts: u32, interval: Duration) -> Self {
        Self::new(max_attempts, interval, GitError::is_locked)
    }

    /// The lock retry policy configured in `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::on_lock(config.max_read_attempts(), config.read_retry_interval())
    }
}

impl Default for RetryPolicy<GitError> {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl<E> Clone for RetryPolicy<E> {
    fn clone(&self) -> Self {
        Self {
            max_attempts: self.max_attempts,
            interval: self.interval,
            retryable: self.retryable,
        }
    }
}

impl<E> fmt::Debug for RetryPolicy<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_attempts", &self.max_attempts)
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}
