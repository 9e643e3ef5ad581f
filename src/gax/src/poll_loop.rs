// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Implements a polling loop with a fixed time budget.
//!
//! Asynchronous operations in the IaaS API return a request id. The client
//! polls the request tracker with that id until the request finishes, or until
//! the application's patience runs out.
//!
//! The loop always queries at least once. After each attempt that does not
//! satisfy the predicate it waits for the period returned by the backoff
//! policy, adds that period to the elapsed time, and stops once the elapsed
//! time reaches or exceeds the timeout. Running out of time is not an error,
//! the loop returns [PollOutcome::TimedOut] and the caller decides.
//!
//! Errors returned by the query stop the loop immediately, they are never
//! retried.
//!
//! A backoff policy returning a zero wait period would never consume the time
//! budget. The loop rejects such policies with a binding error after the first
//! attempt that does not satisfy the predicate.

use crate::Result;
use crate::error::Error;
use crate::polling_backoff_policy::PollingBackoffPolicy;
use crate::polling_state::PollingState;
use std::future::Future;
use std::time::Duration;

/// The result of a polling loop that did not fail.
#[derive(Clone, Debug, PartialEq)]
pub enum PollOutcome<T> {
    /// The predicate was satisfied by this value.
    Ready(T),
    /// The time budget was exhausted before the predicate was satisfied.
    TimedOut(PollingState),
}

impl<T> PollOutcome<T> {
    /// Returns the value if the loop completed.
    pub fn ready(self) -> Option<T> {
        match self {
            Self::Ready(v) => Some(v),
            Self::TimedOut(_) => None,
        }
    }

    pub fn is_timed_out(&self) -> bool {
        matches!(self, Self::TimedOut(_))
    }
}

/// Polls `query` until `predicate` returns true or `timeout` is exhausted.
///
/// # Parameters
/// * `backoff` - determines how long to wait between attempts.
/// * `timeout` - the total wait budget.
/// * `query` - makes one attempt.
/// * `predicate` - returns true when the value is final.
/// * `sleep` - waits for the given duration. Applications typically use
///   `tokio::time::sleep`, tests may inject a function that returns
///   immediately.
///
/// # Example
/// ```
/// # use vra_gax::poll_loop::*;
/// # use vra_gax::polling_backoff_policy::FixedInterval;
/// # use std::time::Duration;
/// # tokio_test::block_on(async {
/// let mut count = 0;
/// let outcome = poll_until(
///     &FixedInterval::new(Duration::from_millis(1)),
///     Duration::from_secs(1),
///     || { count += 1; let v = count; async move { Ok(v) } },
///     |v: &i32| *v == 3,
///     |d| tokio::time::sleep(d),
/// ).await?;
/// assert_eq!(outcome, PollOutcome::Ready(3));
/// # vra_gax::Result::<()>::Ok(()) });
/// ```
pub async fn poll_until<T, Q, QF, P, S, SF>(
    backoff: &dyn PollingBackoffPolicy,
    timeout: Duration,
    mut query: Q,
    predicate: P,
    sleep: S,
) -> Result<PollOutcome<T>>
where
    Q: FnMut() -> QF,
    QF: Future<Output = Result<T>>,
    P: Fn(&T) -> bool,
    S: Fn(Duration) -> SF,
    SF: Future<Output = ()>,
{
    let mut state = PollingState::default();
    loop {
        state.attempt_count += 1;
        let value = query().await?;
        if predicate(&value) {
            tracing::debug!(attempt_count = state.attempt_count, "polling loop completed");
            return Ok(PollOutcome::Ready(value));
        }
        let wait = backoff.wait_period(&state);
        if wait.is_zero() {
            return Err(Error::binding(
                "the polling backoff policy returned a zero wait period",
            ));
        }
        tracing::debug!(
            attempt_count = state.attempt_count,
            elapsed = ?state.elapsed,
            ?wait,
            "operation in progress, waiting before the next attempt"
        );
        sleep(wait).await;
        state.elapsed += wait;
        if state.elapsed >= timeout {
            return Ok(PollOutcome::TimedOut(state));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polling_backoff_policy::FixedInterval;
    use std::sync::{Arc, Mutex};

    type TestResult = anyhow::Result<()>;

    fn recording_sleep(
        record: Arc<Mutex<Vec<Duration>>>,
    ) -> impl Fn(Duration) -> std::future::Ready<()> {
        move |d| {
            record.lock().expect("sleep record is never poisoned").push(d);
            std::future::ready(())
        }
    }

    #[tokio::test]
    async fn immediate_success() -> TestResult {
        let sleeps = Arc::new(Mutex::new(Vec::new()));
        let outcome = poll_until(
            &FixedInterval::default(),
            Duration::from_secs(120),
            || async { Ok("FINISHED") },
            |s| *s == "FINISHED",
            recording_sleep(sleeps.clone()),
        )
        .await?;
        assert_eq!(outcome, PollOutcome::Ready("FINISHED"));
        assert!(sleeps.lock().unwrap().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn success_after_waiting() -> TestResult {
        let sleeps = Arc::new(Mutex::new(Vec::new()));
        let mut responses = vec!["INPROGRESS", "INPROGRESS", "FINISHED"].into_iter();
        let outcome = poll_until(
            &FixedInterval::default(),
            Duration::from_secs(120),
            || {
                let r = responses.next();
                async move { r.ok_or_else(|| Error::binding("too many polls")) }
            },
            |s| *s == "FINISHED",
            recording_sleep(sleeps.clone()),
        )
        .await?;
        assert_eq!(outcome, PollOutcome::Ready("FINISHED"));
        assert_eq!(
            *sleeps.lock().unwrap(),
            vec![Duration::from_secs(5), Duration::from_secs(5)]
        );
        Ok(())
    }

    #[tokio::test]
    async fn timeout_is_not_an_error() -> TestResult {
        let sleeps = Arc::new(Mutex::new(Vec::new()));
        let mut count = 0_u32;
        let outcome = poll_until(
            &FixedInterval::default(),
            Duration::from_secs(120),
            || {
                count += 1;
                async { Ok("INPROGRESS") }
            },
            |s| *s == "FINISHED",
            recording_sleep(sleeps.clone()),
        )
        .await?;
        assert!(outcome.is_timed_out(), "{outcome:?}");
        let want = PollingState::default()
            .set_attempt_count(24_u32)
            .set_elapsed(Duration::from_secs(120));
        assert_eq!(outcome, PollOutcome::TimedOut(want));
        assert_eq!(count, 24);
        assert_eq!(sleeps.lock().unwrap().len(), 24);
        Ok(())
    }

    #[tokio::test]
    async fn timeout_not_multiple_of_interval() -> TestResult {
        let mut count = 0_u32;
        let outcome = poll_until(
            &FixedInterval::default(),
            Duration::from_secs(12),
            || {
                count += 1;
                async { Ok(()) }
            },
            |_| false,
            |_| std::future::ready(()),
        )
        .await?;
        // Waits at 5s and 10s are below the budget, the wait at 15s is not.
        assert_eq!(count, 3);
        assert!(outcome.ready().is_none());
        Ok(())
    }

    #[tokio::test]
    async fn zero_timeout_polls_once() -> TestResult {
        let mut count = 0_u32;
        let outcome = poll_until(
            &FixedInterval::default(),
            Duration::ZERO,
            || {
                count += 1;
                async { Ok(()) }
            },
            |_| false,
            |_| std::future::ready(()),
        )
        .await?;
        assert_eq!(count, 1);
        assert!(outcome.is_timed_out(), "{outcome:?}");
        Ok(())
    }

    #[tokio::test]
    async fn zero_interval_is_rejected() -> TestResult {
        let mut count = 0_u32;
        let result = tokio::time::timeout(
            Duration::from_secs(2),
            poll_until(
                &FixedInterval::new(Duration::ZERO),
                Duration::from_secs(1),
                || {
                    count += 1;
                    async { Ok(()) }
                },
                |_| false,
                |_| tokio::task::yield_now(),
            ),
        )
        .await?;
        assert!(matches!(&result, Err(e) if e.is_binding()), "{result:?}");
        assert_eq!(count, 1);
        Ok(())
    }

    #[tokio::test]
    async fn zero_interval_immediate_success() -> TestResult {
        let outcome = poll_until(
            &FixedInterval::new(Duration::ZERO),
            Duration::from_secs(1),
            || async { Ok("FINISHED") },
            |s| *s == "FINISHED",
            |_| std::future::ready(()),
        )
        .await?;
        assert_eq!(outcome, PollOutcome::Ready("FINISHED"));
        Ok(())
    }

    #[tokio::test]
    async fn query_error_stops_the_loop() -> TestResult {
        let mut count = 0_u32;
        let result = poll_until(
            &FixedInterval::default(),
            Duration::from_secs(120),
            || {
                count += 1;
                let c = count;
                async move {
                    if c == 2 {
                        Err(Error::io("connection reset"))
                    } else {
                        Ok(c)
                    }
                }
            },
            |_| false,
            |_| std::future::ready(()),
        )
        .await;
        assert!(matches!(&result, Err(e) if e.is_io()), "{result:?}");
        assert_eq!(count, 2);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn with_tokio_sleep() -> TestResult {
        let start = tokio::time::Instant::now();
        let outcome = poll_until(
            &FixedInterval::default(),
            Duration::from_secs(20),
            || async { Ok(()) },
            |_| false,
            |d| tokio::time::sleep(d),
        )
        .await?;
        assert!(outcome.is_timed_out(), "{outcome:?}");
        assert!(start.elapsed() >= Duration::from_secs(20), "{:?}", start.elapsed());
        Ok(())
    }
}
