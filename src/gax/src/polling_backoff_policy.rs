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

//! Defines the trait for polling backoff policies and a common implementation.
//!
//! The clients can poll asynchronous requests until completion. When doing so
//! they wait between attempts to avoid overloading the appliance.
//!
//! The IaaS API request tracker is polled at a fixed interval, the default is
//! 5 seconds. Applications may configure a different interval, or provide
//! their own implementation of [PollingBackoffPolicy].
//!
//! # Example
//! ```
//! # use vra_gax::polling_backoff_policy::*;
//! # use vra_gax::polling_state::PollingState;
//! use std::time::Duration;
//! let policy = FixedInterval::new(Duration::from_secs(2));
//! assert_eq!(policy.wait_period(&PollingState::default()), Duration::from_secs(2));
//! ```

use crate::polling_state::PollingState;
use std::sync::Arc;
use std::time::Duration;

/// The default interval between polling attempts.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// Defines the trait implemented by all polling backoff strategies.
pub trait PollingBackoffPolicy: Send + Sync + std::fmt::Debug {
    /// Returns the wait period before the next attempt.
    ///
    /// # Parameters
    /// * `state` - the number of attempts so far and the accumulated wait.
    ///   This method is always called after the first attempt.
    fn wait_period(&self, state: &PollingState) -> Duration;
}

/// A helper type to use [PollingBackoffPolicy] in client options.
#[derive(Clone, Debug)]
pub struct PollingBackoffPolicyArg(pub(crate) Arc<dyn PollingBackoffPolicy>);

impl<T: PollingBackoffPolicy + 'static> std::convert::From<T> for PollingBackoffPolicyArg {
    fn from(value: T) -> Self {
        Self(Arc::new(value))
    }
}

impl std::convert::From<Arc<dyn PollingBackoffPolicy>> for PollingBackoffPolicyArg {
    fn from(value: Arc<dyn PollingBackoffPolicy>) -> Self {
        Self(value)
    }
}

impl From<PollingBackoffPolicyArg> for Arc<dyn PollingBackoffPolicy> {
    fn from(value: PollingBackoffPolicyArg) -> Self {
        value.0
    }
}

/// Waits the same amount of time between all attempts.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedInterval {
    interval: Duration,
}

impl FixedInterval {
    /// Creates a policy waiting `interval` between attempts.
    ///
    /// The interval must be greater than zero, the polling loop rejects
    /// policies that do not wait.
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// The configured interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl std::default::Default for FixedInterval {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

impl PollingBackoffPolicy for FixedInterval {
    fn wait_period(&self, _state: &PollingState) -> Duration {
        self.interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_interval_default() {
        let policy = FixedInterval::default();
        assert_eq!(policy.interval(), Duration::from_secs(5));
    }

    #[test]
    fn fixed_interval_ignores_state() {
        let policy = FixedInterval::new(Duration::from_millis(250));
        for count in [1_u32, 2, 10, 100] {
            let state = PollingState::default()
                .set_attempt_count(count)
                .set_elapsed(Duration::from_secs(count as u64));
            assert_eq!(policy.wait_period(&state), Duration::from_millis(250));
        }
    }

    // Verify `PollingBackoffPolicyArg` can be converted from the desired types.
    #[test]
    fn polling_backoff_policy_arg() {
        let _ = PollingBackoffPolicyArg::from(FixedInterval::default());

        let policy: Arc<dyn PollingBackoffPolicy> = Arc::new(FixedInterval::default());
        let arg = PollingBackoffPolicyArg::from(policy);
        let got: Arc<dyn PollingBackoffPolicy> = arg.into();
        assert_eq!(got.wait_period(&PollingState::default()), DEFAULT_INTERVAL);
    }
}
