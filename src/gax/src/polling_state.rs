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

//! Defines types to query polling policies.

use std::time::Duration;

/// The input into a polling policy query.
///
/// The polling loop provides an instance of this type to the polling backoff
/// policy after each attempt.
///
/// The elapsed time is the sum of the waits between attempts, not the wall
/// clock time. The time spent on the requests themselves is not counted, so a
/// loop with a 5 second interval and a 120 second timeout always makes 24
/// attempts unless the operation completes first.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct PollingState {
    /// The number of times the operation has been polled.
    pub attempt_count: u32,

    /// The accumulated wait time.
    pub elapsed: Duration,
}

impl PollingState {
    /// Update the attempt count, useful in mocks.
    pub fn set_attempt_count<T: Into<u32>>(mut self, v: T) -> Self {
        self.attempt_count = v.into();
        self
    }

    /// Update the accumulated wait time, useful in mocks.
    pub fn set_elapsed<T: Into<Duration>>(mut self, v: T) -> Self {
        self.elapsed = v.into();
        self
    }
}
