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

//! VMware Aria Automation API helpers.
//!
//! This crate contains the types and functions shared by the VMware Aria
//! Automation (vRA) clients in this workspace: the error type returned by all
//! requests, the client configuration, and the fixed-interval polling loop
//! used to wait for asynchronous requests.

/// An alias of [std::result::Result] where the error is always [crate::error::Error].
///
/// This is the result type used by all functions wrapping REST calls.
pub type Result<T> = std::result::Result<T, crate::error::Error>;

/// The core error types used by the clients.
pub mod error;

/// Types to configure and build clients.
pub mod client_builder;

pub mod poll_loop;
pub mod polling_backoff_policy;
pub mod polling_state;
