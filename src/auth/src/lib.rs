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

//! VMware Aria Automation clients for Rust - Authentication Components
//!
//! This crate contains types and functions used to authenticate applications
//! with a VMware Aria Automation appliance. The clients consume an
//! implementation of [credentials::Credentials] and use these credentials to
//! authenticate each request issued by the application.
//!
//! The appliance accepts bearer tokens. Applications can provide a token
//! obtained out of band, or a refresh token (sometimes called an API token)
//! which the credentials exchange for a bearer token on first use.

pub mod errors;

/// Types and functions to work with authentication credentials.
pub mod credentials;

/// A `Result` alias where the `Err` case is
/// `vra_auth::errors::CredentialsError`.
pub(crate) type Result<T> = std::result::Result<T, crate::errors::CredentialsError>;
