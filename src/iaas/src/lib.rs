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


//! VMware Aria Automation clients for Rust - IaaS API.
//!
//! This crate contains a client to create block devices using the IaaS API of
//! a VMware Aria Automation appliance. The client resolves project names,
//! submits the creation request, and optionally waits until the request
//! tracker reports that the request finished.
//!
//! # Example
//! ```no_run
//! # use vra_iaas::client::BlockDevices;
//! # use vra_iaas::builder::Creation;
//! # async fn sample() -> anyhow::Result<()> {
//! let client = BlockDevices::builder()
//!     .with_endpoint("https://vra.example.com")
//!     .build()
//!     .await?;
//! let creation = client
//!     .create_block_device()
//!     .set_name("disk1")
//!     .set_capacity_in_gb(10)
//!     .set_project_id("p-123")
//!     .set_confirm(false)
//!     .send()
//!     .await?;
//! println!("{creation:?}");
//! # Ok(()) }
//! ```

pub use gax::Result;
pub use gax::error::Error;

pub mod builder;
pub mod client;
pub mod client_builder;
pub mod model;
pub mod stub;
pub(crate) mod transport;
