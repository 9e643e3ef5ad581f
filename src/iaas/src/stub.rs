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

//! Traits to mock the clients in this crate.
//!
//! Application developers may need to mock the clients in this library to test
//! how their application works with different (and sometimes hard to trigger)
//! client and service behavior. Such test can define mocks implementing the
//! trait(s) defined in this module, initialize the client with an instance of
//! this mock in their tests, and verify their application responds as expected.

use crate::Result;
use crate::model::{
    BlockDevice, BlockDeviceSpecification, ListProjectsRequest, ProjectList, RequestTracker,
};

/// Defines the trait used to implement [crate::client::BlockDevices].
///
/// Application developers may need to implement this trait to mock
/// `client::BlockDevices`. In other use-cases, application developers only
/// use `client::BlockDevices` and need not be concerned with this trait or
/// its implementations.
#[async_trait::async_trait]
pub trait BlockDevices: std::fmt::Debug + Send + Sync {
    /// Sends `POST /iaas/api/block-devices`.
    async fn create_block_device(&self, req: BlockDeviceSpecification) -> Result<RequestTracker>;

    /// Sends `GET /iaas/api/projects`.
    async fn list_projects(&self, req: ListProjectsRequest) -> Result<ProjectList>;

    /// Sends `GET /iaas/api/request-tracker/{id}`.
    async fn get_request_tracker(&self, id: String) -> Result<RequestTracker>;

    /// Sends `GET` to a resource locator returned in
    /// [RequestTracker::resources].
    async fn get_block_device(&self, locator: String) -> Result<BlockDevice>;
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    mockall::mock! {
        #[derive(Debug)]
        pub(crate) BlockDevices {}
        #[async_trait::async_trait]
        impl BlockDevices for BlockDevices {
            async fn create_block_device(&self, req: BlockDeviceSpecification) -> Result<RequestTracker>;
            async fn list_projects(&self, req: ListProjectsRequest) -> Result<ProjectList>;
            async fn get_request_tracker(&self, id: String) -> Result<RequestTracker>;
            async fn get_block_device(&self, locator: String) -> Result<BlockDevice>;
        }
    }
}
