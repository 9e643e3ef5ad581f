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

use crate::Result;
use crate::builder::CreateBlockDevice;
use crate::client_builder::ClientBuilder;
use crate::model::{BlockDevice, RequestTracker};
use gax::client_builder::Result as BuilderResult;
use gax::polling_backoff_policy::{FixedInterval, PollingBackoffPolicy};
use std::sync::Arc;

/// Implements a client for the block devices in the VMware Aria Automation
/// IaaS API.
///
/// # Example
/// ```no_run
/// # use vra_iaas::client::BlockDevices;
/// # use vra_iaas::builder::Creation;
/// # async fn sample() -> anyhow::Result<()> {
/// use auth::credentials::access_token;
/// let client = BlockDevices::builder()
///     .with_endpoint("https://vra.example.com")
///     .with_credentials(access_token::Builder::new("my-token").build())
///     .build()
///     .await?;
/// let creation = client
///     .create_block_device()
///     .set_name("disk1")
///     .set_capacity_in_gb(10)
///     .set_project_name("GOLD")
///     .set_confirm(false)
///     .set_wait_for_completion(true)
///     .send()
///     .await?;
/// if let Creation::Completed(disks) = creation {
///     println!("created {disks:?}");
/// }
/// # Ok(()) }
/// ```
///
/// # Configuration
///
/// To configure `BlockDevices` use the `with_*` methods in the type returned
/// by [builder()][BlockDevices::builder]. The endpoint is required, there is
/// no default appliance. Common configuration changes include:
///
/// * [with_credentials()]: by default this client sends no `Authorization`
///   header. Most appliances require credentials.
/// * [with_accept_invalid_certs()]: lab appliances often use self-signed
///   certificates.
///
/// # Pooling and Cloning
///
/// `BlockDevices` holds a connection pool internally, it is advised to
/// create one and then reuse it.  You do not need to wrap `BlockDevices` in
/// an [Rc](std::rc::Rc) or [Arc] to reuse it, because it already uses an `Arc`
/// internally.
///
/// [with_credentials()]: gax::client_builder::ClientBuilder::with_credentials
/// [with_accept_invalid_certs()]: gax::client_builder::ClientBuilder::with_accept_invalid_certs
#[derive(Clone, Debug)]
pub struct BlockDevices {
    inner: Arc<dyn crate::stub::BlockDevices>,
    polling_backoff_policy: Arc<dyn PollingBackoffPolicy>,
}

impl BlockDevices {
    /// Returns a builder for [BlockDevices].
    ///
    /// ```no_run
    /// # async fn sample() -> anyhow::Result<()> {
    /// # use vra_iaas::client::BlockDevices;
    /// let client = BlockDevices::builder()
    ///     .with_endpoint("https://vra.example.com")
    ///     .build()
    ///     .await?;
    /// # Ok(()) }
    /// ```
    pub fn builder() -> ClientBuilder {
        gax::client_builder::internal::new_builder(crate::client_builder::client::Factory)
    }

    /// Creates a new client from the provided stub.
    ///
    /// The most common case for calling this function is in tests mocking the
    /// client's behavior. The client polls at the default interval.
    pub fn from_stub<T>(stub: T) -> Self
    where
        T: crate::stub::BlockDevices + 'static,
    {
        Self {
            inner: Arc::new(stub),
            polling_backoff_policy: Arc::new(FixedInterval::default()),
        }
    }

    pub(crate) async fn new(config: gaxi::options::ClientConfig) -> BuilderResult<Self> {
        let transport = crate::transport::BlockDevices::new(config).await?;
        let polling_backoff_policy = transport.polling_backoff_policy();
        Ok(Self {
            inner: Arc::new(transport),
            polling_backoff_policy,
        })
    }

    /// Creates a block device.
    ///
    /// The returned builder validates its inputs, resolves the project,
    /// asks for confirmation, submits the request and optionally waits for
    /// it to complete. See [CreateBlockDevice] for details.
    pub fn create_block_device(&self) -> CreateBlockDevice {
        CreateBlockDevice::new(self.inner.clone(), self.polling_backoff_policy.clone())
    }

    /// Gets the state of an asynchronous request.
    pub async fn get_request_tracker<T: Into<String>>(&self, id: T) -> Result<RequestTracker> {
        self.inner.get_request_tracker(id.into()).await
    }

    /// Gets a block device from a locator, such as the values in
    /// [RequestTracker::resources].
    pub async fn get_block_device<T: Into<String>>(&self, locator: T) -> Result<BlockDevice> {
        self.inner.get_block_device(locator.into()).await
    }
}
