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

//! Types to construct [BlockDevices](crate::client::BlockDevices) clients.

use crate::client::BlockDevices;
use gax::client_builder::Result as BuilderResult;

/// A builder for [BlockDevices].
///
/// ```no_run
/// # use vra_iaas::client::BlockDevices;
/// # async fn sample() -> anyhow::Result<()> {
/// let builder: vra_iaas::client_builder::ClientBuilder = BlockDevices::builder();
/// let client = builder
///     .with_endpoint("https://vra.example.com")
///     .build()
///     .await?;
/// # Ok(()) }
/// ```
pub type ClientBuilder =
    gax::client_builder::ClientBuilder<client::Factory, auth::credentials::Credentials>;

pub(crate) mod client {
    use super::*;

    pub struct Factory;
    impl gax::client_builder::internal::ClientFactory for Factory {
        type Client = BlockDevices;
        type Credentials = auth::credentials::Credentials;
        async fn build(self, config: gaxi::options::ClientConfig) -> BuilderResult<Self::Client> {
            Self::Client::new(config).await
        }
    }
}
