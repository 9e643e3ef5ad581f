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
use crate::model::{
    BlockDevice, BlockDeviceSpecification, ListProjectsRequest, ProjectList, RequestTracker,
};
use gax::client_builder::Result as BuilderResult;
use gax::polling_backoff_policy::PollingBackoffPolicy;
use gaxi::http::{NoBody, ReqwestClient};
use gaxi::options::ClientConfig;
use std::sync::Arc;

const BLOCK_DEVICES_PATH: &str = "/iaas/api/block-devices";
const PROJECTS_PATH: &str = "/iaas/api/projects";
const REQUEST_TRACKER_PATH: &str = "/iaas/api/request-tracker";

/// Implements [BlockDevices](super::stub::BlockDevices) using a [ReqwestClient].
#[derive(Clone, Debug)]
pub struct BlockDevices {
    inner: ReqwestClient,
}

impl BlockDevices {
    pub async fn new(config: ClientConfig) -> BuilderResult<Self> {
        let inner = ReqwestClient::new(config).await?;
        Ok(Self { inner })
    }

    pub fn polling_backoff_policy(&self) -> Arc<dyn PollingBackoffPolicy> {
        self.inner.get_polling_backoff_policy()
    }
}

#[async_trait::async_trait]
impl super::stub::BlockDevices for BlockDevices {
    async fn create_block_device(&self, req: BlockDeviceSpecification) -> Result<RequestTracker> {
        let builder = self
            .inner
            .builder(reqwest::Method::POST, BLOCK_DEVICES_PATH.to_string());
        self.inner.execute(builder, Some(req)).await
    }

    async fn list_projects(&self, req: ListProjectsRequest) -> Result<ProjectList> {
        let builder = self
            .inner
            .builder(reqwest::Method::GET, PROJECTS_PATH.to_string());
        let builder = req
            .filter
            .iter()
            .fold(builder, |b, v| b.query(&[("$filter", v)]));
        let builder = req
            .select
            .iter()
            .fold(builder, |b, v| b.query(&[("$select", v)]));
        self.inner.execute(builder, None::<NoBody>).await
    }

    async fn get_request_tracker(&self, id: String) -> Result<RequestTracker> {
        let builder = self.inner.builder(
            reqwest::Method::GET,
            format!("{REQUEST_TRACKER_PATH}/{id}"),
        );
        self.inner.execute(builder, None::<NoBody>).await
    }

    async fn get_block_device(&self, locator: String) -> Result<BlockDevice> {
        let builder = self.inner.builder(reqwest::Method::GET, locator);
        self.inner.execute(builder, None::<NoBody>).await
    }
}
