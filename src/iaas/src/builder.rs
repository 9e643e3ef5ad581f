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

//! Request builders for [BlockDevices](crate::client::BlockDevices).

use crate::Result;
use crate::model::{
    BlockDeviceSpecification, CompletedDisk, ListProjectsRequest, RequestTracker,
    SubmittedOperation,
};
use crate::stub::BlockDevices as Stub;
use gax::error::Error;
use gax::error::api::ApiError;
use gax::poll_loop::{PollOutcome, poll_until};
use gax::polling_backoff_policy::{PollingBackoffPolicy, PollingBackoffPolicyArg};
use std::sync::Arc;
use std::time::Duration;

/// The default time budget to wait for a creation request.
pub const DEFAULT_COMPLETION_TIMEOUT: Duration = Duration::from_secs(120);

const CONFIRM_ACTION: &str = "Create block device";

/// Identifies the project owning a new block device.
#[derive(Clone, Debug, PartialEq)]
pub enum ProjectSelector {
    /// The project id, used verbatim.
    Id(String),
    /// The project name, resolved to an id before the block device is
    /// created.
    Name(String),
}

/// Asks the user to confirm a state-changing operation.
///
/// Command line tools implement this trait with an interactive prompt.
pub trait Confirm: std::fmt::Debug + Send + Sync {
    /// Returns true if `action` on `target` should proceed.
    fn confirm(&self, target: &str, action: &str) -> bool;
}

/// A [Confirm] implementation that declines all operations.
///
/// This is the default prompt. Applications that do not want confirmation
/// should call [CreateBlockDevice::set_confirm] with `false`.
#[derive(Clone, Debug, Default)]
pub struct NonInteractive;

impl Confirm for NonInteractive {
    fn confirm(&self, target: &str, action: &str) -> bool {
        tracing::debug!(resource = target, operation = action, "no interactive prompt, declining");
        false
    }
}

/// The result of [CreateBlockDevice::send].
#[derive(Clone, Debug, PartialEq)]
pub enum Creation {
    /// The confirmation prompt declined the operation. No request was sent.
    Declined,
    /// The request was submitted, and the application did not wait for it.
    Submitted(SubmittedOperation),
    /// The request finished, one record per created resource.
    Completed(Vec<CompletedDisk>),
    /// The request did not finish before the completion timeout.
    ///
    /// This is not an error. The request may still complete, use the
    /// `request_id` to query its state.
    TimedOut { request_id: String },
}

/// The request builder for [BlockDevices::create_block_device][crate::client::BlockDevices::create_block_device].
///
/// # Example
/// ```no_run
/// # use vra_iaas::client::BlockDevices;
/// # use vra_iaas::builder::{Creation, ProjectSelector};
/// # async fn sample(client: &BlockDevices) -> anyhow::Result<()> {
/// let creation = client
///     .create_block_device()
///     .set_name("disk1")
///     .set_capacity_in_gb(10)
///     .set_project(ProjectSelector::Id("p-123".into()))
///     .set_confirm(false)
///     .send()
///     .await?;
/// if let Creation::Submitted(operation) = creation {
///     println!("request id = {}", operation.id);
/// }
/// # Ok(()) }
/// ```
#[derive(Clone, Debug)]
pub struct CreateBlockDevice {
    stub: Arc<dyn Stub>,
    polling_backoff_policy: Arc<dyn PollingBackoffPolicy>,
    name: String,
    capacity_in_gb: i32,
    project: Option<ProjectSelector>,
    description: Option<String>,
    persistent: bool,
    encrypted: bool,
    wait_for_completion: bool,
    completion_timeout: Duration,
    confirm: bool,
    prompt: Arc<dyn Confirm>,
}

impl CreateBlockDevice {
    pub(crate) fn new(
        stub: Arc<dyn Stub>,
        polling_backoff_policy: Arc<dyn PollingBackoffPolicy>,
    ) -> Self {
        Self {
            stub,
            polling_backoff_policy,
            name: String::new(),
            capacity_in_gb: 0,
            project: None,
            description: None,
            persistent: false,
            encrypted: false,
            wait_for_completion: false,
            completion_timeout: DEFAULT_COMPLETION_TIMEOUT,
            confirm: true,
            prompt: Arc::new(NonInteractive),
        }
    }

    /// Sets the block device name. Required.
    pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
        self.name = v.into();
        self
    }

    /// Sets the capacity in GB. Required, must be greater than zero.
    pub fn set_capacity_in_gb<T: Into<i32>>(mut self, v: T) -> Self {
        self.capacity_in_gb = v.into();
        self
    }

    /// Sets the project owning the block device. Required.
    pub fn set_project(mut self, v: ProjectSelector) -> Self {
        self.project = Some(v);
        self
    }

    /// Sets the project by id, replacing any previous project selection.
    pub fn set_project_id<T: Into<String>>(self, v: T) -> Self {
        self.set_project(ProjectSelector::Id(v.into()))
    }

    /// Sets the project by name, replacing any previous project selection.
    pub fn set_project_name<T: Into<String>>(self, v: T) -> Self {
        self.set_project(ProjectSelector::Name(v.into()))
    }

    /// Sets the description. The request sends an empty description if unset.
    pub fn set_description<T: Into<String>>(mut self, v: T) -> Self {
        self.description = Some(v.into());
        self
    }

    /// Sets or clears the description.
    pub fn set_or_clear_description<T: Into<String>>(mut self, v: Option<T>) -> Self {
        self.description = v.map(|x| x.into());
        self
    }

    /// If true, the block device outlives the machine it is attached to.
    pub fn set_persistent(mut self, v: bool) -> Self {
        self.persistent = v;
        self
    }

    /// If true, the block device is encrypted.
    pub fn set_encrypted(mut self, v: bool) -> Self {
        self.encrypted = v;
        self
    }

    /// If true, [send][Self::send] waits until the request finishes.
    pub fn set_wait_for_completion(mut self, v: bool) -> Self {
        self.wait_for_completion = v;
        self
    }

    /// The time budget to wait for the request, the default is 120 seconds.
    ///
    /// The budget is consumed by the waits between polling attempts, the
    /// time spent in the requests themselves is not counted.
    pub fn set_completion_timeout(mut self, v: Duration) -> Self {
        self.completion_timeout = v;
        self
    }

    /// If false, the request is submitted without calling the prompt.
    ///
    /// The default is true.
    pub fn set_confirm(mut self, v: bool) -> Self {
        self.confirm = v;
        self
    }

    /// Sets the confirmation prompt, the default declines all requests.
    pub fn set_prompt<T: Confirm + 'static>(mut self, v: T) -> Self {
        self.prompt = Arc::new(v);
        self
    }

    /// Overrides the client's polling backoff policy for this request.
    pub fn with_polling_backoff_policy<V: Into<PollingBackoffPolicyArg>>(mut self, v: V) -> Self {
        let arg: PollingBackoffPolicyArg = v.into();
        self.polling_backoff_policy = arg.into();
        self
    }

    /// Sends the request.
    ///
    /// The steps run in order, and each step completes before the next one
    /// starts:
    /// 1. validate the inputs, without any network calls,
    /// 2. resolve the project name, if needed,
    /// 3. ask for confirmation, if enabled,
    /// 4. submit the creation request,
    /// 5. if configured, poll the request tracker and fetch the created
    ///    resources.
    pub async fn send(self) -> Result<Creation> {
        let project = self.validate()?;
        let project_id = self.resolve_project(project).await?;
        let spec = BlockDeviceSpecification::new()
            .set_capacity_in_gb(self.capacity_in_gb)
            .set_encrypted(self.encrypted)
            .set_name(self.name.clone())
            .set_description(self.description.clone().unwrap_or_default())
            .set_persistent(self.persistent)
            .set_project_id(project_id);
        let payload = serde_json::to_string(&spec).map_err(Error::ser)?;
        tracing::debug!(%payload, "block device creation payload");

        if self.confirm && !self.prompt.confirm(&spec.name, CONFIRM_ACTION) {
            tracing::info!(name = %spec.name, "block device creation declined");
            return Ok(Creation::Declined);
        }

        let tracker = self.stub.create_block_device(spec).await?;
        tracing::info!(request_id = %tracker.id, status = %tracker.status, "block device creation submitted");
        if !self.wait_for_completion {
            return Ok(Creation::Submitted(SubmittedOperation::from(tracker)));
        }
        self.wait(tracker.id).await
    }

    fn validate(&self) -> Result<&ProjectSelector> {
        if self.name.is_empty() {
            return Err(Error::binding("the block device name is required"));
        }
        if self.capacity_in_gb <= 0 {
            return Err(Error::binding(format!(
                "the capacity must be greater than zero, got {}",
                self.capacity_in_gb
            )));
        }
        match &self.project {
            None => Err(Error::binding("a project id or a project name is required")),
            Some(ProjectSelector::Id(id)) if id.is_empty() => {
                Err(Error::binding("the project id cannot be empty"))
            }
            Some(ProjectSelector::Name(name)) if name.is_empty() => {
                Err(Error::binding("the project name cannot be empty"))
            }
            Some(p) => Ok(p),
        }
    }

    async fn resolve_project(&self, project: &ProjectSelector) -> Result<String> {
        let name = match project {
            ProjectSelector::Id(id) => return Ok(id.clone()),
            ProjectSelector::Name(name) => name,
        };
        let req = ListProjectsRequest::new()
            .set_filter(name_filter(name))
            .set_select("id");
        let list = self.stub.list_projects(req).await?;
        let id = list
            .content
            .into_iter()
            .next()
            .map(|p| p.id)
            .ok_or_else(|| Error::not_found(format!("no project named `{name}`")))?;
        tracing::debug!(project_name = %name, project_id = %id, "resolved project");
        Ok(id)
    }

    async fn wait(&self, request_id: String) -> Result<Creation> {
        let stub = self.stub.clone();
        let id = request_id.clone();
        let query = move || {
            let stub = stub.clone();
            let id = id.clone();
            async move { stub.get_request_tracker(id).await }
        };
        let outcome = poll_until(
            self.polling_backoff_policy.as_ref(),
            self.completion_timeout,
            query,
            RequestTracker::is_done,
            tokio::time::sleep,
        )
        .await?;

        let tracker = match outcome {
            PollOutcome::Ready(t) => t,
            PollOutcome::TimedOut(state) => {
                tracing::warn!(
                    %request_id,
                    attempt_count = state.attempt_count,
                    elapsed = ?state.elapsed,
                    "block device creation did not finish before the completion timeout"
                );
                return Ok(Creation::TimedOut { request_id });
            }
        };
        if tracker.is_failed() {
            return Err(Error::service(
                ApiError::default().set_message(tracker.message),
            ));
        }

        let mut disks = Vec::with_capacity(tracker.resources.len());
        for locator in tracker.resources {
            let device = self.stub.get_block_device(locator).await?;
            disks.push(CompletedDisk::from(device));
        }
        tracing::info!(%request_id, count = disks.len(), "block device creation finished");
        Ok(Creation::Completed(disks))
    }
}

// Formats an OData filter matching `name` exactly. Single quotes in string
// literals are escaped by doubling them.
fn name_filter(name: &str) -> String {
    format!("name eq '{}'", name.replace('\'', "''"))
}
