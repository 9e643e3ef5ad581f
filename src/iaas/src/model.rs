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

//! The messages exchanged with the IaaS API, and the records produced by the
//! block device workflow.
//!
//! The wire types use the `camelCase` names of the IaaS API. The appliance
//! sometimes sends `null` for empty strings and lists, these deserialize as
//! the default value.
//!
//! [SubmittedOperation] and [CompletedDisk] are output records. They serialize
//! with `PascalCase` names, which is what existing automation consuming the
//! output of these tools expects.

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, serde_as};
use std::collections::BTreeMap;

/// The body of `POST /iaas/api/block-devices`.
///
/// The fields serialize in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct BlockDeviceSpecification {
    /// The capacity of the block device, in GB.
    #[serde(rename = "capacityInGB")]
    pub capacity_in_gb: i32,

    /// If true, the block device is encrypted.
    pub encrypted: bool,

    /// The name of the block device.
    pub name: String,

    /// A human readable description. Sent as an empty string when unset.
    pub description: String,

    /// If true, the block device outlives the machine it is attached to.
    pub persistent: bool,

    /// The id of the project owning the block device.
    pub project_id: String,
}

impl BlockDeviceSpecification {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [capacity_in_gb][BlockDeviceSpecification::capacity_in_gb].
    pub fn set_capacity_in_gb<T: Into<i32>>(mut self, v: T) -> Self {
        self.capacity_in_gb = v.into();
        self
    }

    /// Sets the value of [encrypted][BlockDeviceSpecification::encrypted].
    pub fn set_encrypted<T: Into<bool>>(mut self, v: T) -> Self {
        self.encrypted = v.into();
        self
    }

    /// Sets the value of [name][BlockDeviceSpecification::name].
    pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
        self.name = v.into();
        self
    }

    /// Sets the value of [description][BlockDeviceSpecification::description].
    pub fn set_description<T: Into<String>>(mut self, v: T) -> Self {
        self.description = v.into();
        self
    }

    /// Sets the value of [persistent][BlockDeviceSpecification::persistent].
    pub fn set_persistent<T: Into<bool>>(mut self, v: T) -> Self {
        self.persistent = v.into();
        self
    }

    /// Sets the value of [project_id][BlockDeviceSpecification::project_id].
    pub fn set_project_id<T: Into<String>>(mut self, v: T) -> Self {
        self.project_id = v.into();
        self
    }
}

/// Well-known values for [RequestTracker::status].
pub mod request_tracker {
    pub const FINISHED: &str = "FINISHED";
    pub const FAILED: &str = "FAILED";
    pub const INPROGRESS: &str = "INPROGRESS";
}

/// The state of an asynchronous request.
///
/// Returned by the creation `POST`, and by
/// `GET /iaas/api/request-tracker/{id}`.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct RequestTracker {
    /// The request id.
    pub id: String,

    /// A human readable name for the request.
    #[serde_as(as = "DefaultOnNull")]
    pub name: String,

    /// The completion percentage.
    pub progress: i32,

    /// One of `INPROGRESS`, `FINISHED` or `FAILED`.
    pub status: String,

    /// The failure reason, if any.
    #[serde_as(as = "DefaultOnNull")]
    pub message: String,

    /// The locators of the resources created by the request.
    ///
    /// Only populated once the request is finished.
    #[serde_as(as = "DefaultOnNull")]
    pub resources: Vec<String>,

    /// The locator of the tracker itself.
    #[serde_as(as = "DefaultOnNull")]
    pub self_link: String,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [id][RequestTracker::id].
    pub fn set_id<T: Into<String>>(mut self, v: T) -> Self {
        self.id = v.into();
        self
    }

    /// Sets the value of [name][RequestTracker::name].
    pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
        self.name = v.into();
        self
    }

    /// Sets the value of [progress][RequestTracker::progress].
    pub fn set_progress<T: Into<i32>>(mut self, v: T) -> Self {
        self.progress = v.into();
        self
    }

    /// Sets the value of [status][RequestTracker::status].
    pub fn set_status<T: Into<String>>(mut self, v: T) -> Self {
        self.status = v.into();
        self
    }

    /// Sets the value of [message][RequestTracker::message].
    pub fn set_message<T: Into<String>>(mut self, v: T) -> Self {
        self.message = v.into();
        self
    }

    /// Sets the value of [resources][RequestTracker::resources].
    pub fn set_resources<T, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.resources = v.into_iter().map(|i| i.into()).collect();
        self
    }

    /// The request completed successfully.
    pub fn is_finished(&self) -> bool {
        self.status == request_tracker::FINISHED
    }

    /// The request completed with an error.
    pub fn is_failed(&self) -> bool {
        self.status == request_tracker::FAILED
    }

    /// The request will not change state anymore.
    pub fn is_done(&self) -> bool {
        self.is_finished() || self.is_failed()
    }
}

/// A key/value tag attached to a resource.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new<K: Into<String>, V: Into<String>>(key: K, value: V) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A block device, as returned by `GET /iaas/api/block-devices/{id}`.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct BlockDevice {
    pub id: String,
    pub name: String,
    #[serde_as(as = "DefaultOnNull")]
    pub status: String,
    #[serde_as(as = "DefaultOnNull")]
    pub owner: String,
    #[serde_as(as = "DefaultOnNull")]
    pub external_region_id: String,
    #[serde_as(as = "DefaultOnNull")]
    pub external_zone_id: String,
    #[serde_as(as = "DefaultOnNull")]
    pub description: String,
    #[serde_as(as = "DefaultOnNull")]
    pub tags: Vec<Tag>,
    #[serde(rename = "capacityInGB")]
    pub capacity_in_gb: i32,
    #[serde_as(as = "DefaultOnNull")]
    pub cloud_account_ids: Vec<String>,
    #[serde_as(as = "DefaultOnNull")]
    pub external_id: String,
    #[serde_as(as = "DefaultOnNull")]
    pub created_at: String,
    #[serde_as(as = "DefaultOnNull")]
    pub updated_at: String,
    #[serde_as(as = "DefaultOnNull")]
    pub org_id: String,
    #[serde_as(as = "DefaultOnNull")]
    pub custom_properties: BTreeMap<String, String>,
    #[serde_as(as = "DefaultOnNull")]
    pub project_id: String,
    pub persistent: bool,
}

/// A project, as returned by `GET /iaas/api/projects`.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Project {
    pub id: String,
    #[serde_as(as = "DefaultOnNull")]
    pub name: String,
    #[serde_as(as = "DefaultOnNull")]
    pub description: String,
}

/// A page of projects.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ProjectList {
    #[serde_as(as = "DefaultOnNull")]
    pub content: Vec<Project>,
    pub total_elements: i64,
    pub number_of_elements: i64,
}

/// The query for `GET /iaas/api/projects`.
///
/// The parameters use the OData syntax supported by the IaaS API.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct ListProjectsRequest {
    /// The `$filter` parameter, for example `name eq 'GOLD'`.
    pub filter: Option<String>,

    /// The `$select` parameter, for example `id`.
    pub select: Option<String>,
}

impl ListProjectsRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [filter][ListProjectsRequest::filter].
    pub fn set_filter<T: Into<String>>(mut self, v: T) -> Self {
        self.filter = Some(v.into());
        self
    }

    /// Sets the value of [select][ListProjectsRequest::select].
    pub fn set_select<T: Into<String>>(mut self, v: T) -> Self {
        self.select = Some(v.into());
        self
    }
}

/// The summary of a block device creation request that was not awaited.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct SubmittedOperation {
    pub name: String,
    pub progress: i32,
    pub id: String,
    pub status: String,
}

impl From<RequestTracker> for SubmittedOperation {
    fn from(value: RequestTracker) -> Self {
        Self {
            name: value.name,
            progress: value.progress,
            id: value.id,
            status: value.status,
        }
    }
}

/// The details of a block device created by an awaited request.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct CompletedDisk {
    pub name: String,
    pub status: String,
    pub owner: String,
    pub external_region_id: String,
    pub external_zone_id: String,
    pub description: String,
    pub tags: Vec<Tag>,
    #[serde(rename = "CapacityInGB")]
    pub capacity_in_gb: i32,
    #[serde(rename = "CloudAccountIDs")]
    pub cloud_account_ids: Vec<String>,
    pub external_id: String,
    pub id: String,
    pub date_created: String,
    pub last_updated: String,
    pub organization_id: String,
    pub custom_properties: BTreeMap<String, String>,
    pub project_id: String,
    pub persistent: bool,
}

impl From<BlockDevice> for CompletedDisk {
    fn from(value: BlockDevice) -> Self {
        Self {
            name: value.name,
            status: value.status,
            owner: value.owner,
            external_region_id: value.external_region_id,
            external_zone_id: value.external_zone_id,
            description: value.description,
            tags: value.tags,
            capacity_in_gb: value.capacity_in_gb,
            cloud_account_ids: value.cloud_account_ids,
            external_id: value.external_id,
            id: value.id,
            date_created: value.created_at,
            last_updated: value.updated_at,
            organization_id: value.org_id,
            custom_properties: value.custom_properties,
            project_id: value.project_id,
            persistent: value.persistent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use test_case::test_case;

    type TestResult = anyhow::Result<()>;

    #[test]
    fn specification_field_order() -> TestResult {
        let spec = BlockDeviceSpecification::new()
            .set_name("disk1")
            .set_capacity_in_gb(10)
            .set_project_id("p-123");
        let got = serde_json::to_string(&spec)?;
        assert_eq!(
            got,
            r#"{"capacityInGB":10,"encrypted":false,"name":"disk1","description":"","persistent":false,"projectId":"p-123"}"#
        );
        Ok(())
    }

    #[test]
    fn request_tracker_nulls() -> TestResult {
        let input = json!({
            "id": "r-1",
            "name": null,
            "progress": 10,
            "status": "INPROGRESS",
            "message": null,
            "resources": null,
            "selfLink": "/iaas/api/request-tracker/r-1",
        });
        let got = serde_json::from_value::<RequestTracker>(input)?;
        let want = RequestTracker::new()
            .set_id("r-1")
            .set_progress(10)
            .set_status("INPROGRESS");
        assert_eq!(got.self_link, "/iaas/api/request-tracker/r-1");
        assert_eq!(
            RequestTracker {
                self_link: String::new(),
                ..got
            },
            want
        );
        Ok(())
    }

    #[test_case(request_tracker::INPROGRESS, false, false)]
    #[test_case(request_tracker::FINISHED, true, false)]
    #[test_case(request_tracker::FAILED, false, true)]
    #[test_case("UNKNOWN", false, false)]
    fn request_tracker_status(status: &str, finished: bool, failed: bool) {
        let tracker = RequestTracker::new().set_status(status);
        assert_eq!(tracker.is_finished(), finished, "{tracker:?}");
        assert_eq!(tracker.is_failed(), failed, "{tracker:?}");
        assert_eq!(tracker.is_done(), finished || failed, "{tracker:?}");
    }

    #[test]
    fn submitted_operation_keys() -> TestResult {
        let tracker = RequestTracker::new()
            .set_id("r-1")
            .set_name("Provisioning")
            .set_progress(0)
            .set_status("INPROGRESS")
            .set_message("queued")
            .set_resources(["/iaas/api/block-devices/d-1"]);
        let got = serde_json::to_value(SubmittedOperation::from(tracker))?;
        assert_eq!(
            got,
            json!({"Name": "Provisioning", "Progress": 0, "Id": "r-1", "Status": "INPROGRESS"})
        );
        Ok(())
    }

    #[test]
    fn completed_disk_from_block_device() -> TestResult {
        let input = json!({
            "id": "d-1",
            "name": "disk1",
            "status": "AVAILABLE",
            "owner": "user@example.com",
            "externalRegionId": "Datacenter:datacenter-1",
            "externalZoneId": "zone-a",
            "description": null,
            "tags": [{"key": "env", "value": "lab"}],
            "capacityInGB": 10,
            "cloudAccountIds": ["ca-1"],
            "externalId": "ext-1",
            "createdAt": "2025-01-02",
            "updatedAt": "2025-01-03",
            "orgId": "org-1",
            "customProperties": {"provisioningType": "thin"},
            "projectId": "p-123",
            "persistent": true,
            "_links": {"self": {"href": "/iaas/api/block-devices/d-1"}},
        });
        let device = serde_json::from_value::<BlockDevice>(input)?;
        let got = serde_json::to_value(CompletedDisk::from(device))?;
        let want = json!({
            "Name": "disk1",
            "Status": "AVAILABLE",
            "Owner": "user@example.com",
            "ExternalRegionId": "Datacenter:datacenter-1",
            "ExternalZoneId": "zone-a",
            "Description": "",
            "Tags": [{"key": "env", "value": "lab"}],
            "CapacityInGB": 10,
            "CloudAccountIDs": ["ca-1"],
            "ExternalId": "ext-1",
            "Id": "d-1",
            "DateCreated": "2025-01-02",
            "LastUpdated": "2025-01-03",
            "OrganizationId": "org-1",
            "CustomProperties": {"provisioningType": "thin"},
            "ProjectId": "p-123",
            "Persistent": true,
        });
        assert_eq!(got, want);
        Ok(())
    }

    #[test]
    fn project_list() -> TestResult {
        let input = json!({
            "content": [{"id": "p-123"}, {"id": "p-456", "name": "GOLD"}],
            "totalElements": 2,
            "numberOfElements": 2,
        });
        let got = serde_json::from_value::<ProjectList>(input)?;
        assert_eq!(got.content.len(), 2);
        assert_eq!(got.content[0].id, "p-123");
        assert_eq!(got.content[0].name, "");
        assert_eq!(got.total_elements, 2);
        Ok(())
    }

    #[test]
    fn list_projects_request() {
        let req = ListProjectsRequest::new()
            .set_filter("name eq 'GOLD'")
            .set_select("id");
        assert_eq!(req.filter.as_deref(), Some("name eq 'GOLD'"));
        assert_eq!(req.select.as_deref(), Some("id"));
        assert_eq!(ListProjectsRequest::default().filter, None);
    }
}
