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

/// The error document returned by the IaaS API.
///
/// Most failed requests return a JSON object with a human-readable message,
/// the HTTP status code, and service-specific identifiers that help the
/// appliance administrators find the failure in the server logs.
///
/// # Example
/// ```
/// # use vra_gax::error::api::ApiError;
/// let error = ApiError::default()
///     .set_message("Project not found")
///     .set_status_code(404);
/// assert_eq!(error.message, "Project not found");
/// ```
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ApiError {
    /// A developer-facing error message.
    pub message: String,

    /// The HTTP status code reported in the document, which may differ from
    /// the status code of the response when a proxy rewrites it.
    pub status_code: i32,

    /// A service-specific error code, zero when absent.
    pub error_code: i32,

    /// Identifies the failure in the server logs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_error_id: Option<String>,

    /// Identifies the message template, used for localization.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
}

impl ApiError {
    /// Sets the value for [message][ApiError::message].
    pub fn set_message<T: Into<String>>(mut self, v: T) -> Self {
        self.message = v.into();
        self
    }

    /// Sets the value for [status_code][ApiError::status_code].
    pub fn set_status_code<T: Into<i32>>(mut self, v: T) -> Self {
        self.status_code = v.into();
        self
    }

    /// Sets the value for [error_code][ApiError::error_code].
    pub fn set_error_code<T: Into<i32>>(mut self, v: T) -> Self {
        self.error_code = v.into();
        self
    }

    /// Sets the value for [server_error_id][ApiError::server_error_id].
    pub fn set_server_error_id<T: Into<String>>(mut self, v: T) -> Self {
        self.server_error_id = Some(v.into());
        self
    }
}

impl TryFrom<&bytes::Bytes> for ApiError {
    type Error = crate::error::Error;

    /// Parses a response payload.
    ///
    /// Payloads without a `message` field are rejected, as they are not error
    /// documents even if they happen to be valid JSON.
    fn try_from(value: &bytes::Bytes) -> Result<Self, Self::Error> {
        let value = serde_json::from_slice::<serde_json::Value>(value)
            .map_err(crate::error::Error::deser)?;
        if !value.get("message").is_some_and(|m| m.is_string()) {
            return Err(crate::error::Error::deser(
                "the payload is not an error document",
            ));
        }
        serde_json::from_value::<ApiError>(value).map_err(crate::error::Error::deser)
    }
}
