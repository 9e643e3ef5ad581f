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

pub use auth::credentials::Credentials;

// The client configuration for [crate::http::ReqwestClient].
pub type ClientConfig = gax::client_builder::internal::ClientConfig<Credentials>;

// The query parameter selecting the IaaS API version.
pub const API_VERSION_PARAM: &str = "apiVersion";

// Returns the API version configured by the application, or the default.
pub fn api_version(config: &ClientConfig) -> String {
    config
        .api_version
        .clone()
        .unwrap_or_else(|| gax::client_builder::internal::DEFAULT_API_VERSION.to_string())
}
