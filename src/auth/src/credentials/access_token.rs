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

//! Credentials for a bearer token obtained out of band.
//!
//! Some applications obtain a bearer token from the appliance, or from the
//! identity service in front of it, using their own workflow. These
//! credentials attach that token to each request, without any attempt to
//! refresh it.
//!
//! # Example
//! ```
//! # use vra_auth::credentials::access_token::Builder;
//! # tokio_test::block_on(async {
//! let credentials = Builder::new("my-access-token").build();
//! let headers = credentials.headers().await?;
//! assert!(headers.contains_key(http::header::AUTHORIZATION));
//! # Ok::<(), anyhow::Error>(())
//! # });
//! ```

use crate::Result;
use crate::credentials::{Credentials, CredentialsProvider, bearer_headers};
use http::HeaderMap;

const DEFAULT_TOKEN_TYPE: &str = "Bearer";

struct AccessTokenCredentials {
    token_type: String,
    token: String,
}

impl std::fmt::Debug for AccessTokenCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessTokenCredentials")
            .field("token_type", &self.token_type)
            .field("token", &"[censored]")
            .finish()
    }
}

/// A builder for credentials using a pre-issued bearer token.
#[derive(Debug)]
pub struct Builder {
    token: String,
    token_type: Option<String>,
}

impl Builder {
    /// Creates a new builder with the given token.
    pub fn new<V: Into<String>>(token: V) -> Self {
        Self {
            token: token.into(),
            token_type: None,
        }
    }

    /// Overrides the token type, the default is `Bearer`.
    pub fn with_token_type<V: Into<String>>(mut self, v: V) -> Self {
        self.token_type = Some(v.into());
        self
    }

    /// Returns a [Credentials] instance.
    pub fn build(self) -> Credentials {
        Credentials::from(AccessTokenCredentials {
            token_type: self
                .token_type
                .unwrap_or_else(|| DEFAULT_TOKEN_TYPE.to_string()),
            token: self.token,
        })
    }
}

#[async_trait::async_trait]
impl CredentialsProvider for AccessTokenCredentials {
    async fn headers(&self) -> Result<HeaderMap> {
        bearer_headers(&self.token_type, &self.token)
    }
}
