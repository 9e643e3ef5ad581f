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
use crate::errors::non_transient;
use http::HeaderMap;
use http::header::{AUTHORIZATION, HeaderValue};
use std::sync::Arc;

pub mod access_token;
pub mod anonymous;
pub mod refresh_token;

/// An implementation of [crate::credentials::CredentialsProvider].
///
/// Represents a [Credentials] used to obtain the auth request headers.
///
/// The VMware Aria Automation IaaS API accepts bearer tokens in the
/// `Authorization` header. Applications construct credentials with one of the
/// builders in the submodules:
///
/// * [anonymous::Builder] sends no headers, useful in tests.
/// * [access_token::Builder] sends a bearer token obtained out of band.
/// * [refresh_token::Builder] exchanges a refresh token for a bearer token.
#[derive(Clone, Debug)]
pub struct Credentials {
    // We use an `Arc` to hold the inner implementation.
    //
    // Credentials may be shared across threads (`Send + Sync`), so an `Rc`
    // will not do.
    //
    // They also need to derive `Clone`, as the clients are `Clone`, and a
    // `Box` cannot be cloned without knowing the concrete type.
    inner: Arc<dyn CredentialsProvider>,
}

impl<T> std::convert::From<T> for Credentials
where
    T: CredentialsProvider + 'static,
{
    fn from(value: T) -> Self {
        Self {
            inner: Arc::new(value),
        }
    }
}

impl Credentials {
    /// Asynchronously constructs the auth headers.
    pub async fn headers(&self) -> Result<HeaderMap> {
        self.inner.headers().await
    }
}

/// A trait for credential types that can provide authentication headers.
///
/// Applications rarely need to implement this trait. It is mostly useful to
/// create mocks in tests.
#[async_trait::async_trait]
pub trait CredentialsProvider: Send + Sync + std::fmt::Debug {
    /// Asynchronously constructs the auth headers.
    ///
    /// Different auth tokens are sent via different headers. The
    /// [Credentials] constructs the headers (and header values) that should
    /// be sent with a request.
    async fn headers(&self) -> Result<HeaderMap>;
}

/// Builds the `Authorization` header for a bearer token.
pub(crate) fn bearer_headers(token_type: &str, token: &str) -> Result<HeaderMap> {
    let mut value = HeaderValue::from_str(&format!("{token_type} {token}"))
        .map_err(non_transient)?;
    value.set_sensitive(true);
    let mut headers = HeaderMap::with_capacity(1);
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}
