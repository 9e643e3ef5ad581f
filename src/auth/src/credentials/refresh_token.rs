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

//! Credentials based on a refresh token.
//!
//! Users of VMware Aria Automation can create a refresh token (sometimes
//! called an API token) in the appliance console. The IaaS API exchanges this
//! refresh token for a bearer token at `POST /iaas/api/login`.
//!
//! The credentials perform the exchange on the first request and reuse the
//! bearer token until it expires. The login response does not report the
//! token lifetime, the credentials assume the appliance default of 8 hours and
//! exchange the refresh token again after [DEFAULT_TOKEN_LIFETIME]. Use
//! [Builder::with_token_lifetime] if the appliance is configured differently.
//! Failed exchanges are not cached, the next request tries again.
//!
//! # Example
//! ```no_run
//! # use vra_auth::credentials::refresh_token::Builder;
//! # tokio_test::block_on(async {
//! let credentials = Builder::new("https://vra.example.com", "my-refresh-token")
//!     .with_accept_invalid_certs(true)
//!     .build()?;
//! let headers = credentials.headers().await?;
//! # Ok::<(), anyhow::Error>(())
//! # });
//! ```

use crate::Result;
use crate::credentials::{Credentials, CredentialsProvider, bearer_headers};
use crate::errors::{self, CredentialsError};
use http::HeaderMap;
use std::time::{Duration, Instant};
use reqwest::{Client, Method};
use tokio::sync::Mutex;

const LOGIN_PATH: &str = "/iaas/api/login";
const DEFAULT_TOKEN_TYPE: &str = "Bearer";

/// How long a bearer token is reused before the refresh token is exchanged
/// again.
///
/// The appliance issues bearer tokens valid for 8 hours, this leaves a margin
/// for clock skew and long running requests.
pub const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(7 * 60 * 60);

/// A builder for credentials based on a refresh token.
pub struct Builder {
    endpoint: String,
    refresh_token: String,
    accept_invalid_certs: bool,
    token_lifetime: Duration,
}

impl Builder {
    /// Creates a new builder.
    ///
    /// # Parameters
    /// * `endpoint` - the base URL of the appliance, for example
    ///   `https://vra.example.com`.
    /// * `refresh_token` - the refresh token.
    pub fn new<E: Into<String>, T: Into<String>>(endpoint: E, refresh_token: T) -> Self {
        Self {
            endpoint: endpoint.into(),
            refresh_token: refresh_token.into(),
            accept_invalid_certs: false,
            token_lifetime: DEFAULT_TOKEN_LIFETIME,
        }
    }

    /// Skips the TLS certificate validation in the token exchange.
    pub fn with_accept_invalid_certs(mut self, v: bool) -> Self {
        self.accept_invalid_certs = v;
        self
    }

    /// Sets how long a bearer token is reused.
    ///
    /// The default is [DEFAULT_TOKEN_LIFETIME]. Use a value shorter than the
    /// token validity configured in the appliance.
    pub fn with_token_lifetime(mut self, v: Duration) -> Self {
        self.token_lifetime = v;
        self
    }

    /// Returns a [Credentials] instance.
    ///
    /// Fails if the HTTP client used in the token exchange cannot be
    /// initialized.
    pub fn build(self) -> Result<Credentials> {
        let client = Client::builder()
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .build()
            .map_err(errors::non_transient)?;
        let login_url = format!("{}{LOGIN_PATH}", self.endpoint.trim_end_matches('/'));
        Ok(Credentials::from(RefreshTokenCredentials {
            client,
            login_url,
            refresh_token: self.refresh_token,
            token_lifetime: self.token_lifetime,
            token: Mutex::new(None),
        }))
    }
}

impl std::fmt::Debug for Builder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builder")
            .field("endpoint", &self.endpoint)
            .field("refresh_token", &"[censored]")
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .field("token_lifetime", &self.token_lifetime)
            .finish()
    }
}

#[derive(Clone)]
struct Token {
    token_type: String,
    token: String,
    expires_at: Instant,
}

impl Token {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

struct RefreshTokenCredentials {
    client: Client,
    login_url: String,
    refresh_token: String,
    token_lifetime: Duration,
    token: Mutex<Option<Token>>,
}

impl std::fmt::Debug for RefreshTokenCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshTokenCredentials")
            .field("login_url", &self.login_url)
            .field("refresh_token", &"[censored]")
            .finish()
    }
}

impl RefreshTokenCredentials {
    async fn exchange(&self) -> Result<Token> {
        tracing::debug!(login_url = %self.login_url, "exchanging the refresh token");
        let requested_at = Instant::now();
        let request = LoginRequest {
            refresh_token: self.refresh_token.clone(),
        };
        let response = self
            .client
            .request(Method::POST, self.login_url.as_str())
            .json(&request)
            .send()
            .await
            .map_err(errors::transient)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| CredentialsError::new(errors::is_transient(status), e))?;
            return Err(CredentialsError::from_msg(
                errors::is_transient(status),
                format!("failed to exchange the refresh token, status {status}: {body}"),
            ));
        }
        let response = response.json::<LoginResponse>().await.map_err(|e| {
            let transient = !e.is_decode();
            CredentialsError::new(transient, e)
        })?;
        Ok(Token {
            token_type: response
                .token_type
                .unwrap_or_else(|| DEFAULT_TOKEN_TYPE.to_string()),
            token: response.token,
            expires_at: requested_at + self.token_lifetime,
        })
    }
}

#[async_trait::async_trait]
impl CredentialsProvider for RefreshTokenCredentials {
    async fn headers(&self) -> Result<HeaderMap> {
        // Holding the lock across the exchange serializes concurrent callers,
        // so only one exchange is in flight.
        let mut guard = self.token.lock().await;
        if let Some(token) = guard.as_ref().filter(|t| !t.is_expired()) {
            return bearer_headers(&token.token_type, &token.token);
        }
        let token = self.exchange().await?;
        let headers = bearer_headers(&token.token_type, &token.token)?;
        *guard = Some(token);
        Ok(headers)
    }
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest {
    refresh_token: String,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    #[serde(default)]
    token_type: Option<String>,
    token: String,
}
