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

use crate::options::API_VERSION_PARAM;
use auth::credentials::Credentials;
use gax::Result;
use gax::client_builder::Error as BuilderError;
use gax::error::Error;
use gax::error::api::ApiError;
use gax::polling_backoff_policy::{FixedInterval, PollingBackoffPolicy};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct ReqwestClient {
    inner: reqwest::Client,
    cred: Credentials,
    endpoint: String,
    endpoint_url: reqwest::Url,
    api_version: String,
    polling_backoff_policy: Option<Arc<dyn PollingBackoffPolicy>>,
}

impl ReqwestClient {
    pub async fn new(config: crate::options::ClientConfig) -> gax::client_builder::Result<Self> {
        let api_version = crate::options::api_version(&config);
        let endpoint = config
            .endpoint
            .ok_or_else(|| BuilderError::config("the appliance endpoint is not configured"))?;
        let cred = config
            .cred
            .unwrap_or_else(|| auth::credentials::anonymous::Builder::new().build());
        let endpoint = endpoint.trim_end_matches('/').to_string();
        let endpoint_url = reqwest::Url::parse(&endpoint).map_err(BuilderError::config)?;
        let inner = reqwest::Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(BuilderError::transport)?;
        Ok(Self {
            inner,
            cred,
            endpoint,
            endpoint_url,
            api_version,
            polling_backoff_policy: config.polling_backoff_policy,
        })
    }

    /// Creates a request builder for `path`.
    ///
    /// The IaaS API returns resource locators as paths relative to the
    /// appliance, these are prefixed with the endpoint. Absolute URLs are used
    /// as-is. The `apiVersion` query parameter is added unless `path` already
    /// has one.
    ///
    /// [execute][Self::execute] rejects absolute URLs outside the endpoint
    /// origin, the credentials are only sent to the configured appliance.
    pub fn builder(&self, method: reqwest::Method, path: String) -> reqwest::RequestBuilder {
        let url = if path.starts_with("http://") || path.starts_with("https://") {
            path
        } else {
            format!("{}{path}", &self.endpoint)
        };
        let has_version = url
            .split_once('?')
            .is_some_and(|(_, q)| q.split('&').any(|p| p.starts_with(API_VERSION_PARAM)));
        let builder = self.inner.request(method, url);
        if has_version {
            return builder;
        }
        builder.query(&[(API_VERSION_PARAM, self.api_version.as_str())])
    }

    pub async fn execute<I: serde::ser::Serialize, O: serde::de::DeserializeOwned + Default>(
        &self,
        mut builder: reqwest::RequestBuilder,
        body: Option<I>,
    ) -> Result<O> {
        if let Some(body) = body {
            builder = builder.json(&body);
        }
        let (client, request) = builder.build_split();
        let mut request = request.map_err(Error::binding)?;
        if request.url().origin() != self.endpoint_url.origin() {
            return Err(Error::binding(format!(
                "refusing to send credentials to {}, the configured endpoint is {}",
                request.url().origin().ascii_serialization(),
                self.endpoint_url.origin().ascii_serialization(),
            )));
        }
        let auth_headers = self.cred.headers().await.map_err(Error::authentication)?;
        request.headers_mut().extend(auth_headers);
        let response = client
            .execute(request)
            .await
            .map_err(Self::map_send_error)?;
        tracing::debug!(url = %response.url(), status = %response.status(), "received response");
        if !response.status().is_success() {
            return self::to_http_error(response).await;
        }

        self::to_http_response(response).await
    }

    fn map_send_error(err: reqwest::Error) -> Error {
        match err {
            e if e.is_timeout() => Error::timeout(e),
            e => Error::io(e),
        }
    }

    pub fn get_polling_backoff_policy(&self) -> Arc<dyn PollingBackoffPolicy> {
        self.polling_backoff_policy
            .clone()
            .unwrap_or_else(|| Arc::new(FixedInterval::default()))
    }
}

#[derive(serde::Serialize)]
pub struct NoBody;

pub async fn to_http_error<O>(response: reqwest::Response) -> Result<O> {
    let status_code = response.status().as_u16();
    let response = http::Response::from(response);
    let (parts, body) = response.into_parts();

    let body = http_body_util::BodyExt::collect(body)
        .await
        .map_err(Error::io)?
        .to_bytes();

    let error = match ApiError::try_from(&body) {
        Ok(api_error) => {
            Error::service_with_http_metadata(api_error, Some(status_code), Some(parts.headers))
        }
        Err(_) => Error::http(status_code, parts.headers, body),
    };
    Err(error)
}

async fn to_http_response<O: serde::de::DeserializeOwned + Default>(
    response: reqwest::Response,
) -> Result<O> {
    // 204 No Content has no body and throws EOF error if we try to parse with serde::json
    let no_content_status = response.status() == reqwest::StatusCode::NO_CONTENT;
    let response = http::Response::from(response);
    let (_, body) = response.into_parts();

    let body = http_body_util::BodyExt::collect(body)
        .await
        .map_err(Error::io)?;

    let response = match body.to_bytes() {
        content if (content.is_empty() && no_content_status) => O::default(),
        content => serde_json::from_slice::<O>(&content).map_err(Error::deser)?,
    };
    Ok(response)
}
