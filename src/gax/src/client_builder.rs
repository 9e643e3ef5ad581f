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

//! Provide types for client construction.
//!
//! Some applications need to construct clients with custom configuration, for
//! example, they need to set the appliance endpoint, the authentication
//! credentials, or relax the TLS certificate validation for lab appliances.
//! The clients use a generic builder type to provide such functionality.
//!
//! Applications should not create builders directly, instead each client type
//! defines a `builder()` function to obtain the correct type of builder.

use crate::polling_backoff_policy::{PollingBackoffPolicy, PollingBackoffPolicyArg};
use std::sync::Arc;

/// The result type for this module.
pub type Result<T> = std::result::Result<T, Error>;

/// Indicates a problem while constructing a client.
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub struct Error(ErrorKind);

impl Error {
    /// If true, the client could not initialize the credentials.
    pub fn is_credentials(&self) -> bool {
        matches!(&self.0, ErrorKind::Credentials(_))
    }

    /// If true, the client could not initialize the transport client.
    pub fn is_transport(&self) -> bool {
        matches!(&self.0, ErrorKind::Transport(_))
    }

    /// If true, the client configuration is incomplete or invalid.
    pub fn is_config(&self) -> bool {
        matches!(&self.0, ErrorKind::Config(_))
    }

    pub fn cred<T: Into<BoxError>>(source: T) -> Self {
        Self(ErrorKind::Credentials(source.into()))
    }

    pub fn transport<T: Into<BoxError>>(source: T) -> Self {
        Self(ErrorKind::Transport(source.into()))
    }

    pub fn config<T: Into<BoxError>>(source: T) -> Self {
        Self(ErrorKind::Config(source.into()))
    }
}

#[derive(thiserror::Error, Debug)]
enum ErrorKind {
    #[error("could not create credentials")]
    Credentials(#[source] BoxError),
    #[error("could not initialize transport client")]
    Transport(#[source] BoxError),
    #[error("invalid client configuration")]
    Config(#[source] BoxError),
}

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A generic builder for clients.
///
/// Applications obtain a builder with the correct generic types using the
/// `builder()` method on each client, configure it with the `with_*()`
/// methods, and then call `.build()` to construct the client.
#[derive(Clone, Debug)]
pub struct ClientBuilder<F, Cr> {
    config: internal::ClientConfig<Cr>,
    factory: F,
}

impl<F, Cr> ClientBuilder<F, Cr> {
    /// Creates a new client.
    pub async fn build<C>(self) -> Result<C>
    where
        F: internal::ClientFactory<Client = C, Credentials = Cr>,
    {
        self.factory.build(self.config).await
    }

    /// Sets the endpoint.
    ///
    /// This is the base URL of the appliance, for example
    /// `https://vra.example.com`. There is no default.
    pub fn with_endpoint<V: Into<String>>(mut self, v: V) -> Self {
        self.config.endpoint = Some(v.into());
        self
    }

    /// Configures the authentication credentials.
    pub fn with_credentials<T: Into<Cr>>(mut self, v: T) -> Self {
        self.config.cred = Some(v.into());
        self
    }

    /// Sets the `apiVersion` query parameter sent with every request.
    ///
    /// The default is [DEFAULT_API_VERSION][internal::DEFAULT_API_VERSION].
    pub fn with_api_version<V: Into<String>>(mut self, v: V) -> Self {
        self.config.api_version = Some(v.into());
        self
    }

    /// Skips the TLS certificate validation.
    ///
    /// Lab appliances often use self-signed certificates. Do not use this
    /// setting in production environments.
    pub fn with_accept_invalid_certs(mut self, v: bool) -> Self {
        self.config.accept_invalid_certs = v;
        self
    }

    /// Configure the wait between polling attempts.
    ///
    /// # Example
    /// ```
    /// # use vra_gax::polling_backoff_policy::FixedInterval;
    /// # use std::time::Duration;
    /// let policy = FixedInterval::new(Duration::from_secs(10));
    /// # let _ = policy;
    /// ```
    pub fn with_polling_backoff_policy<V: Into<PollingBackoffPolicyArg>>(mut self, v: V) -> Self {
        let arg: PollingBackoffPolicyArg = v.into();
        self.config.polling_backoff_policy = Some(arg.into());
        self
    }
}

#[doc(hidden)]
pub mod internal {
    use super::*;

    /// The API version used when the application does not configure one.
    pub const DEFAULT_API_VERSION: &str = "2021-07-15";

    pub trait ClientFactory {
        type Client;
        type Credentials;
        fn build(
            self,
            config: internal::ClientConfig<Self::Credentials>,
        ) -> impl Future<Output = Result<Self::Client>>;
    }

    pub fn new_builder<F, Cr, C>(factory: F) -> super::ClientBuilder<F, Cr>
    where
        F: ClientFactory<Client = C, Credentials = Cr>,
    {
        super::ClientBuilder {
            factory,
            config: ClientConfig::default(),
        }
    }

    /// Configure a client.
    #[derive(Clone, Debug)]
    pub struct ClientConfig<Cr> {
        pub endpoint: Option<String>,
        pub cred: Option<Cr>,
        pub api_version: Option<String>,
        pub accept_invalid_certs: bool,
        pub polling_backoff_policy: Option<Arc<dyn PollingBackoffPolicy>>,
    }

    impl<Cr> std::default::Default for ClientConfig<Cr> {
        fn default() -> Self {
            Self {
                endpoint: None,
                cred: None,
                api_version: None,
                accept_invalid_certs: false,
                polling_backoff_policy: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polling_backoff_policy::FixedInterval;
    use crate::polling_state::PollingState;
    use std::time::Duration;

    #[derive(Clone, Debug, PartialEq)]
    struct Credentials(String);

    impl From<&str> for Credentials {
        fn from(value: &str) -> Self {
            Self(value.to_string())
        }
    }

    struct Factory;
    impl internal::ClientFactory for Factory {
        type Client = internal::ClientConfig<Credentials>;
        type Credentials = Credentials;
        async fn build(self, config: internal::ClientConfig<Credentials>) -> Result<Self::Client> {
            if config.endpoint.is_none() {
                return Err(Error::config("missing endpoint"));
            }
            Ok(config)
        }
    }

    #[test]
    fn defaults() {
        let config = internal::ClientConfig::<Credentials>::default();
        assert!(config.endpoint.is_none(), "{config:?}");
        assert!(config.cred.is_none(), "{config:?}");
        assert!(config.api_version.is_none(), "{config:?}");
        assert!(!config.accept_invalid_certs, "{config:?}");
        assert!(config.polling_backoff_policy.is_none(), "{config:?}");
    }

    #[tokio::test]
    async fn setters() -> anyhow::Result<()> {
        let config = internal::new_builder(Factory)
            .with_endpoint("https://vra.example.com")
            .with_credentials("test-only")
            .with_api_version("2019-01-15")
            .with_accept_invalid_certs(true)
            .with_polling_backoff_policy(FixedInterval::new(Duration::from_secs(1)))
            .build()
            .await?;
        assert_eq!(config.endpoint.as_deref(), Some("https://vra.example.com"));
        assert_eq!(config.cred, Some(Credentials("test-only".into())));
        assert_eq!(config.api_version.as_deref(), Some("2019-01-15"));
        assert!(config.accept_invalid_certs);
        let policy = config.polling_backoff_policy.expect("policy was set");
        assert_eq!(
            policy.wait_period(&PollingState::default()),
            Duration::from_secs(1)
        );
        Ok(())
    }

    #[tokio::test]
    async fn factory_errors() {
        let result = internal::new_builder(Factory).build().await;
        assert!(matches!(&result, Err(e) if e.is_config()), "{result:?}");
    }

    #[test]
    fn error_predicates() {
        let e = Error::cred("test-only");
        assert!(e.is_credentials(), "{e:?}");
        assert!(!e.is_transport(), "{e:?}");
        let e = Error::transport("test-only");
        assert!(e.is_transport(), "{e:?}");
        assert!(!e.is_config(), "{e:?}");
    }
}
