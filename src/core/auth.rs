//! Authentication service.
//!
//! User authentication is delegated to Firebase Authentication. The health
//! service does not authenticate anybody: it only needs to know whether a
//! client for the auth service can be obtained, that is, whether the service
//! is configured and a HTTP client for it can be built.
//!
//! The [`AuthService`] trait is the seam used by the auth probe. The
//! [`FirebaseAuth`] implementation builds an [`AuthClient`] for the Identity
//! Toolkit API without any network round trip.
use std::panic::Location;
use std::sync::Arc;

use escrow_health_configuration::{Auth as AuthConfig, DEFAULT_TIMEOUT};
#[cfg(test)]
use mockall::automock;
use thiserror::Error;
use url::Url;

use crate::shared::error::DynError;

/// Errors obtaining an auth client.
#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("Firebase project id is not configured")]
    MissingProjectId,

    #[error("Firebase API key is not configured")]
    MissingApiKey,

    #[error("Unable to build the auth HTTP client: {source}, {location}")]
    UnableToBuildClient {
        source: DynError,
        location: &'static Location<'static>,
    },
}

impl From<reqwest::Error> for Error {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        Self::UnableToBuildClient {
            source: Arc::new(err),
            location: Location::caller(),
        }
    }
}

/// A handle to the authentication service.
#[derive(Clone, Debug)]
pub struct AuthClient {
    pub http: reqwest::Client,
    pub endpoint: Url,
    pub project_id: String,
    api_key: String,
}

impl AuthClient {
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

#[cfg_attr(test, automock)]
pub trait AuthService: Sync + Send {
    /// It returns a client for the authentication service.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the service is not configured or the client can't
    /// be built.
    fn client(&self) -> Result<AuthClient, Error>;
}

/// Firebase Authentication.
///
/// The HTTP client is built once and shared by every [`AuthClient`].
#[derive(Clone, Debug)]
pub struct FirebaseAuth {
    config: AuthConfig,
    http: reqwest::Client,
}

impl FirebaseAuth {
    /// # Errors
    ///
    /// Will return `Err` if the HTTP client can't be built.
    pub fn new(config: &AuthConfig) -> Result<Self, Error> {
        let http = reqwest::Client::builder().timeout(DEFAULT_TIMEOUT).build()?;

        Ok(Self {
            config: config.clone(),
            http,
        })
    }
}

impl AuthService for FirebaseAuth {
    fn client(&self) -> Result<AuthClient, Error> {
        if self.config.project_id.trim().is_empty() {
            return Err(Error::MissingProjectId);
        }

        if self.config.api_key.trim().is_empty() {
            return Err(Error::MissingApiKey);
        }

        Ok(AuthClient {
            http: self.http.clone(),
            endpoint: self.config.endpoint.clone(),
            project_id: self.config.project_id.clone(),
            api_key: self.config.api_key.clone(),
        })
    }
}
