//
//  xbl-client
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Xbox Live Endpoint Client
//!
//! [`XblClient`] owns the authorization context, the default header set and a
//! [`Restful`] facade. Operations live on per-service accessors:
//!
//! | Accessor | Service |
//! |----------|---------|
//! | [`XblClient::profile`] | `profile.xboxlive.com` |
//! | [`XblClient::achievements`] | `achievements.xboxlive.com` |
//! | [`XblClient::presence`] | `userpresence.xboxlive.com` |
//! | [`XblClient::multiplayer`] | `multiplayeractivity.xboxlive.com` |
//! | [`XblClient::social`] | `social.xboxlive.com` |
//! | [`XblClient::clubs`] | `clubhub`, `chatfd`, `avty`, `userposts` |
//!
//! Every operation goes through the same path: compose the URL, issue the
//! request with the client defaults plus any per-call header overrides, turn
//! a non-2xx response into an [`UpstreamError`], and decode a 2xx body into
//! the operation's result type.
//!
//! The client is cheap to clone and safe to share between tasks; nothing in
//! it is mutated after construction.

use std::sync::Arc;

use reqwest::header::{HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::achievements::AchievementsApi;
use super::clubs::ClubsApi;
use super::common::{ApiError, UpstreamError};
use super::multiplayer::MultiplayerApi;
use super::presence::PresenceApi;
use super::profile::ProfileApi;
use super::restful::{RequestOptions, Restful};
use super::social::SocialApi;
use super::transport::{ReqwestTransport, ResponseHandle, Transport};
use crate::auth::AuthorizationContext;
use crate::config::{Config, Endpoints};

/// Header carrying the service contract version.
pub const CONTRACT_VERSION: HeaderName = HeaderName::from_static("x-xbl-contract-version");

/// Authenticated client for the Xbox Live REST services.
///
/// # Example
///
/// ```rust,no_run
/// use xbl_client::api::XblClient;
/// use xbl_client::auth::AuthorizationContext;
///
/// # async fn example() -> Result<(), xbl_client::api::ApiError> {
/// let auth = AuthorizationContext::new("2533274812345678", "uhs", "token")?;
/// let client = XblClient::new(auth)?;
///
/// let xuid = client.profile().get_xuid("Major Nelson").await?;
/// let presence = client.presence().get_current_presence().await?;
/// println!("{} is {}", xuid, presence.state);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct XblClient {
    auth: Arc<AuthorizationContext>,
    restful: Restful,
    endpoints: Arc<Endpoints>,
}

impl XblClient {
    /// Creates a client with default configuration and a `reqwest` transport.
    pub fn new(auth: AuthorizationContext) -> Result<Self, ApiError> {
        Self::from_config(auth, &Config::default())
    }

    /// Creates a client from configuration with a `reqwest` transport.
    pub fn from_config(auth: AuthorizationContext, config: &Config) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(&config.http.user_agent, config.http.timeout())?;
        Self::with_transport(auth, config, Arc::new(transport))
    }

    /// Creates a client over an arbitrary transport.
    ///
    /// The default header set, including the composed `Authorization` value,
    /// is built here once and reused for every request.
    pub fn with_transport(
        auth: AuthorizationContext,
        config: &Config,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ApiError> {
        let mut authorization = HeaderValue::from_str(&auth.authorization_header()).map_err(|_| {
            ApiError::InvalidHeader("authorization value contains illegal characters".to_string())
        })?;
        authorization.set_sensitive(true);

        let accept_language = HeaderValue::from_str(&config.http.accept_language)
            .map_err(|_| ApiError::InvalidHeader("invalid accept_language".to_string()))?;

        let defaults = RequestOptions::new()
            .with_header(CONTRACT_VERSION, HeaderValue::from(config.http.contract_version))
            .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .with_header(ACCEPT, HeaderValue::from_static("application/json"))
            .with_header(ACCEPT_LANGUAGE, accept_language)
            .with_header(AUTHORIZATION, authorization);

        Ok(Self {
            auth: Arc::new(auth),
            restful: Restful::new(transport, defaults),
            endpoints: Arc::new(config.endpoints.clone()),
        })
    }

    /// The authorization context this client was built with.
    pub fn authorization(&self) -> &AuthorizationContext {
        &self.auth
    }

    /// The configured service base URLs.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// The underlying verb facade, for requests outside the typed operations.
    pub fn restful(&self) -> &Restful {
        &self.restful
    }

    /// Profile and settings operations.
    pub fn profile(&self) -> ProfileApi<'_> {
        ProfileApi::new(self)
    }

    /// Achievement and title history operations.
    pub fn achievements(&self) -> AchievementsApi<'_> {
        AchievementsApi::new(self)
    }

    /// Presence operations.
    pub fn presence(&self) -> PresenceApi<'_> {
        PresenceApi::new(self)
    }

    /// Multiplayer activity operations.
    pub fn multiplayer(&self) -> MultiplayerApi<'_> {
        MultiplayerApi::new(self)
    }

    /// Social graph operations.
    pub fn social(&self) -> SocialApi<'_> {
        SocialApi::new(self)
    }

    /// Club, chat and feed operations.
    pub fn clubs(&self) -> ClubsApi<'_> {
        ClubsApi::new(self)
    }

    /// Issues a request and decodes a successful JSON body into `T`.
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        verb: Method,
        url: &str,
        options: RequestOptions,
        action: &str,
    ) -> Result<T, ApiError> {
        let response = self.send(verb, url, options, action).await?;
        response.json().await.map_err(|source| ApiError::Decode {
            url: response.url().to_string(),
            source,
        })
    }

    /// Issues a request whose successful body carries nothing of interest.
    pub(crate) async fn execute(
        &self,
        verb: Method,
        url: &str,
        options: RequestOptions,
        action: &str,
    ) -> Result<(), ApiError> {
        self.send(verb, url, options, action).await?;
        Ok(())
    }

    async fn send(
        &self,
        verb: Method,
        url: &str,
        options: RequestOptions,
        action: &str,
    ) -> Result<ResponseHandle, ApiError> {
        let response = self.restful.call(verb, url, options).await?;

        if !response.ok() {
            let error = normalize_failure(&response, action).await;
            tracing::warn!(status = %error.status, url = %error.url, "{}", error.message);
            return Err(error.into());
        }

        Ok(response)
    }
}

/// Builds the normalized diagnostic payload for a failed response.
///
/// The JSON read and the text read are attempted independently; either may
/// fail without affecting the other or the head fields.
pub async fn normalize_failure(response: &ResponseHandle, action: &str) -> UpstreamError {
    let json = response.json::<Value>().await.ok();
    let text = response.text().await.ok();

    UpstreamError {
        message: format!("Failed to {}", action),
        status: response.status(),
        status_text: response.status_text().to_string(),
        url: response.url().to_string(),
        headers: response.headers().clone(),
        json,
        text,
    }
}
