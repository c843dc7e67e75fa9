//
//  xbl-client
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Xbox Live services authorize every request with an XSTS token issued for a
//! specific user. Acquiring that token (Microsoft account sign-in, device and
//! title tokens, the XSTS exchange) happens upstream of this crate; what
//! arrives here is the resulting triple:
//!
//! - the user's XUID
//! - the user hash (`uhs`) from the XSTS display claims
//! - the XSTS token itself
//!
//! [`AuthorizationContext`] holds that triple and derives the
//! `XBL3.0 x=<userHash>;<XSTSToken>` header value used by the client.
//!
//! ## Sources
//!
//! - JSON token caches of the shape `{"userXUID", "userHash", "XSTSToken", "expiresOn"}`
//!   via [`AuthorizationContext::from_file`] or [`AuthorizationContext::from_json`]
//! - Environment variables `XBL_XUID`, `XBL_USER_HASH`, `XBL_XSTS_TOKEN`
//!   via [`AuthorizationContext::from_env`]
//!
//! ## Example
//!
//! ```rust
//! use xbl_client::auth::AuthorizationContext;
//!
//! let auth = AuthorizationContext::new("2533274812345678", "1234567890", "eyJhbGciOi...")?;
//! assert_eq!(auth.authorization_header(), "XBL3.0 x=1234567890;eyJhbGciOi...");
//! # Ok::<(), xbl_client::api::ApiError>(())
//! ```

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::api::common::ApiError;

/// Authorization scheme prefix for Xbox Live service calls.
pub const AUTH_SCHEME: &str = "XBL3.0";

/// Environment variable holding the user's XUID.
pub const ENV_XUID: &str = "XBL_XUID";

/// Environment variable holding the user hash.
pub const ENV_USER_HASH: &str = "XBL_USER_HASH";

/// Environment variable holding the XSTS token.
pub const ENV_XSTS_TOKEN: &str = "XBL_XSTS_TOKEN";

/// The identity and session material that authorizes every request.
///
/// Immutable once constructed. The user hash and token must be non-empty.
#[derive(Clone, PartialEq, Deserialize)]
#[serde(try_from = "TokenCache")]
pub struct AuthorizationContext {
    user_xuid: String,
    user_hash: String,
    xsts_token: String,
    expires_on: Option<DateTime<Utc>>,
}

/// On-disk token cache shape.
#[derive(Deserialize)]
struct TokenCache {
    #[serde(rename = "userXUID")]
    user_xuid: String,
    #[serde(rename = "userHash")]
    user_hash: String,
    #[serde(rename = "XSTSToken")]
    xsts_token: String,
    #[serde(rename = "expiresOn", default)]
    expires_on: Option<DateTime<Utc>>,
}

impl TryFrom<TokenCache> for AuthorizationContext {
    type Error = ApiError;

    fn try_from(cache: TokenCache) -> Result<Self, Self::Error> {
        let mut context = Self::new(cache.user_xuid, cache.user_hash, cache.xsts_token)?;
        context.expires_on = cache.expires_on;
        Ok(context)
    }
}

impl AuthorizationContext {
    /// Creates a context from its three parts.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Precondition`] if the user hash or token is empty.
    pub fn new(
        user_xuid: impl Into<String>,
        user_hash: impl Into<String>,
        xsts_token: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let user_hash = user_hash.into();
        let xsts_token = xsts_token.into();

        if user_hash.trim().is_empty() {
            return Err(ApiError::Precondition("user hash must not be empty".to_string()));
        }
        if xsts_token.trim().is_empty() {
            return Err(ApiError::Precondition("XSTS token must not be empty".to_string()));
        }

        Ok(Self {
            user_xuid: user_xuid.into(),
            user_hash,
            xsts_token,
            expires_on: None,
        })
    }

    /// Sets the token expiry.
    pub fn with_expiry(mut self, expires_on: DateTime<Utc>) -> Self {
        self.expires_on = Some(expires_on);
        self
    }

    /// Parses a JSON token cache.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid token cache")
    }

    /// Loads a JSON token cache from disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read token file {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Reads the context from `XBL_XUID`, `XBL_USER_HASH` and `XBL_XSTS_TOKEN`.
    pub fn from_env() -> Result<Self> {
        let read = |name: &str| {
            std::env::var(name).with_context(|| {
                format!(
                    "{} is not set; provide --token-file or export {}, {} and {}",
                    name, ENV_XUID, ENV_USER_HASH, ENV_XSTS_TOKEN
                )
            })
        };

        Ok(Self::new(read(ENV_XUID)?, read(ENV_USER_HASH)?, read(ENV_XSTS_TOKEN)?)?)
    }

    /// The signed-in user's XUID.
    pub fn user_xuid(&self) -> &str {
        &self.user_xuid
    }

    /// The user hash claim.
    pub fn user_hash(&self) -> &str {
        &self.user_hash
    }

    /// Token expiry, when known.
    pub fn expires_on(&self) -> Option<DateTime<Utc>> {
        self.expires_on
    }

    /// Checks whether the token has expired.
    ///
    /// Tokens without a known expiry are treated as valid.
    pub fn is_expired(&self) -> bool {
        self.expires_on.is_some_and(|exp| exp < Utc::now())
    }

    /// Composes the `Authorization` header value.
    pub fn authorization_header(&self) -> String {
        format!("{} x={};{}", AUTH_SCHEME, self.user_hash, self.xsts_token)
    }
}

impl fmt::Debug for AuthorizationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthorizationContext")
            .field("user_xuid", &self.user_xuid)
            .field("user_hash", &self.user_hash)
            .field("xsts_token", &"<redacted>")
            .field("expires_on", &self.expires_on)
            .finish()
    }
}
