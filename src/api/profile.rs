//
//  xbl-client
//  api/profile.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Profile service (`profile.xboxlive.com`).
//!
//! The profile service answers batch settings lookups as a list of users, each
//! with a list of `{id, value}` pairs:
//!
//! ```json
//! {"profileUsers": [{"id": "2533274812345678", "settings": [{"id": "Gamertag", "value": "Foo"}]}]}
//! ```
//!
//! [`ProfileApi::get_user_settings`] reshapes that into a map keyed by XUID,
//! then by setting id.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::client::XblClient;
use super::common::{build_url, positional, ApiError};
use super::restful::RequestOptions;

/// Settings keyed by XUID, then by setting id.
pub type UserSettingsMap = BTreeMap<String, BTreeMap<String, String>>;

/// Profile settings that can be requested in a batch lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserSetting {
    GameDisplayPicRaw,
    Gamerscore,
    Gamertag,
    AccountTier,
    XboxOneRep,
    PreferredColor,
    RealName,
    Bio,
    Location,
    ModernGamertag,
    ModernGamertagSuffix,
    UniqueModernGamertag,
    RealNameOverride,
    TenureLevel,
    Watermarks,
    IsQuarantined,
    DisplayedLinkedAccounts,
}

impl UserSetting {
    /// Every known setting, in declaration order.
    pub const ALL: [UserSetting; 17] = [
        Self::GameDisplayPicRaw,
        Self::Gamerscore,
        Self::Gamertag,
        Self::AccountTier,
        Self::XboxOneRep,
        Self::PreferredColor,
        Self::RealName,
        Self::Bio,
        Self::Location,
        Self::ModernGamertag,
        Self::ModernGamertagSuffix,
        Self::UniqueModernGamertag,
        Self::RealNameOverride,
        Self::TenureLevel,
        Self::Watermarks,
        Self::IsQuarantined,
        Self::DisplayedLinkedAccounts,
    ];

    /// The wire name of the setting.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GameDisplayPicRaw => "GameDisplayPicRaw",
            Self::Gamerscore => "Gamerscore",
            Self::Gamertag => "Gamertag",
            Self::AccountTier => "AccountTier",
            Self::XboxOneRep => "XboxOneRep",
            Self::PreferredColor => "PreferredColor",
            Self::RealName => "RealName",
            Self::Bio => "Bio",
            Self::Location => "Location",
            Self::ModernGamertag => "ModernGamertag",
            Self::ModernGamertagSuffix => "ModernGamertagSuffix",
            Self::UniqueModernGamertag => "UniqueModernGamertag",
            Self::RealNameOverride => "RealNameOverride",
            Self::TenureLevel => "TenureLevel",
            Self::Watermarks => "Watermarks",
            Self::IsQuarantined => "IsQuarantined",
            Self::DisplayedLinkedAccounts => "DisplayedLinkedAccounts",
        }
    }
}

impl fmt::Display for UserSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserSetting {
    type Err = String;

    /// Parses a wire name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|setting| setting.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown profile setting '{}'", s))
    }
}

/// Batch settings request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SettingsRequest<'a> {
    user_ids: Vec<&'a str>,
    settings: &'a [UserSetting],
}

/// Profile service response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    /// One entry per resolved user.
    #[serde(default)]
    pub profile_users: Vec<ProfileUser>,
}

/// One user in a profile response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUser {
    /// The user's XUID.
    pub id: String,
    /// Host XUID for sponsored users.
    #[serde(default)]
    pub host_id: Option<String>,
    /// Requested settings.
    #[serde(default)]
    pub settings: Vec<ProfileSetting>,
    /// Whether this is a sponsored (guest) user.
    #[serde(default)]
    pub is_sponsored_user: Option<bool>,
}

/// A single setting entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSetting {
    /// Setting id, e.g. `Gamertag`.
    pub id: String,
    /// Setting value, always transmitted as a string.
    pub value: String,
}

/// Reshapes a list of profile users into a map of XUID → setting id → value.
///
/// Later duplicates of the same user or setting id overwrite earlier ones.
pub fn reshape_settings(users: Vec<ProfileUser>) -> UserSettingsMap {
    users
        .into_iter()
        .map(|user| {
            let settings = user
                .settings
                .into_iter()
                .map(|setting| (setting.id, setting.value))
                .collect();
            (user.id, settings)
        })
        .collect()
}

/// Operations on `profile.xboxlive.com`.
pub struct ProfileApi<'a> {
    client: &'a XblClient,
}

impl<'a> ProfileApi<'a> {
    pub(crate) fn new(client: &'a XblClient) -> Self {
        Self { client }
    }

    /// Fetches the given settings for a batch of users.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Precondition`] without issuing a request if `xuids`
    /// is empty.
    pub async fn get_user_settings<S: AsRef<str>>(
        &self,
        xuids: &[S],
        settings: &[UserSetting],
    ) -> Result<UserSettingsMap, ApiError> {
        if xuids.is_empty() {
            return Err(ApiError::Precondition(
                "at least one XUID is required for a settings lookup".to_string(),
            ));
        }

        let url = build_url(
            &self.client.endpoints().profile,
            "/users/batch/profile/settings",
            &[],
        );
        let body = SettingsRequest {
            user_ids: xuids.iter().map(AsRef::as_ref).collect(),
            settings,
        };
        let options = RequestOptions::new().json_body(&body)?;

        let response: ProfileResponse = self
            .client
            .fetch(Method::POST, &url, options, "fetch user settings")
            .await?;
        Ok(reshape_settings(response.profile_users))
    }

    /// Resolves a gamertag to its XUID.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the service returns no profile.
    pub async fn get_xuid(&self, gamertag: &str) -> Result<String, ApiError> {
        if gamertag.trim().is_empty() {
            return Err(ApiError::Precondition("gamertag must not be empty".to_string()));
        }

        let path = format!("/users/{}/settings", positional("gt", gamertag));
        let url = build_url(&self.client.endpoints().profile, &path, &[]);

        let response: ProfileResponse = self
            .client
            .fetch(Method::GET, &url, RequestOptions::new(), "fetch xuid")
            .await?;

        response
            .profile_users
            .into_iter()
            .next()
            .map(|user| user.id)
            .ok_or_else(|| ApiError::NotFound(format!("no profile for gamertag '{}'", gamertag)))
    }
}
