//
//  xbl-client
//  api/presence.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Presence service (`userpresence.xboxlive.com`).
//!
//! Group, broadcasting and removal calls are served by contract version 3 of
//! the service and pin that header for the single call; everything else uses
//! the client default.

use std::fmt;

use clap::ValueEnum;
use reqwest::header::HeaderValue;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::client::{XblClient, CONTRACT_VERSION};
use super::common::{build_url, positional, ApiError};
use super::restful::RequestOptions;

/// Detail level of a presence record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PresenceLevel {
    User,
    Device,
    #[default]
    Title,
    All,
}

impl PresenceLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Device => "device",
            Self::Title => "title",
            Self::All => "all",
        }
    }
}

impl fmt::Display for PresenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's presence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceRecord {
    pub xuid: String,
    /// `Online`, `Away` or `Offline`.
    pub state: String,
    #[serde(default)]
    pub last_seen: Option<LastSeen>,
    #[serde(default)]
    pub devices: Vec<PresenceDevice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastSeen {
    #[serde(default)]
    pub device_type: Option<String>,
    #[serde(default)]
    pub title_id: Option<String>,
    #[serde(default)]
    pub title_name: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceDevice {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub titles: Vec<PresenceTitle>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceTitle {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub placement: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub activity: Option<PresenceActivity>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceActivity {
    #[serde(default)]
    pub rich_presence: Option<String>,
    /// Present only on broadcasting queries.
    #[serde(default)]
    pub broadcast: Option<Broadcast>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Broadcast {
    pub id: String,
    #[serde(default)]
    pub session: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub started: Option<String>,
    #[serde(default)]
    pub viewers: u64,
}

/// Where a title is shown on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum TitlePlacement {
    Full,
    Fill,
    Snapped,
    Background,
}

/// Whether the title has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum TitleState {
    Active,
    Inactive,
}

/// Title presence to set for the current device.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitlePresence {
    /// Title id.
    pub id: String,
    pub placement: TitlePlacement,
    pub state: TitleState,
}

#[derive(Serialize)]
struct BatchRequest<'a> {
    users: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    level: Option<PresenceLevel>,
}

/// The count endpoint answers with either a bare number or `{"count": n}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum CountBody {
    Bare(u64),
    Object { count: u64 },
}

impl From<CountBody> for u64 {
    fn from(body: CountBody) -> Self {
        match body {
            CountBody::Bare(count) | CountBody::Object { count } => count,
        }
    }
}

fn contract_v3() -> RequestOptions {
    RequestOptions::new().with_header(CONTRACT_VERSION, HeaderValue::from_static("3"))
}

fn level_query(level: PresenceLevel) -> Vec<(String, String)> {
    vec![("level".to_string(), level.as_str().to_string())]
}

/// Operations on `userpresence.xboxlive.com`.
pub struct PresenceApi<'a> {
    client: &'a XblClient,
}

impl<'a> PresenceApi<'a> {
    pub(crate) fn new(client: &'a XblClient) -> Self {
        Self { client }
    }

    fn url(&self, path: &str, query: &[(String, String)]) -> String {
        build_url(&self.client.endpoints().presence, path, query)
    }

    /// Presence of the signed-in user.
    pub async fn get_current_presence(&self) -> Result<PresenceRecord, ApiError> {
        let url = self.url("/users/me", &[]);
        self.client
            .fetch(Method::GET, &url, RequestOptions::new(), "fetch user presence")
            .await
    }

    /// Presence of several users at once.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Precondition`] without issuing a request if `xuids`
    /// is empty.
    pub async fn get_batch_user_presence<S: AsRef<str>>(
        &self,
        xuids: &[S],
        level: Option<PresenceLevel>,
    ) -> Result<Vec<PresenceRecord>, ApiError> {
        if xuids.is_empty() {
            return Err(ApiError::Precondition(
                "at least one XUID is required for a batch presence lookup".to_string(),
            ));
        }

        let body = BatchRequest {
            users: xuids.iter().map(AsRef::as_ref).collect(),
            level,
        };
        let url = self.url("/users/batch", &[]);
        let options = RequestOptions::new().json_body(&body)?;

        self.client
            .fetch(Method::POST, &url, options, "fetch batch user presence")
            .await
    }

    /// Presence of the signed-in user's people list.
    pub async fn get_current_group_presence(
        &self,
        level: PresenceLevel,
    ) -> Result<Vec<PresenceRecord>, ApiError> {
        let url = self.url("/users/me/groups/People", &level_query(level));
        self.client
            .fetch(Method::GET, &url, contract_v3(), "fetch group presence")
            .await
    }

    /// Presence of a user's people list.
    pub async fn get_group_presence(
        &self,
        xuid: &str,
        level: PresenceLevel,
    ) -> Result<Vec<PresenceRecord>, ApiError> {
        let path = format!("/users/{}/groups/People", positional("xuid", xuid));
        let url = self.url(&path, &level_query(level));
        self.client
            .fetch(Method::GET, &url, contract_v3(), "fetch group presence")
            .await
    }

    /// Presence of the people in a user's list who are broadcasting.
    pub async fn get_group_broadcasting_presence(
        &self,
        xuid: &str,
        level: PresenceLevel,
    ) -> Result<Vec<PresenceRecord>, ApiError> {
        let path = format!("/users/{}/groups/People/broadcasting", positional("xuid", xuid));
        let url = self.url(&path, &level_query(level));
        self.client
            .fetch(Method::GET, &url, contract_v3(), "fetch broadcasting presence")
            .await
    }

    /// Number of people in a user's list who are broadcasting.
    pub async fn get_group_broadcasting_count(
        &self,
        xuid: &str,
        level: PresenceLevel,
    ) -> Result<u64, ApiError> {
        let path = format!(
            "/users/{}/groups/People/broadcasting/count",
            positional("xuid", xuid)
        );
        let url = self.url(&path, &level_query(level));
        let count: CountBody = self
            .client
            .fetch(Method::GET, &url, contract_v3(), "fetch broadcasting count")
            .await?;
        Ok(count.into())
    }

    /// Sets the title presence of the user's current device.
    pub async fn update_title_presence(
        &self,
        xuid: &str,
        presence: &TitlePresence,
    ) -> Result<(), ApiError> {
        let path = format!(
            "/users/{}/devices/current/titles/current",
            positional("xuid", xuid)
        );
        let url = self.url(&path, &[]);
        let options = RequestOptions::new().json_body(presence)?;

        self.client
            .execute(Method::POST, &url, options, "update title presence")
            .await
    }

    /// Removes a title's presence from the user's current device.
    ///
    /// `deviceId` and `deviceType` headers are sent only when given.
    pub async fn remove_title_presence(
        &self,
        xuid: &str,
        title_id: &str,
        device_id: Option<&str>,
        device_type: Option<&str>,
    ) -> Result<(), ApiError> {
        let path = format!(
            "/users/{}/devices/current/titles/{}",
            positional("xuid", xuid),
            urlencoding::encode(title_id)
        );
        let url = self.url(&path, &[]);

        let mut options = contract_v3();
        if let Some(device_id) = device_id.filter(|id| !id.is_empty()) {
            options = options.try_header("deviceId", device_id)?;
        }
        if let Some(device_type) = device_type.filter(|kind| !kind.is_empty()) {
            options = options.try_header("deviceType", device_type)?;
        }

        self.client
            .execute(Method::DELETE, &url, options, "remove title presence")
            .await
    }
}
