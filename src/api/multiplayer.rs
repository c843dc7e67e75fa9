//
//  xbl-client
//  api/multiplayer.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Multiplayer activity service (`multiplayeractivity.xboxlive.com`).
//!
//! An activity is keyed by (title, user). Writes carry the record's
//! `sequenceNumber`; the service uses it to reject stale updates and deletes.
//! The client forwards it untouched.

use clap::ValueEnum;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::client::XblClient;
use super::common::ApiError;
use super::restful::RequestOptions;

/// Who may join an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum JoinRestriction {
    Public,
    Followed,
    InviteOnly,
}

/// A user's multiplayer activity for one title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiplayerActivity {
    pub connection_string: String,
    pub join_restriction: JoinRestriction,
    pub max_players: u32,
    pub current_players: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    /// `XboxOne`, `Scarlett`, `Win32`, `Android`, `IOS`, ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_id: Option<u64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteRequest<'a> {
    sequence_number: &'a str,
}

/// Operations on `multiplayeractivity.xboxlive.com`.
pub struct MultiplayerApi<'a> {
    client: &'a XblClient,
}

impl<'a> MultiplayerApi<'a> {
    pub(crate) fn new(client: &'a XblClient) -> Self {
        Self { client }
    }

    // This service takes the bare XUID in the path, without the xuid() marker.
    fn url(&self, title_id: u64, xuid: &str) -> String {
        format!(
            "{}/titles/{}/users/{}/activities",
            self.client.endpoints().multiplayer.trim_end_matches('/'),
            title_id,
            urlencoding::encode(xuid)
        )
    }

    /// Reads a user's activity for a title.
    pub async fn get_activity(
        &self,
        title_id: u64,
        xuid: &str,
    ) -> Result<MultiplayerActivity, ApiError> {
        self.client
            .fetch(
                Method::GET,
                &self.url(title_id, xuid),
                RequestOptions::new(),
                "fetch multiplayer activity",
            )
            .await
    }

    /// Creates or replaces a user's activity for a title.
    pub async fn update_activity(
        &self,
        title_id: u64,
        xuid: &str,
        activity: &MultiplayerActivity,
    ) -> Result<MultiplayerActivity, ApiError> {
        let options = RequestOptions::new().json_body(activity)?;
        self.client
            .fetch(
                Method::PUT,
                &self.url(title_id, xuid),
                options,
                "update multiplayer activity",
            )
            .await
    }

    /// Deletes a user's activity for a title.
    pub async fn delete_activity(
        &self,
        title_id: u64,
        xuid: &str,
        sequence_number: &str,
    ) -> Result<(), ApiError> {
        let options = RequestOptions::new().json_body(&DeleteRequest { sequence_number })?;
        self.client
            .execute(
                Method::DELETE,
                &self.url(title_id, xuid),
                options,
                "delete multiplayer activity",
            )
            .await
    }
}
