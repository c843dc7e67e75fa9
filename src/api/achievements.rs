//
//  xbl-client
//  api/achievements.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Achievements service (`achievements.xboxlive.com`).
//!
//! Listings are paginated with an opaque continuation token carried in
//! `pagingInfo`. Pass it back unchanged to read the next page:
//!
//! ```rust,no_run
//! use xbl_client::api::achievements::AchievementOptions;
//! # async fn example(client: xbl_client::api::XblClient) -> Result<(), xbl_client::api::ApiError> {
//! let mut options = AchievementOptions { max_items: Some(50), ..Default::default() };
//! loop {
//!     let page = client.achievements().get_user_achievements("2533274812345678", &options).await?;
//!     for achievement in &page.achievements {
//!         println!("{}", achievement.name);
//!     }
//!     match options.next_page(&page.paging_info) {
//!         Some(next) => options = next,
//!         None => break,
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use clap::ValueEnum;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::client::XblClient;
use super::common::{build_url, positional, to_query_pairs, ApiError};
use super::restful::RequestOptions;

/// Filter and paging options for an achievement listing.
///
/// Each field maps to the query key of the same (camelCase) name; unset
/// fields are omitted from the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_items: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuation_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlocked_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub possible_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<AchievementType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<AchievementOrderBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
}

impl AchievementOptions {
    /// Options for the page after `paging`, or `None` on the last page.
    ///
    /// All filters are kept and the continuation token is copied verbatim.
    pub fn next_page(&self, paging: &PagingInfo) -> Option<Self> {
        let token = paging.continuation_token.as_ref()?;
        Some(Self {
            continuation_token: Some(token.clone()),
            ..self.clone()
        })
    }
}

/// Achievement kind filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum AchievementType {
    Persistent,
    Challenge,
}

/// Sort key for achievement listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum AchievementOrderBy {
    Default,
    UnlockTime,
    Gamerscore,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Paging cursor returned with every listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagingInfo {
    /// Opaque token for the next page; absent on the last page.
    #[serde(default)]
    pub continuation_token: Option<String>,
    #[serde(default)]
    pub total_records: Option<u64>,
}

/// One page of achievements.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementsResponse {
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub paging_info: PagingInfo,
}

/// A single achievement and the caller's progress on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    #[serde(default)]
    pub service_config_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub title_associations: Vec<TitleAssociation>,
    /// `Achieved`, `InProgress`, `NotStarted`.
    #[serde(default)]
    pub progress_state: Option<String>,
    #[serde(default)]
    pub progression: Option<Progression>,
    #[serde(default)]
    pub media_assets: Vec<MediaAsset>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub is_secret: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub locked_description: Option<String>,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub achievement_type: Option<String>,
    #[serde(default)]
    pub participation_type: Option<String>,
    #[serde(default)]
    pub time_window: Option<TimeWindow>,
    #[serde(default)]
    pub rewards: Vec<Reward>,
    #[serde(default)]
    pub estimated_time: Option<String>,
    #[serde(default)]
    pub deeplink: Option<String>,
    #[serde(default)]
    pub is_revoked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleAssociation {
    pub name: String,
    pub id: u64,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progression {
    #[serde(default)]
    pub achievement_state: Option<String>,
    #[serde(default)]
    pub requirements: Option<Value>,
    #[serde(default)]
    pub time_unlocked: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaAsset {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub value: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub value_type: Option<String>,
}

/// Paging options for the title history listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleHistoryOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_items: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuation_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u32>,
}

/// One page of titles the user has earned achievements in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleHistoryResponse {
    #[serde(default)]
    pub titles: Vec<TitleHistoryEntry>,
    #[serde(default)]
    pub paging_info: PagingInfo,
}

/// Per-title achievement summary.
///
/// Fields beyond the typed ones vary by title type and are kept in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleHistoryEntry {
    pub title_id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title_type: Option<String>,
    #[serde(default)]
    pub current_gamerscore: Option<u64>,
    #[serde(default)]
    pub max_gamerscore: Option<u64>,
    #[serde(default)]
    pub earned_achievements: Option<u64>,
    #[serde(default)]
    pub last_unlock: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Operations on `achievements.xboxlive.com`.
pub struct AchievementsApi<'a> {
    client: &'a XblClient,
}

impl<'a> AchievementsApi<'a> {
    pub(crate) fn new(client: &'a XblClient) -> Self {
        Self { client }
    }

    /// Lists a user's achievements.
    pub async fn get_user_achievements(
        &self,
        xuid: &str,
        options: &AchievementOptions,
    ) -> Result<AchievementsResponse, ApiError> {
        let path = format!("/users/{}/achievements", positional("xuid", xuid));
        let url = build_url(
            &self.client.endpoints().achievements,
            &path,
            &to_query_pairs(options)?,
        );

        self.client
            .fetch(Method::GET, &url, RequestOptions::new(), "fetch user achievements")
            .await
    }

    /// Lists the titles a user has achievement history in.
    pub async fn get_title_history(
        &self,
        xuid: &str,
        options: &TitleHistoryOptions,
    ) -> Result<TitleHistoryResponse, ApiError> {
        let path = format!("/users/{}/history/titles", positional("xuid", xuid));
        let url = build_url(
            &self.client.endpoints().achievements,
            &path,
            &to_query_pairs(options)?,
        );

        self.client
            .fetch(Method::GET, &url, RequestOptions::new(), "fetch achievement title history")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::restful::tests::RecordingTransport;
    use crate::auth::AuthorizationContext;
    use crate::config::{Config, Endpoints};
    use mockito::Matcher;
    use std::sync::Arc;

    fn client_for(server: &mockito::Server) -> XblClient {
        let config = Config {
            endpoints: Endpoints::all(&server.url()),
            ..Default::default()
        };
        let auth = AuthorizationContext::new("2533274812345678", "uhs", "tok").unwrap();
        XblClient::from_config(auth, &config).unwrap()
    }

    const PAGE: &str = r#"{
        "achievements": [{
            "id": "1",
            "serviceConfigId": "scid",
            "name": "First Steps",
            "titleAssociations": [{"name": "Halo", "id": 1144039928, "version": ""}],
            "progressState": "Achieved",
            "progression": {"achievementState": "Achieved", "requirements": null, "timeUnlocked": "2020-01-01T00:00:00Z"},
            "mediaAssets": [{"name": "icon", "type": "Icon", "url": "https://example.com/a.png"}],
            "isSecret": false,
            "rewards": [{"name": null, "description": null, "value": "10", "type": "Gamerscore", "valueType": "Int"}],
            "isRevoked": false
        }],
        "pagingInfo": {"continuationToken": "AAAA+/==", "totalRecords": 40}
    }"#;

    #[test]
    fn test_next_page_copies_token_and_filters() {
        let options = AchievementOptions {
            max_items: Some(10),
            unlocked_only: Some(true),
            ..Default::default()
        };
        let paging = PagingInfo {
            continuation_token: Some("opaque+token".to_string()),
            total_records: Some(30),
        };

        let next = options.next_page(&paging).unwrap();
        assert_eq!(next.continuation_token.as_deref(), Some("opaque+token"));
        assert_eq!(next.max_items, Some(10));
        assert_eq!(next.unlocked_only, Some(true));

        assert!(options.next_page(&PagingInfo::default()).is_none());
    }

    #[test]
    fn test_enum_options_serialize_as_wire_names() {
        let options = AchievementOptions {
            types: Some(AchievementType::Persistent),
            order_by: Some(AchievementOrderBy::UnlockTime),
            order: Some(SortOrder::Descending),
            ..Default::default()
        };
        let mut pairs = to_query_pairs(&options).unwrap();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("order".to_string(), "Descending".to_string()),
                ("orderBy".to_string(), "UnlockTime".to_string()),
                ("types".to_string(), "Persistent".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_no_options_means_no_query_string() {
        let transport = Arc::new(RecordingTransport::ok_json(PAGE));
        let auth = AuthorizationContext::new("1", "uhs", "tok").unwrap();
        let client = XblClient::with_transport(auth, &Config::default(), transport.clone()).unwrap();

        client
            .achievements()
            .get_user_achievements("1", &AchievementOptions::default())
            .await
            .unwrap();

        assert_eq!(
            transport.taken()[0].url,
            "https://achievements.xboxlive.com/users/xuid(1)/achievements"
        );
    }

    #[tokio::test]
    async fn test_get_user_achievements() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("GET", "/users/xuid(2533274812345678)/achievements")
            .with_status(200)
            .with_body(PAGE)
            .create_async()
            .await;

        let client = client_for(&server);
        let page = client
            .achievements()
            .get_user_achievements("2533274812345678", &AchievementOptions::default())
            .await
            .unwrap();

        m.assert_async().await;
        assert_eq!(page.achievements.len(), 1);
        assert_eq!(page.achievements[0].name, "First Steps");
        assert_eq!(page.achievements[0].rewards[0].kind, "Gamerscore");
        assert_eq!(page.paging_info.total_records, Some(40));
    }

    #[tokio::test]
    async fn test_continuation_token_round_trip() {
        let mut server = mockito::Server::new_async().await;
        let _first = server
            .mock("GET", "/users/xuid(1)/achievements")
            .match_query(Matcher::UrlEncoded("maxItems".into(), "1".into()))
            .with_status(200)
            .with_body(PAGE)
            .create_async()
            .await;

        let client = client_for(&server);
        let options = AchievementOptions {
            max_items: Some(1),
            ..Default::default()
        };
        let page = client
            .achievements()
            .get_user_achievements("1", &options)
            .await
            .unwrap();
        let next = options.next_page(&page.paging_info).unwrap();

        let second = server
            .mock("GET", "/users/xuid(1)/achievements")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("maxItems".into(), "1".into()),
                Matcher::UrlEncoded("continuationToken".into(), "AAAA+/==".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"achievements":[],"pagingInfo":{"continuationToken":null,"totalRecords":40}}"#)
            .create_async()
            .await;

        let last = client
            .achievements()
            .get_user_achievements("1", &next)
            .await
            .unwrap();

        second.assert_async().await;
        assert!(last.achievements.is_empty());
        assert!(next.next_page(&last.paging_info).is_none());
    }

    #[tokio::test]
    async fn test_get_title_history() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("GET", "/users/xuid(1)/history/titles")
            .match_query(Matcher::UrlEncoded("maxItems".into(), "5".into()))
            .with_status(200)
            .with_body(
                r#"{"titles":[{"titleId":219630713,"name":"Halo","titleType":"LiveTitle","currentGamerscore":100,"maxGamerscore":1000,"earnedAchievements":4,"platform":"Durango"}],"pagingInfo":{"continuationToken":null,"totalRecords":1}}"#,
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let history = client
            .achievements()
            .get_title_history(
                "1",
                &TitleHistoryOptions {
                    max_items: Some(5),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        m.assert_async().await;
        assert_eq!(history.titles[0].title_id, 219630713);
        assert_eq!(history.titles[0].extra["platform"], "Durango");
    }

    #[tokio::test]
    async fn test_title_history_failure_is_normalized() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/users/xuid(1)/history/titles")
            .with_status(403)
            .with_body("")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .achievements()
            .get_title_history("1", &TitleHistoryOptions::default())
            .await
            .unwrap_err();

        let upstream = err.upstream().unwrap();
        assert_eq!(upstream.status.as_u16(), 403);
        assert_eq!(upstream.message, "Failed to fetch achievement title history");
        assert!(upstream.json.is_none());
        assert_eq!(upstream.text.as_deref(), Some(""));
    }
}
