//
//  xbl-client
//  api/clubs.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Clubs, club chat and activity feeds.
//!
//! These live on four services:
//!
//! | Operation | Service |
//! |-----------|---------|
//! | [`ClubsApi::get_club`], [`ClubsApi::find_club`] | `clubhub.xboxlive.com` |
//! | [`ClubsApi::get_chat`] | `chatfd.xboxlive.com` |
//! | [`ClubsApi::get_feed`] | `avty.xboxlive.com` |
//! | [`ClubsApi::send_feed`] | `userposts.xboxlive.com` |
//!
//! Club documents are large and change shape with the decorations requested.
//! The result types below name the fields most callers need and keep every
//! other field in `extra`, so nothing in the response is lost.

use clap::ValueEnum;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::client::XblClient;
use super::common::{build_url, positional, ApiError};
use super::restful::RequestOptions;

/// Number of results requested from club search.
pub const CLUB_SEARCH_COUNT: u32 = 30;

/// A list of clubs, as returned by lookup and search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubList {
    #[serde(default)]
    pub clubs: Vec<Club>,
    #[serde(default)]
    pub search_facet_results: Option<Value>,
    #[serde(default)]
    pub recommendation_counts: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Club {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// `public`, `private` or `secret`.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub owner_xuid: Option<String>,
    #[serde(default)]
    pub founder_xuid: Option<String>,
    #[serde(default)]
    pub creation_date_utc: Option<String>,
    #[serde(default)]
    pub associated_titles: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub followers_count: Option<u64>,
    #[serde(default)]
    pub members_count: Option<u64>,
    #[serde(default)]
    pub club_presence_count: Option<u64>,
    #[serde(default)]
    pub club_presence: Vec<ClubPresence>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubPresence {
    pub xuid: String,
    #[serde(default)]
    pub last_seen_timestamp: Option<String>,
    #[serde(default)]
    pub last_seen_state: Option<String>,
}

/// Recent messages of a club's chat channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatHistory {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    #[serde(default)]
    pub xuid: Option<String>,
    #[serde(default)]
    pub gamertag: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A page of a club's activity feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityFeed {
    #[serde(default)]
    pub activity_items: Vec<FeedItem>,
    #[serde(default)]
    pub cont_token: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Audience of a feed post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FeedTarget {
    All,
    Club,
}

/// Media kind of a feed post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FeedType {
    Text,
    Image,
    Video,
}

/// A post to publish to the signed-in user's feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPost {
    pub message: String,
    pub title_id: u64,
    pub target: FeedTarget,
    #[serde(rename = "type")]
    pub kind: FeedType,
}

/// Club, chat and feed operations.
pub struct ClubsApi<'a> {
    client: &'a XblClient,
}

impl<'a> ClubsApi<'a> {
    pub(crate) fn new(client: &'a XblClient) -> Self {
        Self { client }
    }

    /// Fetches a club with its presence, roster and settings decorations.
    pub async fn get_club(&self, club_id: &str) -> Result<ClubList, ApiError> {
        let path = format!(
            "/clubs/{}/decoration/ClubPresence,Roster,Settings",
            positional("ids", club_id)
        );
        let url = build_url(&self.client.endpoints().clubhub, &path, &[]);
        self.client
            .fetch(Method::GET, &url, RequestOptions::new(), "fetch club")
            .await
    }

    /// Searches clubs by free text.
    pub async fn find_club(&self, query: &str) -> Result<ClubList, ApiError> {
        let params = vec![
            ("count".to_string(), CLUB_SEARCH_COUNT.to_string()),
            ("q".to_string(), query.to_string()),
            ("tags".to_string(), String::new()),
            ("titles".to_string(), String::new()),
        ];
        let url = build_url(
            &self.client.endpoints().clubhub,
            "/clubs/search/decoration/detail",
            &params,
        );
        self.client
            .fetch(Method::GET, &url, RequestOptions::new(), "find club")
            .await
    }

    /// Reads the most recent `max_items` messages of a club's chat.
    pub async fn get_chat(&self, club_id: &str, max_items: u32) -> Result<ChatHistory, ApiError> {
        let path = format!(
            "/channels/Club/{}/messages/history",
            urlencoding::encode(club_id)
        );
        let url = build_url(
            &self.client.endpoints().chat,
            &path,
            &[("maxItems".to_string(), max_items.to_string())],
        );
        self.client
            .fetch(Method::GET, &url, RequestOptions::new(), "fetch chat")
            .await
    }

    /// Reads the most recent `num_items` entries of a club's activity feed.
    pub async fn get_feed(&self, club_id: &str, num_items: u32) -> Result<ActivityFeed, ApiError> {
        let path = format!("/clubs/{}/activity/feed", positional("clubId", club_id));
        let url = build_url(
            &self.client.endpoints().activity,
            &path,
            &[("numItems".to_string(), num_items.to_string())],
        );
        self.client
            .fetch(Method::GET, &url, RequestOptions::new(), "fetch club feed")
            .await
    }

    /// Publishes a post. The created post is returned as sent by the service.
    pub async fn send_feed(&self, post: &FeedPost) -> Result<Value, ApiError> {
        let url = build_url(&self.client.endpoints().userposts, "/users/me/posts", &[]);
        let options = RequestOptions::new().json_body(post)?;
        self.client
            .fetch(Method::POST, &url, options, "send feed")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthorizationContext;
    use crate::config::{Config, Endpoints};
    use mockito::Matcher;
    use serde_json::json;

    fn client_for(server: &mockito::Server) -> XblClient {
        let config = Config {
            endpoints: Endpoints::all(&server.url()),
            ..Default::default()
        };
        let auth = AuthorizationContext::new("2533274812345678", "uhs", "tok").unwrap();
        XblClient::from_config(auth, &config).unwrap()
    }

    #[tokio::test]
    async fn test_get_club_keeps_unknown_fields() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("GET", "/clubs/ids(3379883100000000)/decoration/ClubPresence,Roster,Settings")
            .with_status(200)
            .with_body(
                r#"{"clubs":[{"id":"3379883100000000","name":"Speedrunners","type":"public","tags":["Competitive"],"clubPresence":[{"xuid":"1","lastSeenState":"NotInClub"}],"roster":{"moderator":[]},"preferredColor":{"primaryColor":"107c10"}}],"searchFacetResults":null,"recommendationCounts":null}"#,
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let list = client.clubs().get_club("3379883100000000").await.unwrap();

        m.assert_async().await;
        let club = &list.clubs[0];
        assert_eq!(club.kind.as_deref(), Some("public"));
        assert_eq!(club.club_presence[0].last_seen_state.as_deref(), Some("NotInClub"));
        assert_eq!(club.extra["preferredColor"]["primaryColor"], "107c10");
        assert!(club.extra.contains_key("roster"));
    }

    #[tokio::test]
    async fn test_find_club_query() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("GET", "/clubs/search/decoration/detail")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("count".into(), "30".into()),
                Matcher::UrlEncoded("q".into(), "halo speed".into()),
                Matcher::UrlEncoded("tags".into(), "".into()),
                Matcher::UrlEncoded("titles".into(), "".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"clubs":[]}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let list = client.clubs().find_club("halo speed").await.unwrap();

        m.assert_async().await;
        assert!(list.clubs.is_empty());
    }

    #[tokio::test]
    async fn test_get_chat_and_feed() {
        let mut server = mockito::Server::new_async().await;
        let chat = server
            .mock("GET", "/channels/Club/77/messages/history")
            .match_query(Matcher::UrlEncoded("maxItems".into(), "5".into()))
            .with_status(200)
            .with_body(r#"{"messages":[{"xuid":"1","message":"gg","messageTime":"2024-01-01T00:00:00Z"}]}"#)
            .create_async()
            .await;
        let feed = server
            .mock("GET", "/clubs/clubId(77)/activity/feed")
            .match_query(Matcher::UrlEncoded("numItems".into(), "3".into()))
            .with_status(200)
            .with_body(r#"{"activityItems":[{"contentType":"Text","date":"2024-01-01T00:00:00Z","authorInfo":{"name":"x"}}],"contToken":"t"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let history = client.clubs().get_chat("77", 5).await.unwrap();
        let page = client.clubs().get_feed("77", 3).await.unwrap();

        chat.assert_async().await;
        feed.assert_async().await;
        assert_eq!(history.messages[0].message.as_deref(), Some("gg"));
        assert_eq!(history.messages[0].extra["messageTime"], "2024-01-01T00:00:00Z");
        assert_eq!(page.cont_token.as_deref(), Some("t"));
        assert_eq!(page.activity_items[0].content_type.as_deref(), Some("Text"));
    }

    #[tokio::test]
    async fn test_send_feed_body() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("POST", "/users/me/posts")
            .match_body(Matcher::Json(json!({
                "message": "hello",
                "titleId": 1144039928u64,
                "target": "club",
                "type": "text"
            })))
            .with_status(200)
            .with_body(r#"{"postId":"p1"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let created = client
            .clubs()
            .send_feed(&FeedPost {
                message: "hello".to_string(),
                title_id: 1144039928,
                target: FeedTarget::Club,
                kind: FeedType::Text,
            })
            .await
            .unwrap();

        m.assert_async().await;
        assert_eq!(created["postId"], "p1");
    }
}
