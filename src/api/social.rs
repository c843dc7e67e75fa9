//
//  xbl-client
//  api/social.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Social graph service (`social.xboxlive.com`).

use clap::ValueEnum;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::client::XblClient;
use super::common::{build_url, positional, to_query_pairs, ApiError};
use super::restful::RequestOptions;

/// Which slice of a user's people list to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum PeopleView {
    All,
    Favorite,
    LegacyXboxLiveFriends,
}

/// Filter and paging options for people listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeopleOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<PeopleView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<u32>,
}

/// One entry of a people list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub xuid: String,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub is_following_caller: bool,
    #[serde(default)]
    pub social_networks: Vec<String>,
}

/// A page of people.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeopleList {
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default)]
    pub total_count: u64,
}

/// The relationship between the caller and a target user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialSummary {
    pub target_following_count: u64,
    pub target_follower_count: u64,
    pub is_caller_following_target: bool,
    pub is_target_following_caller: bool,
    #[serde(default)]
    pub has_caller_marked_target_as_favorite: bool,
    #[serde(default)]
    pub has_caller_marked_target_as_known: bool,
    #[serde(default)]
    pub legacy_friend_status: Option<String>,
    #[serde(default)]
    pub recent_change_count: Option<u64>,
    #[serde(default)]
    pub watermark: Option<String>,
}

#[derive(Serialize)]
struct XuidsRequest<'a> {
    xuids: Vec<&'a str>,
}

/// Operations on `social.xboxlive.com`.
pub struct SocialApi<'a> {
    client: &'a XblClient,
}

impl<'a> SocialApi<'a> {
    pub(crate) fn new(client: &'a XblClient) -> Self {
        Self { client }
    }

    async fn people(
        &self,
        xuid: &str,
        options: &PeopleOptions,
        action: &str,
    ) -> Result<PeopleList, ApiError> {
        let path = format!("/users/{}/people", positional("xuid", xuid));
        let url = build_url(&self.client.endpoints().social, &path, &to_query_pairs(options)?);
        self.client
            .fetch(Method::GET, &url, RequestOptions::new(), action)
            .await
    }

    /// People following the user.
    pub async fn get_followers(
        &self,
        xuid: &str,
        options: &PeopleOptions,
    ) -> Result<PeopleList, ApiError> {
        self.people(xuid, options, "fetch followers").await
    }

    /// People the user follows.
    ///
    /// Served by the same endpoint as [`SocialApi::get_followers`]; `view`
    /// selects the slice.
    pub async fn get_friends(
        &self,
        xuid: &str,
        options: &PeopleOptions,
    ) -> Result<PeopleList, ApiError> {
        self.people(xuid, options, "fetch friends").await
    }

    /// `target` as it appears in `owner`'s people list.
    pub async fn get_followers_as_user(&self, owner: &str, target: &str) -> Result<Person, ApiError> {
        let path = format!(
            "/users/{}/people/{}",
            positional("xuid", owner),
            positional("xuid", target)
        );
        let url = build_url(&self.client.endpoints().social, &path, &[]);
        let options = RequestOptions::new().try_header("XUID", owner)?;

        self.client
            .fetch(Method::GET, &url, options, "fetch following")
            .await
    }

    /// The subset of `xuids` present in the user's people list.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Precondition`] without issuing a request if `xuids`
    /// is empty.
    pub async fn get_followers_xuids<S: AsRef<str>>(
        &self,
        xuid: &str,
        xuids: &[S],
    ) -> Result<PeopleList, ApiError> {
        if xuids.is_empty() {
            return Err(ApiError::Precondition(
                "at least one XUID is required to filter a people list".to_string(),
            ));
        }

        let path = format!("/users/{}/people/xuids", positional("xuid", xuid));
        let url = build_url(&self.client.endpoints().social, &path, &[]);
        let body = XuidsRequest {
            xuids: xuids.iter().map(AsRef::as_ref).collect(),
        };
        let options = RequestOptions::new().json_body(&body)?;

        self.client
            .fetch(Method::POST, &url, options, "fetch people by xuid")
            .await
    }

    /// Relationship summary between the caller and `xuid`.
    pub async fn get_view_as_user(&self, xuid: &str) -> Result<SocialSummary, ApiError> {
        let path = format!("/users/{}/summary", positional("xuid", xuid));
        let url = build_url(&self.client.endpoints().social, &path, &[]);
        self.client
            .fetch(Method::GET, &url, RequestOptions::new(), "fetch view")
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
    use serde_json::json;
    use std::sync::Arc;

    fn auth() -> AuthorizationContext {
        AuthorizationContext::new("2533274812345678", "uhs", "tok").unwrap()
    }

    fn client_for(server: &mockito::Server) -> XblClient {
        let config = Config {
            endpoints: Endpoints::all(&server.url()),
            ..Default::default()
        };
        XblClient::from_config(auth(), &config).unwrap()
    }

    const PEOPLE: &str = r#"{"totalCount":2,"people":[{"xuid":"1","isFavorite":true,"isFollowingCaller":false,"socialNetworks":["LegacyXboxLive"]},{"xuid":"2","isFavorite":false,"isFollowingCaller":true}]}"#;

    #[tokio::test]
    async fn test_get_followers_with_options() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("GET", "/users/xuid(42)/people")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("view".into(), "Favorite".into()),
                Matcher::UrlEncoded("maxItems".into(), "10".into()),
                Matcher::UrlEncoded("startIndex".into(), "20".into()),
            ]))
            .with_status(200)
            .with_body(PEOPLE)
            .create_async()
            .await;

        let client = client_for(&server);
        let options = PeopleOptions {
            view: Some(PeopleView::Favorite),
            max_items: Some(10),
            start_index: Some(20),
        };
        let list = client.social().get_followers("42", &options).await.unwrap();

        m.assert_async().await;
        assert_eq!(list.total_count, 2);
        assert!(list.people[1].social_networks.is_empty());
    }

    #[tokio::test]
    async fn test_get_friends_without_options_has_no_query() {
        let transport = Arc::new(RecordingTransport::ok_json(PEOPLE));
        let client = XblClient::with_transport(auth(), &Config::default(), transport.clone()).unwrap();

        client
            .social()
            .get_friends("42", &PeopleOptions::default())
            .await
            .unwrap();

        let request = &transport.taken()[0];
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.url, "https://social.xboxlive.com/users/xuid(42)/people");
    }

    #[tokio::test]
    async fn test_get_followers_as_user_sends_xuid_header() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("GET", "/users/xuid(1)/people/xuid(2)")
            .match_header("xuid", "1")
            .with_status(200)
            .with_body(r#"{"xuid":"2","isFavorite":false,"isFollowingCaller":true}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let person = client.social().get_followers_as_user("1", "2").await.unwrap();

        m.assert_async().await;
        assert!(person.is_following_caller);
    }

    #[tokio::test]
    async fn test_get_followers_xuids_body() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("POST", "/users/xuid(42)/people/xuids")
            .match_body(Matcher::Json(json!({"xuids": ["1", "2"]})))
            .with_status(200)
            .with_body(PEOPLE)
            .create_async()
            .await;

        let client = client_for(&server);
        client
            .social()
            .get_followers_xuids("42", &["1", "2"])
            .await
            .unwrap();

        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_followers_xuids_requires_ids() {
        let transport = Arc::new(RecordingTransport::ok_json("{}"));
        let client = XblClient::with_transport(auth(), &Config::default(), transport.clone()).unwrap();

        let err = client
            .social()
            .get_followers_xuids::<&str>("42", &[])
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Precondition(_)));
        assert!(transport.taken().is_empty());
    }

    #[tokio::test]
    async fn test_get_view_as_user() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/users/xuid(42)/summary")
            .with_status(200)
            .with_body(
                r#"{"targetFollowingCount":10,"targetFollowerCount":20,"isCallerFollowingTarget":true,"isTargetFollowingCaller":false,"hasCallerMarkedTargetAsFavorite":false,"hasCallerMarkedTargetAsKnown":true,"legacyFriendStatus":"None","recentChangeCount":0,"watermark":"5"}"#,
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let summary = client.social().get_view_as_user("42").await.unwrap();

        assert_eq!(summary.target_follower_count, 20);
        assert!(summary.has_caller_marked_target_as_known);
        assert_eq!(summary.legacy_friend_status.as_deref(), Some("None"));
    }
}
