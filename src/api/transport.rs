//
//  xbl-client
//  api/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Transport Collaborator
//!
//! The request layer never talks to `reqwest` directly. It hands a fully
//! formed [`HttpRequest`] to a [`Transport`] and receives a [`ResponseHandle`]
//! back. [`ReqwestTransport`] is the production implementation; tests plug in
//! their own.
//!
//! ## Response bodies
//!
//! [`ResponseHandle`] reads the body lazily, at most once from the network,
//! and keeps the bytes. [`ResponseHandle::json`] and [`ResponseHandle::text`]
//! can therefore both be called, in any order, and each fails independently:
//! a body that is not JSON still yields its text, and a body that could not be
//! read at all yields an error from both without panicking.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::{Mutex, OnceCell};

use super::common::ApiError;

/// A fully composed outgoing request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP verb
    pub method: Method,
    /// Absolute URL, query string included
    pub url: String,
    /// Final header set
    pub headers: HeaderMap,
    /// Serialized body, if any
    pub body: Option<String>,
    /// Per-request timeout, if the caller set one
    pub timeout: Option<Duration>,
}

/// Something that can issue one HTTP request and hand back the response.
///
/// Implementations issue exactly one network exchange per call. They do not
/// interpret status codes and do not read the body.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues `request` and returns the response head with a lazy body.
    async fn issue(&self, request: HttpRequest) -> Result<ResponseHandle, ApiError>;
}

/// [`Transport`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// Creates a transport with the given User-Agent and optional client-wide timeout.
    pub fn new(user_agent: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
        })
    }

    /// Wraps an already configured client.
    pub fn from_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn issue(&self, request: HttpRequest) -> Result<ResponseHandle, ApiError> {
        let mut builder = self
            .http
            .request(request.method, &request.url)
            .headers(request.headers);

        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        Ok(ResponseHandle::from_response(response))
    }
}

/// Failure to read or decode a response body.
#[derive(Error, Debug)]
pub enum BodyError {
    /// The body bytes could not be read from the connection.
    #[error("body could not be read: {0}")]
    Read(String),

    /// The body is not valid UTF-8.
    #[error("body is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// The body is not valid JSON for the requested type.
    #[error("body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Response head plus a lazily read, cached body.
pub struct ResponseHandle {
    status: StatusCode,
    headers: HeaderMap,
    url: String,
    pending: Mutex<Option<reqwest::Response>>,
    body: OnceCell<Result<Vec<u8>, String>>,
}

impl std::fmt::Debug for ResponseHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseHandle")
            .field("status", &self.status)
            .field("url", &self.url)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

impl ResponseHandle {
    /// Wraps a live `reqwest` response without reading its body.
    pub fn from_response(response: reqwest::Response) -> Self {
        Self {
            status: response.status(),
            headers: response.headers().clone(),
            url: response.url().to_string(),
            pending: Mutex::new(Some(response)),
            body: OnceCell::new(),
        }
    }

    /// Builds a handle from already known parts.
    ///
    /// `body` is `Err(reason)` to model a body that cannot be read.
    pub fn from_parts(
        status: StatusCode,
        headers: HeaderMap,
        url: impl Into<String>,
        body: Result<Vec<u8>, String>,
    ) -> Self {
        Self {
            status,
            headers,
            url: url.into(),
            pending: Mutex::new(None),
            body: OnceCell::new_with(Some(body)),
        }
    }

    /// HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// `true` iff the status is in `200..300`.
    pub fn ok(&self) -> bool {
        self.status.is_success()
    }

    /// Canonical reason phrase for the status, empty if unknown.
    pub fn status_text(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("")
    }

    /// Response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Final URL of the response.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Raw body bytes, read from the network on first access.
    pub async fn bytes(&self) -> Result<&[u8], BodyError> {
        let body = self
            .body
            .get_or_init(|| async {
                match self.pending.lock().await.take() {
                    Some(response) => response
                        .bytes()
                        .await
                        .map(|bytes| bytes.to_vec())
                        .map_err(|e| e.to_string()),
                    None => Err("response body already consumed".to_string()),
                }
            })
            .await;

        body.as_deref().map_err(|reason| BodyError::Read(reason.clone()))
    }

    /// Body decoded as UTF-8 text.
    pub async fn text(&self) -> Result<String, BodyError> {
        let bytes = self.bytes().await?;
        Ok(std::str::from_utf8(bytes)?.to_string())
    }

    /// Body decoded as JSON into `T`.
    pub async fn json<T: DeserializeOwned>(&self) -> Result<T, BodyError> {
        let bytes = self.bytes().await?;
        Ok(serde_json::from_slice(bytes)?)
    }
}
