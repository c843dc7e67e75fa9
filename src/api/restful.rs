//
//  xbl-client
//  api/restful.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Verb Facade over a Transport
//!
//! [`Restful`] exposes one method per HTTP verb. Every instance method takes a
//! URL and a set of [`RequestOptions`] overrides, merges them key by key over
//! the instance defaults, and issues exactly one request. The associated
//! `*_with` functions take the options as-is and merge nothing.
//!
//! The verb is always the one invoked: any `method` carried in either the
//! defaults or the overrides is ignored.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use reqwest::header::{HeaderValue, ACCEPT_LANGUAGE};
//! use xbl_client::api::restful::{RequestOptions, Restful};
//! use xbl_client::api::transport::ReqwestTransport;
//!
//! # async fn example() -> Result<(), xbl_client::api::ApiError> {
//! let transport = Arc::new(ReqwestTransport::new("xbl/0.1", None)?);
//! let defaults = RequestOptions::new()
//!     .with_header(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US"));
//! let restful = Restful::new(transport, defaults);
//!
//! let response = restful
//!     .get("https://userpresence.xboxlive.com/users/me", RequestOptions::new())
//!     .await?;
//! println!("{}", response.status());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::Serialize;

use super::common::ApiError;
use super::transport::{HttpRequest, ResponseHandle, Transport};

/// Per-request knobs: headers, body, timeout and a (non-binding) method.
///
/// Header names are case-insensitive. Merging is key-wise: a header present
/// in the overrides replaces every value of the same name in the defaults,
/// other default headers are kept.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Ignored by [`Restful`]; the invoked verb always wins.
    pub method: Option<Method>,
    /// Request headers
    pub headers: HeaderMap,
    /// Serialized request body
    pub body: Option<String>,
    /// Per-request timeout
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a header, replacing any previous value of the same name.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Sets a header from strings, validating both name and value.
    pub fn try_header(self, name: &str, value: &str) -> Result<Self, ApiError> {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ApiError::InvalidHeader(format!("invalid header name '{}'", name)))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|_| ApiError::InvalidHeader(format!("invalid value for header '{}'", name)))?;
        Ok(self.with_header(header_name, header_value))
    }

    /// Serializes `body` to JSON and uses it as the request body.
    pub fn json_body<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_string(body)?);
        Ok(self)
    }

    /// Sets a per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns these options with `overrides` merged on top.
    ///
    /// # Example
    ///
    /// ```rust
    /// use reqwest::header::HeaderValue;
    /// use xbl_client::api::restful::RequestOptions;
    ///
    /// let defaults = RequestOptions::new()
    ///     .try_header("a", "1").unwrap()
    ///     .try_header("b", "2").unwrap();
    /// let overrides = RequestOptions::new()
    ///     .try_header("B", "3").unwrap()
    ///     .try_header("c", "4").unwrap();
    ///
    /// let merged = defaults.merge(&overrides);
    /// assert_eq!(merged.headers["a"], HeaderValue::from_static("1"));
    /// assert_eq!(merged.headers["b"], HeaderValue::from_static("3"));
    /// assert_eq!(merged.headers["c"], HeaderValue::from_static("4"));
    /// ```
    pub fn merge(&self, overrides: &RequestOptions) -> RequestOptions {
        let mut headers = self.headers.clone();
        for name in overrides.headers.keys() {
            headers.remove(name);
        }
        for (name, value) in overrides.headers.iter() {
            headers.append(name.clone(), value.clone());
        }

        RequestOptions {
            method: overrides.method.clone().or_else(|| self.method.clone()),
            headers,
            body: overrides.body.clone().or_else(|| self.body.clone()),
            timeout: overrides.timeout.or(self.timeout),
        }
    }
}

/// Verb facade holding a transport and instance-level default options.
#[derive(Clone)]
pub struct Restful {
    transport: Arc<dyn Transport>,
    defaults: RequestOptions,
}

impl Restful {
    /// Creates a facade whose instance methods merge over `defaults`.
    pub fn new(transport: Arc<dyn Transport>, defaults: RequestOptions) -> Self {
        Self {
            transport,
            defaults,
        }
    }

    /// The instance-level defaults.
    pub fn defaults(&self) -> &RequestOptions {
        &self.defaults
    }

    /// Issues a GET with `options` merged over the defaults.
    pub async fn get(&self, url: &str, options: RequestOptions) -> Result<ResponseHandle, ApiError> {
        self.call(Method::GET, url, options).await
    }

    /// Issues a POST with `options` merged over the defaults.
    pub async fn post(&self, url: &str, options: RequestOptions) -> Result<ResponseHandle, ApiError> {
        self.call(Method::POST, url, options).await
    }

    /// Issues a PUT with `options` merged over the defaults.
    pub async fn put(&self, url: &str, options: RequestOptions) -> Result<ResponseHandle, ApiError> {
        self.call(Method::PUT, url, options).await
    }

    /// Issues a DELETE with `options` merged over the defaults.
    pub async fn delete(&self, url: &str, options: RequestOptions) -> Result<ResponseHandle, ApiError> {
        self.call(Method::DELETE, url, options).await
    }

    /// Issues an OPTIONS with `options` merged over the defaults.
    pub async fn options(&self, url: &str, options: RequestOptions) -> Result<ResponseHandle, ApiError> {
        self.call(Method::OPTIONS, url, options).await
    }

    /// Issues a GET with exactly `options`.
    pub async fn get_with(
        transport: &dyn Transport,
        url: &str,
        options: RequestOptions,
    ) -> Result<ResponseHandle, ApiError> {
        Self::dispatch(transport, Method::GET, url, options).await
    }

    /// Issues a POST with exactly `options`.
    pub async fn post_with(
        transport: &dyn Transport,
        url: &str,
        options: RequestOptions,
    ) -> Result<ResponseHandle, ApiError> {
        Self::dispatch(transport, Method::POST, url, options).await
    }

    /// Issues a PUT with exactly `options`.
    pub async fn put_with(
        transport: &dyn Transport,
        url: &str,
        options: RequestOptions,
    ) -> Result<ResponseHandle, ApiError> {
        Self::dispatch(transport, Method::PUT, url, options).await
    }

    /// Issues a DELETE with exactly `options`.
    pub async fn delete_with(
        transport: &dyn Transport,
        url: &str,
        options: RequestOptions,
    ) -> Result<ResponseHandle, ApiError> {
        Self::dispatch(transport, Method::DELETE, url, options).await
    }

    /// Issues an OPTIONS with exactly `options`.
    pub async fn options_with(
        transport: &dyn Transport,
        url: &str,
        options: RequestOptions,
    ) -> Result<ResponseHandle, ApiError> {
        Self::dispatch(transport, Method::OPTIONS, url, options).await
    }

    /// Merges `options` over the defaults and issues `verb`.
    pub(crate) async fn call(
        &self,
        verb: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<ResponseHandle, ApiError> {
        let merged = self.defaults.merge(&options);
        Self::dispatch(self.transport.as_ref(), verb, url, merged).await
    }

    async fn dispatch(
        transport: &dyn Transport,
        verb: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<ResponseHandle, ApiError> {
        // Relative URLs are rejected, never resolved.
        url::Url::parse(url)?;

        tracing::debug!(method = %verb, url = %url, "issuing request");

        let request = HttpRequest {
            method: verb,
            url: url.to_string(),
            headers: options.headers,
            body: options.body,
            timeout: options.timeout,
        };
        transport.issue(request).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::sync::Mutex;

    /// In-memory transport that records every request and answers with a
    /// canned status and body.
    pub(crate) struct RecordingTransport {
        pub requests: Mutex<Vec<HttpRequest>>,
        status: StatusCode,
        body: Result<Vec<u8>, String>,
    }

    impl RecordingTransport {
        pub fn new(status: StatusCode, body: Result<Vec<u8>, String>) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                status,
                body,
            }
        }

        pub fn ok_json(body: &str) -> Self {
            Self::new(StatusCode::OK, Ok(body.as_bytes().to_vec()))
        }

        pub fn taken(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn issue(&self, request: HttpRequest) -> Result<ResponseHandle, ApiError> {
            let url = request.url.clone();
            self.requests.lock().unwrap().push(request);
            Ok(ResponseHandle::from_parts(
                self.status,
                HeaderMap::new(),
                url,
                self.body.clone(),
            ))
        }
    }

    fn options(pairs: &[(&str, &str)]) -> RequestOptions {
        pairs
            .iter()
            .fold(RequestOptions::new(), |opts, (k, v)| opts.try_header(k, v).unwrap())
    }

    #[test]
    fn test_merge_override_wins_per_key() {
        let defaults = options(&[("A", "1"), ("B", "2")]);
        let overrides = options(&[("b", "3"), ("C", "4")]);

        let merged = defaults.merge(&overrides);

        assert_eq!(merged.headers.len(), 3);
        assert_eq!(merged.headers["a"], "1");
        assert_eq!(merged.headers["b"], "3");
        assert_eq!(merged.headers["c"], "4");
        assert_eq!(merged.headers.get_all("b").iter().count(), 1);
    }

    #[test]
    fn test_merge_keeps_default_body_and_timeout() {
        let defaults = RequestOptions::new()
            .json_body(&serde_json::json!({"a": 1}))
            .unwrap()
            .with_timeout(Duration::from_secs(3));
        let merged = defaults.merge(&RequestOptions::new());
        assert_eq!(merged.body.as_deref(), Some(r#"{"a":1}"#));
        assert_eq!(merged.timeout, Some(Duration::from_secs(3)));
    }

    #[tokio::test]
    async fn test_verb_cannot_be_spoofed() {
        let transport = Arc::new(RecordingTransport::ok_json("{}"));
        let defaults = RequestOptions {
            method: Some(Method::PUT),
            ..Default::default()
        };
        let restful = Restful::new(transport.clone(), defaults);

        let spoofed = RequestOptions {
            method: Some(Method::POST),
            ..Default::default()
        };
        restful.get("https://example.com/a", spoofed.clone()).await.unwrap();
        restful.delete("https://example.com/b", spoofed.clone()).await.unwrap();
        restful.options("https://example.com/c", spoofed.clone()).await.unwrap();
        Restful::put_with(transport.as_ref(), "https://example.com/d", spoofed)
            .await
            .unwrap();

        let methods: Vec<Method> = transport.taken().into_iter().map(|r| r.method).collect();
        assert_eq!(methods, vec![Method::GET, Method::DELETE, Method::OPTIONS, Method::PUT]);
    }

    #[tokio::test]
    async fn test_static_variant_does_not_merge() {
        let transport = Arc::new(RecordingTransport::ok_json("{}"));
        let restful = Restful::new(transport.clone(), options(&[("x-default", "yes")]));

        restful.post("https://example.com/merged", options(&[("x-call", "1")])).await.unwrap();
        Restful::post_with(transport.as_ref(), "https://example.com/raw", options(&[("x-call", "1")]))
            .await
            .unwrap();

        let requests = transport.taken();
        assert_eq!(requests[0].headers["x-default"], "yes");
        assert_eq!(requests[0].headers["x-call"], "1");
        assert!(requests[1].headers.get("x-default").is_none());
        assert_eq!(requests[1].headers["x-call"], "1");
    }

    #[tokio::test]
    async fn test_relative_url_rejected_without_io() {
        let transport = Arc::new(RecordingTransport::ok_json("{}"));
        let restful = Restful::new(transport.clone(), RequestOptions::new());

        let result = restful.get("/users/me", RequestOptions::new()).await;

        assert!(matches!(result, Err(ApiError::InvalidUrl(_))));
        assert!(transport.taken().is_empty());
    }
}
