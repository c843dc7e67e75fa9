//
//  xbl-client
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the Xbox Live Services
//!
//! This module provides the error types shared by every service area, plus the
//! query-string and path-segment encoding helpers (re-exported from the
//! [`query`] submodule).
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all API operations
//! - [`UpstreamError`] - Normalized diagnostic payload for a non-2xx response
//! - [`ErrorKind`] - Coarse classification of an upstream status code
//! - [`XblErrorCode`] - Known XSAPI error codes
//!
//! # Example
//!
//! ```rust
//! use xbl_client::api::common::{ApiError, ErrorKind};
//!
//! fn handle_result<T>(result: Result<T, ApiError>) {
//!     match result {
//!         Ok(_) => println!("Success!"),
//!         Err(ApiError::Upstream(err)) if err.kind() == ErrorKind::Unauthorized => {
//!             println!("Token rejected, sign in again")
//!         }
//!         Err(ApiError::NotFound(what)) => println!("Not found: {}", what),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```

use std::fmt;

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

mod query;

pub use query::*;

use super::transport::BodyError;

/// Unified error type for all Xbox Live API operations.
///
/// # Variants
///
/// | Variant | Raised when | Request issued? |
/// |---------|-------------|-----------------|
/// | `Network` | The transport could not complete the exchange | Attempted |
/// | `Upstream` | A response arrived with a non-2xx status | Yes |
/// | `Precondition` | A caller argument violates an operation precondition | No |
/// | `NotFound` | A lookup returned an empty result list | Yes |
/// | `Decode` | A 2xx body does not match the declared result type | Yes |
/// | `Encode` | A request body could not be serialized | No |
/// | `InvalidUrl` | The composed URL is not absolute or not parseable | No |
/// | `InvalidHeader` | A header name or value contains illegal characters | No |
#[derive(Error, Debug)]
pub enum ApiError {
    /// A network-level error occurred during the request.
    ///
    /// Connection failures, timeouts, DNS resolution errors and other
    /// transport-layer issues surface here unmodified.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error(transparent)]
    Upstream(Box<UpstreamError>),

    /// A caller-supplied argument was rejected before any request was issued.
    #[error("Invalid argument: {0}")]
    Precondition(String),

    /// A lookup succeeded but returned no matching entity.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// A successful response body could not be decoded into the result type.
    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        /// URL of the response that failed to decode
        url: String,
        /// The underlying body error
        #[source]
        source: BodyError,
    },

    /// A request body could not be serialized to JSON.
    #[error("Failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),

    /// A request URL could not be parsed as an absolute URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A header name or value contained characters HTTP does not allow.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

impl ApiError {
    /// Returns the normalized upstream payload if this is an upstream failure.
    pub fn upstream(&self) -> Option<&UpstreamError> {
        match self {
            Self::Upstream(err) => Some(err.as_ref()),
            _ => None,
        }
    }

    /// Returns the HTTP status of an upstream failure.
    pub fn status(&self) -> Option<StatusCode> {
        self.upstream().map(|err| err.status)
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        Self::Upstream(Box::new(err))
    }
}

/// Coarse classification of an upstream failure by status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 400 Bad Request
    BadRequest,
    /// 401 Unauthorized, usually an expired XSTS token
    Unauthorized,
    /// 403 Forbidden, usually a privacy setting on the target user
    Forbidden,
    /// 404 Not Found
    NotFound,
    /// 409 Conflict or 412 Precondition Failed (stale sequence number)
    Conflict,
    /// 429 Too Many Requests
    RateLimited,
    /// Any 5xx status
    Server,
    /// Anything else
    Other,
}

impl ErrorKind {
    /// Classifies an HTTP status code.
    pub fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 | 412 => Self::Conflict,
            429 => Self::RateLimited,
            500..=599 => Self::Server,
            _ => Self::Other,
        }
    }
}

/// Normalized diagnostic payload for a response whose status was not 2xx.
///
/// Carries enough context to reconstruct the failing exchange without
/// re-issuing it. The body fields are best-effort: `json` is present only when
/// the body parsed as JSON, `text` only when the body could be read as UTF-8.
/// A failure to read one never prevents the other from being attempted.
///
/// # Example
///
/// ```rust
/// use reqwest::header::HeaderMap;
/// use reqwest::StatusCode;
/// use xbl_client::api::common::{ErrorKind, UpstreamError};
///
/// let err = UpstreamError {
///     message: "Failed to fetch club".to_string(),
///     status: StatusCode::FORBIDDEN,
///     status_text: "Forbidden".to_string(),
///     url: "https://clubhub.xboxlive.com/clubs/ids(1)/decoration/Roster".to_string(),
///     headers: HeaderMap::new(),
///     json: None,
///     text: Some(String::new()),
/// };
/// assert_eq!(err.kind(), ErrorKind::Forbidden);
/// ```
#[derive(Debug, Clone)]
pub struct UpstreamError {
    /// Operation-specific summary, e.g. "Failed to fetch user presence"
    pub message: String,
    /// HTTP status of the response
    pub status: StatusCode,
    /// Canonical reason phrase of the status
    pub status_text: String,
    /// Final URL of the response
    pub url: String,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body, when the body was valid JSON
    pub json: Option<Value>,
    /// Raw text body, when the body was readable
    pub text: Option<String>,
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} at {}", self.message, self.status, self.url)?;
        if let Some(detail) = self.upstream_message() {
            write!(f, ": {}", detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for UpstreamError {}

impl UpstreamError {
    /// Classifies the status code.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::from_status(self.status)
    }

    /// Extracts a human-readable message from the error body.
    ///
    /// Xbox Live services are not consistent about their error envelope, so
    /// this checks, in order:
    ///
    /// ```json
    /// {"description": "..."}
    /// {"message": "..."}
    /// {"errorMessage": "..."}
    /// {"error": {"message": "..."}}
    /// ```
    pub fn upstream_message(&self) -> Option<String> {
        let json = self.json.as_ref()?;

        for key in ["description", "message", "errorMessage"] {
            if let Some(message) = json.get(key).and_then(|m| m.as_str()) {
                return Some(message.to_string());
            }
        }

        json.get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
            .map(str::to_string)
    }

    /// Returns the XSAPI error code carried in the body, if recognized.
    pub fn xbl_code(&self) -> Option<XblErrorCode> {
        let json = self.json.as_ref()?;
        ["code", "errorCode"]
            .iter()
            .filter_map(|key| json.get(*key).and_then(|c| c.as_u64()))
            .find_map(XblErrorCode::from_code)
    }
}

/// Error codes defined by the Xbox Services API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XblErrorCode {
    /// 0x89235200
    RuntimeError,
    /// 0x89235201
    RtaGenericError,
    /// 0x89235202
    RtaSubscriptionLimitReached,
    /// 0x89235203
    RtaAccessDenied,
    /// 0x89235204
    AuthUnknownError,
    /// 0x89235205
    AuthRuntimeError,
    /// 0x00892352
    AuthNoToken,
    /// 0x89235207
    AlreadyInitialized,
    /// 0x89235208
    NotInitialized,
}

impl XblErrorCode {
    /// Maps a numeric code to a known variant.
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            0x8923_5200 => Some(Self::RuntimeError),
            0x8923_5201 => Some(Self::RtaGenericError),
            0x8923_5202 => Some(Self::RtaSubscriptionLimitReached),
            0x8923_5203 => Some(Self::RtaAccessDenied),
            0x8923_5204 => Some(Self::AuthUnknownError),
            0x8923_5205 => Some(Self::AuthRuntimeError),
            0x0089_2352 => Some(Self::AuthNoToken),
            0x8923_5207 => Some(Self::AlreadyInitialized),
            0x8923_5208 => Some(Self::NotInitialized),
            _ => None,
        }
    }

    /// Returns the numeric value of the code.
    pub fn code(self) -> u64 {
        match self {
            Self::RuntimeError => 0x8923_5200,
            Self::RtaGenericError => 0x8923_5201,
            Self::RtaSubscriptionLimitReached => 0x8923_5202,
            Self::RtaAccessDenied => 0x8923_5203,
            Self::AuthUnknownError => 0x8923_5204,
            Self::AuthRuntimeError => 0x8923_5205,
            Self::AuthNoToken => 0x0089_2352,
            Self::AlreadyInitialized => 0x8923_5207,
            Self::NotInitialized => 0x8923_5208,
        }
    }

    /// Returns the symbolic XSAPI name.
    pub fn name(self) -> &'static str {
        match self {
            Self::RuntimeError => "E_XBL_RUNTIME_ERROR",
            Self::RtaGenericError => "E_XBL_RTA_GENERIC_ERROR",
            Self::RtaSubscriptionLimitReached => "E_XBL_RTA_SUBSCRIPTION_LIMIT_REACHED",
            Self::RtaAccessDenied => "E_XBL_RTA_ACCESS_DENIED",
            Self::AuthUnknownError => "E_XBL_AUTH_UNKNOWN_ERROR",
            Self::AuthRuntimeError => "E_XBL_AUTH_RUNTIME_ERROR",
            Self::AuthNoToken => "E_XBL_AUTH_NO_TOKEN",
            Self::AlreadyInitialized => "E_XBL_ALREADY_INITIALIZED",
            Self::NotInitialized => "E_XBL_NOT_INITIALIZED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn upstream(status: StatusCode, json: Option<Value>) -> UpstreamError {
        UpstreamError {
            message: "Failed to fetch user presence".to_string(),
            status,
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            url: "https://userpresence.xboxlive.com/users/me".to_string(),
            headers: HeaderMap::new(),
            json,
            text: None,
        }
    }

    #[test]
    fn test_error_kind_from_status() {
        assert_eq!(ErrorKind::from_status(StatusCode::UNAUTHORIZED), ErrorKind::Unauthorized);
        assert_eq!(ErrorKind::from_status(StatusCode::PRECONDITION_FAILED), ErrorKind::Conflict);
        assert_eq!(ErrorKind::from_status(StatusCode::TOO_MANY_REQUESTS), ErrorKind::RateLimited);
        assert_eq!(ErrorKind::from_status(StatusCode::BAD_GATEWAY), ErrorKind::Server);
        assert_eq!(ErrorKind::from_status(StatusCode::IM_A_TEAPOT), ErrorKind::Other);
    }

    #[test]
    fn test_upstream_message_shapes() {
        let err = upstream(StatusCode::BAD_REQUEST, Some(json!({"description": "bad level"})));
        assert_eq!(err.upstream_message().as_deref(), Some("bad level"));

        let err = upstream(StatusCode::BAD_REQUEST, Some(json!({"error": {"message": "nope"}})));
        assert_eq!(err.upstream_message().as_deref(), Some("nope"));

        let err = upstream(StatusCode::BAD_REQUEST, None);
        assert_eq!(err.upstream_message(), None);
    }

    #[test]
    fn test_display_includes_context() {
        let err = upstream(StatusCode::NOT_FOUND, Some(json!({"message": "no such user"})));
        let rendered = err.to_string();
        assert!(rendered.starts_with("Failed to fetch user presence: 404 Not Found at "));
        assert!(rendered.contains("https://userpresence.xboxlive.com/users/me"));
        assert!(rendered.ends_with(": no such user"));
    }

    #[test]
    fn test_xbl_code_recognized() {
        let err = upstream(StatusCode::FORBIDDEN, Some(json!({"code": 2300793347u64})));
        assert_eq!(err.xbl_code(), Some(XblErrorCode::RtaAccessDenied));
        assert_eq!(XblErrorCode::AuthNoToken.code(), 8987474);
        assert_eq!(XblErrorCode::RuntimeError.name(), "E_XBL_RUNTIME_ERROR");
    }
}
