//
//  xbl-client
//  api/common/query.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Query-String and Path Encoding for Xbox Live URLs
//!
//! Xbox Live services share two URL conventions:
//!
//! | Convention | Example |
//! |------------|---------|
//! | Positional identifiers wrapped in a marker | `/users/xuid(2533274812345678)/achievements` |
//! | Filter options as flat query parameters | `?maxItems=10&unlockedOnly=true` |
//!
//! Options structs are plain `Serialize` types whose field names already match
//! the service's query keys. [`to_query_pairs`] turns one into key/value pairs,
//! skipping absent fields, and [`encode_query`] renders them. An options value
//! with no fields set produces an empty string, never a bare `?`.
//!
//! # Example
//!
//! ```rust
//! use serde::Serialize;
//! use xbl_client::api::common::{encode_query, positional, to_query_pairs};
//!
//! #[derive(Serialize)]
//! #[serde(rename_all = "camelCase")]
//! struct Options {
//!     #[serde(skip_serializing_if = "Option::is_none")]
//!     max_items: Option<u32>,
//! }
//!
//! let pairs = to_query_pairs(&Options { max_items: Some(5) }).unwrap();
//! assert_eq!(encode_query(&pairs), "?maxItems=5");
//!
//! let pairs = to_query_pairs(&Options { max_items: None }).unwrap();
//! assert_eq!(encode_query(&pairs), "");
//!
//! assert_eq!(positional("gt", "Major Nelson"), "gt(Major%20Nelson)");
//! ```

use serde::Serialize;
use serde_json::Value;

use super::ApiError;

/// Converts an options struct into query key/value pairs.
///
/// Every field that serializes to a non-null value becomes one pair, keyed by
/// its serialized name. Values are stringified: strings verbatim, booleans
/// and numbers in their JSON spelling, arrays comma-joined.
///
/// # Errors
///
/// Returns [`ApiError::Precondition`] if `options` does not serialize to a
/// JSON object (or unit), and [`ApiError::Encode`] if serialization fails.
pub fn to_query_pairs<T: Serialize>(options: &T) -> Result<Vec<(String, String)>, ApiError> {
    match serde_json::to_value(options)? {
        Value::Null => Ok(Vec::new()),
        Value::Object(map) => Ok(map
            .into_iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| (key, stringify(value)))
            .collect()),
        other => Err(ApiError::Precondition(format!(
            "query options must be a map of fields, got {}",
            other
        ))),
    }
}

fn stringify(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Array(items) => items
            .into_iter()
            .map(stringify)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

/// Renders query pairs as `?k=v&...`, or an empty string when there are none.
pub fn encode_query(pairs: &[(String, String)]) -> String {
    if pairs.is_empty() {
        return String::new();
    }

    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, value);
    }
    format!("?{}", serializer.finish())
}

/// Builds a positional path segment such as `xuid(123)` or `gt(Some%20Name)`.
///
/// The value is percent-encoded so gamertags with spaces or reserved
/// characters survive as a single segment.
pub fn positional(marker: &str, value: &str) -> String {
    format!("{}({})", marker, urlencoding::encode(value))
}

/// Joins a service base URL, a path, and encoded query pairs.
///
/// `base` is an absolute URL such as `https://profile.xboxlive.com`; a
/// trailing slash on it is ignored. `path` must start with `/`.
pub fn build_url(base: &str, path: &str, query: &[(String, String)]) -> String {
    format!("{}{}{}", base.trim_end_matches('/'), path, encode_query(query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize, Default)]
    #[serde(rename_all = "camelCase")]
    struct Sample {
        #[serde(skip_serializing_if = "Option::is_none")]
        max_items: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        unlocked_only: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        continuation_token: Option<String>,
        // Serialized as null when absent; still omitted.
        title_id: Option<u64>,
    }

    #[test]
    fn test_empty_options_produce_no_query() {
        let pairs = to_query_pairs(&Sample::default()).unwrap();
        assert!(pairs.is_empty());
        assert_eq!(encode_query(&pairs), "");
        assert_eq!(
            build_url("https://achievements.xboxlive.com/", "/users/xuid(1)/achievements", &pairs),
            "https://achievements.xboxlive.com/users/xuid(1)/achievements"
        );
    }

    #[test]
    fn test_defined_keys_are_stringified() {
        let sample = Sample {
            max_items: Some(25),
            unlocked_only: Some(true),
            continuation_token: None,
            title_id: Some(1_717_113_201),
        };
        let mut pairs = to_query_pairs(&sample).unwrap();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("maxItems".to_string(), "25".to_string()),
                ("titleId".to_string(), "1717113201".to_string()),
                ("unlockedOnly".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_continuation_token_survives_encoding() {
        let token = "AAAAAQ==&next/page+1";
        let sample = Sample {
            continuation_token: Some(token.to_string()),
            ..Default::default()
        };
        let query = encode_query(&to_query_pairs(&sample).unwrap());
        let parsed = url::Url::parse(&format!("https://example.com/{}", query)).unwrap();
        let decoded: Vec<(String, String)> = parsed.query_pairs().into_owned().collect();
        assert_eq!(decoded, vec![("continuationToken".to_string(), token.to_string())]);
    }

    #[test]
    fn test_non_object_options_rejected() {
        assert!(matches!(to_query_pairs(&42u32), Err(ApiError::Precondition(_))));
    }

    #[test]
    fn test_positional_encodes_value() {
        assert_eq!(positional("xuid", "2533274812345678"), "xuid(2533274812345678)");
        assert_eq!(positional("gt", "a b/c"), "gt(a%20b%2Fc)");
    }
}
