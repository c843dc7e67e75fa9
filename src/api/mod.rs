//
//  xbl-client
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! HTTP access to the Xbox Live REST services, in two layers:
//!
//! - [`restful`]: a verb facade over a [`transport::Transport`] that merges
//!   per-call options over instance defaults
//! - [`client`]: the authenticated [`XblClient`] and its per-service
//!   operation groups
//!
//! ## Services
//!
//! - [`profile`]: settings lookup, gamertag to XUID
//! - [`achievements`]: achievement listings and title history
//! - [`presence`]: user, batch and group presence, title presence writes
//! - [`multiplayer`]: multiplayer activity records
//! - [`social`]: followers, friends, relationship summaries
//! - [`clubs`]: clubs, club chat and activity feeds
//!
//! ## Error Handling
//!
//! Every operation returns [`ApiError`]. A response with a non-2xx status
//! becomes [`ApiError::Upstream`] carrying an [`UpstreamError`] with the
//! status, URL, headers and whatever of the body could be read.

/// The authenticated Xbox Live client.
pub mod client;

/// Shared error types and URL/query encoding helpers.
pub mod common;

/// Transport abstraction and the buffered response handle.
pub mod transport;

/// Verb facade with default/override option merging.
pub mod restful;

pub mod achievements;
pub mod clubs;
pub mod multiplayer;
pub mod presence;
pub mod profile;
pub mod social;

/// Re-export of the main Xbox Live client.
pub use client::XblClient;

/// Re-export of the common error types.
pub use common::{ApiError, UpstreamError};
