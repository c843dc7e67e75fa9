//
//  xbl-client
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Xbox Live Client Library
//!
//! An authenticated client for the Xbox Live REST services, plus the `xbl`
//! command-line tool built on it.
//!
//! ## Overview
//!
//! The library turns logical operations ("get a user's achievements",
//! "update multiplayer activity") into correctly authorized HTTP requests and
//! turns responses into typed results or a normalized error.
//!
//! ## Module Structure
//!
//! - [`api`]: the transport wrapper, the [`XblClient`] and its service groups
//! - [`auth`]: the XSTS authorization context
//! - [`config`]: TOML configuration (timeouts, headers, endpoint overrides)
//! - [`cli`]: command-line interface definitions using clap
//! - [`output`]: JSON output for the CLI
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use xbl_client::api::XblClient;
//! use xbl_client::auth::AuthorizationContext;
//! use xbl_client::Config;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let auth = AuthorizationContext::from_env()?;
//! let client = XblClient::from_config(auth, &Config::load()?)?;
//!
//! let friends = client
//!     .social()
//!     .get_friends("2533274812345678", &Default::default())
//!     .await?;
//! println!("{} people", friends.total_count);
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions.
///
/// One command group per service, each subcommand mapping to exactly one
/// client operation.
pub mod cli;

/// Xbox Live API client.
pub mod api;

/// XSTS authorization context and token cache loading.
pub mod auth;

/// Configuration file management.
///
/// - Linux: `~/.config/xbl/config.toml`
/// - macOS: `~/Library/Application Support/xbl/config.toml`
/// - Windows: `%APPDATA%\xbl\config.toml`
pub mod config;

/// JSON output for command results.
pub mod output;

/// Re-export of the main CLI struct for convenient access.
pub use cli::Cli;

/// Re-export of the configuration struct.
pub use config::Config;

/// Re-export of the client.
pub use api::XblClient;

/// Application name constant.
///
/// The name of the CLI binary, used for display purposes and configuration paths.
///
/// # Value
///
/// `"xbl"`
pub const APP_NAME: &str = "xbl";

/// Application version constant, from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// # Exit Code Ranges
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
/// - `32+`: External service issues
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error.
    ///
    /// An unspecified error occurred during execution.
    /// Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments, including failed preconditions such as an
    /// empty XUID batch.
    pub const USAGE: i32 = 2;

    /// Missing credentials, or the service rejected the XSTS token (401/403).
    pub const AUTH_ERROR: i32 = 4;

    /// The requested user, title or club does not exist.
    pub const NOT_FOUND: i32 = 8;

    /// The service answered 429 Too Many Requests.
    pub const RATE_LIMIT: i32 = 32;
}
