//
//  xbl-client
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod achievements;
mod clubs;
mod multiplayer;
mod presence;
mod profile;
mod social;

pub use achievements::AchievementsCommand;
pub use clubs::ClubsCommand;
pub use multiplayer::MultiplayerCommand;
pub use presence::PresenceCommand;
pub use profile::ProfileCommand;
pub use social::SocialCommand;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::api::common::{ApiError, ErrorKind};
use crate::api::XblClient;
use crate::auth::AuthorizationContext;
use crate::config::Config;
use crate::exit_codes;
use crate::output::OutputWriter;

/// Xbox Live CLI - Query the Xbox Live REST services from the command line
#[derive(Parser, Debug)]
#[command(
    name = "xbl",
    version,
    about = "Query the Xbox Live REST services from the command line",
    long_about = "xbl calls the Xbox Live profile, achievements, presence, multiplayer,\n\
                  social and club services with an existing XSTS token and prints the\n\
                  results as JSON.",
    propagate_version = true,
    after_help = "Use 'xbl <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// JSON token cache with userXUID, userHash, XSTSToken
    #[arg(long, global = true, env = "XBL_TOKEN_FILE")]
    pub token_file: Option<PathBuf>,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true, env = "XBL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print minified JSON
    #[arg(long, global = true)]
    pub compact: bool,

    /// Print only the value at this dot path, e.g. .people.0.xuid
    #[arg(long, global = true)]
    pub field: Option<String>,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up profiles and settings
    Profile(ProfileCommand),

    /// List achievements and title history
    #[command(visible_alias = "ach")]
    Achievements(AchievementsCommand),

    /// Read and write presence
    Presence(PresenceCommand),

    /// Manage multiplayer activity
    #[command(visible_alias = "mp")]
    Multiplayer(MultiplayerCommand),

    /// Browse the social graph
    Social(SocialCommand),

    /// Clubs, club chat and activity feeds
    Clubs(ClubsCommand),
}

/// The credentials could not be loaded.
#[derive(Debug, thiserror::Error)]
#[error("No usable Xbox Live credentials")]
pub struct MissingCredentials;

impl GlobalOptions {
    /// Loads credentials and configuration and builds a client.
    pub fn client(&self) -> Result<XblClient> {
        let auth = match &self.token_file {
            Some(path) => AuthorizationContext::from_file(path),
            None => AuthorizationContext::from_env(),
        }
        .context(MissingCredentials)?;

        if auth.is_expired() {
            tracing::warn!(
                expires_on = ?auth.expires_on(),
                "XSTS token has expired; requests will likely be rejected"
            );
        }

        let config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        Ok(XblClient::from_config(auth, &config)?)
    }

    /// The output writer selected by `--compact` and `--field`.
    pub fn writer(&self) -> OutputWriter {
        OutputWriter::new(self.compact, self.field.clone())
    }
}

impl Commands {
    /// Runs the selected command.
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match self {
            Commands::Profile(cmd) => cmd.run(global).await,
            Commands::Achievements(cmd) => cmd.run(global).await,
            Commands::Presence(cmd) => cmd.run(global).await,
            Commands::Multiplayer(cmd) => cmd.run(global).await,
            Commands::Social(cmd) => cmd.run(global).await,
            Commands::Clubs(cmd) => cmd.run(global).await,
        }
    }
}

/// Uses `xuid` when given, otherwise the signed-in user's XUID.
pub(crate) fn target_xuid(client: &XblClient, xuid: Option<&str>) -> String {
    xuid.map(str::to_string)
        .unwrap_or_else(|| client.authorization().user_xuid().to_string())
}

/// Maps a command failure to a process exit code.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<MissingCredentials>().is_some() {
        return exit_codes::AUTH_ERROR;
    }

    match err.downcast_ref::<ApiError>() {
        Some(ApiError::Precondition(_)) => exit_codes::USAGE,
        Some(ApiError::NotFound(_)) => exit_codes::NOT_FOUND,
        Some(ApiError::Upstream(upstream)) => match upstream.kind() {
            ErrorKind::Unauthorized | ErrorKind::Forbidden => exit_codes::AUTH_ERROR,
            ErrorKind::NotFound => exit_codes::NOT_FOUND,
            ErrorKind::RateLimited => exit_codes::RATE_LIMIT,
            _ => exit_codes::ERROR,
        },
        _ => exit_codes::ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::UpstreamError;
    use clap::CommandFactory;
    use reqwest::header::HeaderMap;
    use reqwest::StatusCode;

    fn upstream(status: StatusCode) -> anyhow::Error {
        ApiError::from(UpstreamError {
            message: "Failed to fetch club".to_string(),
            status,
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            url: "https://clubhub.xboxlive.com/clubs/ids(1)".to_string(),
            headers: HeaderMap::new(),
            json: None,
            text: None,
        })
        .into()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code_for(&upstream(StatusCode::UNAUTHORIZED)), exit_codes::AUTH_ERROR);
        assert_eq!(exit_code_for(&upstream(StatusCode::NOT_FOUND)), exit_codes::NOT_FOUND);
        assert_eq!(exit_code_for(&upstream(StatusCode::TOO_MANY_REQUESTS)), exit_codes::RATE_LIMIT);
        assert_eq!(exit_code_for(&upstream(StatusCode::BAD_GATEWAY)), exit_codes::ERROR);
        assert_eq!(
            exit_code_for(&ApiError::Precondition("empty".into()).into()),
            exit_codes::USAGE
        );
        assert_eq!(
            exit_code_for(&anyhow::anyhow!("XBL_XUID is not set").context(MissingCredentials)),
            exit_codes::AUTH_ERROR
        );
    }

    #[test]
    fn test_client_from_token_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"userXUID":"42","userHash":"uhs","XSTSToken":"tok"}}"#).unwrap();
        let dir = tempfile::tempdir().unwrap();

        let global = GlobalOptions {
            token_file: Some(file.path().to_path_buf()),
            config: Some(dir.path().join("config.toml")),
            ..Default::default()
        };
        let client = global.client().unwrap();
        assert_eq!(target_xuid(&client, None), "42");
        assert_eq!(target_xuid(&client, Some("7")), "7");
    }
}
