//
//  xbl-client
//  cli/profile.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Profile commands

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::profile::UserSetting;

use super::GlobalOptions;

/// Look up profiles and settings
#[derive(Args, Debug)]
pub struct ProfileCommand {
    #[command(subcommand)]
    pub command: ProfileSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProfileSubcommand {
    /// Fetch profile settings for one or more users
    Settings(SettingsArgs),

    /// Resolve a gamertag to its XUID
    Xuid(XuidArgs),
}

#[derive(Args, Debug)]
pub struct SettingsArgs {
    /// XUIDs to look up
    #[arg(required = true)]
    pub xuids: Vec<String>,

    /// Setting to fetch (repeatable), e.g. Gamertag, Gamerscore, Bio
    #[arg(long = "setting", short = 's', default_value = "Gamertag")]
    pub settings: Vec<UserSetting>,
}

#[derive(Args, Debug)]
pub struct XuidArgs {
    /// Gamertag to resolve
    pub gamertag: String,
}

impl ProfileCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let writer = global.writer();

        match &self.command {
            ProfileSubcommand::Settings(args) => {
                let settings = client
                    .profile()
                    .get_user_settings(&args.xuids, &args.settings)
                    .await?;
                writer.write(&settings)
            }
            ProfileSubcommand::Xuid(args) => {
                let xuid = client.profile().get_xuid(&args.gamertag).await?;
                writer.write(&serde_json::json!({
                    "gamertag": args.gamertag,
                    "xuid": xuid,
                }))
            }
        }
    }
}
