//
//  xbl-client
//  cli/multiplayer.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Multiplayer activity commands

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::multiplayer::{JoinRestriction, MultiplayerActivity};

use super::{target_xuid, GlobalOptions};

/// Manage multiplayer activity
#[derive(Args, Debug)]
pub struct MultiplayerCommand {
    #[command(subcommand)]
    pub command: MultiplayerSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum MultiplayerSubcommand {
    /// Show a user's activity for a title
    Get(GetArgs),

    /// Create or replace the activity for a title
    Set(SetArgs),

    /// Delete the activity for a title
    #[command(visible_alias = "rm")]
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Title id
    pub title_id: u64,

    /// XUID (defaults to the signed-in user)
    pub xuid: Option<String>,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Title id
    pub title_id: u64,

    /// Connection string other players use to join
    #[arg(long)]
    pub connection_string: String,

    /// Who may join
    #[arg(long, value_enum, default_value_t = JoinRestriction::Followed)]
    pub join_restriction: JoinRestriction,

    /// Maximum number of players
    #[arg(long)]
    pub max_players: u32,

    /// Current number of players
    #[arg(long, default_value = "1")]
    pub current_players: u32,

    /// Multiplayer group id
    #[arg(long)]
    pub group_id: Option<String>,

    /// Platform of the session, e.g. Scarlett, Win32
    #[arg(long)]
    pub platform: Option<String>,

    /// Sequence number of the record being replaced
    #[arg(long)]
    pub sequence_number: Option<String>,

    /// XUID (defaults to the signed-in user)
    #[arg(long)]
    pub xuid: Option<String>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Title id
    pub title_id: u64,

    /// Sequence number of the record being deleted
    #[arg(long)]
    pub sequence_number: String,

    /// XUID (defaults to the signed-in user)
    #[arg(long)]
    pub xuid: Option<String>,
}

impl SetArgs {
    fn activity(&self) -> MultiplayerActivity {
        MultiplayerActivity {
            connection_string: self.connection_string.clone(),
            join_restriction: self.join_restriction,
            max_players: self.max_players,
            current_players: self.current_players,
            group_id: self.group_id.clone(),
            platform: self.platform.clone(),
            sequence_number: self.sequence_number.clone(),
            title_id: None,
        }
    }
}

impl MultiplayerCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let writer = global.writer();
        let multiplayer = client.multiplayer();

        match &self.command {
            MultiplayerSubcommand::Get(args) => {
                let xuid = target_xuid(&client, args.xuid.as_deref());
                writer.write(&multiplayer.get_activity(args.title_id, &xuid).await?)
            }
            MultiplayerSubcommand::Set(args) => {
                let xuid = target_xuid(&client, args.xuid.as_deref());
                let updated = multiplayer
                    .update_activity(args.title_id, &xuid, &args.activity())
                    .await?;
                writer.write(&updated)
            }
            MultiplayerSubcommand::Delete(args) => {
                let xuid = target_xuid(&client, args.xuid.as_deref());
                multiplayer
                    .delete_activity(args.title_id, &xuid, &args.sequence_number)
                    .await?;
                writer.write_success(&format!("Activity for title {} deleted", args.title_id))
            }
        }
    }
}
