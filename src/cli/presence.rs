//
//  xbl-client
//  cli/presence.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Presence commands

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::presence::{PresenceLevel, TitlePlacement, TitlePresence, TitleState};

use super::{target_xuid, GlobalOptions};

/// Read and write presence
#[derive(Args, Debug)]
pub struct PresenceCommand {
    #[command(subcommand)]
    pub command: PresenceSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PresenceSubcommand {
    /// Presence of the signed-in user
    Me,

    /// Presence of several users
    Batch(BatchArgs),

    /// Presence of a user's people list
    Group(GroupArgs),

    /// Presence of people in a user's list who are broadcasting
    Broadcasting(GroupArgs),

    /// Number of people in a user's list who are broadcasting
    #[command(name = "broadcasting-count")]
    BroadcastingCount(GroupArgs),

    /// Set the title presence of the current device
    #[command(name = "set-title")]
    SetTitle(SetTitleArgs),

    /// Remove a title's presence from the current device
    #[command(name = "remove-title")]
    RemoveTitle(RemoveTitleArgs),
}

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// XUIDs to look up
    #[arg(required = true)]
    pub xuids: Vec<String>,

    /// Detail level
    #[arg(long, value_enum)]
    pub level: Option<PresenceLevel>,
}

#[derive(Args, Debug)]
pub struct GroupArgs {
    /// Owner of the people list (defaults to the signed-in user)
    pub xuid: Option<String>,

    /// Detail level
    #[arg(long, value_enum, default_value_t = PresenceLevel::Title)]
    pub level: PresenceLevel,
}

#[derive(Args, Debug)]
pub struct SetTitleArgs {
    /// Title id
    #[arg(long)]
    pub id: String,

    /// Screen placement
    #[arg(long, value_enum, default_value_t = TitlePlacement::Full)]
    pub placement: TitlePlacement,

    /// Focus state
    #[arg(long, value_enum, default_value_t = TitleState::Active)]
    pub state: TitleState,

    /// XUID (defaults to the signed-in user)
    #[arg(long)]
    pub xuid: Option<String>,
}

#[derive(Args, Debug)]
pub struct RemoveTitleArgs {
    /// Title id
    pub title_id: String,

    /// XUID (defaults to the signed-in user)
    #[arg(long)]
    pub xuid: Option<String>,

    /// Device to scope the removal to
    #[arg(long)]
    pub device_id: Option<String>,

    /// Device type to scope the removal to
    #[arg(long)]
    pub device_type: Option<String>,
}

impl PresenceCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let writer = global.writer();
        let presence = client.presence();

        match &self.command {
            PresenceSubcommand::Me => writer.write(&presence.get_current_presence().await?),
            PresenceSubcommand::Batch(args) => {
                let records = presence.get_batch_user_presence(&args.xuids, args.level).await?;
                writer.write(&records)
            }
            PresenceSubcommand::Group(args) => {
                let records = match &args.xuid {
                    Some(xuid) => presence.get_group_presence(xuid, args.level).await?,
                    None => presence.get_current_group_presence(args.level).await?,
                };
                writer.write(&records)
            }
            PresenceSubcommand::Broadcasting(args) => {
                let xuid = target_xuid(&client, args.xuid.as_deref());
                let records = presence
                    .get_group_broadcasting_presence(&xuid, args.level)
                    .await?;
                writer.write(&records)
            }
            PresenceSubcommand::BroadcastingCount(args) => {
                let xuid = target_xuid(&client, args.xuid.as_deref());
                let count = presence.get_group_broadcasting_count(&xuid, args.level).await?;
                writer.write(&serde_json::json!({ "count": count }))
            }
            PresenceSubcommand::SetTitle(args) => {
                let xuid = target_xuid(&client, args.xuid.as_deref());
                let title = TitlePresence {
                    id: args.id.clone(),
                    placement: args.placement,
                    state: args.state,
                };
                presence.update_title_presence(&xuid, &title).await?;
                writer.write_success(&format!("Title {} presence updated", args.id))
            }
            PresenceSubcommand::RemoveTitle(args) => {
                let xuid = target_xuid(&client, args.xuid.as_deref());
                presence
                    .remove_title_presence(
                        &xuid,
                        &args.title_id,
                        args.device_id.as_deref(),
                        args.device_type.as_deref(),
                    )
                    .await?;
                writer.write_success(&format!("Title {} presence removed", args.title_id))
            }
        }
    }
}
