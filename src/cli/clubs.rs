//
//  xbl-client
//  cli/clubs.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Club, chat and feed commands

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::clubs::{FeedPost, FeedTarget, FeedType};

use super::GlobalOptions;

/// Clubs, club chat and activity feeds
#[derive(Args, Debug)]
pub struct ClubsCommand {
    #[command(subcommand)]
    pub command: ClubsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ClubsSubcommand {
    /// Show a club with its presence, roster and settings
    #[command(visible_alias = "view")]
    Get(ClubArgs),

    /// Search clubs
    Search(SearchArgs),

    /// Show recent club chat messages
    Chat(ChatArgs),

    /// Show a club's activity feed
    Feed(FeedArgs),

    /// Publish a post to your feed
    Post(PostArgs),
}

#[derive(Args, Debug)]
pub struct ClubArgs {
    /// Club id
    pub club_id: String,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search text
    pub query: String,
}

#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Club id
    pub club_id: String,

    /// Number of messages to return
    #[arg(long, short = 'l', default_value = "50")]
    pub max_items: u32,
}

#[derive(Args, Debug)]
pub struct FeedArgs {
    /// Club id
    pub club_id: String,

    /// Number of feed items to return
    #[arg(long, short = 'l', default_value = "20")]
    pub num_items: u32,
}

#[derive(Args, Debug)]
pub struct PostArgs {
    /// Post text
    pub message: String,

    /// Title the post is associated with
    #[arg(long)]
    pub title_id: u64,

    /// Audience
    #[arg(long, value_enum, default_value_t = FeedTarget::All)]
    pub target: FeedTarget,

    /// Media kind
    #[arg(long = "type", value_enum, default_value_t = FeedType::Text)]
    pub kind: FeedType,
}

impl ClubsCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let writer = global.writer();
        let clubs = client.clubs();

        match &self.command {
            ClubsSubcommand::Get(args) => writer.write(&clubs.get_club(&args.club_id).await?),
            ClubsSubcommand::Search(args) => writer.write(&clubs.find_club(&args.query).await?),
            ClubsSubcommand::Chat(args) => {
                writer.write(&clubs.get_chat(&args.club_id, args.max_items).await?)
            }
            ClubsSubcommand::Feed(args) => {
                writer.write(&clubs.get_feed(&args.club_id, args.num_items).await?)
            }
            ClubsSubcommand::Post(args) => {
                let post = FeedPost {
                    message: args.message.clone(),
                    title_id: args.title_id,
                    target: args.target,
                    kind: args.kind,
                };
                writer.write(&clubs.send_feed(&post).await?)
            }
        }
    }
}
