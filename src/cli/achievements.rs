//
//  xbl-client
//  cli/achievements.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Achievement commands
//!
//! Listings print one page. The page's `pagingInfo.continuationToken` can be
//! passed back with `--continuation-token` to read the next one.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::achievements::{
    AchievementOptions, AchievementOrderBy, AchievementType, SortOrder, TitleHistoryOptions,
};

use super::{target_xuid, GlobalOptions};

/// List achievements and title history
#[derive(Args, Debug)]
pub struct AchievementsCommand {
    #[command(subcommand)]
    pub command: AchievementsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AchievementsSubcommand {
    /// List a user's achievements
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// List titles a user has achievement history in
    History(HistoryArgs),
}

#[derive(Args, Debug)]
pub struct PagingArgs {
    /// Maximum number of items to return
    #[arg(long, short = 'l')]
    pub max_items: Option<u32>,

    /// Number of items to skip
    #[arg(long)]
    pub skip_items: Option<u32>,

    /// Continuation token from a previous page
    #[arg(long)]
    pub continuation_token: Option<String>,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// XUID (defaults to the signed-in user)
    pub xuid: Option<String>,

    #[command(flatten)]
    pub paging: PagingArgs,

    /// Only achievements for this title
    #[arg(long, short = 't')]
    pub title_id: Option<u64>,

    /// Only unlocked achievements
    #[arg(long, conflicts_with = "possible_only")]
    pub unlocked_only: bool,

    /// Only achievements that can still be unlocked
    #[arg(long)]
    pub possible_only: bool,

    /// Achievement kind
    #[arg(long, value_enum)]
    pub types: Option<AchievementType>,

    /// Sort key
    #[arg(long, value_enum)]
    pub order_by: Option<AchievementOrderBy>,

    /// Sort direction
    #[arg(long, value_enum)]
    pub order: Option<SortOrder>,
}

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// XUID (defaults to the signed-in user)
    pub xuid: Option<String>,

    #[command(flatten)]
    pub paging: PagingArgs,
}

impl ListArgs {
    fn options(&self) -> AchievementOptions {
        AchievementOptions {
            skip_items: self.paging.skip_items,
            continuation_token: self.paging.continuation_token.clone(),
            max_items: self.paging.max_items,
            title_id: self.title_id,
            unlocked_only: self.unlocked_only.then_some(true),
            possible_only: self.possible_only.then_some(true),
            types: self.types,
            order_by: self.order_by,
            order: self.order,
        }
    }
}

impl AchievementsCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let writer = global.writer();

        match &self.command {
            AchievementsSubcommand::List(args) => {
                let xuid = target_xuid(&client, args.xuid.as_deref());
                let page = client
                    .achievements()
                    .get_user_achievements(&xuid, &args.options())
                    .await?;
                writer.write(&page)
            }
            AchievementsSubcommand::History(args) => {
                let xuid = target_xuid(&client, args.xuid.as_deref());
                let options = TitleHistoryOptions {
                    skip_items: args.paging.skip_items,
                    continuation_token: args.paging.continuation_token.clone(),
                    max_items: args.paging.max_items,
                };
                let page = client.achievements().get_title_history(&xuid, &options).await?;
                writer.write(&page)
            }
        }
    }
}
