//
//  xbl-client
//  cli/social.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Social graph commands

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::social::{PeopleOptions, PeopleView};

use super::{target_xuid, GlobalOptions};

/// Browse the social graph
#[derive(Args, Debug)]
pub struct SocialCommand {
    #[command(subcommand)]
    pub command: SocialSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum SocialSubcommand {
    /// People following a user
    Followers(PeopleArgs),

    /// People a user follows
    Friends(PeopleArgs),

    /// How one user appears in another user's people list
    Relationship(RelationshipArgs),

    /// Which of the given XUIDs are in a user's people list
    Filter(FilterArgs),

    /// Relationship summary between the signed-in user and another user
    Summary(SummaryArgs),
}

#[derive(Args, Debug)]
pub struct PeopleArgs {
    /// XUID (defaults to the signed-in user)
    pub xuid: Option<String>,

    /// Slice of the people list
    #[arg(long, value_enum)]
    pub view: Option<PeopleView>,

    /// Maximum number of people to return
    #[arg(long, short = 'l')]
    pub max_items: Option<u32>,

    /// Index of the first person to return
    #[arg(long)]
    pub start_index: Option<u32>,
}

#[derive(Args, Debug)]
pub struct RelationshipArgs {
    /// User to look up
    pub target: String,

    /// Owner of the people list (defaults to the signed-in user)
    #[arg(long)]
    pub owner: Option<String>,
}

#[derive(Args, Debug)]
pub struct FilterArgs {
    /// XUIDs to check
    #[arg(required = true)]
    pub xuids: Vec<String>,

    /// Owner of the people list (defaults to the signed-in user)
    #[arg(long)]
    pub owner: Option<String>,
}

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// User to summarize
    pub xuid: String,
}

impl PeopleArgs {
    fn options(&self) -> PeopleOptions {
        PeopleOptions {
            view: self.view,
            max_items: self.max_items,
            start_index: self.start_index,
        }
    }
}

impl SocialCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let writer = global.writer();
        let social = client.social();

        match &self.command {
            SocialSubcommand::Followers(args) => {
                let xuid = target_xuid(&client, args.xuid.as_deref());
                writer.write(&social.get_followers(&xuid, &args.options()).await?)
            }
            SocialSubcommand::Friends(args) => {
                let xuid = target_xuid(&client, args.xuid.as_deref());
                writer.write(&social.get_friends(&xuid, &args.options()).await?)
            }
            SocialSubcommand::Relationship(args) => {
                let owner = target_xuid(&client, args.owner.as_deref());
                writer.write(&social.get_followers_as_user(&owner, &args.target).await?)
            }
            SocialSubcommand::Filter(args) => {
                let owner = target_xuid(&client, args.owner.as_deref());
                writer.write(&social.get_followers_xuids(&owner, &args.xuids).await?)
            }
            SocialSubcommand::Summary(args) => {
                writer.write(&social.get_view_as_user(&args.xuid).await?)
            }
        }
    }
}
