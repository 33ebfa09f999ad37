//
//  screwdriver-cli
//  cli/banner.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Banner management commands
//!
//! Banners are the announcement strips shown in the Screwdriver.cd UI.
//! One `set` command covers create, update, and delete: without `--id` it
//! creates, with `--id` it updates, and with `--id --delete` it removes
//! the banner.
//!
//! ## Examples
//!
//! ```bash
//! # List all banners
//! sd banner get
//!
//! # Create a banner
//! sd banner set -m "Maintenance at noon UTC" -t warn
//!
//! # Update a banner's message
//! sd banner set -i 13 -m "Maintenance done"
//!
//! # Deactivate a banner without changing its text
//! sd banner set -i 13 -a false
//!
//! # Delete a banner
//! sd banner set -i 13 --delete
//! ```

use anyhow::{bail, Result};
use clap::{ArgAction, Args, Subcommand};
use console::style;
use serde::Serialize;

use crate::api::banners::Banner;
use crate::config::SdConfig;
use crate::output::{OutputFormat, OutputWriter};
use crate::util::format_timestamp;

use super::{build_client, GlobalOptions};

/// Manage UI banners
#[derive(Args, Debug)]
pub struct BannerCommand {
    #[command(subcommand)]
    pub command: BannerSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum BannerSubcommand {
    /// List all banners
    Get,

    /// Create, update, or delete a banner
    Set(SetBannerArgs),
}

#[derive(Args, Debug)]
pub struct SetBannerArgs {
    /// Banner ID, required for update and delete
    #[arg(long, short = 'i')]
    pub id: Option<String>,

    /// Banner message body
    #[arg(long = "msg", short = 'm')]
    pub message: Option<String>,

    /// Banner type
    #[arg(long = "type", short = 't', default_value = "info", value_parser = ["info", "warn"])]
    pub banner_type: String,

    /// Whether the banner is displayed
    #[arg(long, short = 'a', default_value_t = true, action = ArgAction::Set)]
    pub active: bool,

    /// Delete the banner instead of updating it
    #[arg(long, short = 'd', requires = "id")]
    pub delete: bool,
}

// Output types

#[derive(Debug, Serialize)]
struct BannerListItem {
    id: i64,
    active: bool,
    #[serde(rename = "type")]
    banner_type: String,
    message: String,
    created_by: Option<String>,
    create_time: Option<String>,
}

impl From<Banner> for BannerListItem {
    fn from(banner: Banner) -> Self {
        Self {
            id: banner.id,
            active: banner.is_active,
            banner_type: banner.banner_type,
            message: banner.message,
            created_by: banner.created_by,
            create_time: banner.create_time,
        }
    }
}

impl crate::output::PlainOutput for BannerListItem {
    fn print_plain(&self, color: bool) {
        println!("{}", self.plain_line(color));
    }
}

impl BannerListItem {
    /// Renders one listing row, styled only when `color` asks for it.
    fn plain_line(&self, color: bool) -> String {
        let active_col = format!("{:<8}", if self.active { "yes" } else { "no" });
        let active_col = match (color, self.active) {
            (true, true) => style(active_col).green().to_string(),
            (true, false) => style(active_col).dim().to_string(),
            (false, _) => active_col,
        };
        let origin = match (&self.created_by, &self.create_time) {
            (Some(by), Some(at)) => format!("  ({} at {})", by, format_timestamp(at)),
            (Some(by), None) => format!("  ({})", by),
            _ => String::new(),
        };
        let origin = if color && !origin.is_empty() {
            style(origin).dim().to_string()
        } else {
            origin
        };
        format!(
            "{:<8} {} {:<6} {}{}",
            self.id, active_col, self.banner_type, self.message, origin
        )
    }
}

impl BannerCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            BannerSubcommand::Get => self.get(global).await,
            BannerSubcommand::Set(args) => self.set(args, global).await,
        }
    }

    /// List banners
    async fn get(&self, global: &GlobalOptions) -> Result<()> {
        let config = SdConfig::load()?;
        let client = build_client(&config, global)?;

        let items: Vec<BannerListItem> = client
            .banners()
            .await?
            .into_iter()
            .map(BannerListItem::from)
            .collect();

        if items.is_empty() {
            println!("No banners found.");
            return Ok(());
        }

        let writer = OutputWriter::new(OutputFormat::from_flag(global.json));
        if !global.json {
            println!(
                "{} {} {} {}",
                style(format!("{:<8}", "ID")).bold(),
                style(format!("{:<8}", "ACTIVE")).bold(),
                style(format!("{:<6}", "TYPE")).bold(),
                style("MESSAGE").bold()
            );
        }
        writer.write_list(&items)?;
        Ok(())
    }

    /// Create, update, or delete a banner
    async fn set(&self, args: &SetBannerArgs, global: &GlobalOptions) -> Result<()> {
        let config = SdConfig::load()?;
        let client = build_client(&config, global)?;

        match (&args.id, args.delete) {
            (Some(id), true) => {
                client.delete_banner(id).await?;
                if global.json {
                    let result = serde_json::json!({ "success": true, "id": id });
                    println!("{}", serde_json::to_string_pretty(&result)?);
                } else {
                    println!("{} Deleted banner ID {}", style("✓").green(), id);
                }
            }
            (Some(id), false) => {
                let banner = client
                    .update_banner(id, args.message.as_deref(), &args.banner_type, args.active)
                    .await?;
                if global.json {
                    println!("{}", serde_json::to_string_pretty(&banner)?);
                } else {
                    println!("{} Updated banner ID {}", style("✓").green(), banner.id);
                }
            }
            (None, _) => {
                let Some(message) = &args.message else {
                    bail!("Provide --msg to create a banner, or --id to update or delete one.");
                };
                let banner = client
                    .create_banner(message, &args.banner_type, args.active)
                    .await?;
                if global.json {
                    println!("{}", serde_json::to_string_pretty(&banner)?);
                } else {
                    println!("{} Created banner ID {}", style("✓").green(), banner.id);
                }
            }
        }
        Ok(())
    }
}
