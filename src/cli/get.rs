//
//  screwdriver-cli
//  cli/get.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Read commands for stored settings and Screwdriver.cd information
//!
//! ## Examples
//!
//! ```bash
//! # Print the stored user token
//! sd get token
//!
//! # Print the configured API URL
//! sd get api
//!
//! # Print the cached JWT
//! sd get jwt
//!
//! # Resolve the UI pages for one or more builds
//! sd get build-pages 101
//! sd get bp 101 202 303
//! sd get bp "101
//! 202"
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::SdConfig;

use super::{build_client, resolve_context, GlobalOptions};

/// Show stored settings and Screwdriver.cd information
#[derive(Args, Debug)]
pub struct GetCommand {
    #[command(subcommand)]
    pub command: GetSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum GetSubcommand {
    /// Print the stored user API token
    Token,

    /// Print the configured API URL
    Api,

    /// Print the cached JWT
    Jwt,

    /// Resolve UI page URLs for build IDs
    #[command(name = "build-pages", visible_alias = "bp")]
    BuildPages(BuildPagesArgs),
}

#[derive(Args, Debug)]
pub struct BuildPagesArgs {
    /// Build IDs; a single quoted argument with spaces or newlines also works
    #[arg(required = true)]
    pub build_ids: Vec<String>,
}

impl GetCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let config = SdConfig::load()?;

        match &self.command {
            GetSubcommand::Token => {
                let context = resolve_context(&config, global);
                print_value(global, "token", &context.user_token)
            }
            GetSubcommand::Api => {
                let context = resolve_context(&config, global);
                print_value(global, "api", &context.api_url)
            }
            GetSubcommand::Jwt => {
                let context = resolve_context(&config, global);
                print_value(global, "jwt", &context.jwt)
            }
            GetSubcommand::BuildPages(args) => self.build_pages(args, &config, global).await,
        }
    }

    /// Resolve and print the UI page URL for each build ID.
    ///
    /// In plain mode, URLs are printed as their lookups complete, so a slow
    /// build does not hold back its siblings. Under `--json` the lookups
    /// stay silent and the collected URLs print as a single array.
    async fn build_pages(
        &self,
        args: &BuildPagesArgs,
        config: &SdConfig,
        global: &GlobalOptions,
    ) -> Result<()> {
        let client = build_client(config, global)?;
        let input = args.build_ids.join(" ");

        let pages = client.build_pages(&input, global.json).await?;

        if global.json {
            println!("{}", serde_json::to_string_pretty(&pages)?);
        }
        Ok(())
    }
}

/// Prints a single configuration value, as a bare line or a JSON object.
fn print_value(global: &GlobalOptions, key: &str, value: &str) -> Result<()> {
    if global.json {
        let result = serde_json::json!({ key: value });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", value);
    }
    Ok(())
}
