//
//  screwdriver-cli
//  cli/context.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Configuration context commands
//!
//! A context bundles the settings for one Screwdriver.cd deployment. These
//! commands list contexts and switch between them; `sd --context <name>`
//! picks one for a single invocation without switching.
//!
//! ## Examples
//!
//! ```bash
//! # List every known context, current one starred
//! sd context list
//!
//! # Print the current context name
//! sd context current
//!
//! # Switch to a context, creating it when new
//! sd context set staging
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use crate::config::SdConfig;

use super::GlobalOptions;

/// Manage configuration contexts
#[derive(Args, Debug)]
pub struct ContextCommand {
    #[command(subcommand)]
    pub command: ContextSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ContextSubcommand {
    /// List all contexts
    #[command(visible_alias = "ls")]
    List,

    /// Print the current context name
    Current,

    /// Switch to a context, creating it when it does not exist
    Set(SetContextArgs),
}

#[derive(Args, Debug)]
pub struct SetContextArgs {
    /// Context name to switch to
    pub name: String,
}

impl ContextCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ContextSubcommand::List => self.list(global),
            ContextSubcommand::Current => self.current(global),
            ContextSubcommand::Set(args) => self.set(args, global),
        }
    }

    fn list(&self, global: &GlobalOptions) -> Result<()> {
        let config = SdConfig::load()?;

        if global.json {
            let result = serde_json::json!({
                "current": config.current_context,
                "contexts": config.context_names(),
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
            return Ok(());
        }

        for name in config.context_names() {
            if name == config.current_context {
                println!("{} {}", style("*").cyan(), style(&name).cyan());
            } else {
                println!("  {}", name);
            }
        }
        Ok(())
    }

    fn current(&self, global: &GlobalOptions) -> Result<()> {
        let config = SdConfig::load()?;

        if global.json {
            let result = serde_json::json!({ "current": config.current_context });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{}", config.current_context);
        }
        Ok(())
    }

    fn set(&self, args: &SetContextArgs, global: &GlobalOptions) -> Result<()> {
        let mut config = SdConfig::load()?;
        let created = config.use_context(&args.name);
        config.save()?;

        if global.json {
            let result = serde_json::json!({
                "success": true,
                "current": args.name,
                "created": created,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else if created {
            println!(
                "{} Created and switched to context {}",
                style("✓").green(),
                style(&args.name).cyan()
            );
        } else {
            println!(
                "{} Switched to context {}",
                style("✓").green(),
                style(&args.name).cyan()
            );
        }
        Ok(())
    }
}
