//
//  screwdriver-cli
//  cli/clear.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Reset stored settings
//!
//! Rewrites ~/.sdctl with a blank default context, dropping every
//! stored token, API URL, and JWT across all contexts.
//!
//! ## Examples
//!
//! ```bash
//! # Clear with a confirmation prompt
//! sd clear
//!
//! # Clear without asking
//! sd clear --confirm
//! ```

use anyhow::Result;
use clap::Args;
use console::style;

use crate::config::SdConfig;

use super::GlobalOptions;

/// Remove all stored settings
#[derive(Args, Debug)]
pub struct ClearCommand {
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub confirm: bool,
}

impl ClearCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        if !self.confirm && !global.no_prompt {
            use dialoguer::Confirm;
            let proceed = Confirm::new()
                .with_prompt("Remove all stored tokens and settings?")
                .default(false)
                .interact()?;
            if !proceed {
                println!("{} Cancelled.", style("!").yellow());
                return Ok(());
            }
        }

        SdConfig::reset()?;

        if global.json {
            let result = serde_json::json!({ "success": true });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{} Cleared stored settings", style("✓").green());
        }
        Ok(())
    }
}
