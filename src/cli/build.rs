//
//  screwdriver-cli
//  cli/build.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Build commands
//!
//! Starting a build on Screwdriver.cd means creating an event on a
//! pipeline, anchored at the job the event should start from.
//!
//! ## Examples
//!
//! ```bash
//! # Run the main job of pipeline 1234
//! sd build 1234 main
//!
//! # Restart a pull request job
//! sd build 1234 PR-15:main
//! ```

use anyhow::Result;
use clap::Args;
use console::style;

use crate::config::SdConfig;

use super::{build_client, GlobalOptions};

/// Start a build by creating a pipeline event
#[derive(Args, Debug)]
pub struct BuildCommand {
    /// Pipeline ID to start the build on
    pub pipeline_id: String,

    /// Job the event starts from, e.g. "main" or "PR-15:main"
    pub start_from: String,
}

impl BuildCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let config = SdConfig::load()?;
        let client = build_client(&config, global)?;

        client
            .create_event(&self.pipeline_id, &self.start_from)
            .await?;

        if global.json {
            let result = serde_json::json!({
                "success": true,
                "pipeline_id": self.pipeline_id,
                "start_from": self.start_from,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!(
                "{} Started {} on pipeline {}",
                style("✓").green(),
                style(&self.start_from).cyan(),
                style(&self.pipeline_id).cyan()
            );
        }
        Ok(())
    }
}
