//
//  screwdriver-cli
//  cli/validate.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pipeline yaml validation
//!
//! Sends a screwdriver.yaml to the remote validator and reports the
//! verdict. With `--output` the normalized pipeline the server derived
//! from the yaml is printed, which is handy for debugging templates and
//! shared settings.
//!
//! ## Examples
//!
//! ```bash
//! # Validate ./screwdriver.yaml
//! sd validate
//!
//! # Validate another file and show the expanded pipeline
//! sd validate -f ci/screwdriver.yaml --output
//! ```

use anyhow::{bail, Result};
use clap::Args;
use console::style;

use crate::api::ApiError;
use crate::config::SdConfig;
use crate::util::read_yaml;

use super::{build_client, GlobalOptions};

/// Validate a screwdriver.yaml against the remote validator
#[derive(Args, Debug)]
pub struct ValidateCommand {
    /// Path of the yaml to validate
    #[arg(long, short = 'f', default_value = "screwdriver.yaml")]
    pub file: String,

    /// Print the validated pipeline as yaml
    #[arg(long, short = 'o')]
    pub output: bool,
}

impl ValidateCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let config = SdConfig::load()?;
        let client = build_client(&config, global)?;

        let yaml = read_yaml(&self.file)?;
        let result = match client.validate_pipeline(&yaml).await {
            Ok(value) => value,
            Err(ApiError::ValidationFailed { messages }) => {
                for message in &messages {
                    eprintln!("{} {}", style("✗").red(), message);
                }
                bail!("invalid {}", self.file);
            }
            Err(err) => return Err(err.into()),
        };

        if global.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else if self.output {
            print!("{}", serde_yaml::to_string(&result)?);
        } else {
            println!(
                "{} {} is valid",
                style("✓").green(),
                style(&self.file).cyan()
            );
        }
        Ok(())
    }
}
