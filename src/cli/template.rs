//
//  screwdriver-cli
//  cli/template.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Template yaml validation
//!
//! Runs a job template definition through the remote template
//! validator. Templates have their own endpoint and their own error
//! shape, so this lives apart from `sd validate`.
//!
//! ## Examples
//!
//! ```bash
//! # Validate ./sd-template.yaml
//! sd validate-template
//!
//! # Validate a template elsewhere in the tree
//! sd validate-template -f templates/node/sd-template.yaml
//! ```

use anyhow::{bail, Result};
use clap::Args;
use console::style;

use crate::api::ApiError;
use crate::config::SdConfig;
use crate::util::read_yaml;

use super::{build_client, GlobalOptions};

/// Validate a job template against the remote validator
#[derive(Args, Debug)]
pub struct TemplateCommand {
    /// Path of the template yaml to validate
    #[arg(long, short = 'f', default_value = "sd-template.yaml")]
    pub file: String,
}

impl TemplateCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let config = SdConfig::load()?;
        let client = build_client(&config, global)?;

        let yaml = read_yaml(&self.file)?;
        let result = match client.validate_template(&yaml).await {
            Ok(validation) => validation,
            Err(ApiError::ValidationFailed { messages }) => {
                for message in &messages {
                    eprintln!("{} {}", style("✗").red(), message);
                }
                bail!("invalid template of Screwdriver.cd");
            }
            Err(err) => return Err(err.into()),
        };

        if global.json {
            println!("{}", serde_json::to_string_pretty(&result.template)?);
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
