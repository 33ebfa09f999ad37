//
//  screwdriver-cli
//  cli/secret.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pipeline secret commands
//!
//! `sd secret set` is an upsert: it looks the key up in the pipeline's
//! secrets and updates it when it exists, creates it when it does not.
//! The value can be passed with `-v` or typed at a hidden prompt.
//!
//! ## Examples
//!
//! ```bash
//! # Create or update NPM_TOKEN on pipeline 1234
//! sd secret set -p 1234 -k npm_token -v "$NPM_TOKEN"
//!
//! # Prompt for the value instead of putting it on the command line
//! sd secret set -p 1234 -k npm_token
//!
//! # Expose a secret to pull request builds
//! sd secret set -p 1234 -k COVERAGE_TOKEN -v "$TOKEN" --allow-in-pr
//! ```

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use console::style;

use crate::api::secrets::SecretOutcome;
use crate::config::SdConfig;

use super::{build_client, GlobalOptions};

/// Manage pipeline secrets
#[derive(Args, Debug)]
pub struct SecretCommand {
    #[command(subcommand)]
    pub command: SecretSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum SecretSubcommand {
    /// Create or update a secret on a pipeline
    Set(SetSecretArgs),
}

#[derive(Args, Debug)]
pub struct SetSecretArgs {
    /// Pipeline ID that owns the secret
    #[arg(long, short = 'p')]
    pub pipeline: String,

    /// Secret name
    #[arg(long, short = 'k')]
    pub key: String,

    /// Secret value, prompted for when omitted
    #[arg(long, short = 'v')]
    pub value: Option<String>,

    /// Make the secret available in pull request builds
    #[arg(long = "allow-in-pr")]
    pub allow_in_pr: bool,
}

impl SecretCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            SecretSubcommand::Set(args) => self.set(args, global).await,
        }
    }

    async fn set(&self, args: &SetSecretArgs, global: &GlobalOptions) -> Result<()> {
        let config = SdConfig::load()?;
        let client = build_client(&config, global)?;

        let pipeline_id: i64 = args
            .pipeline
            .parse()
            .with_context(|| format!("'{}' is not a numeric pipeline ID", args.pipeline))?;

        // The API only accepts names matching /^[A-Z_][A-Z0-9_]*$/.
        let key = args.key.to_uppercase();

        let value = match &args.value {
            Some(value) => value.clone(),
            None => {
                if global.no_prompt {
                    bail!("No secret value given. Pass -v or run without --no-prompt.");
                }
                use dialoguer::Password;
                Password::new()
                    .with_prompt(format!("Value for {key}"))
                    .interact()?
            }
        };

        let outcome = client
            .set_secret(pipeline_id, &key, &value, args.allow_in_pr)
            .await?;
        let verb = match outcome {
            SecretOutcome::Created => "created",
            SecretOutcome::Updated => "updated",
        };

        if global.json {
            let result = serde_json::json!({
                "success": true,
                "pipeline_id": pipeline_id,
                "name": key,
                "outcome": verb,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!(
                "{} Set secret {} ({})",
                style("✓").green(),
                style(&key).cyan(),
                verb
            );
        }
        Ok(())
    }
}
