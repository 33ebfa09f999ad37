//
//  screwdriver-cli
//  cli/set.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Write commands for stored settings
//!
//! ## Examples
//!
//! ```bash
//! # Store the user API token
//! sd set token <your-api-token>
//!
//! # Store the API URL of your deployment
//! sd set api https://api-cd.screwdriver.example
//!
//! # Fetch a fresh JWT, store it, and print it ready for curl
//! sd set jwt
//! ```

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use url::Url;

use crate::config::SdConfig;
use crate::output::OutputWriter;

use super::{build_client, context_name, GlobalOptions};

/// Update stored settings
#[derive(Args, Debug)]
pub struct SetCommand {
    #[command(subcommand)]
    pub command: SetSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum SetSubcommand {
    /// Store the user API token
    Token(TokenArgs),

    /// Store the Screwdriver.cd API URL
    Api(ApiArgs),

    /// Fetch a fresh JWT from the API and store it
    Jwt,
}

#[derive(Args, Debug)]
pub struct TokenArgs {
    /// API token minted in the Screwdriver.cd UI
    pub token: String,
}

#[derive(Args, Debug)]
pub struct ApiArgs {
    /// Base URL of the API host, e.g. https://api-cd.screwdriver.example
    pub url: String,
}

impl SetCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let mut config = SdConfig::load()?;
        let name = context_name(&config, global);

        match &self.command {
            SetSubcommand::Token(args) => {
                config.context_mut(&name).user_token = args.token.clone();
                config.save()?;
                self.report(global, "token", "Stored user token")
            }
            SetSubcommand::Api(args) => {
                Url::parse(&args.url)
                    .with_context(|| format!("'{}' is not a valid URL", args.url))?;
                config.context_mut(&name).api_url = args.url.clone();
                config.save()?;
                self.report(global, "api", "Stored API URL")
            }
            SetSubcommand::Jwt => self.refresh_jwt(&mut config, &name, global).await,
        }
    }

    /// Fetch a fresh JWT, persist it, and print it in `Bearer` form so it
    /// can be pasted straight into a curl invocation.
    async fn refresh_jwt(
        &self,
        config: &mut SdConfig,
        name: &str,
        global: &GlobalOptions,
    ) -> Result<()> {
        let client = build_client(config, global)?;
        let jwt = client.refresh_jwt().await?;

        config.context_mut(name).jwt = jwt.clone();
        config.save()?;

        if global.json {
            let result = serde_json::json!({ "jwt": jwt });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("Bearer {}", jwt);
        }
        Ok(())
    }

    fn report(&self, global: &GlobalOptions, key: &str, message: &str) -> Result<()> {
        if global.json {
            let result = serde_json::json!({ "success": true, "key": key });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            OutputWriter::plain().write_success(message);
        }
        Ok(())
    }
}
