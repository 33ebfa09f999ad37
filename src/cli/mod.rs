//
//  screwdriver-cli
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod get;
mod set;
mod context;
mod banner;
mod build;
mod validate;
mod template;
mod secret;
mod clear;
mod completion;

pub use get::GetCommand;
pub use set::SetCommand;
pub use context::ContextCommand;
pub use banner::BannerCommand;
pub use build::BuildCommand;
pub use validate::ValidateCommand;
pub use template::TemplateCommand;
pub use secret::SecretCommand;
pub use clear::ClearCommand;
pub use completion::CompletionCommand;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use crate::api::ScrewdriverClient;
use crate::config::{SdConfig, SdContext};

/// Screwdriver CLI - Work with Screwdriver.cd from the command line
#[derive(Parser, Debug)]
#[command(
    name = "sd",
    version,
    about = "Work with Screwdriver.cd from the command line",
    long_about = "sd is a CLI for the Screwdriver.cd API.\n\n\
                  It validates yamls, handles banners and secrets, and starts builds from your terminal.",
    propagate_version = true,
    after_help = "Use 'sd <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Configuration context to use for this invocation
    #[arg(long, global = true, env = "SD_CONTEXT")]
    pub context: Option<String>,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable interactive prompts
    #[arg(long, global = true, env = "SD_NO_PROMPT")]
    pub no_prompt: bool,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show stored settings and Screwdriver.cd information
    Get(GetCommand),

    /// Update stored settings
    Set(SetCommand),

    /// Manage configuration contexts
    #[command(visible_alias = "ctx")]
    Context(ContextCommand),

    /// Manage UI banners
    #[command(visible_alias = "bn")]
    Banner(BannerCommand),

    /// Start a build on a pipeline
    #[command(visible_alias = "b")]
    Build(BuildCommand),

    /// Validate a screwdriver.yaml
    #[command(visible_alias = "v")]
    Validate(ValidateCommand),

    /// Validate a template definition
    #[command(name = "validate-template", visible_alias = "vt")]
    ValidateTemplate(TemplateCommand),

    /// Manage pipeline secrets
    #[command(visible_alias = "sec")]
    Secret(SecretCommand),

    /// Reset the stored configuration to defaults
    Clear(ClearCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Print version information
    Version,
}

/// Resolves the context name for this invocation: the global `--context`
/// override when present, otherwise the configured current context.
pub(crate) fn context_name(config: &SdConfig, global: &GlobalOptions) -> String {
    global
        .context
        .clone()
        .unwrap_or_else(|| config.current_context.clone())
}

/// Returns the settings this invocation should operate on.
pub(crate) fn resolve_context(config: &SdConfig, global: &GlobalOptions) -> SdContext {
    config.context(&context_name(config, global))
}

/// Builds an API client from the resolved context.
///
/// Rejects configurations that are missing the API URL or the user token,
/// pointing at the `set` command that fills in the gap.
pub(crate) fn build_client(config: &SdConfig, global: &GlobalOptions) -> Result<ScrewdriverClient> {
    let context = resolve_context(config, global);
    if context.api_url.is_empty() {
        bail!("No API URL configured. Run 'sd set api <url>' first.");
    }
    if context.user_token.is_empty() {
        bail!("No API token configured. Run 'sd set token <token>' first.");
    }
    Ok(ScrewdriverClient::new(&context)?)
}
