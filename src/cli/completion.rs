//
//  screwdriver-cli
//  cli/completion.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Shell completion scripts

use anyhow::Result;
use clap::{Args, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use super::{Cli, GlobalOptions};

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionCommand {
    #[command(subcommand)]
    pub command: CompletionSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CompletionSubcommand {
    /// Generate Bash completions
    Bash,

    /// Generate Zsh completions
    Zsh,

    /// Generate Fish completions
    Fish,

    /// Generate PowerShell completions
    Powershell,
}

impl CompletionCommand {
    pub async fn run(&self, _global: &GlobalOptions) -> Result<()> {
        let shell = match &self.command {
            CompletionSubcommand::Bash => Shell::Bash,
            CompletionSubcommand::Zsh => Shell::Zsh,
            CompletionSubcommand::Fish => Shell::Fish,
            CompletionSubcommand::Powershell => Shell::PowerShell,
        };

        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "sd", &mut std::io::stdout());
        Ok(())
    }
}
