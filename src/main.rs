//
//  screwdriver-cli
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use screwdriver_cli::api::ApiError;
use screwdriver_cli::cli::{Cli, Commands};
use screwdriver_cli::exit_codes;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    init_logging();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute command
    let result = run(cli).await;

    // Handle result and exit
    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_code_for(&e));
        }
    }
}

/// Initialize logging based on environment
fn init_logging() {
    let filter = EnvFilter::try_from_env("SD_DEBUG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

/// Map an error to the exit code scripts should see
fn exit_code_for(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<ApiError>() {
        Some(api) if api.is_auth_failure() => exit_codes::AUTH_ERROR,
        Some(api) if api.is_not_found() => exit_codes::NOT_FOUND,
        _ => exit_codes::ERROR,
    }
}

/// Main command dispatcher
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Get(cmd) => cmd.run(&cli.global).await,
        Commands::Set(cmd) => cmd.run(&cli.global).await,
        Commands::Context(cmd) => cmd.run(&cli.global).await,
        Commands::Banner(cmd) => cmd.run(&cli.global).await,
        Commands::Build(cmd) => cmd.run(&cli.global).await,
        Commands::Validate(cmd) => cmd.run(&cli.global).await,
        Commands::ValidateTemplate(cmd) => cmd.run(&cli.global).await,
        Commands::Secret(cmd) => cmd.run(&cli.global).await,
        Commands::Clear(cmd) => cmd.run(&cli.global).await,
        Commands::Completion(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("sd version {}", screwdriver_cli::VERSION);
            Ok(())
        }
    }
}
