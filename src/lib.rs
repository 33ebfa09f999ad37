//
//  screwdriver-cli
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Screwdriver CLI Library
//!
//! A command-line interface library for interacting with the
//! [Screwdriver.cd](https://screwdriver.cd) continuous delivery platform.
//!
//! ## Overview
//!
//! This library provides the core functionality for the `sd` CLI tool,
//! letting developers validate pipeline yamls, start builds, and manage
//! banners and secrets without leaving the terminal.
//!
//! ## Features
//!
//! - **Self-Refreshing Auth**: A user API token is traded for a short-lived
//!   JWT, and expired JWTs are renewed transparently mid-command
//! - **Yaml Validation**: Pipeline and template yamls are checked by the
//!   remote validator before they ever reach a commit
//! - **Build Control**: Start builds and resolve build IDs to build page
//!   URLs, concurrently for whole batches
//! - **Banners & Secrets**: Manage UI banners and pipeline secrets
//! - **Contexts**: Keep settings for several Screwdriver installations and
//!   switch between them by name
//! - **Scriptable**: `--json` output for automation
//!
//! ## Module Structure
//!
//! - [`cli`]: Command-line interface definitions using clap
//! - [`api`]: HTTP client for the Screwdriver.cd REST API
//! - [`config`]: The ~/.sdctl settings file and its contexts
//! - [`output`]: Plain and JSON output formatting
//! - [`util`]: Utility functions
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use screwdriver_cli::SdConfig;
//!
//! // Load the settings file, creating it on first use
//! let config = SdConfig::load().expect("failed to load config");
//! println!("current context: {}", config.current_context);
//! ```

/// Command-line interface definitions.
///
/// Contains all CLI commands, arguments, and subcommands defined using the
/// clap derive API. Each command module handles parsing and execution of its
/// respective functionality.
pub mod cli;

/// API client for Screwdriver.cd.
///
/// This module provides the HTTP client for the Screwdriver.cd v4 REST API.
/// The client handles JWT authentication, transparent token refresh, retry,
/// and error handling.
pub mod api;

/// Configuration file management.
///
/// Manages the CLI's settings stored in `~/.sdctl`, a JSON file holding one
/// or more named contexts. Each context carries the user API token, the API
/// URL, and the most recently issued JWT for one Screwdriver installation.
pub mod config;

/// Output formatting for different modes.
///
/// Provides formatters for:
/// - Plain format: Colored, human-readable output for interactive use
/// - JSON format: Structured output for scripting and automation
pub mod output;

/// Utility functions and helpers.
///
/// Common utilities used throughout the codebase including yaml file
/// reading and timestamp formatting.
pub mod util;

/// Re-export of the main CLI struct for convenient access.
///
/// The [`Cli`] struct represents the root command and is the entry point
/// for parsing command-line arguments.
///
/// # Example
///
/// ```rust,no_run
/// use clap::Parser;
/// use screwdriver_cli::Cli;
///
/// let cli = Cli::parse();
/// // Handle cli.command...
/// ```
pub use cli::Cli;

/// Re-export of the settings struct.
///
/// The [`SdConfig`] struct provides access to the user's stored settings:
/// the current context name and the token, API URL, and JWT of every
/// named context.
pub use config::SdConfig;

/// Re-export of the API client.
///
/// The [`ScrewdriverClient`] struct talks to one Screwdriver.cd
/// installation, refreshing its JWT whenever the API stops accepting it.
pub use api::ScrewdriverClient;

/// Application name constant.
///
/// The name of the CLI binary, used for display purposes.
///
/// # Value
///
/// `"sd"`
pub const APP_NAME: &str = "sd";

/// Application version constant.
///
/// The current version of the CLI, automatically derived from Cargo.toml
/// at compile time using the `CARGO_PKG_VERSION` environment variable.
///
/// # Example
///
/// ```rust
/// use screwdriver_cli::VERSION;
///
/// println!("sd version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// Standardized exit codes following Unix conventions, allowing scripts
/// to programmatically detect the outcome of CLI operations.
///
/// # Example
///
/// ```rust,no_run
/// use screwdriver_cli::exit_codes;
/// use std::process;
///
/// // Exit with authentication error
/// process::exit(exit_codes::AUTH_ERROR);
/// ```
pub mod exit_codes {
    /// Successful execution.
    ///
    /// # Value
    ///
    /// `0`
    pub const SUCCESS: i32 = 0;

    /// General error. Check stderr for details.
    ///
    /// # Value
    ///
    /// `1`
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments. Use `--help` to see correct usage.
    ///
    /// # Value
    ///
    /// `2`
    pub const USAGE: i32 = 2;

    /// Authentication failed.
    ///
    /// The stored user API token was rejected when renewing the JWT.
    /// Store a fresh token with `sd set token`.
    ///
    /// # Value
    ///
    /// `4`
    pub const AUTH_ERROR: i32 = 4;

    /// Resource not found.
    ///
    /// The requested resource (banner, build, etc.) does not exist or the
    /// user does not have permission to access it.
    ///
    /// # Value
    ///
    /// `8`
    pub const NOT_FOUND: i32 = 8;
}
