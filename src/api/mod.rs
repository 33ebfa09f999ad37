//
//  screwdriver-cli
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the HTTP client for the Screwdriver.cd REST API
//! (`/v4`).
//!
//! ## Architecture
//!
//! The API layer is organized as follows:
//!
//! - [`client`]: Core HTTP client with JWT refresh and request retry
//! - [`banners`]: Banner CRUD operations
//! - [`builds`]: Build lookups and the build-page resolver
//! - [`events`]: Event creation and lookups
//! - [`secrets`]: Pipeline secret management
//! - [`validator`]: Pipeline and template YAML validation
//! - [`common`]: Shared error types
//!
//! ## Usage
//!
//! ### Creating a Client
//!
//! ```rust,no_run
//! use screwdriver_cli::api::ScrewdriverClient;
//! use screwdriver_cli::config::SdContext;
//!
//! let context = SdContext {
//!     user_token: "your-api-token".to_string(),
//!     api_url: "https://api-cd.screwdriver.example".to_string(),
//!     jwt: String::new(),
//! };
//! let client = ScrewdriverClient::new(&context).expect("Failed to create client");
//! ```
//!
//! ## Error Handling
//!
//! API errors are returned as [`ApiError`] variants:
//!
//! - `UnexpectedStatus`: the service answered with a status outside the
//!   expected set, even after a token refresh and retry
//! - `NotFound`: 404 for a banner addressed by ID
//! - `ValidationFailed`: a 200 validator response carrying errors
//! - `ReauthFailed`: the JWT refresh itself failed
//! - `Transport` / `Decode` / `InvalidUrl`: plumbing failures

/// Core HTTP client for the Screwdriver API.
///
/// Provides the [`ScrewdriverClient`] struct which handles:
/// - JWT acquisition and refresh from the long-lived user token
/// - Authentication header / query injection per request shape
/// - The refresh-and-retry protocol for expired JWTs
/// - Response status checking against per-endpoint expectations
pub mod client;

/// Banner CRUD operations (`/v4/banners`).
pub mod banners;

/// Build lookups and the concurrent build-page resolver.
pub mod builds;

/// Event creation and lookups (`/v4/events`).
pub mod events;

/// Pipeline secret management (`/v4/secrets`).
pub mod secrets;

/// Pipeline and template YAML validation (`/v4/validator`).
pub mod validator;

/// Error types shared across the API layer.
pub mod common;

/// Re-export of the main Screwdriver API client.
///
/// This is the primary entry point for making API requests.
pub use client::ScrewdriverClient;

/// Re-export of the API error type.
pub use common::ApiError;
