//
//  screwdriver-cli
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the Screwdriver.cd client
//!
//! This module provides the error type shared by every API operation. The
//! client classifies each HTTP response against an operation-specific set of
//! expected status codes, and everything that is not a success surfaces here
//! as one of the [`ApiError`] variants.
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all API operations
//! - Classification helpers ([`ApiError::is_not_found`],
//!   [`ApiError::is_auth_failure`], [`ApiError::is_validation_failure`])
//!   used by the CLI layer to choose exit codes
//!
//! # Example
//!
//! ```rust
//! use screwdriver_cli::api::common::ApiError;
//!
//! fn handle_result<T>(result: Result<T, ApiError>) {
//!     match result {
//!         Ok(_) => println!("Success!"),
//!         Err(ApiError::NotFound { id }) => println!("No banner with ID {}", id),
//!         Err(ApiError::ValidationFailed { messages }) => {
//!             for message in messages {
//!                 eprintln!("{}", message);
//!             }
//!         }
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Notes
//!
//! - The `Transport`, `InvalidUrl`, and `Decode` variants convert
//!   automatically from their underlying error types
//! - Only `UnexpectedStatus` ever triggers the refresh-and-retry protocol;
//!   every other variant is terminal

use reqwest::StatusCode;
use thiserror::Error;

/// Unified error type for all Screwdriver API operations.
///
/// `ApiError` covers the failure scenarios of the authenticated-request
/// protocol. It implements the standard `Error` trait via `thiserror` for
/// ergonomic propagation with `?`.
///
/// # Variants
///
/// | Variant | Description | Retried? |
/// |---------|-------------|----------|
/// | `Transport` | Connection/timeout/TLS failure | never |
/// | `InvalidUrl` | Request path could not be resolved against the API URL | never |
/// | `Decode` | Response body was not the expected JSON | never |
/// | `UnexpectedStatus` | Status outside the operation's expected set | once, after a token refresh |
/// | `NotFound` | 404 for a banner addressed by ID | never |
/// | `ValidationFailed` | HTTP 200 whose body reports validation errors | never |
/// | `ReauthFailed` | The token refresh itself failed | never (aborts the pending retry) |
/// | `TaskFailed` | A batch worker task panicked or was cancelled | never |
///
/// # Example
///
/// ```rust
/// use screwdriver_cli::api::common::ApiError;
///
/// let err = ApiError::NotFound { id: "42".to_string() };
/// assert_eq!(err.to_string(), "banner of ID 42 is not found");
/// assert!(err.is_not_found());
/// ```
///
/// # Notes
///
/// - `UnexpectedStatus` carries both the received status and the full
///   expected set so the message can say what would have been accepted
/// - Error messages are designed to be printed to the terminal as-is
#[derive(Error, Debug)]
pub enum ApiError {
    /// A network-level error occurred during the request.
    ///
    /// Covers connection failures, timeouts, DNS resolution errors, and
    /// other transport-layer issues. Never retried: these are not
    /// auth-classifiable.
    ///
    /// # Parameters
    ///
    /// - `0` - The underlying `reqwest::Error` with network details
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The request path could not be resolved against the configured API URL.
    ///
    /// Usually means the `api` field of the active context is empty or not
    /// a valid absolute URL. Never retried.
    ///
    /// # Parameters
    ///
    /// - `0` - The underlying URL parse error
    #[error("invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The response body could not be decoded as the expected JSON shape.
    ///
    /// The HTTP exchange itself succeeded; the payload was malformed.
    /// Never retried.
    ///
    /// # Parameters
    ///
    /// - `0` - The underlying JSON decode error
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response status was outside the operation's expected set.
    ///
    /// This is the only variant that participates in the retry protocol:
    /// on the first attempt it triggers a token refresh and one retry; on
    /// the retried attempt it is terminal and reports the *retried*
    /// attempt's status.
    ///
    /// # Parameters
    ///
    /// - `got` - The status the server returned
    /// - `expected` - The status code(s) the operation accepts
    #[error("status code should be {}, but actual is {}", format_status_list(.expected), format_status(.got))]
    UnexpectedStatus {
        /// The status the server actually returned.
        got: StatusCode,
        /// The status code(s) that would have been accepted.
        expected: Vec<StatusCode>,
    },

    /// A banner addressed by ID does not exist (HTTP 404).
    ///
    /// Only raised for banner update/delete by ID; a 404 there is a
    /// definitive answer, so no token refresh is attempted, even on the
    /// first try.
    ///
    /// # Parameters
    ///
    /// - `id` - The banner ID that was requested
    #[error("banner of ID {id} is not found")]
    NotFound {
        /// The banner ID the server did not recognize.
        id: String,
    },

    /// The remote validator accepted the request but rejected the yaml.
    ///
    /// The HTTP status was 200; the decoded body carried a non-empty
    /// `errors` value. This is a validation outcome, not a transport
    /// failure, and is never retried.
    ///
    /// # Parameters
    ///
    /// - `messages` - One human-readable message per validation error
    #[error("validation failed: {}", .messages.join("; "))]
    ValidationFailed {
        /// One message per error reported by the validator.
        messages: Vec<String>,
    },

    /// The token refresh itself failed.
    ///
    /// Raised when an operation hit an unexpected status, tried to obtain
    /// a fresh JWT, and that refresh call failed. The pending retry is
    /// abandoned; no second request is attempted.
    ///
    /// # Parameters
    ///
    /// - `0` - The error the refresh call produced
    #[error("failed to refresh auth token: {0}")]
    ReauthFailed(Box<ApiError>),

    /// A concurrent batch worker could not be joined.
    ///
    /// Only produced by the batch resolver when a spawned lookup task
    /// panics or is cancelled; individual lookup failures surface as their
    /// own variants instead.
    ///
    /// # Parameters
    ///
    /// - `0` - Description of the join failure
    #[error("background task failed: {0}")]
    TaskFailed(String),
}

impl ApiError {
    /// Returns `true` if this error is a banner-not-found outcome.
    ///
    /// The CLI maps these to the `NOT_FOUND` exit code.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    /// Returns `true` if this error means authentication could not be
    /// established: either the refresh call failed outright, or the server
    /// kept answering 401 after a successful refresh.
    ///
    /// The CLI maps these to the `AUTH_ERROR` exit code.
    pub fn is_auth_failure(&self) -> bool {
        match self {
            ApiError::ReauthFailed(_) => true,
            ApiError::UnexpectedStatus { got, .. } => *got == StatusCode::UNAUTHORIZED,
            _ => false,
        }
    }

    /// Returns `true` if the remote validator rejected the submitted yaml.
    pub fn is_validation_failure(&self) -> bool {
        matches!(self, ApiError::ValidationFailed { .. })
    }
}

/// Renders a status code as its bare numeric form ("401", not "401 Unauthorized").
fn format_status(code: &StatusCode) -> String {
    code.as_u16().to_string()
}

/// Renders an expected-status set as "201 or 200" style prose.
fn format_status_list(codes: &[StatusCode]) -> String {
    codes
        .iter()
        .map(|code| code.as_u16().to_string())
        .collect::<Vec<_>>()
        .join(" or ")
}
