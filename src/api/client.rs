//
//  screwdriver-cli
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Core HTTP client for the Screwdriver.cd v4 API.
//!
//! This module implements the authenticated-request protocol every API
//! operation is built on:
//!
//! 1. **Request execution** - one attempt per call: resolve the path against
//!    the configured API URL, attach verb-appropriate headers, send.
//! 2. **Status classification** - compare the response status against the
//!    operation's expected-success set; 404 is special-cased for banners
//!    addressed by ID.
//! 3. **Refresh-and-retry** - on an unexpected status, obtain a fresh JWT
//!    with the long-lived user token and retry the request exactly once.
//!    The retried request is rebuilt from scratch so the new JWT lands in
//!    both the `Authorization` header and any `?token=` query parameter.
//!
//! # Headers
//!
//! | Verb | Headers |
//! |------|---------|
//! | GET | `Accept: application/json` |
//! | POST/PUT/DELETE | `Content-Type: application/json`, `Authorization: Bearer {jwt}` |
//!
//! GET endpoints that require authentication carry the JWT as a `?token=`
//! query parameter instead of a header (that is the service's contract).
//!
//! # Shared JWT
//!
//! The JWT lives behind `Arc<tokio::sync::RwLock<String>>` and is shared by
//! every clone of the client. The batch resolver clones the client into one
//! task per build ID, so a refresh performed by any task is immediately
//! visible to the others. Concurrent refreshes are tolerated rather than
//! deduplicated; the last writer wins.
//!
//! # Example
//!
//! ```rust,no_run
//! use screwdriver_cli::api::ScrewdriverClient;
//! use screwdriver_cli::config::SdContext;
//!
//! # async fn example() -> Result<(), screwdriver_cli::api::ApiError> {
//! let context = SdContext {
//!     user_token: "my-user-token".to_string(),
//!     api_url: "https://api-cd.screwdriver.example".to_string(),
//!     jwt: String::new(),
//! };
//!
//! let client = ScrewdriverClient::new(&context)?;
//! let banners = client.banners().await?;
//! println!("{} active banners", banners.iter().filter(|b| b.is_active).count());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use reqwest::{header, Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::RwLock;
use url::Url;

use super::common::ApiError;
use crate::config::SdContext;

/// Response returned by the token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    /// The freshly issued JWT.
    token: String,
}

/// One logical API call: verb, path, optional body, and the classification
/// rules the response is checked against.
///
/// Instances are built by the endpoint modules through the verb constructors
/// ([`ApiRequest::get`], [`ApiRequest::post`], [`ApiRequest::put`],
/// [`ApiRequest::delete`]) and tweaked with the builder methods where an
/// endpoint deviates from the verb's default success status.
///
/// The request is deliberately a passive description: the client rebuilds
/// the actual HTTP request from it on every attempt, which is what lets a
/// retry pick up a refreshed JWT.
#[derive(Debug)]
pub(crate) struct ApiRequest {
    method: Method,
    path: String,
    body: Option<Value>,
    expected: Vec<StatusCode>,
    token_in_query: bool,
    banner_id: Option<String>,
}

impl ApiRequest {
    /// A GET request expecting 200.
    pub(crate) fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: None,
            expected: vec![StatusCode::OK],
            token_in_query: false,
            banner_id: None,
        }
    }

    /// A POST request with a JSON body, expecting 201.
    pub(crate) fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            body: Some(body),
            expected: vec![StatusCode::CREATED],
            token_in_query: false,
            banner_id: None,
        }
    }

    /// A PUT request with a JSON body, expecting 200.
    pub(crate) fn put(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::PUT,
            path: path.into(),
            body: Some(body),
            expected: vec![StatusCode::OK],
            token_in_query: false,
            banner_id: None,
        }
    }

    /// A DELETE request expecting 204.
    pub(crate) fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::DELETE,
            path: path.into(),
            body: None,
            expected: vec![StatusCode::NO_CONTENT],
            token_in_query: false,
            banner_id: None,
        }
    }

    /// Overrides the expected-success status set.
    pub(crate) fn expect(mut self, codes: &[StatusCode]) -> Self {
        self.expected = codes.to_vec();
        self
    }

    /// Carries the current JWT as a `?token=` query parameter.
    ///
    /// Used by the GET endpoints (builds, events, pipeline secrets) that
    /// authenticate through the query string rather than a header. The
    /// parameter is appended at send time, so a retried attempt carries the
    /// refreshed JWT.
    pub(crate) fn with_token_query(mut self) -> Self {
        self.token_in_query = true;
        self
    }

    /// Marks this request as addressing the banner with the given ID.
    ///
    /// A 404 response then becomes [`ApiError::NotFound`] immediately, with
    /// no token refresh: for a banner addressed by ID, 404 is a definitive
    /// answer, not an authorization hiccup.
    pub(crate) fn with_banner_id(mut self, id: impl Into<String>) -> Self {
        self.banner_id = Some(id.into());
        self
    }
}

/// HTTP client for a Screwdriver.cd API instance.
///
/// Holds the transport, the resolved API base URL, the long-lived user
/// token, and the current JWT. Cheap to clone: the transport and the JWT
/// cell are shared between clones, which is exactly what the concurrent
/// batch resolver relies on.
///
/// # Creating a client
///
/// ```rust,no_run
/// use screwdriver_cli::api::ScrewdriverClient;
/// use screwdriver_cli::config::SdContext;
///
/// # fn example(context: &SdContext) -> Result<(), screwdriver_cli::api::ApiError> {
/// let client = ScrewdriverClient::new(context)?;
/// # Ok(())
/// # }
/// ```
///
/// A custom transport (proxies, timeouts, test doubles) can be injected
/// with [`ScrewdriverClient::with_client`]; the client never touches any
/// process-global state.
#[derive(Clone, Debug)]
pub struct ScrewdriverClient {
    /// The underlying HTTP transport.
    http: Client,
    /// Parsed base URL of the API (`https://api-cd.../`).
    api_url: Url,
    /// Long-lived user token used to mint JWTs.
    user_token: String,
    /// Current JWT, shared across clones of this client.
    jwt: Arc<RwLock<String>>,
}

impl ScrewdriverClient {
    /// Creates a client for the given context with a default transport.
    ///
    /// # Parameters
    ///
    /// * `context` - The active context: API URL, user token, and the last
    ///   JWT stored by `sd set jwt` (may be empty; the first authenticated
    ///   call will refresh it).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if the context's API URL is not an
    /// absolute URL, or [`ApiError::Transport`] if the HTTP client cannot
    /// be constructed.
    pub fn new(context: &SdContext) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(format!("sd/{}", crate::VERSION))
            .build()?;
        Self::with_client(context, http)
    }

    /// Creates a client using a caller-provided transport.
    ///
    /// The transport is an explicit dependency rather than a process-wide
    /// singleton, so tests and embedders can substitute their own.
    pub fn with_client(context: &SdContext, http: Client) -> Result<Self, ApiError> {
        let api_url = Url::parse(&context.api_url)?;
        Ok(Self {
            http,
            api_url,
            user_token: context.user_token.clone(),
            jwt: Arc::new(RwLock::new(context.jwt.clone())),
        })
    }

    /// The API base URL this client talks to, without a trailing slash.
    pub fn api_url(&self) -> &str {
        self.api_url.as_str().trim_end_matches('/')
    }

    /// The JWT the client currently holds.
    ///
    /// Reflects any refresh performed since construction; callers that want
    /// to persist a refreshed token read it from here.
    pub async fn current_jwt(&self) -> String {
        self.jwt.read().await.clone()
    }

    /// Obtains a fresh JWT from the token endpoint and stores it.
    ///
    /// `GET /v4/auth/token?api_token={userToken}`, expecting 200. Any other
    /// status fails immediately: the refresher itself is never retried.
    /// On success the new JWT replaces the shared one and is returned.
    ///
    /// # Errors
    ///
    /// [`ApiError::UnexpectedStatus`] for a non-200 response,
    /// [`ApiError::Decode`] if the body is not `{"token": ...}`, or
    /// [`ApiError::Transport`] / [`ApiError::InvalidUrl`] for lower-level
    /// failures.
    pub async fn refresh_jwt(&self) -> Result<String, ApiError> {
        let mut url = self.api_url.join("/v4/auth/token")?;
        url.query_pairs_mut()
            .append_pair("api_token", &self.user_token);

        tracing::debug!("GET /v4/auth/token (refreshing JWT)");
        let response = self
            .http
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ApiError::UnexpectedStatus {
                got: status,
                expected: vec![StatusCode::OK],
            });
        }

        let fresh: TokenResponse = decode_json(response).await?;
        *self.jwt.write().await = fresh.token.clone();
        Ok(fresh.token)
    }

    /// Sends an API request through the refresh-and-retry protocol.
    ///
    /// The state machine, as an explicit bounded loop:
    ///
    /// 1. Build and send the request with the current JWT.
    /// 2. Status in the expected set → return the response.
    /// 3. Status 404 on a banner-by-ID request → [`ApiError::NotFound`],
    ///    terminal even on the first attempt.
    /// 4. Any other status, first attempt → refresh the JWT and loop once
    ///    more. A refresh failure aborts with [`ApiError::ReauthFailed`]
    ///    and no second attempt.
    /// 5. Any other status, retried attempt → [`ApiError::UnexpectedStatus`]
    ///    carrying the *retried* attempt's status.
    ///
    /// Transport, URL, and decode errors propagate immediately from any
    /// attempt; they are not auth-classifiable and never trigger a retry.
    pub(crate) async fn send(&self, request: &ApiRequest) -> Result<Response, ApiError> {
        let mut retried = false;
        loop {
            let response = self.execute(request).await?;
            let status = response.status();

            if request.expected.contains(&status) {
                return Ok(response);
            }

            if status == StatusCode::NOT_FOUND {
                if let Some(id) = &request.banner_id {
                    return Err(ApiError::NotFound { id: id.clone() });
                }
            }

            if retried {
                return Err(ApiError::UnexpectedStatus {
                    got: status,
                    expected: request.expected.clone(),
                });
            }

            tracing::debug!(
                "{} {} returned {}, refreshing JWT and retrying",
                request.method,
                request.path,
                status.as_u16()
            );
            self.refresh_jwt()
                .await
                .map_err(|e| ApiError::ReauthFailed(Box::new(e)))?;
            retried = true;
        }
    }

    /// Executes a single attempt: resolve URL, attach headers, send.
    async fn execute(&self, request: &ApiRequest) -> Result<Response, ApiError> {
        let mut url = self.api_url.join(&request.path)?;
        let jwt = self.jwt.read().await.clone();

        if request.token_in_query {
            url.query_pairs_mut().append_pair("token", &jwt);
        }

        let mut builder = self.http.request(request.method.clone(), url);
        builder = match request.method {
            Method::GET => builder.header(header::ACCEPT, "application/json"),
            _ => builder
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {jwt}")),
        };
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        tracing::debug!("{} {}", request.method, request.path);
        Ok(builder.send().await?)
    }
}

/// Reads a response body to completion and decodes it as JSON.
///
/// Body-read failures surface as [`ApiError::Transport`]; malformed JSON as
/// [`ApiError::Decode`]. Kept separate from `reqwest::Response::json` so
/// the two failure modes stay distinguishable.
pub(crate) async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}
