//
//  screwdriver-cli
//  api/builds.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Build lookups and the build-page resolver.
//!
//! A build ID on its own is not enough to open the Screwdriver UI: the UI
//! page for a build lives at `/pipelines/{pipelineId}/builds/{buildId}`, and
//! the pipeline ID has to be discovered by walking build -> event ->
//! pipeline. [`ScrewdriverClient::build_pages`] does that walk for a whole
//! batch of IDs concurrently, printing each page URL as soon as its chain
//! completes unless the caller asks it to stay quiet.
//!
//! Ordering rules for the batch:
//!
//! * every spawned lookup runs to completion before the call returns,
//!   whether or not some of them fail;
//! * the returned URLs are in input order, regardless of completion order;
//! * if several lookups fail, the error for the earliest failing ID in the
//!   input wins.

use serde::Deserialize;

use super::client::{decode_json, ApiRequest};
use super::common::ApiError;
use super::ScrewdriverClient;

/// The slice of a build the CLI cares about: which event spawned it.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildInfo {
    /// ID of the event the build belongs to.
    #[serde(rename = "eventId")]
    pub event_id: i64,
}

/// Splits free-form user input into individual build IDs.
///
/// IDs may be separated by spaces, newlines, or any mix of whitespace;
/// empty fragments are dropped.
pub fn split_build_ids(input: &str) -> Vec<String> {
    input.split_whitespace().map(str::to_string).collect()
}

/// Derives the UI page URL for a build from the API URL.
///
/// Screwdriver deployments conventionally serve the API at `api-cd.<domain>`
/// and the UI at `cd.<domain>`, so the first `api-cd` in the API URL is
/// swapped for `cd`.
pub fn build_page_url(api_url: &str, pipeline_id: i64, build_id: &str) -> String {
    let ui_base = api_url.trim_end_matches('/').replacen("api-cd", "cd", 1);
    format!("{ui_base}/pipelines/{pipeline_id}/builds/{build_id}")
}

impl ScrewdriverClient {
    /// Fetches a single build.
    ///
    /// `GET /v4/builds/{id}` with the JWT in the query string, expecting 200.
    pub async fn build(&self, build_id: &str) -> Result<BuildInfo, ApiError> {
        let request = ApiRequest::get(format!("/v4/builds/{build_id}")).with_token_query();
        let response = self.send(&request).await?;
        decode_json(response).await
    }

    /// Resolves UI page URLs for a batch of build IDs.
    ///
    /// One lookup task is spawned per ID; each chains two reads (the build
    /// for its event ID, then the event for its pipeline ID) and, unless
    /// `quiet` is set, prints the derived page URL the moment it completes.
    /// The tasks share this client, so an expired JWT costs one refresh per
    /// in-flight task at worst and the survivors settle on the newest token.
    ///
    /// # Parameters
    ///
    /// * `input` - Whitespace- or newline-separated build IDs
    /// * `quiet` - Suppress the per-completion prints; callers that render
    ///   the collected list themselves pass `true`
    ///
    /// # Returns
    ///
    /// The page URLs in input order. On failure, the error of the earliest
    /// failing ID in the input, after every task has finished.
    pub async fn build_pages(&self, input: &str, quiet: bool) -> Result<Vec<String>, ApiError> {
        let ids = split_build_ids(input);

        let mut handles = Vec::with_capacity(ids.len());
        for id in ids {
            let client = self.clone();
            handles.push(tokio::spawn(async move {
                let build = client.build(&id).await?;
                let event = client.event(build.event_id).await?;
                let url = build_page_url(client.api_url(), event.pipeline_id, &id);
                if !quiet {
                    println!("{url}");
                }
                Ok(url)
            }));
        }

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.await {
                Ok(result) => results.push(result),
                Err(join_error) => results.push(Err(ApiError::TaskFailed(join_error.to_string()))),
            }
        }

        let mut pages = Vec::with_capacity(results.len());
        for result in results {
            pages.push(result?);
        }
        Ok(pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SdContext;

    fn client_for(server: &mockito::Server) -> ScrewdriverClient {
        ScrewdriverClient::new(&SdContext {
            user_token: "my-user-token".to_string(),
            api_url: server.url(),
            jwt: "stale-jwt".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn split_build_ids_handles_spaces_and_newlines() {
        assert_eq!(
            split_build_ids("101\n202 303"),
            vec!["101".to_string(), "202".to_string(), "303".to_string()]
        );
        assert_eq!(split_build_ids("  101  \n"), vec!["101".to_string()]);
        assert!(split_build_ids("").is_empty());
        assert!(split_build_ids("   \n  ").is_empty());
    }

    #[test]
    fn build_page_url_swaps_the_first_api_prefix() {
        assert_eq!(
            build_page_url("https://api-cd.screwdriver.example", 77, "101"),
            "https://cd.screwdriver.example/pipelines/77/builds/101"
        );
        // Only the first occurrence changes.
        assert_eq!(
            build_page_url("https://api-cd.api-cd.example", 1, "2"),
            "https://cd.api-cd.example/pipelines/1/builds/2"
        );
        // URLs without the convention pass through untouched.
        assert_eq!(
            build_page_url("https://sd.example/", 3, "4"),
            "https://sd.example/pipelines/3/builds/4"
        );
    }

    #[tokio::test]
    async fn build_pages_returns_urls_in_input_order() {
        let mut server = mockito::Server::new_async().await;
        let build_101 = server
            .mock("GET", "/v4/builds/101")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"eventId": 5}"#)
            .expect(1)
            .create_async()
            .await;
        let event_5 = server
            .mock("GET", "/v4/events/5")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"pipelineId": 77}"#)
            .expect(1)
            .create_async()
            .await;
        let build_202 = server
            .mock("GET", "/v4/builds/202")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"eventId": 6}"#)
            .expect(1)
            .create_async()
            .await;
        let event_6 = server
            .mock("GET", "/v4/events/6")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"pipelineId": 88}"#)
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server);
        let pages = client.build_pages("101\n202", true).await.unwrap();

        let base = server.url();
        assert_eq!(
            pages,
            vec![
                format!("{base}/pipelines/77/builds/101"),
                format!("{base}/pipelines/88/builds/202"),
            ]
        );
        build_101.assert_async().await;
        event_5.assert_async().await;
        build_202.assert_async().await;
        event_6.assert_async().await;
    }

    #[tokio::test]
    async fn build_pages_finishes_every_task_before_failing() {
        let mut server = mockito::Server::new_async().await;
        let build_101 = server
            .mock("GET", "/v4/builds/101")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"eventId": 5}"#)
            .expect(1)
            .create_async()
            .await;
        let event_5 = server
            .mock("GET", "/v4/events/5")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"pipelineId": 77}"#)
            .expect(1)
            .create_async()
            .await;
        // 202 fails on both attempts, forcing a refresh in between.
        let build_202 = server
            .mock("GET", "/v4/builds/202")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .expect(2)
            .create_async()
            .await;
        let refresh = server
            .mock("GET", "/v4/auth/token")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"token": "fresh-jwt"}"#)
            .expect(1)
            .create_async()
            .await;
        let build_303 = server
            .mock("GET", "/v4/builds/303")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"eventId": 7}"#)
            .expect(1)
            .create_async()
            .await;
        let event_7 = server
            .mock("GET", "/v4/events/7")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"pipelineId": 99}"#)
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.build_pages("101 202 303", true).await.unwrap_err();

        assert!(matches!(
            err,
            ApiError::UnexpectedStatus {
                got: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                ..
            }
        ));
        // The siblings of the failing ID still ran to completion.
        build_101.assert_async().await;
        event_5.assert_async().await;
        build_202.assert_async().await;
        refresh.assert_async().await;
        build_303.assert_async().await;
        event_7.assert_async().await;
    }

    #[tokio::test]
    async fn build_pages_reports_the_earliest_failure_in_input_order() {
        let mut server = mockito::Server::new_async().await;
        let build_101 = server
            .mock("GET", "/v4/builds/101")
            .match_query(mockito::Matcher::Any)
            .with_status(404)
            .expect(2)
            .create_async()
            .await;
        let build_202 = server
            .mock("GET", "/v4/builds/202")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .expect(2)
            .create_async()
            .await;
        // Both lookups refresh independently; refreshes are not deduplicated.
        let refresh = server
            .mock("GET", "/v4/auth/token")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"token": "fresh-jwt"}"#)
            .expect(2)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.build_pages("101 202", true).await.unwrap_err();

        // 101 comes first in the input, so its 404 wins over 202's 500.
        assert!(matches!(
            err,
            ApiError::UnexpectedStatus {
                got: reqwest::StatusCode::NOT_FOUND,
                ..
            }
        ));
        build_101.assert_async().await;
        build_202.assert_async().await;
        refresh.assert_async().await;
    }

    #[tokio::test]
    async fn build_pages_with_no_ids_is_a_no_op() {
        let server = mockito::Server::new_async().await;
        let client = client_for(&server);
        let pages = client.build_pages("  \n ", true).await.unwrap();
        assert!(pages.is_empty());
    }
}
