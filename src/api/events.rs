//
//  screwdriver-cli
//  api/events.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Event operations.
//!
//! An event is one run of a pipeline. Starting a build from the command line
//! means creating an event on the pipeline at a chosen start job; the service
//! then schedules the builds that hang off it.

use serde::Deserialize;

use super::client::{decode_json, ApiRequest};
use super::common::ApiError;
use super::ScrewdriverClient;

/// The slice of an event the CLI cares about: which pipeline it ran on.
#[derive(Debug, Clone, Deserialize)]
pub struct EventInfo {
    /// ID of the pipeline the event belongs to.
    #[serde(rename = "pipelineId")]
    pub pipeline_id: i64,
}

impl ScrewdriverClient {
    /// Starts a new event on a pipeline.
    ///
    /// `POST /v4/events`, expecting 201. The service schedules the builds;
    /// the response body is not needed here.
    ///
    /// # Parameters
    ///
    /// * `pipeline_id` - The pipeline to run
    /// * `start_from` - Job name to start from (e.g. `main`, or `~commit` to
    ///   mimic a push trigger)
    pub async fn create_event(&self, pipeline_id: &str, start_from: &str) -> Result<(), ApiError> {
        let body = serde_json::json!({
            "pipelineId": pipeline_id,
            "startFrom": start_from,
        });
        self.send(&ApiRequest::post("/v4/events", body)).await?;
        Ok(())
    }

    /// Fetches a single event.
    ///
    /// `GET /v4/events/{id}` with the JWT in the query string, expecting 200.
    pub async fn event(&self, event_id: i64) -> Result<EventInfo, ApiError> {
        let request = ApiRequest::get(format!("/v4/events/{event_id}")).with_token_query();
        let response = self.send(&request).await?;
        decode_json(response).await
    }
}
