//
//  screwdriver-cli
//  api/secrets.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pipeline secret operations.
//!
//! Secrets belong to a pipeline and are addressed by name from the command
//! line, but by numeric ID in the API. Setting a secret therefore lists the
//! pipeline's secrets first and then decides between a create and an update
//! of the existing entry.

use serde::{Deserialize, Serialize};

use super::client::{decode_json, ApiRequest};
use super::common::ApiError;
use super::ScrewdriverClient;

/// A pipeline secret. The service never returns the value itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Secret {
    /// Numeric secret ID assigned by the service.
    pub id: i64,

    /// ID of the owning pipeline.
    #[serde(rename = "pipelineId")]
    pub pipeline_id: i64,

    /// Secret name, conventionally SCREAMING_SNAKE_CASE.
    pub name: String,

    /// Whether the secret is exposed to pull-request builds.
    #[serde(rename = "allowInPR", default)]
    pub allow_in_pr: bool,
}

/// What [`ScrewdriverClient::set_secret`] ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretOutcome {
    /// No secret of that name existed on the pipeline; one was created.
    Created,
    /// A secret of that name existed; its value was replaced.
    Updated,
}

impl ScrewdriverClient {
    /// Lists the secrets of a pipeline.
    ///
    /// `GET /v4/pipelines/{id}/secrets` with the JWT in the query string,
    /// expecting 200.
    pub async fn pipeline_secrets(&self, pipeline_id: i64) -> Result<Vec<Secret>, ApiError> {
        let request =
            ApiRequest::get(format!("/v4/pipelines/{pipeline_id}/secrets")).with_token_query();
        let response = self.send(&request).await?;
        decode_json(response).await
    }

    /// Creates a new secret on a pipeline.
    ///
    /// `POST /v4/secrets`, expecting 201.
    pub async fn create_secret(
        &self,
        pipeline_id: i64,
        name: &str,
        value: &str,
        allow_in_pr: bool,
    ) -> Result<(), ApiError> {
        let body = serde_json::json!({
            "pipelineId": pipeline_id,
            "name": name,
            "value": value,
            "allowInPR": allow_in_pr,
        });
        self.send(&ApiRequest::post("/v4/secrets", body)).await?;
        Ok(())
    }

    /// Replaces the value of an existing secret.
    ///
    /// `PUT /v4/secrets/{id}`, expecting 200.
    pub async fn update_secret(
        &self,
        secret_id: i64,
        value: &str,
        allow_in_pr: bool,
    ) -> Result<(), ApiError> {
        let body = serde_json::json!({
            "value": value,
            "allowInPR": allow_in_pr,
        });
        self.send(&ApiRequest::put(format!("/v4/secrets/{secret_id}"), body))
            .await?;
        Ok(())
    }

    /// Creates or updates a secret, keyed by name.
    ///
    /// Lists the pipeline's secrets and updates the one whose name matches,
    /// or creates a fresh secret when none does.
    ///
    /// # Returns
    ///
    /// Whether the secret was [`Created`](SecretOutcome::Created) or
    /// [`Updated`](SecretOutcome::Updated).
    pub async fn set_secret(
        &self,
        pipeline_id: i64,
        name: &str,
        value: &str,
        allow_in_pr: bool,
    ) -> Result<SecretOutcome, ApiError> {
        let existing = self.pipeline_secrets(pipeline_id).await?;

        match existing.iter().find(|secret| secret.name == name) {
            Some(secret) => {
                self.update_secret(secret.id, value, allow_in_pr).await?;
                Ok(SecretOutcome::Updated)
            }
            None => {
                self.create_secret(pipeline_id, name, value, allow_in_pr)
                    .await?;
                Ok(SecretOutcome::Created)
            }
        }
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

    const SECRET_LIST: &str = r#"[
        {"id": 11, "pipelineId": 1111, "name": "NPM_TOKEN", "allowInPR": false},
        {"id": 12, "pipelineId": 1111, "name": "DOCKER_PASSWORD", "allowInPR": true}
    ]"#;

    #[tokio::test]
    async fn pipeline_secrets_sends_the_jwt_in_the_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v4/pipelines/1111/secrets")
            .match_query(mockito::Matcher::UrlEncoded(
                "token".into(),
                "stale-jwt".into(),
            ))
            .with_status(200)
            .with_body(SECRET_LIST)
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server);
        let secrets = client.pipeline_secrets(1111).await.unwrap();

        assert_eq!(secrets.len(), 2);
        assert_eq!(secrets[0].name, "NPM_TOKEN");
        assert!(secrets[1].allow_in_pr);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn set_secret_creates_when_the_name_is_new() {
        let mut server = mockito::Server::new_async().await;
        let list = server
            .mock("GET", "/v4/pipelines/1111/secrets")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(SECRET_LIST)
            .expect(1)
            .create_async()
            .await;
        let create = server
            .mock("POST", "/v4/secrets")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "pipelineId": 1111,
                "name": "GITHUB_TOKEN",
                "value": "s3cr3t",
                "allowInPR": false,
            })))
            .with_status(201)
            .with_body(r#"{"id": 13}"#)
            .expect(1)
            .create_async()
            .await;
        let update = server
            .mock("PUT", mockito::Matcher::Regex(r"^/v4/secrets/\d+$".to_string()))
            .expect(0)
            .create_async()
            .await;

        let client = client_for(&server);
        let outcome = client
            .set_secret(1111, "GITHUB_TOKEN", "s3cr3t", false)
            .await
            .unwrap();

        assert_eq!(outcome, SecretOutcome::Created);
        list.assert_async().await;
        create.assert_async().await;
        update.assert_async().await;
    }

    #[tokio::test]
    async fn set_secret_updates_when_the_name_exists() {
        let mut server = mockito::Server::new_async().await;
        let list = server
            .mock("GET", "/v4/pipelines/1111/secrets")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(SECRET_LIST)
            .expect(1)
            .create_async()
            .await;
        let update = server
            .mock("PUT", "/v4/secrets/11")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "value": "rotated",
                "allowInPR": true,
            })))
            .with_status(200)
            .with_body(r#"{"id": 11}"#)
            .expect(1)
            .create_async()
            .await;
        let create = server
            .mock("POST", "/v4/secrets")
            .expect(0)
            .create_async()
            .await;

        let client = client_for(&server);
        let outcome = client
            .set_secret(1111, "NPM_TOKEN", "rotated", true)
            .await
            .unwrap();

        assert_eq!(outcome, SecretOutcome::Updated);
        list.assert_async().await;
        update.assert_async().await;
        create.assert_async().await;
    }

    #[tokio::test]
    async fn create_secret_refreshes_once_on_an_expired_jwt() {
        let mut server = mockito::Server::new_async().await;
        let first = server
            .mock("POST", "/v4/secrets")
            .match_header("authorization", "Bearer stale-jwt")
            .with_status(401)
            .expect(1)
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
        let second = server
            .mock("POST", "/v4/secrets")
            .match_header("authorization", "Bearer fresh-jwt")
            .with_status(201)
            .with_body(r#"{"id": 14}"#)
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server);
        client
            .create_secret(1111, "GITHUB_TOKEN", "s3cr3t", false)
            .await
            .unwrap();

        first.assert_async().await;
        refresh.assert_async().await;
        second.assert_async().await;
    }
}
