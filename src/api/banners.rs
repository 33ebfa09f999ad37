//
//  screwdriver-cli
//  api/banners.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Banner operations.
//!
//! Banners are service-wide announcements shown in the Screwdriver UI
//! (planned maintenance, incident notices). They are managed through
//! CRUD-style calls on `/v4/banners`.
//!
//! All four operations run through the refresh-and-retry protocol. The two
//! forms that address a banner by ID (update, delete) treat a 404 as a
//! definitive "no such banner" answer: it surfaces as
//! [`ApiError::NotFound`](super::ApiError) without any token refresh.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::client::{decode_json, ApiRequest};
use super::common::ApiError;
use super::ScrewdriverClient;

/// A service-wide announcement banner.
///
/// # Fields
///
/// * `id` - Numeric banner ID, assigned by the service
/// * `message` - The announcement text
/// * `is_active` - Whether the banner is currently displayed
/// * `create_time` - ISO 8601 creation timestamp
/// * `created_by` - Username of the banner's author
/// * `banner_type` - Severity class, `info` or `warn`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Banner {
    /// Numeric banner ID assigned by the service.
    pub id: i64,

    /// The announcement text.
    #[serde(default)]
    pub message: String,

    /// Whether the banner is currently displayed.
    #[serde(rename = "isActive", default)]
    pub is_active: bool,

    /// ISO 8601 creation timestamp, when the service reports one.
    #[serde(rename = "createTime", default)]
    pub create_time: Option<String>,

    /// Username of the banner's author, when the service reports one.
    #[serde(rename = "createdBy", default)]
    pub created_by: Option<String>,

    /// Severity class (`info` or `warn`).
    #[serde(rename = "type", default)]
    pub banner_type: String,
}

impl ScrewdriverClient {
    /// Lists all banners.
    ///
    /// `GET /v4/banners`, expecting 200.
    pub async fn banners(&self) -> Result<Vec<Banner>, ApiError> {
        let response = self.send(&ApiRequest::get("/v4/banners")).await?;
        decode_json(response).await
    }

    /// Creates a new banner and returns the service's echo of it.
    ///
    /// `POST /v4/banners`, expecting 201.
    ///
    /// # Parameters
    ///
    /// * `message` - The announcement text
    /// * `banner_type` - `info` or `warn`
    /// * `active` - Whether the banner shows immediately
    pub async fn create_banner(
        &self,
        message: &str,
        banner_type: &str,
        active: bool,
    ) -> Result<Banner, ApiError> {
        let body = serde_json::json!({
            "message": message,
            "type": banner_type,
            "isActive": active,
        });
        let response = self.send(&ApiRequest::post("/v4/banners", body)).await?;
        decode_json(response).await
    }

    /// Updates an existing banner and returns the updated resource.
    ///
    /// `PUT /v4/banners/{id}`, expecting 200. A 404 means the ID does not
    /// exist and is returned as [`ApiError::NotFound`] with no retry.
    ///
    /// # Parameters
    ///
    /// * `id` - The banner to update
    /// * `message` - Replacement text, or `None` to leave the text alone
    /// * `banner_type` - `info` or `warn`
    /// * `active` - Whether the banner should be displayed
    pub async fn update_banner(
        &self,
        id: &str,
        message: Option<&str>,
        banner_type: &str,
        active: bool,
    ) -> Result<Banner, ApiError> {
        let mut body = serde_json::json!({
            "type": banner_type,
            "isActive": active,
        });
        if let Some(message) = message {
            body["message"] = Value::String(message.to_string());
        }

        let request = ApiRequest::put(format!("/v4/banners/{id}"), body).with_banner_id(id);
        let response = self.send(&request).await?;
        decode_json(response).await
    }

    /// Deletes a banner.
    ///
    /// `DELETE /v4/banners/{id}`, expecting 204. A 404 surfaces as
    /// [`ApiError::NotFound`] with no retry.
    pub async fn delete_banner(&self, id: &str) -> Result<(), ApiError> {
        let request = ApiRequest::delete(format!("/v4/banners/{id}")).with_banner_id(id);
        self.send(&request).await?;
        Ok(())
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

    #[tokio::test]
    async fn create_banner_round_trips_the_payload() {
        let mut server = mockito::Server::new_async().await;
        let create = server
            .mock("POST", "/v4/banners")
            .match_header("content-type", "application/json")
            .with_status(201)
            .with_body(r#"{"id": 13, "message": "Scheduled maintenance", "type": "info"}"#)
            .expect(1)
            .create_async()
            .await;
        let refresh = server
            .mock("GET", "/v4/auth/token")
            .match_query(mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = client_for(&server);
        let banner = client
            .create_banner("Scheduled maintenance", "info", true)
            .await
            .unwrap();

        assert_eq!(banner.id, 13);
        assert_eq!(banner.message, "Scheduled maintenance");
        assert_eq!(banner.banner_type, "info");
        create.assert_async().await;
        refresh.assert_async().await;
    }

    #[tokio::test]
    async fn banners_lists_without_refreshing() {
        let mut server = mockito::Server::new_async().await;
        let list = server
            .mock("GET", "/v4/banners")
            .with_status(200)
            .with_body(
                r#"[{"id": 1, "message": "down at noon", "isActive": true,
                     "createTime": "2026-02-20T09:00:00.000Z", "createdBy": "ops",
                     "type": "warn"}]"#,
            )
            .expect(1)
            .create_async()
            .await;
        let refresh = server
            .mock("GET", "/v4/auth/token")
            .match_query(mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = client_for(&server);
        let banners = client.banners().await.unwrap();

        assert_eq!(banners.len(), 1);
        assert_eq!(banners[0].id, 1);
        assert!(banners[0].is_active);
        assert_eq!(banners[0].banner_type, "warn");
        list.assert_async().await;
        refresh.assert_async().await;
    }

    #[tokio::test]
    async fn update_banner_retries_once_with_a_fresh_jwt() {
        let mut server = mockito::Server::new_async().await;
        let first = server
            .mock("PUT", "/v4/banners/13")
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
            .mock("PUT", "/v4/banners/13")
            .match_header("authorization", "Bearer fresh-jwt")
            .with_status(200)
            .with_body(r#"{"id": 13, "message": "updated", "type": "info"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server);
        let banner = client
            .update_banner("13", Some("updated"), "info", true)
            .await
            .unwrap();

        assert_eq!(banner.message, "updated");
        first.assert_async().await;
        refresh.assert_async().await;
        second.assert_async().await;
    }

    #[tokio::test]
    async fn delete_banner_maps_404_without_refreshing() {
        let mut server = mockito::Server::new_async().await;
        let delete = server
            .mock("DELETE", "/v4/banners/99")
            .with_status(404)
            .expect(1)
            .create_async()
            .await;
        let refresh = server
            .mock("GET", "/v4/auth/token")
            .match_query(mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.delete_banner("99").await.unwrap_err();

        assert!(matches!(err, ApiError::NotFound { ref id } if id == "99"));
        assert_eq!(err.to_string(), "banner of ID 99 is not found");
        delete.assert_async().await;
        refresh.assert_async().await;
    }

    #[tokio::test]
    async fn delete_banner_succeeds_on_204() {
        let mut server = mockito::Server::new_async().await;
        let delete = server
            .mock("DELETE", "/v4/banners/13")
            .match_header("authorization", "Bearer stale-jwt")
            .with_status(204)
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server);
        client.delete_banner("13").await.unwrap();

        delete.assert_async().await;
    }
}
