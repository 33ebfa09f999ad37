//
//  screwdriver-cli
//  api/validator.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pipeline and template validation.
//!
//! The validator endpoints are unusual in one way: the service answers 200
//! even when the submitted YAML is broken, and reports problems in an
//! `errors` field of the body instead. A 200 with a non-empty `errors` list
//! is a definitive verdict about the YAML, not an auth problem, so it maps
//! to [`ApiError::ValidationFailed`](super::ApiError) and is never retried.

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use super::client::{decode_json, ApiRequest};
use super::common::ApiError;
use super::ScrewdriverClient;

/// Outcome of a template validation: the parsed template plus any errors
/// the service found.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateValidation {
    /// The parsed template config, as reported by the service.
    #[serde(default)]
    pub template: Value,

    /// Validation errors; empty when the template is valid.
    #[serde(default)]
    pub errors: Vec<TemplateError>,
}

/// One validation error inside a template.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateError {
    /// Human-readable description of the problem.
    #[serde(default)]
    pub message: String,

    /// Path to the offending field within the template.
    #[serde(default)]
    pub path: Vec<String>,

    /// Machine-readable error class.
    #[serde(rename = "type", default)]
    pub error_type: String,
}

/// Flattens a raw `errors` value into printable messages.
///
/// The service reports pipeline validation errors in more than one shape:
/// a plain string, an array of strings, or an array of structured objects
/// with a `message` field. All of them collapse to one message per error.
fn collect_error_messages(errors: &Value) -> Vec<String> {
    match errors {
        Value::Null => Vec::new(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(message) => message.clone(),
                Value::Object(fields) => fields
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| item.to_string()),
                other => other.to_string(),
            })
            .collect(),
        other => vec![other.to_string()],
    }
}

impl ScrewdriverClient {
    /// Validates a `screwdriver.yaml` pipeline definition.
    ///
    /// `POST /v4/validator`, expecting 200. Returns the parsed pipeline
    /// config on success; a 200 carrying a non-empty `errors` field becomes
    /// [`ApiError::ValidationFailed`].
    pub async fn validate_pipeline(&self, yaml: &str) -> Result<Value, ApiError> {
        let body = serde_json::json!({ "yaml": yaml });
        // The validator answers 200 even for a broken yaml, not 201.
        let request = ApiRequest::post("/v4/validator", body).expect(&[StatusCode::OK]);
        let response = self.send(&request).await?;
        let result: Value = decode_json(response).await?;

        if let Some(errors) = result.get("errors") {
            let messages = collect_error_messages(errors);
            if !messages.is_empty() {
                return Err(ApiError::ValidationFailed { messages });
            }
        }
        Ok(result)
    }

    /// Validates a template definition (`sd-template.yaml`).
    ///
    /// `POST /v4/validator/template`, expecting 200. Returns the structured
    /// validation result on success; a non-empty `errors` list becomes
    /// [`ApiError::ValidationFailed`] carrying one message per error.
    pub async fn validate_template(&self, yaml: &str) -> Result<TemplateValidation, ApiError> {
        let body = serde_json::json!({ "yaml": yaml });
        let request = ApiRequest::post("/v4/validator/template", body).expect(&[StatusCode::OK]);
        let response = self.send(&request).await?;
        let result: TemplateValidation = decode_json(response).await?;

        if !result.errors.is_empty() {
            let messages = result
                .errors
                .iter()
                .map(|error| error.message.clone())
                .collect();
            return Err(ApiError::ValidationFailed { messages });
        }
        Ok(result)
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
    async fn validate_pipeline_returns_the_parsed_config() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v4/validator")
            .match_body(mockito::Matcher::Json(
                serde_json::json!({"yaml": "jobs:\n  main:\n    image: node:18\n"}),
            ))
            .with_status(200)
            .with_body(r#"{"jobs": {"main": [{"image": "node:18"}]}}"#)
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server);
        let result = client
            .validate_pipeline("jobs:\n  main:\n    image: node:18\n")
            .await
            .unwrap();

        assert!(result.get("jobs").is_some());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn validate_pipeline_maps_200_with_errors_and_never_retries() {
        let mut server = mockito::Server::new_async().await;
        let validator = server
            .mock("POST", "/v4/validator")
            .with_status(200)
            .with_body(r#"{"errors": [{"message": "\"jobs\" is required"}]}"#)
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
        let err = client.validate_pipeline("oops: true\n").await.unwrap_err();

        assert!(err.is_validation_failure());
        assert_eq!(
            err.to_string(),
            "validation failed: \"jobs\" is required"
        );
        validator.assert_async().await;
        refresh.assert_async().await;
    }

    #[tokio::test]
    async fn validate_template_collects_every_error_message() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v4/validator/template")
            .with_status(200)
            .with_body(
                r#"{"template": {},
                    "errors": [
                      {"message": "\"name\" is required", "path": ["name"], "type": "any.required"},
                      {"message": "\"version\" is required", "path": ["version"], "type": "any.required"}
                    ]}"#,
            )
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.validate_template("config: {}\n").await.unwrap_err();

        match err {
            ApiError::ValidationFailed { messages } => {
                assert_eq!(
                    messages,
                    vec![
                        "\"name\" is required".to_string(),
                        "\"version\" is required".to_string(),
                    ]
                );
            }
            other => panic!("expected ValidationFailed, got {other:?}"),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn validate_template_passes_a_clean_result_through() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v4/validator/template")
            .with_status(200)
            .with_body(r#"{"template": {"name": "my/template", "version": "1.0.0"}, "errors": []}"#)
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server);
        let validation = client
            .validate_template("name: my/template\nversion: 1.0.0\n")
            .await
            .unwrap();

        assert!(validation.errors.is_empty());
        assert_eq!(
            validation.template.get("name").and_then(Value::as_str),
            Some("my/template")
        );
        mock.assert_async().await;
    }

    #[test]
    fn collect_error_messages_handles_mixed_shapes() {
        let errors = serde_json::json!([
            "plain string",
            {"message": "structured"},
            {"code": 7}
        ]);
        let messages = collect_error_messages(&errors);
        assert_eq!(messages[0], "plain string");
        assert_eq!(messages[1], "structured");
        assert_eq!(messages[2], r#"{"code":7}"#);

        assert!(collect_error_messages(&Value::Null).is_empty());
        assert!(collect_error_messages(&serde_json::json!([])).is_empty());
    }
}
