//! HTTP client for the approval backend.
//!
//! Thin request/response plumbing: wire DTOs come in, domain types go out.
//! Transport timeouts live here (on the `reqwest` client); retry policy does
//! not - callers inspect [`StoreError::is_retryable`] and decide.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::api::error::StoreError;
use crate::config::BackendConfig;
use crate::types::{
    DocumentWorkflow, PendingApproval, Principal, StepStatus, WorkflowStatus, WorkflowStep,
};

const USER_AGENT: &str = concat!("docflow/", env!("CARGO_PKG_VERSION"));

/// Approval backend API client
pub struct ApprovalApi {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

// Response types for API deserialization
#[derive(Debug, Deserialize)]
struct WorkflowResponse {
    id: String,
    document_id: String,
    current_step: u32,
    status: WorkflowStatus,
    steps: Vec<StepResponse>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct StepResponse {
    id: String,
    order: u32,
    status: StepStatus,
    assigned_to: String,
    assigned_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    comments: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PendingApprovalResponse {
    document_id: String,
    step_id: String,
}

#[derive(Debug, Serialize)]
struct ActionBody<'a> {
    comments: &'a str,
}

impl From<WorkflowResponse> for DocumentWorkflow {
    fn from(response: WorkflowResponse) -> Self {
        let mut steps: Vec<WorkflowStep> = response
            .steps
            .into_iter()
            .map(|s| WorkflowStep {
                id: s.id,
                order: s.order,
                status: s.status,
                assigned_to: s.assigned_to,
                assigned_at: s.assigned_at,
                completed_at: s.completed_at,
                comments: s.comments,
            })
            .collect();
        // Steps are strictly ordered by `order`; enforce it on ingest
        steps.sort_by_key(|s| s.order);

        DocumentWorkflow {
            id: response.id,
            document_id: response.document_id,
            current_step: response.current_step,
            status: response.status,
            steps,
            created_at: response.created_at,
            updated_at: response.updated_at,
        }
    }
}

impl ApprovalApi {
    /// Create a client from backend configuration
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            client,
        })
    }

    /// Create a client from the DOCFLOW_BACKEND_URL environment variable.
    /// Returns `None` when the variable is unset or empty.
    pub fn from_env() -> Result<Option<Self>> {
        match env::var("DOCFLOW_BACKEND_URL") {
            Ok(url) if !url.is_empty() => {
                let config = BackendConfig {
                    base_url: url,
                    token: env::var("DOCFLOW_BACKEND_TOKEN").ok().filter(|t| !t.is_empty()),
                    ..BackendConfig::default()
                };
                Ok(Some(Self::new(&config)?))
            }
            _ => Ok(None),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Map a non-success response into the error taxonomy
    async fn fail(
        response: reqwest::Response,
        document_id: &str,
        step_id: Option<&str>,
    ) -> StoreError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        match status {
            reqwest::StatusCode::NOT_FOUND => StoreError::not_found(document_id),
            reqwest::StatusCode::CONFLICT | reqwest::StatusCode::UNPROCESSABLE_ENTITY => {
                let message = if body.is_empty() {
                    "step is not awaiting action".to_string()
                } else {
                    body
                };
                StoreError::invalid_step(step_id.unwrap_or("unknown"), message)
            }
            s => StoreError::backend(s.as_u16(), body),
        }
    }

    /// Fetch the approval chain for a document
    pub async fn get_workflow(&self, document_id: &str) -> Result<DocumentWorkflow, StoreError> {
        let url = self.url(&format!("/documents/{document_id}/workflow"));

        let response = self
            .request(self.client.get(&url))
            .send()
            .await
            .map_err(StoreError::from)?;

        if !response.status().is_success() {
            return Err(Self::fail(response, document_id, None).await);
        }

        let workflow: WorkflowResponse = response.json().await.map_err(StoreError::from)?;
        Ok(workflow.into())
    }

    /// Record an approval on a step
    pub async fn post_approve(
        &self,
        document_id: &str,
        step_id: &str,
        comments: &str,
    ) -> Result<(), StoreError> {
        let url = self.url(&format!(
            "/documents/{document_id}/workflow/steps/{step_id}/approve"
        ));
        self.post_action(&url, document_id, Some(step_id), comments)
            .await
    }

    /// Record a rejection on a step; comments become the rejection reason
    pub async fn post_reject(
        &self,
        document_id: &str,
        step_id: &str,
        comments: &str,
    ) -> Result<(), StoreError> {
        let url = self.url(&format!(
            "/documents/{document_id}/workflow/steps/{step_id}/reject"
        ));
        self.post_action(&url, document_id, Some(step_id), comments)
            .await
    }

    /// Reset the chain to its first approval step
    pub async fn post_request_changes(
        &self,
        document_id: &str,
        comments: &str,
    ) -> Result<(), StoreError> {
        let url = self.url(&format!("/documents/{document_id}/workflow/request-changes"));
        self.post_action(&url, document_id, None, comments).await
    }

    async fn post_action(
        &self,
        url: &str,
        document_id: &str,
        step_id: Option<&str>,
        comments: &str,
    ) -> Result<(), StoreError> {
        let response = self
            .request(self.client.post(url))
            .json(&ActionBody { comments })
            .send()
            .await
            .map_err(StoreError::from)?;

        if !response.status().is_success() {
            return Err(Self::fail(response, document_id, step_id).await);
        }
        Ok(())
    }

    /// List the backend's pending assignments for a principal
    pub async fn get_pending_approvals(
        &self,
        principal: &Principal,
    ) -> Result<Vec<PendingApproval>, StoreError> {
        let url = self.url("/approvals/pending");

        let response = self
            .request(self.client.get(&url))
            .query(&[("principal", principal.name.as_str())])
            .send()
            .await
            .map_err(StoreError::from)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::backend(status.as_u16(), body));
        }

        let pending: Vec<PendingApprovalResponse> =
            response.json().await.map_err(StoreError::from)?;

        Ok(pending
            .into_iter()
            .map(|p| PendingApproval {
                document_id: p.document_id,
                step_id: p.step_id,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_api() -> ApprovalApi {
        ApprovalApi::new(&BackendConfig {
            base_url: "http://qms.local/api/".to_string(),
            token: None,
            request_timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_url_trims_trailing_slash() {
        let api = test_api();
        assert_eq!(
            api.url("/documents/doc-1/workflow"),
            "http://qms.local/api/documents/doc-1/workflow"
        );
    }

    #[test]
    fn test_workflow_response_mapping() {
        let json = r#"{
            "id": "wf-9",
            "document_id": "doc-9",
            "current_step": 3,
            "status": "under_review",
            "steps": [
                {"id": "s2", "order": 2, "status": "in_progress", "assigned_to": "bob",
                 "assigned_at": "2026-03-01T09:00:00Z", "completed_at": null, "comments": null},
                {"id": "s0", "order": 0, "status": "completed", "assigned_to": "alice",
                 "assigned_at": null, "completed_at": "2026-02-27T10:00:00Z", "comments": null},
                {"id": "s1", "order": 1, "status": "completed", "assigned_to": "carol",
                 "assigned_at": null, "completed_at": "2026-02-28T10:00:00Z", "comments": "ok"}
            ],
            "created_at": "2026-02-27T10:00:00Z",
            "updated_at": "2026-03-01T09:00:00Z"
        }"#;

        let response: WorkflowResponse = serde_json::from_str(json).unwrap();
        let workflow: DocumentWorkflow = response.into();

        assert_eq!(workflow.document_id, "doc-9");
        assert_eq!(workflow.status, WorkflowStatus::UnderReview);
        // Out-of-order response steps are sorted on ingest
        let orders: Vec<u32> = workflow.steps.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
        assert_eq!(workflow.current_step_entry().unwrap().id, "s2");
    }

    #[test]
    fn test_pending_approval_mapping() {
        let json = r#"[{"document_id": "doc-7", "step_id": "s3"}]"#;
        let pending: Vec<PendingApprovalResponse> = serde_json::from_str(json).unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].step_id, "s3");
    }

    #[test]
    fn test_from_env_unset() {
        // Only assert the unset path; setting env vars races other tests
        if env::var("DOCFLOW_BACKEND_URL").is_err() {
            assert!(ApprovalApi::from_env().unwrap().is_none());
        }
    }
}
