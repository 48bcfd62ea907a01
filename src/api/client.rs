//! HTTP client for the platform REST API.
//!
//! All calls are credentialed (cookie session) JSON requests. Non-success
//! responses are turned into [`ApiError::Backend`] with the best message
//! the error body yields; the caller decides how to surface it. Requests
//! are not cancellable once issued; a caller navigating away simply drops
//! the join handle and the request runs to completion.

use std::time::Duration;

use reqwest::Response;

use super::error::{extract_error_message, ApiError};
use super::types::{
    CompanyRequest, CreatedExperience, ExperienceSubmission, ExperienceSummary, PendingCompany,
    ReportRequest, VoteDirection, VoteRequest,
};

#[derive(Clone)]
pub struct PlatformClient {
    http: reqwest::Client,
    base_url: String,
}

impl PlatformClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Map a non-success response to a backend error with an extracted
    /// message.
    async fn check(response: Response) -> Result<Response, ApiError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Backend(extract_error_message(&body)))
    }

    /// `GET /api/experiences`
    pub async fn list_experiences(&self) -> Result<Vec<ExperienceSummary>, ApiError> {
        let response = self.http.get(self.url("/api/experiences")).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// `POST /api/experiences`
    pub async fn create_experience(
        &self,
        submission: &ExperienceSubmission,
    ) -> Result<CreatedExperience, ApiError> {
        let response = self
            .http
            .post(self.url("/api/experiences"))
            .json(submission)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// `PUT /api/experiences/:id`
    pub async fn update_experience(
        &self,
        id: &str,
        submission: &ExperienceSubmission,
    ) -> Result<(), ApiError> {
        let response = self
            .http
            .put(self.url(&format!("/api/experiences/{id}")))
            .json(submission)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// `POST /api/companies`: register a pending company.
    pub async fn create_company(&self, name: &str) -> Result<PendingCompany, ApiError> {
        let response = self
            .http
            .post(self.url("/api/companies"))
            .json(&CompanyRequest {
                name: name.to_string(),
            })
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// `POST /api/experiences/:id/vote`
    pub async fn vote(&self, id: &str, direction: VoteDirection) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url(&format!("/api/experiences/{id}/vote")))
            .json(&VoteRequest { direction })
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// `POST /api/experiences/:id/bookmark`
    pub async fn bookmark(&self, id: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url(&format!("/api/experiences/{id}/bookmark")))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// `GET /api/experiences/:id/download`: rendered write-up bytes.
    pub async fn download(&self, id: &str) -> Result<Vec<u8>, ApiError> {
        let response = self
            .http
            .get(self.url(&format!("/api/experiences/{id}/download")))
            .send()
            .await?;
        Ok(Self::check(response).await?.bytes().await?.to_vec())
    }

    /// `POST /api/experiences/:id/report`
    pub async fn report(&self, id: &str, reason: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url(&format!("/api/experiences/{id}/report")))
            .json(&ReportRequest {
                reason: reason.to_string(),
            })
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}
