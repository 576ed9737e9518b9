// src/api/client.rs
use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use super::error::{parse_detail, ApiError};
use super::types::{
    Job, JobRecord, LoginRequest, LoginResponse, PredictForm, PredictResponse, RegisterRequest,
};
use crate::config::EnvironmentConfig;

/// HTTP client for the HR API. Every authenticated call carries a bearer
/// token; only `login` and `register` go out without one.
pub struct HrApiClient {
    http: Client,
    base_url: Url,
}

impl HrApiClient {
    pub fn new(config: &EnvironmentConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = Url::parse(&config.api_url)
            .with_context(|| format!("Invalid API URL: {}", config.api_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("API URL cannot serve as a base: {}", config.api_url);
        }

        Ok(Self { http, base_url })
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        info!("Logging in as {}", username);
        let response = self
            .http
            .post(self.endpoint(&["login"]))
            .json(&LoginRequest { username, password })
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), ApiError> {
        info!("Registering account {}", username);
        let response = self
            .http
            .post(self.endpoint(&["register"]))
            .json(&RegisterRequest {
                username,
                email,
                password,
            })
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    pub async fn skills(&self, token: &str) -> Result<Vec<String>, ApiError> {
        debug!("Fetching skill list");
        let response = self
            .authorized(self.http.get(self.endpoint(&["skills"])), token)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn jobs(&self, token: &str) -> Result<Vec<Job>, ApiError> {
        debug!("Fetching job list");
        let response = self
            .authorized(self.http.get(self.endpoint(&["debug", "jobs"])), token)
            .send()
            .await?;
        let records: Vec<JobRecord> = Self::check(response).await?.json().await?;
        Ok(records.into_iter().map(JobRecord::normalize).collect())
    }

    pub async fn jobs_by_skill(&self, token: &str, skill: &str) -> Result<Vec<Job>, ApiError> {
        debug!("Fetching jobs for skill {:?}", skill);
        let response = self
            .authorized(
                self.http.get(self.endpoint(&["jobs_by_skill", skill])),
                token,
            )
            .send()
            .await?;
        let records: Vec<JobRecord> = Self::check(response).await?.json().await?;
        Ok(records.into_iter().map(JobRecord::normalize).collect())
    }

    pub async fn predict(&self, token: &str, form: &PredictForm) -> Result<f64, ApiError> {
        info!("Requesting salary prediction");
        let response = self
            .authorized(self.http.post(self.endpoint(&["predict"])), token)
            .json(form)
            .send()
            .await?;
        let body: PredictResponse = Self::check(response).await?.json().await?;
        Ok(body.salary)
    }

    fn authorized(&self, request: RequestBuilder, token: &str) -> RequestBuilder {
        request.bearer_auth(token)
    }

    /// Build an endpoint URL from path segments, escaping each one. The base
    /// URL was validated in `new`, so appending segments cannot fail.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Split non-2xx responses into the rejection error class, carrying
    /// whatever `detail` the body offers.
    async fn check(response: Response) -> Result<Response, ApiError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);
        debug!("API rejected request: {} {}", status, body);
        Err(ApiError::Rejected {
            status,
            detail: parse_detail(&body),
        })
    }
}
