use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::core::config::ClientConfig;
use crate::features::reports::dtos::{PhotoUpload, ReportResponseDto, UpdateReportDto};
use crate::shared::types::ApiResponse;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error: HTTP {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ClientError::Api { status, .. } if *status == StatusCode::NOT_FOUND.as_u16()
        )
    }

    pub fn is_rejected(&self) -> bool {
        matches!(
            self,
            ClientError::Api { status, .. } if *status == StatusCode::BAD_REQUEST.as_u16()
        )
    }
}

/// A report as submitted from the client form
#[derive(Debug, Clone, Default)]
pub struct NewReport {
    pub title: String,
    pub category: String,
    pub priority: String,
    pub location: String,
    pub description: String,
    pub user_id: Option<String>,
    pub photo: Option<PhotoUpload>,
}

/// Request/response boundary between the view projector and the report store
#[async_trait]
pub trait ReportsApi: Send + Sync {
    async fn list_reports(&self) -> Result<Vec<ReportResponseDto>, ClientError>;

    async fn create_report(&self, report: &NewReport) -> Result<ReportResponseDto, ClientError>;

    async fn update_report(
        &self,
        id: i64,
        changes: &UpdateReportDto,
    ) -> Result<ReportResponseDto, ClientError>;
}

/// HTTP implementation of [`ReportsApi`]
pub struct HttpReportsClient {
    http_client: reqwest::Client,
    api_base: String,
}

impl HttpReportsClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http_client,
            api_base: config.api_base.clone(),
        })
    }

    fn reports_url(&self) -> String {
        format!("{}/reports", self.api_base)
    }

    fn build_form(report: &NewReport) -> Result<Form, ClientError> {
        let mut form = Form::new()
            .text("title", report.title.clone())
            .text("category", report.category.clone())
            .text("priority", report.priority.clone())
            .text("location", report.location.clone())
            .text("description", report.description.clone());

        if let Some(user_id) = &report.user_id {
            form = form.text("user_id", user_id.clone());
        }

        if let Some(photo) = &report.photo {
            let part = Part::bytes(photo.data.clone())
                .file_name(photo.filename.clone())
                .mime_str(&photo.content_type)?;
            form = form.part("photo", part);
        }

        Ok(form)
    }
}

/// Unwrap the response envelope, turning non-success statuses into `ClientError::Api`
async fn read_envelope<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(&body)
            .ok()
            .and_then(|envelope| envelope.message)
            .unwrap_or(body);
        tracing::warn!("Report API error: HTTP {} - {}", status, message);
        return Err(ClientError::Api {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str::<ApiResponse<T>>(&body)
        .map_err(|e| ClientError::Decode(e.to_string()))?
        .data
        .ok_or_else(|| ClientError::Decode("response has no data".to_string()))
}

#[async_trait]
impl ReportsApi for HttpReportsClient {
    async fn list_reports(&self) -> Result<Vec<ReportResponseDto>, ClientError> {
        let response = self.http_client.get(self.reports_url()).send().await?;
        read_envelope(response).await
    }

    async fn create_report(&self, report: &NewReport) -> Result<ReportResponseDto, ClientError> {
        let response = self
            .http_client
            .post(self.reports_url())
            .multipart(Self::build_form(report)?)
            .send()
            .await?;
        read_envelope(response).await
    }

    async fn update_report(
        &self,
        id: i64,
        changes: &UpdateReportDto,
    ) -> Result<ReportResponseDto, ClientError> {
        let response = self
            .http_client
            .put(format!("{}/{}", self.reports_url(), id))
            .json(changes)
            .send()
            .await?;
        read_envelope(response).await
    }
}
