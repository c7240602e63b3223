use std::time::Duration;

use bytes::Bytes;
use karaoke_logging::{karaoke_debug, karaoke_info, karaoke_warn};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use url::Url;

use crate::types::map_reqwest_error;
use crate::{AudioUpload, FailureKind, JobOutput, RequestError, UPLOAD_FIELD};

#[derive(Debug, Clone)]
pub struct SubmitSettings {
    pub endpoint: Url,
    pub field_name: String,
    pub connect_timeout: Duration,
    /// Processing can take minutes; `None` leaves the wait to the transport.
    pub request_timeout: Option<Duration>,
}

impl SubmitSettings {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            field_name: UPLOAD_FIELD.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }

    /// Endpoint at `process_path` under `origin`, keeping any path prefix on the origin.
    pub fn for_origin(origin: &Url, process_path: &str) -> Result<Self, url::ParseError> {
        let base = origin.as_str().trim_end_matches('/');
        let path = process_path.trim_start_matches('/');
        Ok(Self::new(Url::parse(&format!("{base}/{path}"))?))
    }
}

/// String field of a JSON object body. Other fields may hold anything.
fn string_field(body: Option<&Value>, key: &str) -> Option<String> {
    body?.get(key)?.as_str().map(str::to_owned)
}

#[async_trait::async_trait]
pub trait JobSubmitter: Send + Sync {
    async fn submit(&self, upload: AudioUpload) -> Result<JobOutput, RequestError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestSubmitter {
    settings: SubmitSettings,
}

impl ReqwestSubmitter {
    pub fn new(settings: SubmitSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, RequestError> {
        let mut builder = reqwest::Client::builder().connect_timeout(self.settings.connect_timeout);
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| RequestError::new(FailureKind::Network, err.to_string()))
    }

    fn build_form(&self, upload: AudioUpload) -> Result<Form, RequestError> {
        let len = upload.bytes.len() as u64;
        let body = reqwest::Body::from(Bytes::from_owner(upload.bytes));
        let part = Part::stream_with_length(body, len)
            .file_name(upload.file_name)
            .mime_str(&upload.media_type)
            .map_err(|err| RequestError::new(FailureKind::InvalidRequest, err.to_string()))?;
        Ok(Form::new().part(self.settings.field_name.clone(), part))
    }
}

#[async_trait::async_trait]
impl JobSubmitter for ReqwestSubmitter {
    async fn submit(&self, upload: AudioUpload) -> Result<JobOutput, RequestError> {
        let client = self.build_client()?;
        karaoke_info!(
            "Submitting {} ({}, {} bytes) to {}",
            upload.file_name,
            upload.media_type,
            upload.bytes.len(),
            self.settings.endpoint
        );
        let form = self.build_form(upload)?;

        let response = client
            .post(self.settings.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        let parsed = serde_json::from_slice::<Value>(&body);
        karaoke_debug!("Processing endpoint answered {} ({} bytes)", status, body.len());

        if !status.is_success() {
            let server_message = string_field(parsed.as_ref().ok(), "error");
            karaoke_warn!("Job rejected with {}: {:?}", status, server_message);
            return Err(
                RequestError::new(FailureKind::HttpStatus(status.as_u16()), status.to_string())
                    .with_server_message(server_message),
            );
        }

        let parsed = parsed.map_err(|err| {
            RequestError::new(FailureKind::MalformedResponse, err.to_string())
        })?;
        if let Some(message) = string_field(Some(&parsed), "message") {
            karaoke_info!("Processing endpoint says: {}", message);
        }
        match string_field(Some(&parsed), "video_url") {
            Some(video_url) if !video_url.is_empty() => Ok(JobOutput { video_url }),
            _ => Err(RequestError::new(
                FailureKind::MalformedResponse,
                "response has no video_url",
            )
            .with_server_message(string_field(Some(&parsed), "error"))),
        }
    }
}
