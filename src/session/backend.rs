use super::artifact::AudioArtifact;
use crate::http::TranscriptionResponse;
use anyhow::{bail, Context, Result};
use serde_json::Value;

/// Seam between the chat session controller and the chat proxy.
#[async_trait::async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send one user message; returns the raw JSON reply from the service.
    async fn send_message(&self, message: &str) -> Result<Value>;
}

/// Seam between the recorder and the transcription proxy.
#[async_trait::async_trait]
pub trait TranscriptionBackend: Send + Sync {
    /// Transcribe a finished recording; returns the transcript text.
    async fn transcribe(&self, artifact: &AudioArtifact) -> Result<String>;
}

/// HTTP client for the proxy layer's own endpoints, the way the browser
/// client called them.
pub struct ProxyClient {
    http: reqwest::Client,
    base_url: String,
}

impl ProxyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait::async_trait]
impl ChatBackend for ProxyClient {
    async fn send_message(&self, message: &str) -> Result<Value> {
        // Conversation history and modality hints are deliberately not sent;
        // the assistant service only consumes the message text today.
        let response = self
            .http
            .post(format!("{}/api/chat", self.base_url))
            .json(&serde_json::json!({ "message": message }))
            .send()
            .await
            .context("Failed to reach chat API")?;

        if !response.status().is_success() {
            bail!("API returned {}", response.status());
        }

        response.json().await.context("Failed to decode chat reply")
    }
}

#[async_trait::async_trait]
impl TranscriptionBackend for ProxyClient {
    async fn transcribe(&self, artifact: &AudioArtifact) -> Result<String> {
        let part = reqwest::multipart::Part::bytes(artifact.bytes.to_vec())
            .file_name("recording.mp3")
            .mime_str(&artifact.content_type)
            .context("Invalid artifact content type")?;
        let form = reqwest::multipart::Form::new().part("audio", part);

        let response = self
            .http
            .post(format!("{}/api/audio/transcribe", self.base_url))
            .multipart(form)
            .send()
            .await
            .context("Failed to reach transcription API")?;

        if !response.status().is_success() {
            bail!("Transcription failed: {}", response.status());
        }

        let body: TranscriptionResponse = response
            .json()
            .await
            .context("Failed to decode transcription reply")?;

        Ok(body.text)
    }
}
