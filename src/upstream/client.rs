use crate::config::UpstreamConfig;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info};

/// Transcript shape returned by the speech-to-text service
#[derive(Debug, Deserialize)]
struct UpstreamTranscript {
    text: String,
}

/// HTTP client for the two remote services behind the proxy layer.
///
/// Both calls are single-shot: no retries, no timeout beyond the client
/// default, no validation of the payloads.
pub struct UpstreamClient {
    http: reqwest::Client,
    chat_url: String,
    transcribe_url: String,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            chat_url: config.chat_url.clone(),
            transcribe_url: config.transcribe_url.clone(),
        }
    }

    /// Forward a chat payload verbatim and return the remote JSON body.
    pub async fn send_chat(&self, body: &Value) -> Result<Value> {
        info!("Sending chat request to {}", self.chat_url);

        let response = self
            .http
            .post(&self.chat_url)
            .json(body)
            .send()
            .await
            .context("Failed to reach chat service")?;

        let status = response.status();
        info!("Chat service responded with status {}", status);

        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            error!("Chat service error ({}): {}", status, detail);
            bail!("chat service returned {}", status);
        }

        response
            .json()
            .await
            .context("Failed to decode chat service response")
    }

    /// Re-encode captured audio as a multipart upload under the `file` field
    /// and return the transcribed text.
    pub async fn transcribe(&self, audio: Vec<u8>, content_type: &str) -> Result<String> {
        info!(
            "Sending {} bytes ({}) to {}",
            audio.len(),
            content_type,
            self.transcribe_url
        );

        let part = reqwest::multipart::Part::bytes(audio)
            .file_name("audio.mp3")
            .mime_str(content_type)
            .context("Invalid audio content type")?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(&self.transcribe_url)
            .multipart(form)
            .send()
            .await
            .context("Failed to reach transcription service")?;

        let status = response.status();
        info!("Transcription service responded with status {}", status);

        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            error!("Transcription service error ({}): {}", status, detail);
            bail!("transcription service returned {}", status);
        }

        let transcript: UpstreamTranscript = response
            .json()
            .await
            .context("Failed to decode transcription service response")?;

        Ok(transcript.text)
    }
}
