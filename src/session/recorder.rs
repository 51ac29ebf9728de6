use super::artifact::{AudioArtifact, ObjectUrls};
use super::backend::TranscriptionBackend;
use crate::capture::AudioCapture;
use anyhow::{Context, Result};
use bytes::Bytes;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Transcript text stored when the transcription call fails or returns
/// nothing usable.
pub const FAILED_TRANSCRIPT: &str = "Failed to transcribe audio";

/// Recorder lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderState {
    /// No capture in progress and no artifact held
    Idle,
    /// Microphone capture in progress
    Recording,
    /// Capture finished; artifact held, not yet transcribed
    Stopped,
    /// Transcription request in flight
    Transcribing,
    /// Artifact held together with its transcript
    Transcribed,
}

/// Transcript with an optional in-progress edit buffer
#[derive(Debug, Clone)]
struct Transcript {
    text: String,
    edit: Option<String>,
}

/// The audio recording state machine.
///
/// Manages one capture at a time: starting a new recording or deleting the
/// current one discards the held artifact, revokes its object URL, and
/// clears the transcript, so the transcript always corresponds to the
/// artifact in hand.
pub struct Recorder {
    state: RecorderState,
    backend: Option<Box<dyn AudioCapture>>,
    chunk_rx: Option<mpsc::Receiver<Bytes>>,
    artifact: Option<AudioArtifact>,
    transcript: Option<Transcript>,
    urls: ObjectUrls,

    /// Seconds elapsed in the current recording, ticked once per second
    elapsed: Arc<AtomicU64>,
    timer: Option<JoinHandle<()>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self {
            state: RecorderState::Idle,
            backend: None,
            chunk_rx: None,
            artifact: None,
            transcript: None,
            urls: ObjectUrls::new(),
            elapsed: Arc::new(AtomicU64::new(0)),
            timer: None,
        }
    }

    pub fn state(&self) -> RecorderState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        self.state == RecorderState::Recording
    }

    pub fn artifact(&self) -> Option<&AudioArtifact> {
        self.artifact.as_ref()
    }

    pub fn object_urls(&self) -> &ObjectUrls {
        &self.urls
    }

    /// Start a new recording, discarding any previous artifact and
    /// transcript first.
    ///
    /// On capture acquisition failure the recorder stays in `Idle` and the
    /// error is returned for the caller to surface.
    pub async fn start(&mut self, mut backend: Box<dyn AudioCapture>) -> Result<()> {
        if self.state == RecorderState::Recording {
            warn!("Recording already in progress");
            return Ok(());
        }

        self.discard_artifact();
        self.state = RecorderState::Idle;

        let chunk_rx = backend
            .start()
            .await
            .context("Failed to start audio capture")?;

        info!("Recording started ({})", backend.name());

        self.backend = Some(backend);
        self.chunk_rx = Some(chunk_rx);
        self.state = RecorderState::Recording;

        // Elapsed-time counter, ticking once per second until stopped
        self.elapsed.store(0, Ordering::SeqCst);
        let elapsed = Arc::clone(&self.elapsed);
        self.timer = Some(tokio::spawn(async move {
            let mut tick = tokio::time::interval(Duration::from_secs(1));
            tick.tick().await; // first tick fires immediately
            loop {
                tick.tick().await;
                elapsed.fetch_add(1, Ordering::SeqCst);
            }
        }));

        Ok(())
    }

    /// Stop the current recording and finalize the captured chunks into one
    /// artifact with a fresh object URL. No-op unless recording.
    pub async fn stop(&mut self) -> Result<()> {
        if self.state != RecorderState::Recording {
            warn!("Stop requested but no recording in progress");
            return Ok(());
        }

        self.stop_timer();

        let mut backend = match self.backend.take() {
            Some(b) => b,
            None => {
                // Recording without a backend is a bug; recover to Idle.
                warn!("Recording state without a capture backend");
                self.state = RecorderState::Idle;
                return Ok(());
            }
        };

        backend.stop().await.context("Failed to stop audio capture")?;

        // Drain the remaining chunks; the backend closes the channel after
        // flushing its final buffer.
        let mut data = Vec::new();
        if let Some(mut rx) = self.chunk_rx.take() {
            while let Some(chunk) = rx.recv().await {
                data.extend_from_slice(&chunk);
            }
        }

        let url = self.urls.create();
        info!("Recording stopped: {} bytes captured as {}", data.len(), url);

        self.artifact = Some(AudioArtifact {
            bytes: Bytes::from(data),
            content_type: backend.mime_type().to_string(),
            url,
        });
        self.state = RecorderState::Stopped;

        Ok(())
    }

    /// Transcribe the held artifact.
    ///
    /// Both outcomes leave the recorder in `Transcribed`: a failed or empty
    /// transcription stores [`FAILED_TRANSCRIPT`] instead of erroring out.
    pub async fn transcribe(&mut self, backend: &dyn TranscriptionBackend) {
        let Some(artifact) = self.artifact.clone() else {
            warn!("Transcribe requested without a recording");
            return;
        };

        self.state = RecorderState::Transcribing;
        self.transcript = None;

        let text = match backend.transcribe(&artifact).await {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => {
                warn!("Transcription returned empty text");
                FAILED_TRANSCRIPT.to_string()
            }
            Err(e) => {
                warn!("Transcription failed: {:#}", e);
                FAILED_TRANSCRIPT.to_string()
            }
        };

        self.transcript = Some(Transcript { text, edit: None });
        self.state = RecorderState::Transcribed;
    }

    /// Delete the held recording, revoking its object URL and clearing the
    /// transcript. No-op while recording.
    pub fn delete(&mut self) {
        if self.state == RecorderState::Recording {
            warn!("Delete requested while recording");
            return;
        }

        self.discard_artifact();
        self.state = RecorderState::Idle;
    }

    /// Committed transcript text, if any
    pub fn transcript_text(&self) -> Option<&str> {
        self.transcript.as_ref().map(|t| t.text.as_str())
    }

    /// Transcript text for injection into the chat input ("Use This Text")
    pub fn use_text(&self) -> Option<&str> {
        self.transcript_text()
    }

    pub fn is_editing(&self) -> bool {
        self.transcript
            .as_ref()
            .map(|t| t.edit.is_some())
            .unwrap_or(false)
    }

    pub fn edit_buffer(&self) -> Option<&str> {
        self.transcript
            .as_ref()
            .and_then(|t| t.edit.as_deref())
    }

    /// Copy the transcript into a scratch buffer for editing
    pub fn begin_edit(&mut self) {
        if let Some(t) = self.transcript.as_mut() {
            t.edit = Some(t.text.clone());
        }
    }

    pub fn set_edit_buffer(&mut self, text: impl Into<String>) {
        if let Some(t) = self.transcript.as_mut() {
            if t.edit.is_some() {
                t.edit = Some(text.into());
            }
        }
    }

    /// Commit the scratch buffer as the new transcript text
    pub fn save_edit(&mut self) {
        if let Some(t) = self.transcript.as_mut() {
            if let Some(edited) = t.edit.take() {
                t.text = edited;
            }
        }
    }

    /// Discard the scratch buffer, keeping the previous transcript text
    pub fn cancel_edit(&mut self) {
        if let Some(t) = self.transcript.as_mut() {
            t.edit = None;
        }
    }

    /// Seconds elapsed in the current recording
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed.load(Ordering::SeqCst)
    }

    /// Elapsed time formatted as MM:SS for display
    pub fn format_elapsed(&self) -> String {
        let secs = self.elapsed_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    fn discard_artifact(&mut self) {
        if let Some(artifact) = self.artifact.take() {
            info!("Discarding recording {}", artifact.url);
            self.urls.revoke(&artifact.url);
        }
        self.transcript = None;
        self.chunk_rx = None;
        self.backend = None;
    }

    fn stop_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Recorder {
    fn drop(&mut self) {
        self.stop_timer();
    }
}
