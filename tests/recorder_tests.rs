// Unit tests for the recording state machine
//
// Capture and transcription backends are replaced with in-memory fakes so
// every state transition can be driven deterministically.

use anyhow::Result;
use bytes::Bytes;
use storysketch::session::{AudioArtifact, TranscriptionBackend, FAILED_TRANSCRIPT};
use storysketch::{AudioCapture, Recorder, RecorderState, ScriptedCapture};
use tokio::sync::mpsc;

struct FixedStt(&'static str);

#[async_trait::async_trait]
impl TranscriptionBackend for FixedStt {
    async fn transcribe(&self, _artifact: &AudioArtifact) -> Result<String> {
        Ok(self.0.to_string())
    }
}

struct FailingStt;

#[async_trait::async_trait]
impl TranscriptionBackend for FailingStt {
    async fn transcribe(&self, _artifact: &AudioArtifact) -> Result<String> {
        anyhow::bail!("connection refused")
    }
}

/// Capture backend whose acquisition always fails (denied microphone).
struct FailingCapture;

#[async_trait::async_trait]
impl AudioCapture for FailingCapture {
    async fn start(&mut self) -> Result<mpsc::Receiver<Bytes>> {
        anyhow::bail!("microphone unavailable")
    }

    async fn stop(&mut self) -> Result<()> {
        Ok(())
    }

    fn is_capturing(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "failing"
    }

    fn mime_type(&self) -> &str {
        "audio/mpeg"
    }
}

fn scripted(chunks: &[&'static [u8]]) -> Box<ScriptedCapture> {
    Box::new(ScriptedCapture::new(
        chunks.iter().map(|c| Bytes::from_static(c)).collect(),
    ))
}

#[tokio::test]
async fn test_record_concatenates_chunks_into_artifact() {
    let mut recorder = Recorder::new();
    recorder.start(scripted(&[b"abc", b"def", b"g"])).await.unwrap();
    assert_eq!(recorder.state(), RecorderState::Recording);
    assert!(recorder.is_recording());

    recorder.stop().await.unwrap();
    assert_eq!(recorder.state(), RecorderState::Stopped);

    let artifact = recorder.artifact().expect("artifact should exist");
    assert_eq!(&artifact.bytes[..], b"abcdefg");
    assert_eq!(artifact.content_type, "audio/mpeg");
    assert!(artifact.url.starts_with("blob:"));
    assert!(recorder.object_urls().is_live(&artifact.url));
}

#[tokio::test]
async fn test_artifact_uses_backend_mime_type() {
    let mut recorder = Recorder::new();
    let capture = ScriptedCapture::with_mime_type(vec![Bytes::from_static(b"wav")], "audio/wav");
    recorder.start(Box::new(capture)).await.unwrap();
    recorder.stop().await.unwrap();

    assert_eq!(recorder.artifact().unwrap().content_type, "audio/wav");
}

#[tokio::test]
async fn test_stop_while_idle_is_noop() {
    let mut recorder = Recorder::new();
    recorder.stop().await.unwrap();

    assert_eq!(recorder.state(), RecorderState::Idle);
    assert!(recorder.artifact().is_none());
}

#[tokio::test]
async fn test_capture_failure_leaves_recorder_idle() {
    let mut recorder = Recorder::new();
    let result = recorder.start(Box::new(FailingCapture)).await;

    assert!(result.is_err());
    assert_eq!(recorder.state(), RecorderState::Idle);
    assert!(recorder.artifact().is_none());
}

#[tokio::test]
async fn test_delete_clears_artifact_and_transcript() {
    let mut recorder = Recorder::new();
    recorder.start(scripted(&[b"audio"])).await.unwrap();
    recorder.stop().await.unwrap();
    recorder.transcribe(&FixedStt("hello world")).await;

    let url = recorder.artifact().unwrap().url.clone();
    assert_eq!(recorder.transcript_text(), Some("hello world"));

    recorder.delete();

    assert_eq!(recorder.state(), RecorderState::Idle);
    assert!(recorder.artifact().is_none());
    assert!(recorder.transcript_text().is_none());
    assert!(!recorder.object_urls().is_live(&url));
    assert!(recorder.object_urls().is_empty());
}

#[tokio::test]
async fn test_new_recording_discards_previous_artifact() {
    let mut recorder = Recorder::new();
    recorder.start(scripted(&[b"first"])).await.unwrap();
    recorder.stop().await.unwrap();
    recorder.transcribe(&FixedStt("first take")).await;
    let old_url = recorder.artifact().unwrap().url.clone();

    recorder.start(scripted(&[b"second"])).await.unwrap();

    // Old reference released and transcript cleared before the new capture
    assert!(!recorder.object_urls().is_live(&old_url));
    assert!(recorder.artifact().is_none());
    assert!(recorder.transcript_text().is_none());

    recorder.stop().await.unwrap();
    let artifact = recorder.artifact().unwrap();
    assert_eq!(&artifact.bytes[..], b"second");
    assert_eq!(recorder.object_urls().len(), 1);
}

#[tokio::test]
async fn test_transcribe_success() {
    let mut recorder = Recorder::new();
    recorder.start(scripted(&[b"audio"])).await.unwrap();
    recorder.stop().await.unwrap();

    recorder.transcribe(&FixedStt("once upon a time")).await;

    assert_eq!(recorder.state(), RecorderState::Transcribed);
    assert_eq!(recorder.transcript_text(), Some("once upon a time"));
    assert_eq!(recorder.use_text(), Some("once upon a time"));
}

#[tokio::test]
async fn test_transcribe_failure_stores_fixed_text() {
    let mut recorder = Recorder::new();
    recorder.start(scripted(&[b"audio"])).await.unwrap();
    recorder.stop().await.unwrap();

    recorder.transcribe(&FailingStt).await;

    // Failure never leaves the machine in an error state
    assert_eq!(recorder.state(), RecorderState::Transcribed);
    assert_eq!(recorder.transcript_text(), Some(FAILED_TRANSCRIPT));
}

#[tokio::test]
async fn test_transcribe_empty_text_counts_as_failure() {
    let mut recorder = Recorder::new();
    recorder.start(scripted(&[b"audio"])).await.unwrap();
    recorder.stop().await.unwrap();

    recorder.transcribe(&FixedStt("")).await;

    assert_eq!(recorder.transcript_text(), Some(FAILED_TRANSCRIPT));
}

#[tokio::test]
async fn test_transcribe_without_artifact_is_noop() {
    let mut recorder = Recorder::new();
    recorder.transcribe(&FixedStt("ignored")).await;

    assert_eq!(recorder.state(), RecorderState::Idle);
    assert!(recorder.transcript_text().is_none());
}

#[tokio::test]
async fn test_edit_save_commits_buffer() {
    let mut recorder = Recorder::new();
    recorder.start(scripted(&[b"audio"])).await.unwrap();
    recorder.stop().await.unwrap();
    recorder.transcribe(&FixedStt("orignal text")).await;

    recorder.begin_edit();
    assert!(recorder.is_editing());
    assert_eq!(recorder.edit_buffer(), Some("orignal text"));

    recorder.set_edit_buffer("original text");
    recorder.save_edit();

    assert!(!recorder.is_editing());
    assert_eq!(recorder.transcript_text(), Some("original text"));
}

#[tokio::test]
async fn test_edit_cancel_keeps_previous_text() {
    let mut recorder = Recorder::new();
    recorder.start(scripted(&[b"audio"])).await.unwrap();
    recorder.stop().await.unwrap();
    recorder.transcribe(&FixedStt("keep me")).await;

    recorder.begin_edit();
    recorder.set_edit_buffer("discard me");
    recorder.cancel_edit();

    assert!(!recorder.is_editing());
    assert_eq!(recorder.transcript_text(), Some("keep me"));
}

#[tokio::test(start_paused = true)]
async fn test_elapsed_counter_ticks_once_per_second() {
    let mut recorder = Recorder::new();
    recorder.start(scripted(&[])).await.unwrap();
    assert_eq!(recorder.elapsed_secs(), 0);
    assert_eq!(recorder.format_elapsed(), "00:00");

    // Let the timer task register its interval before advancing the clock
    tokio::task::yield_now().await;

    for _ in 0..65 {
        tokio::time::advance(std::time::Duration::from_secs(1)).await;
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
    }

    assert_eq!(recorder.elapsed_secs(), 65);
    assert_eq!(recorder.format_elapsed(), "01:05");

    recorder.stop().await.unwrap();
}
