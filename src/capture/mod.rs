//! Audio capture abstraction.
//!
//! A capture backend emits encoded audio buffers over a channel until it is
//! stopped; the recorder drains the channel and concatenates the buffers into
//! a single artifact. Browser media capture sits behind this same seam in the
//! embedding application; `ScriptedCapture` stands in for it in tests and
//! batch processing.

use anyhow::Result;
use bytes::Bytes;
use tokio::sync::mpsc;

/// Audio capture backend trait
#[async_trait::async_trait]
pub trait AudioCapture: Send + Sync {
    /// Start capturing audio
    ///
    /// Returns a channel receiver that will receive encoded audio chunks.
    /// The channel closes once the final chunk has been flushed after `stop`.
    async fn start(&mut self) -> Result<mpsc::Receiver<Bytes>>;

    /// Stop capturing audio
    async fn stop(&mut self) -> Result<()>;

    /// Check if backend is currently capturing
    fn is_capturing(&self) -> bool;

    /// Get backend name for logging
    fn name(&self) -> &str;

    /// Content type of the emitted chunks
    fn mime_type(&self) -> &str;
}

/// Capture backend that replays a fixed sequence of chunks.
///
/// Used for tests and batch processing where no live microphone exists.
pub struct ScriptedCapture {
    chunks: Vec<Bytes>,
    mime_type: String,
    capturing: bool,
}

impl ScriptedCapture {
    pub fn new(chunks: Vec<Bytes>) -> Self {
        Self {
            chunks,
            mime_type: "audio/mpeg".to_string(),
            capturing: false,
        }
    }

    pub fn with_mime_type(chunks: Vec<Bytes>, mime_type: impl Into<String>) -> Self {
        Self {
            chunks,
            mime_type: mime_type.into(),
            capturing: false,
        }
    }
}

#[async_trait::async_trait]
impl AudioCapture for ScriptedCapture {
    async fn start(&mut self) -> Result<mpsc::Receiver<Bytes>> {
        let (tx, rx) = mpsc::channel(self.chunks.len().max(1));
        let chunks = self.chunks.clone();

        // Replay the scripted chunks, then drop the sender to close the
        // channel the way a live backend does after its final buffer.
        tokio::spawn(async move {
            for chunk in chunks {
                if tx.send(chunk).await.is_err() {
                    break;
                }
            }
        });

        self.capturing = true;
        Ok(rx)
    }

    async fn stop(&mut self) -> Result<()> {
        self.capturing = false;
        Ok(())
    }

    fn is_capturing(&self) -> bool {
        self.capturing
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn mime_type(&self) -> &str {
        &self.mime_type
    }
}
