use bytes::Bytes;
use std::collections::HashSet;
use uuid::Uuid;

/// A finalized audio recording: the captured bytes plus a playable
/// object-URL reference.
#[derive(Debug, Clone)]
pub struct AudioArtifact {
    pub bytes: Bytes,
    pub content_type: String,
    pub url: String,
}

/// Session-scoped registry of live object URLs.
///
/// Mirrors the browser object-URL lifecycle: every artifact URL must be
/// revoked when the recording it references is replaced or deleted,
/// otherwise the backing blob leaks for the life of the session.
#[derive(Debug, Default)]
pub struct ObjectUrls {
    live: HashSet<String>,
}

impl ObjectUrls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a new object URL and track it as live.
    pub fn create(&mut self) -> String {
        let url = format!("blob:{}", Uuid::new_v4());
        self.live.insert(url.clone());
        url
    }

    /// Release an object URL. Returns false if it was not live.
    pub fn revoke(&mut self, url: &str) -> bool {
        self.live.remove(url)
    }

    pub fn is_live(&self, url: &str) -> bool {
        self.live.contains(url)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}
