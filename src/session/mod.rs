//! Client-side session state
//!
//! This module provides the two interaction state machines the browser UI
//! drove in the original application:
//! - `Recorder` - microphone capture lifecycle, artifact and transcript
//!   management, object-URL release
//! - `ChatSession` - ordered message log, optimistic submission, reply
//!   normalization, content/title fallbacks
//!
//! Both talk to the proxy layer through the `ChatBackend` and
//! `TranscriptionBackend` seams; `ProxyClient` is the HTTP implementation.

mod artifact;
mod backend;
mod chat;
mod recorder;

pub use artifact::{AudioArtifact, ObjectUrls};
pub use backend::{ChatBackend, ProxyClient, TranscriptionBackend};
pub use chat::{ChatSession, DEFAULT_REPLY, ERROR_REPLY, FALLBACK_TITLE};
pub use recorder::{Recorder, RecorderState, FAILED_TRANSCRIPT};
