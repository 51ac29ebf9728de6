//! HTTP API server for the browser client
//!
//! This module provides the thin proxy layer the web client talks to:
//! - POST /api/chat - Forward a chat payload to the assistant service
//! - POST /api/audio/transcribe - Forward an audio upload to the STT service
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use handlers::{ErrorResponse, TranscriptionResponse, SIMULATED_TRANSCRIPT};
pub use routes::create_router;
pub use state::AppState;
