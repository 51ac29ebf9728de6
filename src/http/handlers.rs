use super::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, warn};

/// Transcript returned when the speech-to-text service is unreachable and
/// failure masking is enabled.
pub const SIMULATED_TRANSCRIPT: &str =
    "This is a simulated transcript returned while the speech-to-text service is unreachable.";

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranscriptionResponse {
    pub text: String,
    pub success: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/chat
/// Forward a chat payload verbatim to the assistant service and relay the
/// JSON reply unmodified
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> impl IntoResponse {
    // A body that fails to parse is a local processing failure, not a
    // client-contract error
    let Json(payload) = match payload {
        Ok(json) => json,
        Err(e) => {
            error!("Malformed chat request body: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to get response from chat service".to_string(),
                    details: Some(e.to_string()),
                }),
            )
                .into_response();
        }
    };

    info!("Received chat request");

    match state.upstream.send_chat(&payload).await {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => {
            error!("Chat request failed: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to get response from chat service".to_string(),
                    details: Some(e.to_string()),
                }),
            )
                .into_response()
        }
    }
}

/// POST /api/audio/transcribe
/// Repackage an `audio` multipart upload as a `file` upload for the
/// speech-to-text service
pub async fn transcribe(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    // Pull the audio field out of the upload
    let mut audio: Option<(Vec<u8>, String)> = None;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() != Some("audio") {
                    continue;
                }

                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();

                match field.bytes().await {
                    Ok(bytes) => {
                        audio = Some((bytes.to_vec(), content_type));
                        break;
                    }
                    Err(e) => {
                        error!("Failed to read audio field: {}", e);
                        return (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            Json(ErrorResponse {
                                error: "Failed to process audio file".to_string(),
                                details: Some(e.to_string()),
                            }),
                        )
                            .into_response();
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                error!("Malformed multipart upload: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "Failed to process audio file".to_string(),
                        details: Some(e.to_string()),
                    }),
                )
                    .into_response();
            }
        }
    }

    let Some((bytes, content_type)) = audio else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No audio file provided".to_string(),
                details: None,
            }),
        )
            .into_response();
    };

    info!("Transcribing {} byte upload ({})", bytes.len(), content_type);

    match state.upstream.transcribe(bytes, &content_type).await {
        Ok(text) => (
            StatusCode::OK,
            Json(TranscriptionResponse {
                text,
                success: true,
            }),
        )
            .into_response(),
        Err(e) => {
            if state.config.transcription.mask_upstream_failures {
                warn!(
                    "Transcription service call failed ({:#}); returning simulated transcript",
                    e
                );
                (
                    StatusCode::OK,
                    Json(TranscriptionResponse {
                        text: SIMULATED_TRANSCRIPT.to_string(),
                        success: true,
                    }),
                )
                    .into_response()
            } else {
                error!("Transcription request failed: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "Failed to transcribe audio".to_string(),
                        details: Some(e.to_string()),
                    }),
                )
                    .into_response()
            }
        }
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
