use anyhow::Result;
use serde::Deserialize;

/// Default upstream assistant endpoint (the on-premise Gemini gateway).
pub const DEFAULT_CHAT_URL: &str = "http://34.81.186.95:8000/api/v1/chats";

/// Default upstream speech-to-text endpoint (the on-premise Whisper server).
pub const DEFAULT_TRANSCRIBE_URL: &str = "http://34.81.186.95:8000/api/v1/voices/transcribe";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub upstream: UpstreamConfig,
    pub transcription: TranscriptionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Remote assistant service URL (chat payloads are forwarded verbatim)
    pub chat_url: String,

    /// Remote speech-to-text service URL (multipart `file` uploads)
    pub transcribe_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionConfig {
    /// When true, upstream transcription failures are masked as a successful
    /// response carrying a simulated transcript. Matches the original
    /// development-mode behavior; disable to surface failures to callers.
    pub mask_upstream_failures: bool,
}

impl Config {
    /// Load configuration from an optional file, layered over built-in defaults.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("service.name", "storysketch")?
            .set_default("service.http.bind", "127.0.0.1")?
            .set_default("service.http.port", 3000_i64)?
            .set_default("upstream.chat_url", DEFAULT_CHAT_URL)?
            .set_default("upstream.transcribe_url", DEFAULT_TRANSCRIBE_URL)?
            .set_default("transcription.mask_upstream_failures", true)?
            .add_source(config::File::with_name(path).required(false))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
