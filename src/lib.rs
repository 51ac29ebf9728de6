pub mod capture;
pub mod config;
pub mod http;
pub mod session;
pub mod story;
pub mod upstream;

pub use capture::{AudioCapture, ScriptedCapture};
pub use config::Config;
pub use http::{create_router, AppState};
pub use session::{
    AudioArtifact, ChatBackend, ChatSession, ObjectUrls, ProxyClient, Recorder, RecorderState,
    TranscriptionBackend,
};
pub use story::{
    AssistantReply, Attachment, AttachmentKind, ContentItem, ContentKind, InputKind, Message,
    OutputKind, Role, StoryDocument,
};
pub use upstream::UpstreamClient;
