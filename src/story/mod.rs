//! Story domain types shared across the chat session and HTTP layers.

mod reply;
mod types;

pub use reply::AssistantReply;
pub use types::{
    Attachment, AttachmentKind, ContentItem, ContentKind, InputKind, Message, OutputKind, Role,
    StoryDocument,
};
