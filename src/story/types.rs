use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who authored a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// Input modality the user selected for the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Text,
    Voice,
    Photo,
    Video,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InputKind::Text => "text",
            InputKind::Voice => "voice",
            InputKind::Photo => "photo",
            InputKind::Video => "video",
        };
        f.write_str(s)
    }
}

/// Output modality the story is rendered as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    Storybook,
    Video,
    Audio,
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OutputKind::Storybook => "storybook",
            OutputKind::Video => "video",
            OutputKind::Audio => "audio",
        };
        f.write_str(s)
    }
}

/// Media attached to a user message (uploaded photo or video)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    Video,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(rename = "type")]
    pub kind: AttachmentKind,

    /// Blob/location reference for rendering
    pub url: String,
}

/// One entry in the chat thread. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,

    pub content: String,

    /// Epoch milliseconds at creation time
    pub timestamp: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now().timestamp_millis(),
            attachments: None,
        }
    }

    pub fn with_attachments(
        role: Role,
        content: impl Into<String>,
        attachments: Vec<Attachment>,
    ) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now().timestamp_millis(),
            attachments: Some(attachments),
        }
    }
}

/// Kind of generated story content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Text,
    Image,
    Video,
    Audio,
}

/// One unit of generated story content. Appended to the document, never
/// mutated or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    #[serde(rename = "type")]
    pub kind: ContentKind,

    /// Text body for text items; URL or placeholder reference otherwise
    pub content: String,

    pub timestamp: i64,
}

impl ContentItem {
    pub fn new(kind: ContentKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

/// The story document being built over one chat session (in-memory only)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoryDocument {
    pub title: String,
    pub content: Vec<ContentItem>,
}

impl StoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn append(&mut self, items: Vec<ContentItem>) {
        self.content.extend(items);
    }
}
