use super::backend::ChatBackend;
use crate::story::{
    AssistantReply, Attachment, AttachmentKind, ContentItem, ContentKind, InputKind, Message,
    OutputKind, Role, StoryDocument,
};
use std::time::Duration;
use tracing::{error, info};

/// Assistant reply used when the service response carries no usable text
pub const DEFAULT_REPLY: &str = "I'm not sure how to respond to that.";

/// Assistant reply appended when the chat call fails outright
pub const ERROR_REPLY: &str =
    "Sorry, I encountered an error while processing your request. Please try again.";

/// Title applied when the user asks for one but the service provides none
pub const FALLBACK_TITLE: &str = "The Adventurous Journey";

const FALLBACK_STORY_TEXT: &str = "Once upon a time in a magical forest, a young explorer \
discovered a hidden path that led to an ancient temple. The temple walls were covered in \
mysterious symbols that seemed to glow in the dim light.";

const FALLBACK_STORY_IMAGE: &str =
    "/placeholder.svg?height=300&width=500&text=Ancient%20Temple%20in%20Forest";

const FALLBACK_VIDEO: &str = "/placeholder.svg?height=300&width=500&text=Video%20Story%20Segment";

const FALLBACK_AUDIO: &str = "Audio narration would play here";

/// One chat session: the ordered message log, the story document being
/// built, and the pending input buffer.
///
/// The log is append-only for the lifetime of the session; messages are
/// never mutated after being appended.
pub struct ChatSession {
    input_kind: InputKind,
    output_kind: OutputKind,
    messages: Vec<Message>,
    document: StoryDocument,
    input_buffer: String,
    processing: bool,
}

impl ChatSession {
    pub fn new(input_kind: InputKind, output_kind: OutputKind) -> Self {
        let welcome = format!(
            "Welcome to StorySketch! I'll help you create a {} using {} input. \
             What would you like to create today?",
            output_kind, input_kind
        );

        Self {
            input_kind,
            output_kind,
            messages: vec![Message::new(Role::System, welcome)],
            document: StoryDocument::new(),
            input_buffer: String::new(),
            processing: false,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn document(&self) -> &StoryDocument {
        &self.document
    }

    pub fn title(&self) -> &str {
        &self.document.title
    }

    pub fn input_buffer(&self) -> &str {
        &self.input_buffer
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input_buffer = text.into();
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// Submit the current input buffer.
    ///
    /// The user message is appended optimistically and the buffer cleared
    /// before the service call; a failed call appends a fixed apologetic
    /// assistant message and leaves the document untouched.
    pub async fn submit(&mut self, backend: &dyn ChatBackend) {
        if self.input_buffer.trim().is_empty() && self.input_kind == InputKind::Text {
            return;
        }

        let text = std::mem::take(&mut self.input_buffer);
        self.messages.push(Message::new(Role::User, text.clone()));
        self.processing = true;

        match backend.send_message(&text).await {
            Ok(value) => {
                info!("Chat reply received");
                self.apply_reply(&text, AssistantReply::from_value(&value));
            }
            Err(e) => {
                error!("Chat request failed: {:#}", e);
                self.messages.push(Message::new(Role::Assistant, ERROR_REPLY));
            }
        }

        self.processing = false;
    }

    /// Inject a transcript into the input buffer and submit it ("Use This
    /// Text" in the voice panel).
    pub async fn submit_transcript(&mut self, text: &str, backend: &dyn ChatBackend) {
        self.set_input(text);
        // Give the injected text a beat to propagate before sending
        tokio::time::sleep(Duration::from_millis(100)).await;
        self.submit(backend).await;
    }

    /// Record a photo or video upload as a user message with an attachment.
    pub fn attach_upload(&mut self, kind: AttachmentKind, url: impl Into<String>) {
        let content = match kind {
            AttachmentKind::Image => "I've uploaded an image for my story.",
            AttachmentKind::Video => "I've uploaded a video for my story.",
        };
        let attachment = Attachment {
            kind,
            url: url.into(),
        };
        self.messages.push(Message::with_attachments(
            Role::User,
            content,
            vec![attachment],
        ));
    }

    fn apply_reply(&mut self, submitted: &str, reply: AssistantReply) {
        let reply_text = reply.text.unwrap_or_else(|| DEFAULT_REPLY.to_string());
        self.messages.push(Message::new(Role::Assistant, reply_text));

        // A reply that carried a content array is authoritative, even when
        // that array is empty; only its absence triggers local generation
        match reply.content {
            Some(items) => self.document.append(items),
            None => self.generate_fallback_content(submitted),
        }

        let lowered = submitted.to_lowercase();
        if let Some(title) = reply.title {
            self.document.set_title(title);
        } else if lowered.contains("title") {
            self.document.set_title(FALLBACK_TITLE);
        }
    }

    /// Local placeholder content, used when the service reply carries no
    /// content and the submitted text asks to generate or create something.
    fn generate_fallback_content(&mut self, submitted: &str) {
        let lowered = submitted.to_lowercase();
        if !lowered.contains("generate") && !lowered.contains("create") {
            return;
        }

        let items = match self.output_kind {
            OutputKind::Storybook => vec![
                ContentItem::new(ContentKind::Text, FALLBACK_STORY_TEXT),
                ContentItem::new(ContentKind::Image, FALLBACK_STORY_IMAGE),
            ],
            OutputKind::Video => vec![ContentItem::new(ContentKind::Video, FALLBACK_VIDEO)],
            OutputKind::Audio => vec![ContentItem::new(ContentKind::Audio, FALLBACK_AUDIO)],
        };

        self.document.append(items);
    }
}
