use super::types::ContentItem;
use serde_json::Value;
use tracing::warn;

/// Normalized view of an assistant service reply.
///
/// The upstream service has been observed to use several field aliases for
/// the same things (`response`/`message`/`content` for the reply text,
/// `content`/`story_content` for generated items, `title`/`story_title` for
/// the document title). This resolves them once so consumers never re-check.
#[derive(Debug, Clone, Default)]
pub struct AssistantReply {
    /// Reply text for the chat thread, if the service provided one
    pub text: Option<String>,

    /// Generated content items. `Some` whenever the service supplied a
    /// content array, even an empty one; `None` only when no alias carried
    /// an array, which is what lets consumers fall back to local generation.
    pub content: Option<Vec<ContentItem>>,

    /// Document title, if the service provided one
    pub title: Option<String>,
}

impl AssistantReply {
    pub fn from_value(value: &Value) -> Self {
        let text = ["response", "message", "content"]
            .iter()
            .find_map(|key| value.get(key).and_then(Value::as_str))
            .map(str::to_string);

        // `content` must be non-empty to win, but a present `story_content`
        // array is authoritative even when empty
        let content = match value.get("content").and_then(Value::as_array) {
            Some(items) if !items.is_empty() => Some(parse_items(items)),
            _ => value
                .get("story_content")
                .and_then(Value::as_array)
                .map(|items| parse_items(items)),
        };

        let title = ["title", "story_title"]
            .iter()
            .find_map(|key| value.get(key).and_then(Value::as_str))
            .map(str::to_string);

        Self {
            text,
            content,
            title,
        }
    }
}

/// Parse content items leniently, skipping malformed elements.
fn parse_items(items: &[Value]) -> Vec<ContentItem> {
    items
        .iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!("Skipping malformed content item: {}", e);
                None
            }
        })
        .collect()
}
