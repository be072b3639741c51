use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chat::{ChatMessage, Role};

// ---------------------------------------------------------------------------
// PromptDataType
// ---------------------------------------------------------------------------

/// Declared data type of a prompt piece's converted value.
///
/// The orchestration layer moves several content kinds around; individual
/// targets declare which ones they accept. The human target accepts `Text`
/// only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptDataType {
    Text,
    Image,
    Audio,
    Url,
    Error,
}

impl PromptDataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptDataType::Text => "text",
            PromptDataType::Image => "image",
            PromptDataType::Audio => "audio",
            PromptDataType::Url => "url",
            PromptDataType::Error => "error",
        }
    }
}

// ---------------------------------------------------------------------------
// PromptPiece — one unit of prompt content
// ---------------------------------------------------------------------------

/// One unit of prompt content with a declared data type.
///
/// `original_value` is what the orchestrator started from; `converted_value`
/// is what converters produced and what a target actually consumes. For plain
/// text prompts the two are equal.
#[derive(Clone, Debug, Builder, Serialize, Deserialize)]
pub struct PromptPiece {
    #[builder(default = Uuid::new_v4())]
    pub id: Uuid,
    /// Opaque key grouping messages belonging to one logical dialogue.
    #[builder(into)]
    pub conversation_id: String,
    #[builder(default = Role::User)]
    pub role: Role,
    #[builder(into)]
    pub original_value: String,
    #[builder(into)]
    pub converted_value: String,
    #[builder(default = PromptDataType::Text)]
    pub converted_value_data_type: PromptDataType,
    #[builder(default = Utc::now())]
    pub timestamp: DateTime<Utc>,
}

impl PromptPiece {
    /// Shorthand for a user text piece where original and converted values
    /// coincide.
    pub fn text(conversation_id: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        PromptPiece::builder()
            .conversation_id(conversation_id)
            .original_value(value.clone())
            .converted_value(value)
            .build()
    }

    pub fn to_chat_message(&self) -> ChatMessage {
        ChatMessage::new(self.role, self.converted_value.clone())
    }
}

// ---------------------------------------------------------------------------
// PromptRequest / PromptResponse — the envelopes
// ---------------------------------------------------------------------------

/// Ordered collection of request pieces handed to a target.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PromptRequest {
    pub pieces: Vec<PromptPiece>,
}

impl PromptRequest {
    pub fn new(pieces: Vec<PromptPiece>) -> Self {
        Self { pieces }
    }

    pub fn single(piece: PromptPiece) -> Self {
        Self {
            pieces: vec![piece],
        }
    }

    /// Conversation id of the first piece, if any.
    pub fn conversation_id(&self) -> Option<&str> {
        self.pieces.first().map(|p| p.conversation_id.as_str())
    }
}

/// Reply envelope returned to the orchestration layer.
///
/// Built fresh per call from the originating request piece; no shared state
/// survives between calls.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PromptResponse {
    pub pieces: Vec<PromptPiece>,
}

impl PromptResponse {
    /// Constructs a response from the request piece it answers.
    ///
    /// Each produced text becomes one assistant piece inheriting the
    /// request's conversation id, so replies stay attached to the dialogue
    /// that asked for them.
    pub fn from_request(request: &PromptPiece, response_texts: Vec<String>) -> Self {
        let pieces = response_texts
            .into_iter()
            .map(|text| {
                PromptPiece::builder()
                    .conversation_id(request.conversation_id.clone())
                    .role(Role::Assistant)
                    .original_value(text.clone())
                    .converted_value(text)
                    .converted_value_data_type(PromptDataType::Text)
                    .build()
            })
            .collect();
        Self { pieces }
    }

    /// Converted value of the first piece, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.pieces.first().map(|p| p.converted_value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_inherits_conversation_id_and_assistant_role() {
        let request = PromptPiece::text("c1", "hello");
        let response = PromptResponse::from_request(&request, vec!["world".to_string()]);

        assert_eq!(response.pieces.len(), 1);
        let piece = &response.pieces[0];
        assert_eq!(piece.conversation_id, "c1");
        assert_eq!(piece.role, Role::Assistant);
        assert_eq!(piece.converted_value, "world");
        assert_eq!(piece.original_value, "world");
        assert_eq!(piece.converted_value_data_type, PromptDataType::Text);
    }

    #[test]
    fn response_pieces_get_fresh_ids() {
        let request = PromptPiece::text("c1", "hello");
        let response = PromptResponse::from_request(&request, vec!["world".to_string()]);
        assert_ne!(response.pieces[0].id, request.id);
    }

    #[test]
    fn data_type_serializes_lowercase() {
        let json = serde_json::to_value(PromptDataType::Text).unwrap();
        assert_eq!(json, "text");
        let json = serde_json::to_value(PromptDataType::Image).unwrap();
        assert_eq!(json, "image");
    }

    #[test]
    fn text_shorthand_fills_both_values() {
        let piece = PromptPiece::text("c1", "hi there");
        assert_eq!(piece.original_value, piece.converted_value);
        assert_eq!(piece.role, Role::User);
        assert_eq!(piece.converted_value_data_type, PromptDataType::Text);
    }
}
