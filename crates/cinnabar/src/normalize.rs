use crate::chat::ChatMessage;

/// Strategy converting a chat message to a canonical textual form.
///
/// Targets use this for logging and history context only; the normalized
/// text is never echoed back to the orchestrator.
pub trait ChatMessageNormalizer: Send + Sync {
    fn normalize(&self, message: &ChatMessage) -> String;
}

/// Pass-through normalizer; the default.
#[derive(Clone, Copy, Debug, Default)]
pub struct NopNormalizer;

impl ChatMessageNormalizer for NopNormalizer {
    fn normalize(&self, message: &ChatMessage) -> String {
        message.content.clone()
    }
}

/// Prefixes content with the speaking role, e.g. `user: hello`.
#[derive(Clone, Copy, Debug, Default)]
pub struct RolePrefixNormalizer;

impl ChatMessageNormalizer for RolePrefixNormalizer {
    fn normalize(&self, message: &ChatMessage) -> String {
        format!("{}: {}", message.role.as_str(), message.content)
    }
}
