use std::io;
use std::sync::Arc;

use async_trait::async_trait;
use bon::Builder;
use tokio::task;
use tracing::{debug, info};

use super::PromptChatTarget;
use crate::dialog::{InputDialog, TerminalDialog};
use crate::errors::TargetError;
use crate::memory::{InMemoryStore, Memory};
use crate::normalize::{ChatMessageNormalizer, NopNormalizer};
use crate::request::{PromptDataType, PromptRequest, PromptResponse};

/// Chat target backed by a human operator.
///
/// Plugs a person into the pipeline as if they were an API-backed model:
/// the request's sole text piece is shown in a modal dialog, and whatever
/// the operator types comes back as the response envelope. The blocking
/// dialog runs on the blocking pool, so the caller's scheduler keeps
/// turning while the human thinks.
///
/// The target holds no cross-call state; wrapping it in [`Retry`] or
/// [`RateLimited`] is safe.
///
/// [`Retry`]: super::Retry
/// [`RateLimited`]: super::RateLimited
#[derive(Builder, Clone)]
pub struct HumanTarget {
    /// Dialog used to present the prompt and capture the reply.
    #[builder(default = Arc::new(TerminalDialog))]
    dialog: Arc<dyn InputDialog>,
    /// Conversation store consulted for prior context.
    #[builder(default = Arc::new(InMemoryStore::new()))]
    memory: Arc<dyn Memory>,
    /// Strategy rendering history entries into log lines.
    #[builder(default = Arc::new(NopNormalizer))]
    normalizer: Arc<dyn ChatMessageNormalizer>,
}

impl HumanTarget {
    /// Target with the interactive terminal dialog and default collaborators.
    pub fn new() -> Self {
        Self::builder().build()
    }

    fn validate_request(request: &PromptRequest) -> Result<(), TargetError> {
        if request.pieces.len() != 1 {
            return Err(TargetError::invalid_request(
                "this target only supports a single prompt request piece",
            ));
        }
        if request.pieces[0].converted_value_data_type != PromptDataType::Text {
            return Err(TargetError::invalid_request(
                "this target only supports text prompt input",
            ));
        }
        Ok(())
    }
}

impl Default for HumanTarget {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PromptChatTarget for HumanTarget {
    async fn send_prompt(&self, request: &PromptRequest) -> Result<PromptResponse, TargetError> {
        // Malformed requests must fail before the operator ever sees a dialog.
        Self::validate_request(request)?;
        let piece = &request.pieces[0];

        // Prior turns plus the incoming piece, for logging context only; the
        // framework's request lifecycle owns persisting the store itself.
        let mut context = self.memory.messages(&piece.conversation_id).await;
        context.push(piece.to_chat_message());
        for message in &context {
            debug!(
                conversation_id = %piece.conversation_id,
                "context: {}",
                self.normalizer.normalize(message)
            );
        }
        info!(
            conversation_id = %piece.conversation_id,
            turns = context.len(),
            "presenting prompt to the operator"
        );

        let dialog = Arc::clone(&self.dialog);
        let prompt = piece.converted_value.clone();
        let outcome = task::spawn_blocking(move || dialog.collect(&prompt))
            .await
            .map_err(|join_error| TargetError::Dialog {
                source: io::Error::other(join_error),
            })?
            .map_err(|source| TargetError::Dialog { source })?;

        let text = outcome.into_text().ok_or(TargetError::EmptyResponse)?;

        let response = PromptResponse::from_request(piece, vec![text]);
        info!(
            conversation_id = %piece.conversation_id,
            "received operator response: {}",
            response.first_text().unwrap_or_default()
        );
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::PromptPiece;

    #[test]
    fn validation_rejects_multiple_pieces() {
        let request = PromptRequest::new(vec![
            PromptPiece::text("c1", "one"),
            PromptPiece::text("c1", "two"),
        ]);
        assert!(matches!(
            HumanTarget::validate_request(&request),
            Err(TargetError::InvalidRequest { .. })
        ));
    }

    #[test]
    fn validation_rejects_non_text_piece() {
        let piece = PromptPiece::builder()
            .conversation_id("c1")
            .original_value("cat.png")
            .converted_value("cat.png")
            .converted_value_data_type(PromptDataType::Image)
            .build();
        let request = PromptRequest::single(piece);
        assert!(matches!(
            HumanTarget::validate_request(&request),
            Err(TargetError::InvalidRequest { .. })
        ));
    }

    #[test]
    fn validation_accepts_single_text_piece() {
        let request = PromptRequest::single(PromptPiece::text("c1", "hello"));
        assert!(HumanTarget::validate_request(&request).is_ok());
    }
}
