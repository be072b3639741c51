mod human;
mod limit;

pub use human::HumanTarget;
pub use limit::{RateLimited, Retry};

use async_trait::async_trait;

use crate::errors::TargetError;
use crate::request::{PromptRequest, PromptResponse};

/// Capability the orchestration layer expects of a chat target: accept one
/// prompt request, produce one response, asynchronously.
///
/// Implementations must be safely re-invocable — no cross-call state that a
/// retry wrapper could corrupt. Nothing here serializes overlapping calls;
/// a caller that issues two at once may trigger two simultaneous human
/// interactions, and callers needing strict ordering must enforce it
/// themselves.
#[async_trait]
pub trait PromptChatTarget: Send + Sync {
    async fn send_prompt(&self, request: &PromptRequest) -> Result<PromptResponse, TargetError>;
}
