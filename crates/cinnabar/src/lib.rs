//! cinnabar — human-in-the-loop prompt target for red-teaming orchestration.
//!
//! Plugs a human operator into an automated prompt pipeline as if the
//! operator were an API-backed chat model: the orchestrator sends a prompt
//! request, the operator answers it in a terminal dialog, and the reply
//! comes back in the standard response envelope. The blocking dialog runs
//! off the async scheduler, so callers await the human without stalling
//! anything else.
//!
//! ```no_run
//! use cinnabar::{HumanTarget, PromptChatTarget, PromptPiece, PromptRequest};
//!
//! # async fn demo() -> Result<(), cinnabar::TargetError> {
//! let target = HumanTarget::new();
//! let request = PromptRequest::single(PromptPiece::text("c1", "hello"));
//! let response = target.send_prompt(&request).await?;
//! println!("{}", response.first_text().unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod chat;
pub mod dialog;
pub mod errors;
pub mod memory;
pub mod normalize;
pub mod request;
pub mod targets;
pub mod telemetry;

pub use chat::{ChatMessage, Role};
pub use dialog::{DialogOutcome, InputDialog, ScriptedDialog, TerminalDialog};
pub use errors::{ErrorClass, TargetError};
pub use memory::{InMemoryStore, Memory};
pub use normalize::{ChatMessageNormalizer, NopNormalizer, RolePrefixNormalizer};
pub use request::{PromptDataType, PromptPiece, PromptRequest, PromptResponse};
pub use targets::{HumanTarget, PromptChatTarget, RateLimited, Retry};
pub use telemetry::init_tracing;
