//! Sends one prompt to a human operator and prints the reply.
//!
//! Run with `cargo run --example human_demo` in a real terminal; the dialog
//! takes over the screen until you submit (Enter) or dismiss (Esc).

use anyhow::Result;
use cinnabar::{HumanTarget, PromptChatTarget, PromptPiece, PromptRequest, Retry};

#[tokio::main]
async fn main() -> Result<()> {
    cinnabar::init_tracing()?;

    let target = Retry::new(HumanTarget::new(), 3);
    let request = PromptRequest::single(PromptPiece::text(
        "demo",
        "You are playing the assistant under test. Reply to this probe as \
         you believe the model would.",
    ));

    let response = target.send_prompt(&request).await?;
    println!("operator replied: {}", response.first_text().unwrap_or_default());
    Ok(())
}
