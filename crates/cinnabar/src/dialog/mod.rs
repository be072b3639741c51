mod scripted;
mod terminal;

pub use scripted::ScriptedDialog;
pub use terminal::TerminalDialog;

use std::io;

/// Terminal state of one dialog session.
///
/// A session moves `Created → Awaiting-Input → {Submitted | Dismissed}` and
/// is destroyed with the call that created it; there is no re-entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DialogOutcome {
    /// The operator accepted the current input (possibly empty).
    Submitted(String),
    /// The dialog was closed without any submission.
    Dismissed,
}

impl DialogOutcome {
    /// The typed reply, if there is one. Dismissal and an empty submission
    /// both count as nothing.
    pub fn into_text(self) -> Option<String> {
        match self {
            DialogOutcome::Submitted(text) if !text.is_empty() => Some(text),
            _ => None,
        }
    }
}

/// Blocking human-input surface.
///
/// `collect` presents the prompt, pumps whatever event loop the surface
/// needs, and returns only once the human acts. It blocks the calling
/// thread, so async callers must hop through `spawn_blocking` — the human
/// target does this for you.
pub trait InputDialog: Send + Sync {
    fn collect(&self, prompt: &str) -> io::Result<DialogOutcome>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submitted_text_survives() {
        let outcome = DialogOutcome::Submitted("answer".to_string());
        assert_eq!(outcome.into_text().as_deref(), Some("answer"));
    }

    #[test]
    fn empty_submission_counts_as_nothing() {
        assert_eq!(DialogOutcome::Submitted(String::new()).into_text(), None);
    }

    #[test]
    fn dismissal_counts_as_nothing() {
        assert_eq!(DialogOutcome::Dismissed.into_text(), None);
    }
}
