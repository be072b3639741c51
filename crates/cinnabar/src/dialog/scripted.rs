use std::collections::VecDeque;
use std::io;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{DialogOutcome, InputDialog};

/// Deterministic stand-in for a human operator.
///
/// Serves a scripted sequence of outcomes, one per `collect` call, and
/// counts how many times a dialog was presented so tests can assert that
/// rejected requests never reach the human. An optional delay simulates the
/// operator taking time to answer.
pub struct ScriptedDialog {
    outcomes: Mutex<VecDeque<DialogOutcome>>,
    shown: AtomicUsize,
    delay: Option<Duration>,
}

impl ScriptedDialog {
    pub fn new(outcomes: impl IntoIterator<Item = DialogOutcome>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
            shown: AtomicUsize::new(0),
            delay: None,
        }
    }

    /// Script that submits each text in order.
    pub fn submitting<S: Into<String>>(texts: impl IntoIterator<Item = S>) -> Self {
        Self::new(
            texts
                .into_iter()
                .map(|text| DialogOutcome::Submitted(text.into()))
                .collect::<Vec<_>>(),
        )
    }

    /// Script that dismisses the dialog once.
    pub fn dismissing() -> Self {
        Self::new([DialogOutcome::Dismissed])
    }

    /// Makes every `collect` block the worker thread for `delay` first.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// How many times a dialog was presented.
    pub fn times_shown(&self) -> usize {
        self.shown.load(Ordering::SeqCst)
    }
}

impl InputDialog for ScriptedDialog {
    fn collect(&self, _prompt: &str) -> io::Result<DialogOutcome> {
        self.shown.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        self.outcomes
            .lock()
            .expect("scripted dialog lock poisoned")
            .pop_front()
            .ok_or_else(|| io::Error::other("scripted dialog ran out of outcomes"))
    }
}
