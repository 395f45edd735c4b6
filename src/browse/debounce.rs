//! Debounced text input
//!
//! Raw values are echoed immediately through [`DebouncedInput::local`]; the
//! consumer only sees a value once no new input has arrived for the
//! configured quiet period. Committed values are delivered on an unbounded
//! channel so an event loop can `select!` on them.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// One-shot timer that can be cancelled and restarted
///
/// Starting the timer cancels any timer that is still pending. When the
/// delay elapses without cancellation the callback runs once and the timer
/// is spent.
#[derive(Debug, Default)]
pub struct CancellableTimer {
    armed: Option<(CancellationToken, JoinHandle<()>)>,
}

impl CancellableTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer, replacing any pending one
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start<F>(&mut self, delay: Duration, on_fire: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();

        let token = CancellationToken::new();
        let child = token.clone();
        let handle = tokio::spawn(async move {
            tokio::select! {
                biased;

                _ = child.cancelled() => {}

                _ = tokio::time::sleep(delay) => on_fire(),
            }
        });

        self.armed = Some((token, handle));
    }

    /// Cancel the pending timer; returns true if one was still pending
    pub fn cancel(&mut self) -> bool {
        match self.armed.take() {
            Some((token, handle)) => {
                let was_pending = !handle.is_finished();
                token.cancel();
                was_pending
            }
            None => false,
        }
    }

    /// True while the timer is armed and has not fired
    pub fn is_pending(&self) -> bool {
        self.armed
            .as_ref()
            .map_or(false, |(token, handle)| {
                !token.is_cancelled() && !handle.is_finished()
            })
    }
}

impl Drop for CancellableTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Text input that commits after a quiet period
///
/// # Examples
///
/// ```
/// use gourmet::browse::DebouncedInput;
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() {
/// let (mut input, mut commits) = DebouncedInput::new(Duration::from_millis(10));
/// input.input("ram");
/// input.input("ramen");
/// assert_eq!(input.local(), "ramen");
/// assert_eq!(commits.recv().await.as_deref(), Some("ramen"));
/// # }
/// ```
#[derive(Debug)]
pub struct DebouncedInput {
    delay: Duration,
    local: String,
    timer: CancellableTimer,
    commits: mpsc::UnboundedSender<String>,
}

impl DebouncedInput {
    /// Create an input and the receiver its commits are delivered on
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let input = Self {
            delay,
            local: String::new(),
            timer: CancellableTimer::new(),
            commits: tx,
        };
        (input, rx)
    }

    /// Record a new raw value and restart the quiet period
    pub fn input(&mut self, value: impl Into<String>) {
        self.local = value.into();
        let committed = self.local.clone();
        let tx = self.commits.clone();
        self.timer.start(self.delay, move || {
            // The receiver is gone only when the consumer has shut down.
            let _ = tx.send(committed);
        });
    }

    /// Adopt a value set by the owner, dropping any pending commit
    pub fn sync(&mut self, value: impl Into<String>) {
        self.local = value.into();
        if self.timer.cancel() {
            tracing::debug!("Pending search commit dropped by resync");
        }
    }

    /// Empty the buffer and commit the empty string right away
    pub fn clear(&mut self) {
        self.timer.cancel();
        self.local.clear();
        let _ = self.commits.send(String::new());
    }

    /// The value as typed so far
    pub fn local(&self) -> &str {
        &self.local
    }

    /// Whether a commit is scheduled
    pub fn is_pending(&self) -> bool {
        self.timer.is_pending()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}
