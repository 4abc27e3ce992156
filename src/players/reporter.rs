//! Advisory side channel from a deciding player to its observers.

use tokio::sync::mpsc;
use tracing::trace;

/// What a player reported while deciding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalKind {
    /// Human-readable reasoning step.
    Thinking(String),
    /// Columns currently under consideration.
    Highlight(Vec<usize>),
}

/// A report tagged with the turn it was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signal {
    /// Turn the issuing decision belongs to.
    pub turn: u64,
    /// The report itself.
    pub kind: SignalKind,
}

/// Handle a player uses to publish thinking and highlight notes.
///
/// Notes never influence the outcome of a decision. Sending to a closed
/// channel is silently ignored.
#[derive(Debug, Clone)]
pub struct Reporter {
    turn: u64,
    tx: Option<mpsc::UnboundedSender<Signal>>,
}

impl Reporter {
    /// Creates a reporter for `turn` sending into `tx`.
    pub fn new(turn: u64, tx: mpsc::UnboundedSender<Signal>) -> Self {
        Self { turn, tx: Some(tx) }
    }

    /// Creates a reporter together with the receiving end.
    pub fn channel(turn: u64) -> (Self, mpsc::UnboundedReceiver<Signal>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(turn, tx), rx)
    }

    /// A reporter nobody listens to.
    pub fn detached() -> Self {
        Self { turn: 0, tx: None }
    }

    /// Turn this reporter is tagged with.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Publishes a reasoning step.
    pub fn thinking(&self, text: impl Into<String>) {
        self.send(SignalKind::Thinking(text.into()));
    }

    /// Publishes the set of columns under consideration.
    pub fn highlight(&self, columns: impl Into<Vec<usize>>) {
        self.send(SignalKind::Highlight(columns.into()));
    }

    fn send(&self, kind: SignalKind) {
        if let Some(tx) = &self.tx {
            if tx.send(Signal { turn: self.turn, kind }).is_err() {
                trace!(turn = self.turn, "Reporter channel closed");
            }
        }
    }
}
