//! Abstract key events consumed by human players.
//!
//! The terminal front end maps its own key codes onto [`KeyCommand`]s; the
//! players never see a terminal library type.

use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard, mpsc};

/// A semantic key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCommand {
    /// Move the column cursor one step left.
    MoveLeft,
    /// Move the column cursor one step right.
    MoveRight,
    /// Jump the cursor to a 1-based column.
    Select(usize),
    /// Drop a piece in the column under the cursor.
    Confirm,
}

/// Shared receiving end of the key-event stream.
///
/// Cloning shares the same stream, so two human players at one keyboard
/// read from one source. Only the player whose turn it is holds the lock.
#[derive(Debug, Clone)]
pub struct KeyEvents {
    rx: Arc<Mutex<mpsc::UnboundedReceiver<KeyCommand>>>,
}

impl KeyEvents {
    /// Creates a key-event stream and the sender that feeds it.
    pub fn channel() -> (mpsc::UnboundedSender<KeyCommand>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            tx,
            Self {
                rx: Arc::new(Mutex::new(rx)),
            },
        )
    }

    /// Takes exclusive access to the stream for one decision.
    pub async fn lock(&self) -> MutexGuard<'_, mpsc::UnboundedReceiver<KeyCommand>> {
        self.rx.lock().await
    }
}
