//! Bounded, lossy action queue.

use super::ViewAction;
use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError, TrySendError};
use tracing::{debug, trace};

/// Default number of pending actions.
pub const DEFAULT_QUEUE_CAPACITY: usize = 16;

/// Producer handle. Cheap to clone; every clone feeds the same queue.
#[derive(Debug, Clone)]
pub struct ActionSender {
    tx: SyncSender<ViewAction>,
}

/// Consumer handle, owned by the [`Reader`](super::Reader).
#[derive(Debug)]
pub struct ActionReceiver {
    rx: Receiver<ViewAction>,
}

/// Create a queue holding at most `capacity` pending actions (at least one).
pub fn action_queue(capacity: usize) -> (ActionSender, ActionReceiver) {
    let (tx, rx) = mpsc::sync_channel(capacity.max(1));
    (ActionSender { tx }, ActionReceiver { rx })
}

impl ActionSender {
    /// Post `action` without blocking.
    ///
    /// Returns `false` if the action was dropped because the queue is full or the
    /// consumer is gone.
    pub fn send(&self, action: ViewAction) -> bool {
        match self.tx.try_send(action) {
            Ok(()) => true,
            Err(TrySendError::Full(action)) => {
                trace!(action = action.name(), "action queue full, dropping action");
                false
            }
            Err(TrySendError::Disconnected(action)) => {
                debug!(action = action.name(), "action consumer gone");
                false
            }
        }
    }
}

impl ActionReceiver {
    /// Take the oldest pending action, if any.
    pub fn try_next(&self) -> Option<ViewAction> {
        match self.rx.try_recv() {
            Ok(action) => Some(action),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }
}
