use std::sync::mpsc;

use crate::error::AssetError;

/// Sending half of a [`PendingLoad`], held by whoever completes the load.
pub type LoadSender<T> = mpsc::Sender<Result<T, AssetError>>;

/// A non-blocking handle to an in-flight load.
/// Call `try_recv()` each frame to check for results without blocking the viewer loop.
pub struct PendingLoad<T> {
    receiver: mpsc::Receiver<Result<T, AssetError>>,
}

impl<T> PendingLoad<T> {
    /// Create a handle together with the sender that completes it
    pub fn pair() -> (LoadSender<T>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self { receiver: rx })
    }

    /// A handle that is already complete
    pub fn ready(result: Result<T, AssetError>) -> Self {
        let (tx, pending) = Self::pair();
        let _ = tx.send(result);
        pending
    }

    /// Non-blocking check for the result. Returns `None` if still pending.
    /// A sender dropped without completing yields `Cancelled`.
    pub fn try_recv(&self) -> Option<Result<T, AssetError>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => Some(Err(AssetError::Cancelled)),
        }
    }

    /// Blocking wait for the result. Only use outside the frame loop.
    pub fn wait(self) -> Result<T, AssetError> {
        self.receiver.recv().map_err(|_| AssetError::Cancelled)?
    }
}
