//! Background model loading with a channel-based readiness signal.

use std::path::PathBuf;

use flume::{Receiver, Sender, TryRecvError};

use crate::assets::{GltfLoader, LoadedModel};
use crate::errors::{Result, WalkerError};

/// A model load in flight. Poll it once per frame; it resolves exactly once.
#[derive(Debug)]
pub struct ModelLoad {
    rx: Receiver<Result<LoadedModel>>,
}

impl ModelLoad {
    /// Loads `path` on a worker thread.
    pub fn spawn(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let (tx, load) = Self::channel();

        std::thread::Builder::new()
            .name("model-loader".into())
            .spawn(move || {
                let result = GltfLoader::load(&path);
                // The receiver may already be gone if the app shut down.
                let _ = tx.send(result);
            })?;

        Ok(load)
    }

    /// A pending load completed by whoever holds the sender.
    #[must_use]
    pub fn channel() -> (Sender<Result<LoadedModel>>, Self) {
        let (tx, rx) = flume::bounded(1);
        (tx, Self { rx })
    }

    /// A load that is already resolved.
    #[must_use]
    pub fn resolved(result: Result<LoadedModel>) -> Self {
        let (tx, load) = Self::channel();
        let _ = tx.send(result);
        load
    }

    /// `None` while the load is still running.
    ///
    /// A worker that exits without sending resolves to
    /// [`WalkerError::LoadWorkerLost`].
    pub fn poll(&self) -> Option<Result<LoadedModel>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(WalkerError::LoadWorkerLost)),
        }
    }
}
