use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::config::CoordinateMode;

/// Publish/subscribe registry for coordinate-mode changes
///
/// Every view interested in the active mode subscribes and receives each
/// change on its own channel. Subscribers whose receiver has been dropped
/// are pruned on the next publish.
pub struct ModeRegistry {
    current: CoordinateMode,
    subscribers: Vec<Sender<CoordinateMode>>,
}

impl ModeRegistry {
    pub fn new(initial: CoordinateMode) -> Self {
        Self {
            current: initial,
            subscribers: Vec::new(),
        }
    }

    pub fn current(&self) -> CoordinateMode {
        self.current
    }

    /// Register a new listener; changes published afterwards are delivered
    pub fn subscribe(&mut self) -> Receiver<CoordinateMode> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Record the new mode and notify subscribers
    ///
    /// Returns the number of subscribers notified. Publishing the current
    /// mode again is a no-op.
    pub fn publish(&mut self, mode: CoordinateMode) -> usize {
        if mode == self.current {
            return 0;
        }
        self.current = mode;

        let before = self.subscribers.len();
        self.subscribers.retain(|tx| tx.send(mode).is_ok());
        let dropped = before - self.subscribers.len();
        if dropped > 0 {
            log::debug!("Pruned {} closed mode subscribers", dropped);
        }
        self.subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl Default for ModeRegistry {
    fn default() -> Self {
        Self::new(CoordinateMode::default())
    }
}
