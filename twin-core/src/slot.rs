//! The single current-forecast slot.
//!
//! A snapshot is swapped in whole or not at all; readers only ever see a
//! complete [`ForecastSnapshot`]. There is one writer discipline (replace)
//! and any number of readers.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};

use crate::snapshot::ForecastSnapshot;

pub type SharedSnapshot = Arc<ForecastSnapshot>;

#[derive(Debug)]
pub struct ForecastSlot {
    tx: watch::Sender<Option<SharedSnapshot>>,
}

impl ForecastSlot {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// The snapshot currently displayed, if any.
    pub fn current(&self) -> Option<SharedSnapshot> {
        self.tx.borrow().clone()
    }

    /// Receiver notified on every replacement.
    pub fn subscribe(&self) -> watch::Receiver<Option<SharedSnapshot>> {
        self.tx.subscribe()
    }

    /// Replaces the current snapshot unconditionally.
    ///
    /// Whichever response arrives last wins, even if its request was sent
    /// earlier than the one it displaces.
    pub fn publish(
        &self,
        snapshot: SharedSnapshot,
    ) {
        info!(sequence = snapshot.sequence, "forecast published");
        self.tx.send_replace(Some(snapshot));
    }

    /// Replaces the current snapshot only if `snapshot` was dispatched after
    /// it. Returns whether the slot changed.
    pub fn publish_if_newer(
        &self,
        snapshot: SharedSnapshot,
    ) -> bool {
        let sequence = snapshot.sequence;
        let replaced = self.tx.send_if_modified(|current| match current {
            Some(existing) if existing.sequence >= sequence => false,
            _ => {
                *current = Some(snapshot);
                true
            }
        });

        if replaced {
            info!(sequence, "forecast published");
        } else {
            debug!(sequence, "discarding stale forecast");
        }
        replaced
    }
}

impl Default for ForecastSlot {
    fn default() -> Self {
        Self::new()
    }
}
