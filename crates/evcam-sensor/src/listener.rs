// Copyright 2026 Evcam Project Developers
// SPDX-License-Identifier: Apache-2.0

//! Frame-update listener registry.
//!
//! The driver owns one [`FrameDataServer`] and calls
//! [`FrameDataServer::notify_frame_data`] from its acquisition thread once
//! per frame update. Listeners are held weakly, so a listener that is
//! dropped without unregistering is pruned on the next notification rather
//! than kept alive by the registry.

use parking_lot::RwLock;
use std::sync::{Arc, Weak};
use tracing::debug;

/// Callback interface invoked synchronously on every sensor frame update.
///
/// Implementations must return quickly: the call happens on the driver's
/// acquisition thread, and a slow listener stalls the sensor read path.
pub trait FrameListener: Send + Sync {
    fn on_frame_data(&self);
}

/// Opaque handle identifying one registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Registry of frame-update listeners, owned by the driver.
pub struct FrameDataServer {
    listeners: RwLock<Vec<(ListenerId, Weak<dyn FrameListener>)>>,
    next_id: RwLock<u64>,
}

impl FrameDataServer {
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
            next_id: RwLock::new(0),
        }
    }

    /// Register a listener for frame updates.
    pub fn register(&self, listener: &Arc<dyn FrameListener>) -> ListenerId {
        let mut next_id = self.next_id.write();
        let id = ListenerId(*next_id);
        *next_id += 1;

        self.listeners.write().push((id, Arc::downgrade(listener)));
        debug!("registered frame listener {:?}", id);
        id
    }

    /// Remove a registration. Unknown ids are ignored.
    pub fn unregister(&self, id: ListenerId) {
        self.listeners.write().retain(|(lid, _)| *lid != id);
        debug!("unregistered frame listener {:?}", id);
    }

    /// Invoke every live listener, pruning any that have been dropped.
    pub fn notify_frame_data(&self) {
        // Snapshot under the read lock so a listener can unregister itself
        // (or register another) from inside its callback without deadlock.
        let snapshot: Vec<(ListenerId, Weak<dyn FrameListener>)> =
            self.listeners.read().clone();

        let mut dead: Vec<ListenerId> = Vec::new();
        for (id, weak) in &snapshot {
            match weak.upgrade() {
                Some(listener) => listener.on_frame_data(),
                None => dead.push(*id),
            }
        }

        if !dead.is_empty() {
            self.listeners
                .write()
                .retain(|(id, _)| !dead.contains(id));
        }
    }

    /// Number of currently registered (possibly dead) listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }
}

impl Default for FrameDataServer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingListener {
        calls: AtomicUsize,
    }

    impl FrameListener for CountingListener {
        fn on_frame_data(&self) {
            self.calls.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[test]
    fn notify_reaches_registered_listeners() {
        let server = FrameDataServer::new();
        let listener = Arc::new(CountingListener {
            calls: AtomicUsize::new(0),
        });
        let as_dyn: Arc<dyn FrameListener> = listener.clone();

        let id = server.register(&as_dyn);
        server.notify_frame_data();
        server.notify_frame_data();
        assert_eq!(listener.calls.load(Ordering::Relaxed), 2);

        server.unregister(id);
        server.notify_frame_data();
        assert_eq!(listener.calls.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn dropped_listeners_are_pruned() {
        let server = FrameDataServer::new();
        let listener = Arc::new(CountingListener {
            calls: AtomicUsize::new(0),
        });
        let as_dyn: Arc<dyn FrameListener> = listener.clone();
        server.register(&as_dyn);
        assert_eq!(server.listener_count(), 1);

        drop(as_dyn);
        drop(listener);
        server.notify_frame_data();
        assert_eq!(server.listener_count(), 0);
    }
}
