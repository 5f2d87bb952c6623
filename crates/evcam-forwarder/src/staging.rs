//! Single-generation handoff between the dispatcher and one consumer each.
//!
//! A [`StagedEvents`] buffer holds at most the most recent event generation.
//! The dispatcher writes with a non-blocking `try_lock` and simply skips the
//! cycle when the consumer is mid-read, so the sensor callback never stalls
//! and no backlog forms. Wakeups coalesce: however many generations were
//! staged while the consumer was busy, it observes only the newest.
//!
//! Consumers read the buffer while holding its lock, so a record is never
//! torn between two generations; the cost is that the dispatcher skips
//! staging (loses a generation) for the duration of the read. That lossy
//! trade is deliberate.

use evcam_sensor::RawEvent;
use parking_lot::{Condvar, Mutex, MutexGuard};
use std::sync::atomic::{AtomicBool, Ordering};

/// Buffer contents plus the new-generation mark.
pub struct EventSlot {
    pub events: Vec<RawEvent>,
    dirty: bool,
}

/// Staging buffer paired with its wakeup signal.
pub struct StagedEvents {
    slot: Mutex<EventSlot>,
    signal: Condvar,
}

impl StagedEvents {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(EventSlot {
                events: Vec::new(),
                dirty: false,
            }),
            signal: Condvar::new(),
        }
    }

    /// Overwrite the buffer with a fresh generation and wake the consumer.
    ///
    /// Non-blocking: returns `false` without staging if the consumer
    /// currently holds the buffer.
    pub fn try_stage(&self, events: &[RawEvent]) -> bool {
        let Some(mut slot) = self.slot.try_lock() else {
            return false;
        };
        slot.events.clear();
        slot.events.extend_from_slice(events);
        slot.dirty = true;
        drop(slot);
        self.signal.notify_all();
        true
    }

    /// Block until a new generation is staged or `running` clears.
    ///
    /// On wakeup the generation mark is consumed and the locked slot is
    /// returned; the caller reads `events` while holding the guard. Returns
    /// `None` once `running` is false.
    pub fn wait_for_generation(&self, running: &AtomicBool) -> Option<MutexGuard<'_, EventSlot>> {
        let mut slot = self.slot.lock();
        while running.load(Ordering::Relaxed) && !slot.dirty {
            self.signal.wait(&mut slot);
        }
        if !running.load(Ordering::Relaxed) {
            return None;
        }
        slot.dirty = false;
        Some(slot)
    }

    /// Whether a staged generation is waiting to be consumed.
    pub fn has_pending(&self) -> bool {
        self.slot.lock().dirty
    }

    /// Wake the consumer without staging, so it can observe a cleared
    /// running flag. Takes the lock briefly so a consumer between its flag
    /// check and its wait cannot miss the notification.
    pub fn wake(&self) {
        drop(self.slot.lock());
        self.signal.notify_all();
    }
}

impl Default for StagedEvents {
    fn default() -> Self {
        Self::new()
    }
}

/// Bufferless wakeup signal for the IMU consumer.
///
/// The IMU thread pulls live from the driver on wake, so there is nothing to
/// stage; the signal only records that at least one update happened since
/// the consumer last looked.
pub struct UpdateSignal {
    pending: Mutex<bool>,
    signal: Condvar,
}

impl UpdateSignal {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(false),
            signal: Condvar::new(),
        }
    }

    /// Raise the signal from the dispatcher. Non-blocking: if the consumer
    /// is between wake and wait, the pending mark is skipped and this
    /// update coalesces into a later one.
    pub fn raise(&self) {
        if let Some(mut pending) = self.pending.try_lock() {
            *pending = true;
        }
        self.signal.notify_all();
    }

    /// Block until the signal is raised or `running` clears. Returns `false`
    /// once `running` is false.
    pub fn wait(&self, running: &AtomicBool) -> bool {
        let mut pending = self.pending.lock();
        while running.load(Ordering::Relaxed) && !*pending {
            self.signal.wait(&mut pending);
        }
        if !running.load(Ordering::Relaxed) {
            return false;
        }
        *pending = false;
        true
    }

    /// Wake the consumer without raising, for shutdown.
    pub fn wake(&self) {
        drop(self.pending.lock());
        self.signal.notify_all();
    }
}

impl Default for UpdateSignal {
    fn default() -> Self {
        Self::new()
    }
}
