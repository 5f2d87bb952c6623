//! Publication seam and the in-process channel implementation.
//!
//! The forwarder talks to the middleware through [`Publication`]: publish a
//! message, and ask whether anyone is listening so expensive construction
//! can be skipped. [`LocalChannel`] is the in-process implementation, fanning
//! each published message out to every subscriber's own crossbeam queue; a
//! wire transport binds the same trait outside this workspace.

use crate::error::ForwardResult;
use crossbeam::channel::{self, Receiver, Sender, TrySendError};
use evcam_msgs::{
    EventArrayMessage, EventVectorMessage, ImageMessage, ImuBatchMessage, InertialMessage,
};
use parking_lot::RwLock;
use std::ops::Deref;
use std::sync::{Arc, Weak};
use tracing::trace;

/// One named output channel of the forwarder.
pub trait Publication<M>: Send + Sync {
    /// Hand a message to the transport. Failures are reported, never fatal.
    fn publish(&self, message: M) -> ForwardResult<()>;

    /// Number of active subscribers.
    fn subscriber_count(&self) -> usize;

    /// Whether building a message for this channel is worth the work.
    fn has_subscribers(&self) -> bool {
        self.subscriber_count() > 0
    }
}

enum Depth {
    Unbounded,
    /// Hold only the newest message; a stale undelivered one is discarded.
    LatestOnly,
}

/// A subscriber's receiving end. Dereferences to the underlying crossbeam
/// [`Receiver`]; dropping it detaches the subscriber from the channel.
pub struct Subscription<M> {
    rx: Receiver<M>,
    _liveness: Arc<()>,
}

impl<M> Deref for Subscription<M> {
    type Target = Receiver<M>;

    fn deref(&self) -> &Receiver<M> {
        &self.rx
    }
}

/// Publisher-side endpoint for one subscriber. `drain` is a second handle on
/// the subscriber's queue, used to discard the stale message when a
/// latest-only channel is full; because it keeps the queue alive, subscriber
/// departure is tracked through the liveness token instead.
struct Endpoint<M> {
    tx: Sender<M>,
    drain: Receiver<M>,
    liveness: Weak<()>,
}

impl<M> Endpoint<M> {
    fn is_attached(&self) -> bool {
        self.liveness.strong_count() > 0
    }
}

/// In-process fan-out channel.
///
/// Every subscriber gets its own queue, so a slow subscriber never blocks
/// the publisher or its peers. Departed subscribers are pruned on the next
/// publish or count.
pub struct LocalChannel<M> {
    name: &'static str,
    endpoints: RwLock<Vec<Endpoint<M>>>,
    depth: Depth,
}

impl<M: Clone + Send + 'static> LocalChannel<M> {
    /// A channel whose subscribers buffer every message.
    pub fn unbounded(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            endpoints: RwLock::new(Vec::new()),
            depth: Depth::Unbounded,
        })
    }

    /// A channel whose subscribers only ever hold the newest message.
    pub fn latest_only(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            endpoints: RwLock::new(Vec::new()),
            depth: Depth::LatestOnly,
        })
    }

    /// Channel name, as the middleware topic would be called.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Attach a new subscriber and return its receiving end.
    pub fn subscribe(&self) -> Subscription<M> {
        let (tx, rx) = match self.depth {
            Depth::Unbounded => channel::unbounded(),
            Depth::LatestOnly => channel::bounded(1),
        };
        let liveness = Arc::new(());
        self.endpoints.write().push(Endpoint {
            tx,
            drain: rx.clone(),
            liveness: Arc::downgrade(&liveness),
        });
        Subscription {
            rx,
            _liveness: liveness,
        }
    }

    fn deliver(endpoint: &Endpoint<M>, message: M) {
        if let Err(TrySendError::Full(message)) = endpoint.tx.try_send(message) {
            // Latest-only queue still holds the previous frame: discard it,
            // then retry once. A concurrent consumer may have emptied the
            // queue either way.
            let _ = endpoint.drain.try_recv();
            let _ = endpoint.tx.try_send(message);
        }
    }
}

impl<M: Clone + Send + 'static> Publication<M> for LocalChannel<M> {
    fn publish(&self, message: M) -> ForwardResult<()> {
        let mut endpoints = self.endpoints.write();
        endpoints.retain(Endpoint::is_attached);
        if endpoints.is_empty() {
            trace!(channel = self.name, "publish with no subscribers, dropped");
            return Ok(());
        }

        for endpoint in endpoints.iter() {
            Self::deliver(endpoint, message.clone());
        }
        Ok(())
    }

    fn subscriber_count(&self) -> usize {
        let mut endpoints = self.endpoints.write();
        endpoints.retain(Endpoint::is_attached);
        endpoints.len()
    }
}

/// The five output channels of the forwarder, behind the publication seam.
#[derive(Clone)]
pub struct ForwarderChannels {
    /// Rich event-vector messages; built only when subscribed.
    pub event_vector: Arc<dyn Publication<EventVectorMessage>>,
    /// Generic event arrays; always published.
    pub events: Arc<dyn Publication<EventArrayMessage>>,
    /// Rich IMU batches.
    pub imu_batch: Arc<dyn Publication<ImuBatchMessage>>,
    /// Generic per-sample inertial messages; always published.
    pub imu: Arc<dyn Publication<InertialMessage>>,
    /// Polarity raster images; built only when subscribed.
    pub polarity_image: Arc<dyn Publication<ImageMessage>>,
}

/// The forwarder's channels bound to in-process [`LocalChannel`]s.
///
/// Keep this around to `subscribe()`; hand [`LocalChannels::as_publications`]
/// to the forwarder.
pub struct LocalChannels {
    pub event_vector: Arc<LocalChannel<EventVectorMessage>>,
    pub events: Arc<LocalChannel<EventArrayMessage>>,
    pub imu_batch: Arc<LocalChannel<ImuBatchMessage>>,
    pub imu: Arc<LocalChannel<InertialMessage>>,
    pub polarity_image: Arc<LocalChannel<ImageMessage>>,
}

impl LocalChannels {
    pub fn new() -> Self {
        Self {
            event_vector: LocalChannel::unbounded("event_vector"),
            events: LocalChannel::unbounded("events"),
            imu_batch: LocalChannel::unbounded("imu_batch"),
            imu: LocalChannel::unbounded("imu"),
            // The image consumer only ever wants the newest frame.
            polarity_image: LocalChannel::latest_only("polarity_img"),
        }
    }

    pub fn as_publications(&self) -> ForwarderChannels {
        ForwarderChannels {
            event_vector: self.event_vector.clone(),
            events: self.events.clone(),
            imu_batch: self.imu_batch.clone(),
            imu: self.imu.clone(),
            polarity_image: self.polarity_image.clone(),
        }
    }
}

impl Default for LocalChannels {
    fn default() -> Self {
        Self::new()
    }
}
