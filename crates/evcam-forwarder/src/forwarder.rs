//! The forwarder itself: wires the dispatcher to the driver's data server,
//! owns the staging buffers and the three publisher threads, and tears the
//! whole arrangement down on `stop()`/`Drop`.

use crate::channels::ForwarderChannels;
use crate::config::{ForwarderConfig, ForwarderOptions};
use crate::dispatcher::UpdateDispatcher;
use crate::error::ForwardResult;
use crate::staging::{StagedEvents, UpdateSignal};
use crate::workers::{self, WorkerContext};
use evcam_sensor::{FrameDataServer, FrameListener, ListenerId, SensorQuery};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::{debug, error};

/// Fans sensor frame updates out to the five output channels.
///
/// Construction registers the internal dispatcher as a frame listener on the
/// driver's data server and spawns the three publisher threads. `stop()`
/// (also run by `Drop`) unregisters, clears the running flag, issues one
/// final broadcast so no thread stays parked, and joins all handles.
pub struct DataForwarder {
    data_server: Arc<FrameDataServer>,
    listener_id: ListenerId,
    /// Keeps the registered listener alive; the data server only holds it
    /// weakly.
    _dispatcher: Arc<UpdateDispatcher>,
    options: Arc<ForwarderOptions>,
    running: Arc<AtomicBool>,
    raw_events: Arc<StagedEvents>,
    polarity_events: Arc<StagedEvents>,
    imu_signal: Arc<UpdateSignal>,
    handles: Vec<JoinHandle<()>>,
}

impl DataForwarder {
    pub fn start(
        sensor: Arc<dyn SensorQuery>,
        data_server: Arc<FrameDataServer>,
        config: ForwarderConfig,
        channels: ForwarderChannels,
    ) -> ForwardResult<Self> {
        let options = Arc::new(ForwarderOptions::from_config(&config));
        let running = Arc::new(AtomicBool::new(true));
        let raw_events = Arc::new(StagedEvents::new());
        let polarity_events = Arc::new(StagedEvents::new());
        let imu_signal = Arc::new(UpdateSignal::new());

        let ctx = WorkerContext {
            sensor: Arc::clone(&sensor),
            options: Arc::clone(&options),
            channels,
            frame_id: config.frame_id.clone(),
            running: Arc::clone(&running),
            imu_seq: Arc::new(AtomicU64::new(0)),
        };

        let mut handles = Vec::with_capacity(3);
        handles.push(workers::spawn_raw_events(
            ctx.clone(),
            Arc::clone(&raw_events),
        )?);
        handles.push(workers::spawn_polarity_image(
            ctx.clone(),
            Arc::clone(&polarity_events),
        )?);
        handles.push(workers::spawn_imu(ctx, Arc::clone(&imu_signal))?);

        let dispatcher = Arc::new(UpdateDispatcher::new(
            sensor,
            Arc::clone(&raw_events),
            Arc::clone(&polarity_events),
            Arc::clone(&imu_signal),
        ));
        let listener: Arc<dyn FrameListener> = dispatcher.clone();
        let listener_id = data_server.register(&listener);
        debug!(frame_id = %config.frame_id, "data forwarder started");

        Ok(Self {
            data_server,
            listener_id,
            _dispatcher: dispatcher,
            options,
            running,
            raw_events,
            polarity_events,
            imu_signal,
            handles,
        })
    }

    /// Live feature toggles, shared with the publisher threads.
    pub fn options(&self) -> Arc<ForwarderOptions> {
        Arc::clone(&self.options)
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Unregister from the driver and join the publisher threads.
    /// Idempotent.
    pub fn stop(&mut self) {
        if !self.running.swap(false, Ordering::Relaxed) {
            return;
        }
        self.data_server.unregister(self.listener_id);

        // Final broadcast: a consumer parked in its wait would otherwise
        // never observe the cleared flag.
        self.raw_events.wake();
        self.polarity_events.wake();
        self.imu_signal.wake();

        for handle in self.handles.drain(..) {
            if handle.join().is_err() {
                error!("publisher thread panicked during shutdown");
            }
        }
        debug!("data forwarder stopped");
    }
}

impl Drop for DataForwarder {
    fn drop(&mut self) {
        self.stop();
    }
}
