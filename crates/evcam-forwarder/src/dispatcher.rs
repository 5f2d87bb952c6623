//! The sensor-callback entry point.
//!
//! [`UpdateDispatcher`] runs on the driver's acquisition thread and must
//! return quickly: it pulls the event vector at most once, stages it into
//! the two buffers opportunistically, and signals the consumers. It never
//! publishes and never waits on a consumer.

use crate::staging::{StagedEvents, UpdateSignal};
use evcam_sensor::modes::should_fetch_events;
use evcam_sensor::{FrameListener, RawEvent, SensorQuery};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{error, trace};

pub struct UpdateDispatcher {
    sensor: Arc<dyn SensorQuery>,
    raw_events: Arc<StagedEvents>,
    polarity_events: Arc<StagedEvents>,
    imu_signal: Arc<UpdateSignal>,
    /// Scratch vector reused across cycles; only the driver callback thread
    /// takes this lock.
    scratch: Mutex<Vec<RawEvent>>,
}

impl UpdateDispatcher {
    pub fn new(
        sensor: Arc<dyn SensorQuery>,
        raw_events: Arc<StagedEvents>,
        polarity_events: Arc<StagedEvents>,
        imu_signal: Arc<UpdateSignal>,
    ) -> Self {
        Self {
            sensor,
            raw_events,
            polarity_events,
            imu_signal,
            scratch: Mutex::new(Vec::new()),
        }
    }

    fn dispatch(&self) {
        let mode = self.sensor.fixed_mode();
        let loop_enabled = self.sensor.loop_mode_enabled();

        if should_fetch_events(mode, loop_enabled) {
            let mut scratch = self.scratch.lock();
            match self.sensor.event_data(&mut scratch) {
                Ok(()) => {
                    // Each buffer is staged independently; a busy consumer
                    // costs that buffer one generation, nothing more.
                    if !self.raw_events.try_stage(&scratch) {
                        trace!("raw-events buffer busy, generation skipped");
                    }
                    if !self.polarity_events.try_stage(&scratch) {
                        trace!("polarity buffer busy, generation skipped");
                    }
                }
                Err(e) => {
                    error!("event readout failed: {e}");
                }
            }
        }

        // IMU consumption does not depend on staged event data.
        self.imu_signal.raise();
    }
}

impl FrameListener for UpdateDispatcher {
    fn on_frame_data(&self) {
        self.dispatch();
    }
}
